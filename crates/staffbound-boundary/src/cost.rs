//! Transition costs between candidate rows
//!
//! The search window is sampled every `xstep` columns and every `ystep`
//! rows of the distance field. Slice `xi` of the cost tensor holds, for
//! every pair of candidate rows, the cost of the straight segment that
//! leaves column `xi` at the source row and reaches column `xi + 1` at the
//! destination row.
//!
//! A segment is sampled once per field column. Every sample adds
//! `1 / (1 + d)` for the distance `d` under it, plus the ink penalty when
//! it sits on ink, and the total is scaled by the segment length per
//! column, so steep segments cost more than flat ones through the same
//! territory.

use crate::distance::DistanceField;
use crate::error::{BoundaryError, BoundaryResult};
use log::debug;
use staffbound_compute::{GridBackend, TensorShape};
use std::time::Instant;

/// Candidate rows and columns of one search, in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingGrid {
    pub y0: u32,
    pub ystep: u32,
    pub numy: usize,
    pub x0: u32,
    pub xstep: u32,
    pub numx: usize,
}

impl SamplingGrid {
    /// Sample `[y0, y1)` every `ystep` rows and `[x0, x1)` every `xstep`
    /// columns.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::InvalidStep`] if either step is zero
    /// - [`BoundaryError::EmptyCostTensor`] if there is no candidate row or
    ///   fewer than two columns
    pub fn new(
        y0: u32,
        y1: u32,
        ystep: u32,
        x0: u32,
        x1: u32,
        xstep: u32,
    ) -> BoundaryResult<Self> {
        if xstep == 0 || ystep == 0 {
            return Err(BoundaryError::InvalidStep { xstep, ystep });
        }
        let numy = (y1.saturating_sub(y0) / ystep) as usize;
        let numx = (x1.saturating_sub(x0) / xstep) as usize;
        if numy == 0 || numx < 2 {
            return Err(BoundaryError::EmptyCostTensor { numx, numy });
        }
        Ok(Self {
            y0,
            ystep,
            numy,
            x0,
            xstep,
            numx,
        })
    }

    /// Field row of candidate `yi`.
    #[inline]
    pub fn row(&self, yi: usize) -> u32 {
        self.y0 + self.ystep * yi as u32
    }

    /// Field column of sample `xi`.
    #[inline]
    pub fn column(&self, xi: usize) -> u32 {
        self.x0 + self.xstep * xi as u32
    }

    pub fn shape(&self) -> TensorShape {
        TensorShape::new(self.numx, self.numy, self.numy)
    }
}

/// Dense `(numx, numy, numy)` tensor of transition costs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTensor {
    numx: usize,
    numy: usize,
    data: Vec<f32>,
}

impl CostTensor {
    /// Wrap row-major data indexed as `[xi][src][dst]`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::EmptyCostTensor`] for a zero-sized shape and
    /// [`BoundaryError::InvalidParameter`] if `data` has the wrong length.
    pub fn from_data(numx: usize, numy: usize, data: Vec<f32>) -> BoundaryResult<Self> {
        if numx == 0 || numy == 0 {
            return Err(BoundaryError::EmptyCostTensor { numx, numy });
        }
        if data.len() != numx * numy * numy {
            return Err(BoundaryError::InvalidParameter(format!(
                "cost data holds {} values, shape ({numx}, {numy}, {numy}) needs {}",
                data.len(),
                numx * numy * numy
            )));
        }
        Ok(Self { numx, numy, data })
    }

    pub fn numx(&self) -> usize {
        self.numx
    }

    pub fn numy(&self) -> usize {
        self.numy
    }

    /// Cost of moving from row `src` to row `dst` in slice `xi`.
    #[inline]
    pub fn get(&self, xi: usize, src: usize, dst: usize) -> f32 {
        self.data[(xi * self.numy + src) * self.numy + dst]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Nearest-integer `a / b` for `b > 0`, halves rounded up.
#[inline]
fn round_div(a: i64, b: i64) -> i64 {
    (2 * a + b).div_euclid(2 * b)
}

/// Cost of the segment from `(xi, src)` to `(xi + 1, dst)`.
///
/// This is the per-cell kernel; every backend evaluates exactly this
/// function, so their tensors are identical.
pub fn transition_cost(
    field: &DistanceField,
    grid: &SamplingGrid,
    ink_penalty: f32,
    xi: usize,
    src: usize,
    dst: usize,
) -> f32 {
    let xs = grid.column(xi) as i64;
    let ys = grid.row(src) as i64;
    let dy = grid.row(dst) as i64 - ys;
    let step = grid.xstep as i64;

    let mut sum = 0.0f32;
    for k in 0..step {
        let d = field.distance_at(xs + k, ys + round_div(dy * k, step));
        sum += 1.0 / (1.0 + d as f32);
        if d == 0 {
            sum += ink_penalty;
        }
    }
    let length = (((step * step + dy * dy) as f64).sqrt() / step as f64) as f32;
    sum * length
}

/// Evaluate the full cost tensor for `grid` on `backend`.
pub fn evaluate_costs(
    field: &DistanceField,
    grid: &SamplingGrid,
    ink_penalty: f32,
    backend: &dyn GridBackend,
) -> BoundaryResult<CostTensor> {
    let started = Instant::now();
    let shape = grid.shape();
    let mut data = vec![0.0f32; shape.len()];
    backend.map_tensor_f32(shape, &mut data, &|xi, src, dst| {
        transition_cost(field, grid, ink_penalty, xi, src, dst)
    })?;
    debug!(
        "cost tensor {}x{}x{} ({} backend) in {:.1} ms",
        grid.numx,
        grid.numy,
        grid.numy,
        backend.name(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(CostTensor {
        numx: grid.numx,
        numy: grid.numy,
        data,
    })
}
