//! Backend contract for data-parallel grid kernels
//!
//! A kernel is a pure function of its output index. One call to
//! [`GridBackend::map_grid_i32`] or [`GridBackend::map_tensor_f32`] is one
//! dispatch: every output cell is written exactly once, and the call
//! returns only after all cells are written. Iterative algorithms (the
//! distance-field relaxation) read the previous pass and write a fresh
//! buffer, so each dispatch doubles as the barrier between passes.

use crate::error::{ComputeError, ComputeResult};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-cell kernel over a 2-D index space, called as `kernel(x, y)`.
pub type GridKernel<'a> = dyn Fn(usize, usize) -> i32 + Sync + 'a;

/// Per-cell kernel over a 3-D index space, called as `kernel(i, j, k)`.
pub type TensorKernel<'a> = dyn Fn(usize, usize, usize) -> f32 + Sync + 'a;

/// 2-D dispatch shape; output cell `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn check(&self, out_len: usize) -> ComputeResult<()> {
        if self.is_empty() {
            return Err(ComputeError::EmptyShape([self.width, self.height, 1]));
        }
        check_len(self.len(), out_len)
    }
}

/// 3-D dispatch shape; output cell `(i, j, k)` lives at
/// `(i * nj + j) * nk + k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TensorShape {
    pub ni: usize,
    pub nj: usize,
    pub nk: usize,
}

impl TensorShape {
    pub fn new(ni: usize, nj: usize, nk: usize) -> Self {
        Self { ni, nj, nk }
    }

    pub fn len(&self) -> usize {
        self.ni * self.nj * self.nk
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn check(&self, out_len: usize) -> ComputeResult<()> {
        if self.is_empty() {
            return Err(ComputeError::EmptyShape([self.ni, self.nj, self.nk]));
        }
        check_len(self.len(), out_len)
    }
}

fn check_len(expected: usize, actual: usize) -> ComputeResult<()> {
    if expected != actual {
        return Err(ComputeError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Executes data-parallel maps over 2-D and 3-D index spaces.
///
/// Implementations must produce exactly the values the kernel returns for
/// every index; the order in which cells are computed is unspecified.
pub trait GridBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fill `out` with `kernel(x, y)` for every cell of `shape`.
    fn map_grid_i32(
        &self,
        shape: GridShape,
        out: &mut [i32],
        kernel: &GridKernel<'_>,
    ) -> ComputeResult<()>;

    /// Fill `out` with `kernel(i, j, k)` for every cell of `shape`.
    fn map_tensor_f32(
        &self,
        shape: TensorShape,
        out: &mut [f32],
        kernel: &TensorKernel<'_>,
    ) -> ComputeResult<()>;

    /// Number of successful dispatches so far.
    fn dispatch_count(&self) -> u64;
}

/// Thread-safe dispatch counter shared by the backends.
#[derive(Debug, Default)]
pub struct DispatchCounter(AtomicU64);

impl DispatchCounter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
