//! Boundary assembly
//!
//! Produces one [`BoundaryCurve`] per staff gap. Every gap first tries the
//! empty-band detector on its search window; only gaps without an ink-free
//! row pay for the distance field, the cost tensor and the path search.
//! The distance field is built on the first such gap and shared by the
//! rest of the page.

use crate::band::find_empty_band;
use crate::cost::{SamplingGrid, evaluate_costs};
use crate::distance::DistanceField;
use crate::error::BoundaryResult;
use crate::geometry::StaffGeometry;
use crate::options::BoundaryOptions;
use crate::path::shortest_path;
use crate::window::{SearchWindow, WindowBounds, anchor_row, select_window};
use log::{debug, warn};
use staffbound_compute::GridBackend;
use staffbound_core::{Bitmap, BoundaryCurve};
use std::cell::OnceCell;

/// How a gap boundary was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundarySource {
    /// Straight line through the middle of an ink-free row run
    EmptyBand { start: u32, len: u32 },
    /// Minimum-cost path through the distance field
    Costed { total_cost: f64 },
}

/// Boundary of one staff gap.
#[derive(Debug, Clone, PartialEq)]
pub struct GapBoundary {
    pub gap: usize,
    pub window: SearchWindow,
    pub curve: BoundaryCurve,
    pub source: BoundarySource,
}

impl GapBoundary {
    pub fn is_trivial(&self) -> bool {
        matches!(self.source, BoundarySource::EmptyBand { .. })
    }
}

/// All boundaries of a page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBoundaries {
    gaps: Vec<GapBoundary>,
    distance_field: Option<DistanceField>,
}

impl PageBoundaries {
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn get(&self, gap: usize) -> Option<&GapBoundary> {
        self.gaps.get(gap)
    }

    pub fn gaps(&self) -> &[GapBoundary] {
        &self.gaps
    }

    /// Curves only, indexed by gap.
    pub fn curves(&self) -> impl Iterator<Item = &BoundaryCurve> + '_ {
        self.gaps.iter().map(|g| &g.curve)
    }

    /// The distance field, if some gap needed it.
    pub fn distance_field(&self) -> Option<&DistanceField> {
        self.distance_field.as_ref()
    }
}

/// Per-page boundary search state.
///
/// Borrows the page inputs and owns the lazily built distance field.
pub struct BoundaryFinder<'a> {
    bitmap: &'a Bitmap,
    geometry: &'a StaffGeometry,
    options: &'a BoundaryOptions,
    backend: &'a dyn GridBackend,
    field: OnceCell<DistanceField>,
}

impl<'a> BoundaryFinder<'a> {
    /// # Errors
    ///
    /// Returns [`crate::BoundaryError::InvalidParameter`] if the options
    /// do not validate.
    pub fn new(
        bitmap: &'a Bitmap,
        geometry: &'a StaffGeometry,
        options: &'a BoundaryOptions,
        backend: &'a dyn GridBackend,
    ) -> BoundaryResult<Self> {
        options.validate()?;
        Ok(Self {
            bitmap,
            geometry,
            options,
            backend,
            field: OnceCell::new(),
        })
    }

    /// Distance field of the page, built on first use.
    pub fn distance_field(&self) -> BoundaryResult<&DistanceField> {
        if let Some(field) = self.field.get() {
            return Ok(field);
        }
        let field = DistanceField::build(self.bitmap, self.options, self.backend)?;
        Ok(self.field.get_or_init(|| field))
    }

    /// Search window of `gap` after the fallback policy.
    pub fn window(&self, gap: usize) -> BoundaryResult<SearchWindow> {
        let bounds = select_window(
            self.geometry,
            gap,
            self.bitmap.height(),
            self.options.clearance,
        )?;
        if let WindowBounds::Fallback { y0, y1 } = bounds {
            warn!("gap {gap}: staff extrema leave no room, using medians ({y0}..{y1})");
        }
        bounds.into_window(gap)
    }

    /// Boundary of one gap.
    pub fn gap_boundary(&self, gap: usize) -> BoundaryResult<GapBoundary> {
        let window = self.window(gap)?;
        let width = self.bitmap.width();

        if let Some(band) = find_empty_band(self.bitmap, window.y0, window.y1) {
            debug!(
                "gap {gap}: empty band rows {}..{}",
                band.start,
                band.start + band.len
            );
            return Ok(GapBoundary {
                gap,
                window,
                curve: band.to_curve(width),
                source: BoundarySource::EmptyBand {
                    start: band.start,
                    len: band.len,
                },
            });
        }

        let (curve, total_cost) = self.costed_curve(gap, &window)?;
        Ok(GapBoundary {
            gap,
            window,
            curve,
            source: BoundarySource::Costed { total_cost },
        })
    }

    fn costed_curve(
        &self,
        gap: usize,
        window: &SearchWindow,
    ) -> BoundaryResult<(BoundaryCurve, f64)> {
        let field = self.distance_field()?;
        let scale = field.scale();
        let width = self.bitmap.width();
        let step = self.geometry.staff_thick;

        let fy0 = (window.y0 as f32 / scale) as u32;
        let fy1 = (window.y1 as f32 / scale) as u32;
        let fx1 = field.width().min((width as f32 / scale).ceil() as u32);
        let grid = SamplingGrid::new(fy0, fy1, step, 0, fx1, step)?;
        debug!(
            "gap {gap}: no empty band, costed search over {} columns x {} rows",
            grid.numx, grid.numy
        );

        let costs = evaluate_costs(field, &grid, self.options.ink_penalty, self.backend)?;
        let start_y = anchor_row(gap, self.geometry.num_staves(), grid.numy);
        let path = shortest_path(&costs, start_y)?;

        // Rows map back from the unrounded window top; `fy0` only picks the
        // field rows that were sampled.
        let y_offset = window.y0 as f64 / scale as f64;
        let rescale = |offset: f64, index: usize| {
            (scale as f64 * (offset + step as f64 * index as f64)).round() as u32
        };
        let mut curve = BoundaryCurve::with_capacity(path.points.len() + 1);
        for &(xi, yi) in &path.points {
            curve.push(rescale(0.0, xi), rescale(y_offset, yi))?;
        }
        if curve.last().is_some_and(|(x, _)| x < width) {
            curve.push(width, rescale(y_offset, start_y))?;
        }
        Ok((curve, path.total_cost))
    }

    /// Boundaries of every gap, top to bottom.
    pub fn all(&self) -> BoundaryResult<Vec<GapBoundary>> {
        (0..self.geometry.num_gaps())
            .map(|gap| self.gap_boundary(gap))
            .collect()
    }

    /// Release the distance field, if one was built.
    pub fn into_distance_field(self) -> Option<DistanceField> {
        self.field.into_inner()
    }
}

/// Find every boundary of a page.
///
/// # Errors
///
/// Fails on the first gap that fails; no partial result is returned.
pub fn find_boundaries(
    bitmap: &Bitmap,
    geometry: &StaffGeometry,
    options: &BoundaryOptions,
    backend: &dyn GridBackend,
) -> BoundaryResult<PageBoundaries> {
    let finder = BoundaryFinder::new(bitmap, geometry, options, backend)?;
    let gaps = finder.all()?;
    Ok(PageBoundaries {
        gaps,
        distance_field: finder.into_distance_field(),
    })
}
