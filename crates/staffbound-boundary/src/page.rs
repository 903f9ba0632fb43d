//! Page composition root
//!
//! A [`Page`] owns the inputs of one page (bitmap and staff geometry) and,
//! once computed, its boundaries. The engine itself only sees borrowed
//! inputs and returns owned outputs.

use crate::assemble::{PageBoundaries, find_boundaries};
use crate::error::BoundaryResult;
use crate::geometry::StaffGeometry;
use crate::options::BoundaryOptions;
use staffbound_compute::GridBackend;
use staffbound_core::Bitmap;

/// One score page under analysis.
#[derive(Debug, Clone)]
pub struct Page {
    bitmap: Bitmap,
    geometry: StaffGeometry,
    boundaries: Option<PageBoundaries>,
}

impl Page {
    pub fn new(bitmap: Bitmap, geometry: StaffGeometry) -> Self {
        Self {
            bitmap,
            geometry,
            boundaries: None,
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn geometry(&self) -> &StaffGeometry {
        &self.geometry
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Boundaries, if [`Page::find_boundaries`] has run.
    pub fn boundaries(&self) -> Option<&PageBoundaries> {
        self.boundaries.as_ref()
    }

    /// Store externally computed boundaries.
    pub fn set_boundaries(&mut self, boundaries: PageBoundaries) {
        self.boundaries = Some(boundaries);
    }

    /// Compute the boundaries once and keep them on the page.
    ///
    /// Later calls return the stored result without touching the backend.
    pub fn find_boundaries(
        &mut self,
        options: &BoundaryOptions,
        backend: &dyn GridBackend,
    ) -> BoundaryResult<&PageBoundaries> {
        let boundaries = match self.boundaries.take() {
            Some(found) => found,
            None => find_boundaries(&self.bitmap, &self.geometry, options, backend)?,
        };
        Ok(self.boundaries.insert(boundaries))
    }

    /// Rows belonging to `staff` at column `x`: between the boundary above
    /// it and the boundary below it.
    ///
    /// Returns `None` before boundaries are computed or for an unknown staff.
    pub fn staff_region(&self, staff: usize, x: u32) -> Option<StaffRegion> {
        let boundaries = self.boundaries.as_ref()?;
        let top = boundaries.get(staff)?.curve.y_at(x as f32)?;
        let bottom = boundaries.get(staff + 1)?.curve.y_at(x as f32)?;
        Some(StaffRegion { staff, top, bottom })
    }
}

/// Vertical extent of one staff at a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffRegion {
    pub staff: usize,
    pub top: f32,
    pub bottom: f32,
}

impl StaffRegion {
    /// Whether page row `y` lies inside the region.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}
