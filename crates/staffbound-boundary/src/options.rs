//! Boundary search options

use crate::error::{BoundaryError, BoundaryResult};

/// Page pixels per distance-field cell, along each axis.
pub const DT_SCALE: f32 = 2.0;

/// Side length of the canonical distance field, in cells.
pub const DEFAULT_FIELD_SIZE: u32 = 2048;

/// Relaxation passes run over the distance field.
pub const DEFAULT_RELAX_ITERATIONS: u32 = 64;

/// Distance value given to cells with no ink nearby.
pub const DEFAULT_SATURATION: i32 = 64;

/// Clearance kept from neighboring staves, in staff spacings.
pub const DEFAULT_CLEARANCE: u32 = 2;

/// Extra cost of a sample that lands on ink.
pub const DEFAULT_INK_PENALTY: f32 = 1.0;

/// Options for boundary detection
#[derive(Debug, Clone)]
pub struct BoundaryOptions {
    /// Page pixels per field cell (default: 2.0)
    pub dt_scale: f32,

    /// Distance field width in cells (default: 2048)
    pub field_width: u32,

    /// Distance field height in cells (default: 2048)
    pub field_height: u32,

    /// Number of relaxation passes (default: 64)
    ///
    /// Distances larger than this are not resolved and read as the
    /// saturation value.
    pub relax_iterations: u32,

    /// Initial value of ink-free cells and cap of the field (default: 64)
    pub saturation: i32,

    /// Minimum distance kept from neighboring staves, in multiples of the
    /// staff spacing (default: 2)
    pub clearance: u32,

    /// Cost added for every sample that lies on ink (default: 1.0)
    pub ink_penalty: f32,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            dt_scale: DT_SCALE,
            field_width: DEFAULT_FIELD_SIZE,
            field_height: DEFAULT_FIELD_SIZE,
            relax_iterations: DEFAULT_RELAX_ITERATIONS,
            saturation: DEFAULT_SATURATION,
            clearance: DEFAULT_CLEARANCE,
            ink_penalty: DEFAULT_INK_PENALTY,
        }
    }
}

impl BoundaryOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page-to-field scale factor
    pub fn with_dt_scale(mut self, scale: f32) -> Self {
        self.dt_scale = scale;
        self
    }

    /// Set the distance field size
    pub fn with_field_size(mut self, width: u32, height: u32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Size the field to cover a `width x height` page exactly at the
    /// current scale
    pub fn with_field_for_page(mut self, width: u32, height: u32) -> Self {
        self.field_width = (width as f32 / self.dt_scale).ceil() as u32;
        self.field_height = (height as f32 / self.dt_scale).ceil() as u32;
        self
    }

    /// Set the number of relaxation passes
    pub fn with_relax_iterations(mut self, iterations: u32) -> Self {
        self.relax_iterations = iterations;
        self
    }

    /// Set the saturation distance
    pub fn with_saturation(mut self, saturation: i32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the staff clearance
    pub fn with_clearance(mut self, clearance: u32) -> Self {
        self.clearance = clearance;
        self
    }

    /// Set the ink penalty
    pub fn with_ink_penalty(mut self, penalty: f32) -> Self {
        self.ink_penalty = penalty;
        self
    }

    /// Validate options
    pub fn validate(&self) -> BoundaryResult<()> {
        if !(self.dt_scale.is_finite() && self.dt_scale > 0.0) {
            return Err(BoundaryError::InvalidParameter(format!(
                "dt_scale must be positive, got {}",
                self.dt_scale
            )));
        }
        if self.field_width == 0 || self.field_height == 0 {
            return Err(BoundaryError::InvalidParameter(format!(
                "field size must be non-zero, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if self.saturation <= 0 {
            return Err(BoundaryError::InvalidParameter(
                "saturation must be positive".to_string(),
            ));
        }
        if !(self.ink_penalty.is_finite() && self.ink_penalty >= 0.0) {
            return Err(BoundaryError::InvalidParameter(
                "ink_penalty must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
