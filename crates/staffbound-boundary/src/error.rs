//! Error types for staffbound-boundary

use staffbound_compute::ComputeError;
use thiserror::Error;

/// Errors that can occur while computing staff boundaries
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] staffbound_core::Error),

    /// The compute backend failed; the page cannot be resumed
    #[error("compute backend error: {0}")]
    Compute(#[from] ComputeError),

    /// Sampling step of zero (usually a zero staff thickness)
    #[error("invalid sampling step: xstep={xstep}, ystep={ystep}")]
    InvalidStep { xstep: u32, ystep: u32 },

    /// Sampling grid has no rows or fewer than two columns
    #[error("empty cost tensor: {numx} columns x {numy} rows")]
    EmptyCostTensor { numx: usize, numy: usize },

    /// Both the extremum and the median window for a gap are empty
    #[error("degenerate search window for gap {gap}: rows {y0}..{y1}")]
    DegenerateWindow { gap: usize, y0: i64, y1: i64 },

    /// Gap index past the last staff
    #[error("gap {gap} out of range: page has {gaps} gaps")]
    GapOutOfRange { gap: usize, gaps: usize },

    /// Staff geometry is unusable
    #[error("invalid staff geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for boundary operations
pub type BoundaryResult<T> = Result<T, BoundaryError>;
