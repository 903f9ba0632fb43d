//! Error types for staffbound-core
//!
//! Provides a unified error type for the core data structures. Each variant
//! captures enough context for diagnostics without exposing internal
//! storage details.

use thiserror::Error;

/// staffbound-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image or grid dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel or cell coordinate outside the image
    #[error("coordinate ({x}, {y}) outside {width}x{height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Buffer length does not match the declared dimensions
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Polyline x-coordinates must not decrease
    #[error("curve not monotone in x: point {index} has x={x} after x={prev}")]
    NonMonotoneCurve { index: usize, prev: u32, x: u32 },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
