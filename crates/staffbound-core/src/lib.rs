//! staffbound-core - Basic data structures for staff-boundary analysis
//!
//! This crate provides the data structures shared by the boundary engine:
//!
//! - [`Bitmap`] - Binarized 1-bpp page image (ink = 1)
//! - [`IntGrid`] - Dense integer grid, used for the distance field
//! - [`BoundaryCurve`] - Monotone-in-x polyline separating two staff regions

pub mod bitmap;
pub mod curve;
pub mod error;
pub mod grid;

pub use bitmap::Bitmap;
pub use curve::BoundaryCurve;
pub use error::{Error, Result};
pub use grid::IntGrid;
