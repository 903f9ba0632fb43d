//! staffbound - Staff boundary detection for music score pages
//!
//! Given a binarized score page and the staves found on it, computes the
//! curves that separate every staff from its neighbors and from the page
//! edges, so later stages can process one staff region at a time.
//!
//! # Overview
//!
//! - Trivial boundaries through ink-free row bands
//! - Minimum-cost paths through a distance-to-ink field where no such
//!   band exists
//! - Serial and rayon-parallel compute backends
//!
//! # Example
//!
//! ```
//! use staffbound::boundary::{BoundaryOptions, Page, StaffGeometry};
//! use staffbound::compute::default_backend;
//! use staffbound::Bitmap;
//!
//! let mut bitmap = Bitmap::new(300, 200).unwrap();
//! bitmap.fill_rect(0, 50, 300, 1, 1);
//! bitmap.fill_rect(0, 140, 300, 1, 1);
//! let geometry = StaffGeometry::from_rows(vec![vec![50], vec![140]], 8, 1).unwrap();
//!
//! let mut page = Page::new(bitmap, geometry);
//! let options = BoundaryOptions::new().with_field_for_page(300, 200);
//! let backend = default_backend();
//! let boundaries = page.find_boundaries(&options, backend.as_ref()).unwrap();
//! assert_eq!(boundaries.len(), 3);
//!
//! let region = page.staff_region(0, 150).unwrap();
//! assert!(region.contains(50.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use staffbound_core::*;

// Re-export engine crates as modules
pub use staffbound_boundary as boundary;
pub use staffbound_compute as compute;
