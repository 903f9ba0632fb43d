//! staffbound-boundary - Boundary curves between staves
//!
//! For a binarized score page and its detected staves, this crate finds
//! one horizontal boundary curve above every staff and one below the last:
//!
//! - **Empty-band detection** - a straight line through the widest
//!   ink-free row run of the search window (the common, cheap case)
//! - **Distance field** - downscaled taxicab distance to the nearest ink
//! - **Transition costs** - proximity-to-ink cost of every sampled segment
//! - **Shortest path** - dynamic program for the cheapest anchored path
//!
//! The grid computations run on a [`GridBackend`] from
//! `staffbound-compute`.
//!
//! # Examples
//!
//! ```
//! use staffbound_boundary::{BoundaryOptions, StaffGeometry, find_boundaries};
//! use staffbound_compute::{GridBackend, SerialBackend};
//! use staffbound_core::Bitmap;
//!
//! let mut bitmap = Bitmap::new(256, 128).unwrap();
//! for row in [40, 45, 50, 55, 60] {
//!     bitmap.fill_rect(0, row, 256, 1, 1);
//! }
//! let geometry = StaffGeometry::from_rows(vec![vec![40, 45, 50, 55, 60]], 5, 1).unwrap();
//! let options = BoundaryOptions::new().with_field_for_page(256, 128);
//! let backend = SerialBackend::new();
//!
//! let boundaries = find_boundaries(&bitmap, &geometry, &options, &backend).unwrap();
//! assert_eq!(boundaries.len(), 2);
//! // Both gaps are blank, so the distance field was never needed.
//! assert_eq!(backend.dispatch_count(), 0);
//! ```

pub mod assemble;
pub mod band;
pub mod batch;
pub mod cost;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod options;
pub mod page;
pub mod path;
pub mod window;

// Re-export core types
pub use staffbound_compute::GridBackend;
pub use staffbound_core;

pub use assemble::{BoundaryFinder, BoundarySource, GapBoundary, PageBoundaries, find_boundaries};
pub use band::{EmptyBand, find_empty_band, trivial_boundary};
pub use batch::find_boundaries_batch;
pub use cost::{CostTensor, SamplingGrid, evaluate_costs, transition_cost};
pub use distance::DistanceField;
pub use error::{BoundaryError, BoundaryResult};
pub use geometry::{Staff, StaffGeometry};
pub use options::{
    BoundaryOptions, DEFAULT_CLEARANCE, DEFAULT_FIELD_SIZE, DEFAULT_INK_PENALTY,
    DEFAULT_RELAX_ITERATIONS, DEFAULT_SATURATION, DT_SCALE,
};
pub use page::{Page, StaffRegion};
pub use path::{PathState, ShortestPath, shortest_path};
pub use window::{SearchWindow, WindowBounds, WindowKind, anchor_row, select_window};
