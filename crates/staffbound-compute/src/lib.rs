//! staffbound-compute - Kernel backends for grid computations
//!
//! The distance-field relaxation and the transition-cost evaluation are
//! per-cell independent maps over 2-D and 3-D index spaces. This crate
//! defines the contract for running them ([`GridBackend`]) and two
//! implementations:
//!
//! - [`SerialBackend`] - nested loops on the calling thread
//! - [`RayonBackend`] - row-chunked maps on a rayon pool (feature `parallel`)
//!
//! # Examples
//!
//! ```
//! use staffbound_compute::{GridBackend, GridShape, SerialBackend};
//!
//! let backend = SerialBackend::new();
//! let mut out = vec![0i32; 12];
//! backend
//!     .map_grid_i32(GridShape::new(4, 3), &mut out, &|x, y| (x + y) as i32)
//!     .unwrap();
//! assert_eq!(out[11], 5);
//! assert_eq!(backend.dispatch_count(), 1);
//! ```

pub mod backend;
pub mod error;
#[cfg(feature = "parallel")]
pub mod parallel;
#[cfg(feature = "parallel")]
pub mod plan;
pub mod serial;

pub use backend::{
    DispatchCounter, GridBackend, GridKernel, GridShape, TensorKernel, TensorShape,
};
pub use error::{ComputeError, ComputeResult};
#[cfg(feature = "parallel")]
pub use parallel::RayonBackend;
#[cfg(feature = "parallel")]
pub use plan::{KernelKind, LaunchPlan, PlanCache, PlanKey};
pub use serial::SerialBackend;

/// The backend used when the caller does not pick one: rayon when the
/// `parallel` feature is enabled, serial otherwise.
pub fn default_backend() -> Box<dyn GridBackend> {
    #[cfg(feature = "parallel")]
    {
        Box::new(RayonBackend::new())
    }
    #[cfg(not(feature = "parallel"))]
    {
        Box::new(SerialBackend::new())
    }
}
