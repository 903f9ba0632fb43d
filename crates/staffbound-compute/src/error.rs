//! Error types for staffbound-compute

use thiserror::Error;

/// Errors raised by a compute backend while dispatching a kernel
#[derive(Debug, Error)]
pub enum ComputeError {
    /// Output buffer does not match the dispatch shape
    #[error("output buffer holds {actual} cells, dispatch shape needs {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Dispatch over an index space with a zero-length axis
    #[error("empty dispatch shape: {0:?}")]
    EmptyShape([usize; 3]),

    /// Worker pool could not be created
    #[error("thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Launch-plan cache lock was poisoned by a panicking thread
    #[error("launch plan cache poisoned")]
    PoisonedCache,
}

/// Result type for compute operations
pub type ComputeResult<T> = Result<T, ComputeError>;
