//! Error types for rendering.

use thiserror::Error;

/// Errors that can occur while dispatching rays.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Ray grid holds {actual} rays, expected {expected}")]
    GridSize { expected: usize, actual: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
