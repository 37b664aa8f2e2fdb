//! Errors raised while constructing or loading a scene.

use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;
