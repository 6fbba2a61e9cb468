//! Error types for the scene crate.

use thiserror::Error;

/// Errors that can occur while working with a scene.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneError {
    /// Writing the SVG document failed.
    #[error("SVG serialization failed: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
