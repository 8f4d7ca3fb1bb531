//! Error types for scene editing and collider generation

use crate::shape::ShapeId;
use thiserror::Error;

/// Result type alias using [`SceneError`]
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors that can occur when editing a scene or voxelizing it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The registry already holds its maximum number of shapes
    #[error("Shape registry is full ({capacity} shapes)")]
    RegistryFull { capacity: usize },

    /// No shape with this id exists
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// Grid construction failed
    #[error(transparent)]
    Core(#[from] ownroom_core::Error),
}
