//! Error types for Own Room core

use thiserror::Error;

/// Result type alias using the core Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building sampling grids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Grid would exceed the addressable cell count
    #[error("Grid too large: {x}x{y}x{z} cells")]
    GridTooLarge { x: usize, y: usize, z: usize },
}
