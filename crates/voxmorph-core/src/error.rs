//! Error types for voxmorph-core
//!
//! Provides a unified error type for array construction, element access and
//! connectivity definition. Each variant captures enough context for
//! diagnostics without exposing internal layout details.

use thiserror::Error;

/// voxmorph core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid array dimensions (empty shape or a zero extent)
    #[error("invalid array dimensions: {0:?}")]
    InvalidDimension(Vec<usize>),

    /// Array dimension mismatch
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Position outside the array
    #[error("position {position:?} out of bounds for shape {dims:?}")]
    PositionOutOfBounds {
        position: Vec<usize>,
        dims: Vec<usize>,
    },

    /// Linear index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Malformed connectivity definition
    #[error("invalid connectivity: {0}")]
    InvalidConnectivity(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for voxmorph core operations
pub type Result<T> = std::result::Result<T, Error>;
