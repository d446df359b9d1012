//! Error types for voxmorph-region

use thiserror::Error;

/// Errors that can occur during reconstruction and labeling operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] voxmorph_core::Error),

    /// Marker, mask or result arrays differ in shape
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Connectivity dimensionality differs from the array's
    #[error("connectivity has {connectivity} dimensions but array has {array}")]
    ConnectivityMismatch { connectivity: usize, array: usize },

    /// Unsupported array dimensionality for this operation
    #[error("unsupported dimensionality: expected {expected}, got {actual}")]
    UnsupportedDimension { expected: &'static str, actual: usize },

    /// Invalid seed position
    #[error("invalid seed position: {0:?}")]
    InvalidSeed(Vec<usize>),

    /// More components than the label type can represent
    #[error("label overflow: more than {max_label} components")]
    LabelOverflow { max_label: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Check that two arrays share the same extents
pub(crate) fn check_same_dims(expected: &[usize], actual: &[usize]) -> RegionResult<()> {
    if expected != actual {
        return Err(RegionError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

/// Check that a connectivity matches an array's dimensionality
pub(crate) fn check_connectivity(
    connectivity: &voxmorph_core::Connectivity,
    ndim: usize,
) -> RegionResult<()> {
    if connectivity.ndim() != ndim {
        return Err(RegionError::ConnectivityMismatch {
            connectivity: connectivity.ndim(),
            array: ndim,
        });
    }
    Ok(())
}
