//! Error types for rockcount-color

use thiserror::Error;

/// Errors that can occur during color conversion and thresholding
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rockcount_core::Error),

    /// Smoothing failed
    #[error("filter error: {0}")]
    Filter(#[from] rockcount_filter::FilterError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
