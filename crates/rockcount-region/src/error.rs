//! Error types for rockcount-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rockcount_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The distance transform needs at least one background pixel
    #[error("distance transform undefined: mask has no background pixels")]
    NoBackground,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
