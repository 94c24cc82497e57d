//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture grid could not be allocated
    #[error("core error: {0}")]
    Core(#[from] rockcount_core::Error),

    /// Failed to encode a fixture image
    #[error("failed to encode fixture: {0}")]
    Encode(#[from] rockcount_io::IoError),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
