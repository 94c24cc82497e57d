//! Error types for the rockcount pipeline
//!
//! Stage errors from the member crates collapse into three classes. The
//! public entry points never return them; they are rendered into
//! [`AnalysisResult::error`](crate::AnalysisResult::error).

use rockcount_color::ColorError;
use rockcount_io::IoError;
use rockcount_morph::MorphError;
use rockcount_region::RegionError;
use thiserror::Error;

/// Class of an [`AnalysisError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text payload looked like a data URL but did not match
    /// `data:image/<subtype>;base64,`
    MalformedEnvelope,
    /// The payload bytes are not a decodable image
    UndecodableImage,
    /// Binarization, cleanup, separation or counting failed
    ProcessingFailure,
}

/// Errors that can occur while analyzing an image
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Bad data-URL envelope
    #[error("{0}")]
    MalformedEnvelope(String),

    /// Corrupt, truncated, unsupported or non-base64 payload
    #[error("{0}")]
    UndecodableImage(String),

    /// Any failure after decoding
    #[error("processing failed: {0}")]
    ProcessingFailure(String),
}

impl AnalysisError {
    /// Get the error class
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MalformedEnvelope(_) => ErrorKind::MalformedEnvelope,
            AnalysisError::UndecodableImage(_) => ErrorKind::UndecodableImage,
            AnalysisError::ProcessingFailure(_) => ErrorKind::ProcessingFailure,
        }
    }
}

impl From<IoError> for AnalysisError {
    fn from(err: IoError) -> Self {
        if err.is_malformed_envelope() {
            AnalysisError::MalformedEnvelope(err.to_string())
        } else {
            AnalysisError::UndecodableImage(err.to_string())
        }
    }
}

impl From<ColorError> for AnalysisError {
    fn from(err: ColorError) -> Self {
        AnalysisError::ProcessingFailure(err.to_string())
    }
}

impl From<MorphError> for AnalysisError {
    fn from(err: MorphError) -> Self {
        AnalysisError::ProcessingFailure(err.to_string())
    }
}

impl From<RegionError> for AnalysisError {
    fn from(err: RegionError) -> Self {
        AnalysisError::ProcessingFailure(err.to_string())
    }
}

impl From<rockcount_core::Error> for AnalysisError {
    fn from(err: rockcount_core::Error) -> Self {
        AnalysisError::ProcessingFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_split_by_class() {
        let err: AnalysisError = IoError::MalformedEnvelope("data:x".into()).into();
        assert_eq!(err.kind(), ErrorKind::MalformedEnvelope);

        let err: AnalysisError = IoError::UndecodableImage("too short".into()).into();
        assert_eq!(err.kind(), ErrorKind::UndecodableImage);

        let err: AnalysisError = IoError::DecodeError("bad crc".into()).into();
        assert_eq!(err.kind(), ErrorKind::UndecodableImage);
        assert!(err.to_string().contains("bad crc"));
    }

    #[test]
    fn test_processing_errors() {
        let err: AnalysisError = RegionError::NoBackground.into();
        assert_eq!(err.kind(), ErrorKind::ProcessingFailure);
        assert!(err.to_string().starts_with("processing failed: "));
    }
}
