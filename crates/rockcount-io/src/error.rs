//! I/O error types
//!
//! Every failure while turning a payload into pixels maps onto one of two
//! classes the pipeline reports separately: a malformed data-URL envelope,
//! or bytes that are not a decodable image. [`IoError::is_malformed_envelope`]
//! tells them apart.

use thiserror::Error;

/// Error type for payload decoding.
#[derive(Error, Debug)]
pub enum IoError {
    /// Text starts with `data:` but is not a `data:image/<subtype>;base64,` URL
    #[error("invalid data URL: {0}")]
    MalformedEnvelope(String),

    /// The base64 body could not be decoded
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The bytes do not start with a known image signature
    #[error("could not decode image: {0}")]
    UndecodableImage(String),

    /// The container was recognised but support is not compiled in
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. zero-sized image)
    #[error("core error: {0}")]
    Core(#[from] rockcount_core::Error),
}

impl IoError {
    /// `true` for envelope errors, `false` for every flavour of undecodable data.
    pub fn is_malformed_envelope(&self) -> bool {
        matches!(self, IoError::MalformedEnvelope(_))
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
