//! Image payloads
//!
//! A payload arrives either as raw encoded bytes or as text. Text is base64,
//! optionally wrapped in the `data:image/<subtype>;base64,` envelope that
//! `canvas.toDataURL()` produces.

use crate::{IoError, IoResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::borrow::Cow;

const DATA_SCHEME: &str = "data:";
const IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = "base64,";

/// An encoded image as handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePayload<'a> {
    /// Encoded image bytes (PNG, JPEG, ...)
    Bytes(&'a [u8]),
    /// Base64 text, optionally a data URL
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for ImagePayload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ImagePayload::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ImagePayload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ImagePayload::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for ImagePayload<'a> {
    fn from(text: &'a str) -> Self {
        ImagePayload::Text(text)
    }
}

impl<'a> From<&'a String> for ImagePayload<'a> {
    fn from(text: &'a String) -> Self {
        ImagePayload::Text(text)
    }
}

impl<'a> ImagePayload<'a> {
    /// Resolve the payload into encoded image bytes.
    ///
    /// Byte payloads are borrowed unchanged. Text is trimmed, unwrapped from
    /// its data-URL envelope if it has one, and base64-decoded. ASCII
    /// whitespace inside the base64 body (MIME line wrapping) is skipped.
    ///
    /// # Errors
    ///
    /// - [`IoError::MalformedEnvelope`] if the text starts with `data:` but
    ///   does not match `data:image/<subtype>;base64,<body>`
    /// - [`IoError::InvalidBase64`] if the body is not valid base64
    pub fn to_bytes(&self) -> IoResult<Cow<'a, [u8]>> {
        match *self {
            ImagePayload::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            ImagePayload::Text(text) => {
                let text = text.trim();
                let body = if text.starts_with(DATA_SCHEME) {
                    strip_data_url(text)?
                } else {
                    text
                };
                let compact: Vec<u8> = body
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                Ok(Cow::Owned(STANDARD.decode(compact)?))
            }
        }
    }
}

/// Split a `data:image/<subtype>;base64,<body>` URL and return `<body>`.
///
/// The subtype must be non-empty and free of `;`, and the body non-empty.
/// The subtype is not otherwise interpreted; the container format is
/// detected from the decoded bytes.
pub fn strip_data_url(url: &str) -> IoResult<&str> {
    let malformed = || IoError::MalformedEnvelope(truncate_for_message(url));

    let rest = url.strip_prefix(IMAGE_PREFIX).ok_or_else(malformed)?;
    let (subtype, rest) = rest.split_once(';').ok_or_else(malformed)?;
    if subtype.is_empty() {
        return Err(malformed());
    }
    let body = rest.strip_prefix(BASE64_MARKER).ok_or_else(malformed)?;
    if body.is_empty() {
        return Err(malformed());
    }
    Ok(body)
}

fn truncate_for_message(url: &str) -> String {
    const MAX: usize = 40;
    match url.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}
