//! rockcount-io - Image payload decoding
//!
//! Turns an opaque payload into a [`ColorGrid`]:
//!
//! 1. Resolve the payload to bytes ([`ImagePayload::to_bytes`]): raw bytes
//!    pass through, text is unwrapped from its data-URL envelope (if any)
//!    and base64-decoded.
//! 2. Detect the container from its magic number.
//! 3. Dispatch to the format reader.
//!
//! # Supported Formats
//!
//! Every reader is behind a cargo feature and all are on by default
//! (`all-formats`).
//!
//! | Format | Feature |
//! |--------|---------|
//! | PNG    | `png-format`  |
//! | JPEG   | `jpeg`        |
//! | GIF    | `gif-format`  |
//! | WebP   | `webp-format` |
//! | BMP    | `bmp`         |
//! | TIFF   | `tiff-format` |
//!
//! # Examples
//!
//! ```
//! use rockcount_io::{IoError, decode_image};
//!
//! let err = decode_image("data:image/png,AAAA").unwrap_err();
//! assert!(matches!(err, IoError::MalformedEnvelope(_)));
//! ```

mod error;
pub mod format;
pub mod payload;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "gif-format")]
pub mod gif;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;
#[cfg(feature = "webp-format")]
pub mod webp;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};
pub use payload::{ImagePayload, strip_data_url};

use rockcount_core::ColorGrid;

/// Decode any payload form into a [`ColorGrid`].
///
/// # Errors
///
/// [`IoError::MalformedEnvelope`] for a bad data-URL prefix; every other
/// variant means the bytes could not be turned into an image.
pub fn decode_image<'a>(payload: impl Into<ImagePayload<'a>>) -> IoResult<ColorGrid> {
    let bytes = payload.into().to_bytes()?;
    decode_bytes(&bytes)
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, BMP, TIFF) into a
/// [`ColorGrid`].
pub fn decode_bytes(data: &[u8]) -> IoResult<ColorGrid> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::read_gif(data),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(std::io::Cursor::new(data)),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(data),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(std::io::Cursor::new(data)),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{} support is not enabled",
            format.name()
        ))),
    }
}
