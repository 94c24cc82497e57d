//! Image format detection
//!
//! Detects image containers by examining the magic numbers at the start of
//! the decoded payload. The payload's data-URL subtype is never trusted.

use crate::{IoError, IoResult};

/// Image container formats recognised by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Short lowercase name, as used in MIME subtypes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Whether a decoder for this format is compiled in.
    pub fn is_supported(self) -> bool {
        match self {
            Self::Png => cfg!(feature = "png-format"),
            Self::Jpeg => cfg!(feature = "jpeg"),
            Self::Gif => cfg!(feature = "gif-format"),
            Self::WebP => cfg!(feature = "webp-format"),
            Self::Bmp => cfg!(feature = "bmp"),
            Self::Tiff => cfg!(feature = "tiff-format"),
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    pub const GIF87A: &[u8] = b"GIF87a";
    pub const GIF89A: &[u8] = b"GIF89a";

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";

    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Detect image format from the leading bytes of an encoded image.
///
/// # Errors
///
/// Returns [`IoError::UndecodableImage`] when the data is too short or
/// matches no known signature.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::UndecodableImage(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Ok(ImageFormat::Gif);
    }
    if data.len() >= 12 && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        return Ok(ImageFormat::WebP);
    }
    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Ok(ImageFormat::Tiff);
    }
    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }

    Err(IoError::UndecodableImage(
        "unrecognised image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(detect_format_from_bytes(&header).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(
            detect_format_from_bytes(&header).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_detect_webp() {
        let header = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
        assert_eq!(detect_format_from_bytes(header).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_detect_unknown() {
        let err = detect_format_from_bytes(b"hello world").unwrap_err();
        assert!(matches!(err, IoError::UndecodableImage(_)));
        assert!(detect_format_from_bytes(&[0x89]).is_err());
    }

    #[test]
    fn test_detect_bmp_and_tiff() {
        let format = detect_format_from_bytes(b"BM\x00\x00").unwrap();
        assert_eq!(format, ImageFormat::Bmp);
        assert_eq!(format.is_supported(), cfg!(feature = "bmp"));

        let format = detect_format_from_bytes(&[0x4D, 0x4D, 0x00, 0x2A]).unwrap();
        assert_eq!(format, ImageFormat::Tiff);
        assert_eq!(format.is_supported(), cfg!(feature = "tiff-format"));
    }
}
