//! TIFF image format support
//!
//! Only the first page is read. Gray, gray+alpha, RGB and RGBA images with
//! 8 or 16 bits per sample are accepted; 16-bit samples keep their high
//! byte and alpha is dropped.

use crate::{IoError, IoResult};
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::{Read, Seek};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// PhotometricInterpretation value for inverted grayscale
const WHITE_IS_ZERO: u32 = 0;

/// Read the first page of a TIFF image
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<ColorGrid> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;

    let channels = match color_type {
        ColorType::Gray(8 | 16) => 1,
        ColorType::GrayA(8 | 16) => 2,
        ColorType::RGB(8 | 16) => 3,
        ColorType::RGBA(8 | 16) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                color_type
            )));
        }
    };

    let invert = channels <= 2
        && decoder
            .get_tag_u32(Tag::PhotometricInterpretation)
            .is_ok_and(|v| v == WHITE_IS_ZERO);

    let samples: Vec<u8> = match decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?
    {
        DecodingResult::U8(data) => data,
        DecodingResult::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format".to_string(),
            ));
        }
    };

    let count = width as usize * height as usize;
    if samples.len() < count * channels {
        return Err(IoError::DecodeError(format!(
            "TIFF data too short: {} samples for {}x{}",
            samples.len(),
            width,
            height
        )));
    }

    let pixels: Vec<Rgb> = samples
        .chunks_exact(channels)
        .take(count)
        .map(|px| {
            if channels <= 2 {
                Rgb::gray(if invert { 255 - px[0] } else { px[0] })
            } else {
                Rgb::new(px[0], px[1], px[2])
            }
        })
        .collect();

    Ok(Grid::from_vec(width, height, pixels)?)
}
