//! WebP image format support

use crate::{IoError, IoResult};
use image_webp::WebPDecoder;
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::{BufRead, Seek};

/// Read a still WebP image. Animated WebP images are rejected.
pub fn read_webp<R: BufRead + Seek>(reader: R) -> IoResult<ColorGrid> {
    let mut decoder = WebPDecoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("WebP decode error: {}", e)))?;

    if decoder.is_animated() {
        return Err(IoError::UnsupportedFormat(
            "animated WebP not supported".to_string(),
        ));
    }

    let (width, height) = decoder.dimensions();
    let channels = if decoder.has_alpha() { 4 } else { 3 };

    let buffer_size = decoder.output_buffer_size().ok_or_else(|| {
        IoError::DecodeError("failed to determine output buffer size".to_string())
    })?;
    let mut buffer = vec![0u8; buffer_size];
    decoder
        .read_image(&mut buffer)
        .map_err(|e| IoError::DecodeError(format!("WebP read error: {}", e)))?;

    let samples: Vec<Rgb> = buffer
        .chunks_exact(channels)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect();

    Ok(Grid::from_vec(width, height, samples)?)
}
