//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale, RGB and
//! CMYK encodings all come out as a [`ColorGrid`].

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::Read;

/// Read a JPEG image from a reader positioned at the SOI marker (`FF D8`).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<ColorGrid> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let samples: Vec<Rgb> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| Rgb::gray(v)).collect(),
        // Big-endian 16-bit luminance; keep the high byte
        PixelFormat::L16 => pixels.chunks_exact(2).map(|px| Rgb::gray(px[0])).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|px| {
                let k = 255 - px[3] as u32;
                let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
                Rgb::new(channel(px[0]), channel(px[1]), channel(px[2]))
            })
            .collect(),
    };

    Ok(Grid::from_vec(width, height, samples)?)
}
