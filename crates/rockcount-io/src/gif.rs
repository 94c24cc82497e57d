//! GIF image format support
//!
//! Only the first frame is read; later animation frames are ignored.

use crate::{IoError, IoResult};
use gif::{ColorOutput, DecodeOptions};
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::Read;

/// Read the first frame of a GIF image.
pub fn read_gif<R: Read>(reader: R) -> IoResult<ColorGrid> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);

    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {}", e)))?;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .ok_or_else(|| IoError::DecodeError("no frames in GIF".to_string()))?;

    let width = frame.width as u32;
    let height = frame.height as u32;
    let samples: Vec<Rgb> = frame
        .buffer
        .chunks_exact(4)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect();

    Ok(Grid::from_vec(width, height, samples)?)
}
