//! BMP image format support
//!
//! Reads uncompressed Windows bitmaps (BITMAPINFOHEADER or later) at 1, 4,
//! 8, 24 and 32 bits per pixel. Palette images are expanded to RGB.

use crate::{IoError, IoResult};
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::Read;

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Largest accepted width or height
const MAX_DIMENSION: u32 = 1 << 15;

fn u16_at(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn u32_at(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<()> {
    reader
        .read_exact(buf)
        .map_err(|e| IoError::DecodeError(format!("BMP read error: {}", e)))
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    let skipped = std::io::copy(&mut reader.by_ref().take(count as u64), &mut std::io::sink())
        .map_err(|e| IoError::DecodeError(format!("BMP read error: {}", e)))?;
    if skipped < count as u64 {
        return Err(IoError::DecodeError("BMP data ends early".to_string()));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<ColorGrid> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    read_exact(&mut reader, &mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::DecodeError("not a BMP file".to_string()));
    }
    let pixel_offset = u32_at(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    read_exact(&mut reader, &mut info_header)?;

    let header_size = u32_at(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = u32_at(&info_header, 4) as i32;
    let height = u32_at(&info_header, 8) as i32;

    let planes = u16_at(&info_header, 12);
    if planes != 1 {
        return Err(IoError::DecodeError(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = u16_at(&info_header, 14);
    let compression = u32_at(&info_header, 16);
    // BI_RGB, or BI_BITFIELDS with the default masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let top_down = height < 0;
    let width = width.unsigned_abs();
    let height = height.unsigned_abs();
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(IoError::DecodeError(format!(
            "invalid BMP dimensions: {}x{}",
            width, height
        )));
    }

    skip(&mut reader, (header_size - BMP_INFO_HEADER_SIZE) as usize)?;

    // Palette entries are stored as B, G, R, reserved
    let palette: Vec<Rgb> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let colors_used = u32_at(&info_header, 32) as usize;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        read_exact(&mut reader, &mut raw)?;
        raw.chunks_exact(4)
            .map(|c| Rgb::new(c[2], c[1], c[0]))
            .collect()
    } else {
        Vec::new()
    };

    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, pixel_offset - current_pos)?;
    }

    let lookup = |index: u8| -> IoResult<Rgb> {
        palette.get(index as usize).copied().ok_or_else(|| {
            IoError::DecodeError(format!("BMP palette index {} out of range", index))
        })
    };

    // Rows are padded to a multiple of 4 bytes
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];
    let mut pixels = vec![Rgb::default(); width as usize * height as usize];

    for row in 0..height {
        read_exact(&mut reader, &mut row_buffer)?;
        let y = if top_down { row } else { height - 1 - row };
        let out = &mut pixels[y as usize * width as usize..(y as usize + 1) * width as usize];

        for (x, dst) in out.iter_mut().enumerate() {
            *dst = match bits_per_pixel {
                1 => lookup((row_buffer[x / 8] >> (7 - x % 8)) & 1)?,
                4 => {
                    let byte = row_buffer[x / 2];
                    lookup(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F })?
                }
                8 => lookup(row_buffer[x])?,
                24 => {
                    let px = &row_buffer[x * 3..x * 3 + 3];
                    Rgb::new(px[2], px[1], px[0])
                }
                _ => {
                    let px = &row_buffer[x * 4..x * 4 + 4];
                    Rgb::new(px[2], px[1], px[0])
                }
            };
        }
    }

    Ok(Grid::from_vec(width, height, pixels)?)
}
