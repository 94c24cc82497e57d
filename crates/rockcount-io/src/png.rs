//! PNG image format support

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use rockcount_core::{ColorGrid, Grid, Rgb};
use std::io::{BufRead, Seek};

/// Read a PNG image into a [`ColorGrid`].
///
/// Palette and low-bit-depth images are expanded and 16-bit samples are
/// stripped to 8 bits. Alpha is discarded; transparent pixels keep their
/// stored color.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<ColorGrid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let channels = match (output_info.color_type, output_info.bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let line_size = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * line_size..y * line_size + width as usize * channels];
        for px in row.chunks_exact(channels) {
            samples.push(match channels {
                1 | 2 => Rgb::gray(px[0]),
                _ => Rgb::new(px[0], px[1], px[2]),
            });
        }
    }

    Ok(Grid::from_vec(width, height, samples)?)
}

/// Encode a [`ColorGrid`] as an 8-bit RGB PNG.
pub fn write_png(grid: &ColorGrid) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(grid.data().len() * 3);
    for px in grid.data() {
        bytes.extend_from_slice(&[px.r, px.g, px.b]);
    }

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, grid.width(), grid.height());
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
        writer
            .write_image_data(&bytes)
            .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
        writer
            .finish()
            .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_keeps_color_and_geometry() {
        let grid = Grid::from_fn(5, 3, |x, y| Rgb::new(x as u8 * 40, y as u8 * 80, 7)).unwrap();
        let encoded = write_png(&grid).unwrap();
        let decoded = read_png(Cursor::new(&encoded)).unwrap();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.at(4, 2), Rgb::new(160, 160, 7));
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_gray_png_expands_to_rgb() {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 200]).unwrap();
        }
        let decoded = read_png(Cursor::new(&out)).unwrap();
        assert_eq!(decoded.data(), &[Rgb::gray(10), Rgb::gray(200)]);
    }

    #[test]
    fn test_truncated_png_fails() {
        let grid = Grid::filled(16, 16, Rgb::gray(90)).unwrap();
        let encoded = write_png(&grid).unwrap();
        let truncated = &encoded[..encoded.len() / 2];
        assert!(read_png(Cursor::new(truncated)).is_err());
    }
}
