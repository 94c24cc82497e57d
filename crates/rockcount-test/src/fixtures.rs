//! Synthetic fixtures
//!
//! Masks and images are painted from simple shapes so every regression
//! test knows its expected areas exactly. Disks use the lattice rule
//! `(x - cx)^2 + (y - cy)^2 <= r^2`.

use crate::TestResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rockcount_core::{BinaryMask, ColorGrid, Grid, Rgb};

/// Object color used by [`mask_to_image`] and [`disk_image`]
pub const FOREGROUND: Rgb = Rgb::gray(40);

/// Background color used by [`mask_to_image`] and [`disk_image`]
pub const BACKGROUND: Rgb = Rgb::gray(210);

/// A filled disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disk {
    pub cx: i64,
    pub cy: i64,
    pub radius: i64,
}

impl Disk {
    /// Create a disk centered at `(cx, cy)`
    pub const fn new(cx: i64, cy: i64, radius: i64) -> Self {
        Self { cx, cy, radius }
    }

    /// Check whether a pixel lies inside the disk
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Number of lattice points inside the disk
    pub fn area(&self) -> u64 {
        let r = self.radius;
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx * dx + dy * dy <= r * r)
            .count() as u64
    }
}

/// All-background mask.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn blank_mask(width: u32, height: u32) -> BinaryMask {
    Grid::new(width, height).expect("fixture dimensions must be non-zero")
}

/// Paint a disk into `mask`, clipped to the image.
pub fn paint_disk(mask: &mut BinaryMask, disk: Disk) {
    let (w, h) = mask.dimensions();
    for y in 0..h {
        for x in 0..w {
            if disk.contains(x as i64, y as i64) {
                let idx = mask.index_of(x, y);
                mask.data_mut()[idx] = true;
            }
        }
    }
}

/// Paint a `rect_w x rect_h` rectangle with top-left `(x0, y0)`, clipped to
/// the image.
pub fn paint_rect(mask: &mut BinaryMask, x0: u32, y0: u32, rect_w: u32, rect_h: u32) {
    let (w, h) = mask.dimensions();
    for y in y0..(y0 + rect_h).min(h) {
        for x in x0..(x0 + rect_w).min(w) {
            let idx = mask.index_of(x, y);
            mask.data_mut()[idx] = true;
        }
    }
}

/// Render a mask as a dark-on-light color image.
pub fn mask_to_image(mask: &BinaryMask) -> ColorGrid {
    mask.map(|fg| if fg { FOREGROUND } else { BACKGROUND })
}

/// Dark disks on a light background.
pub fn disk_image(width: u32, height: u32, disks: &[Disk]) -> ColorGrid {
    let mut mask = blank_mask(width, height);
    for &disk in disks {
        paint_disk(&mut mask, disk);
    }
    mask_to_image(&mask)
}

/// The two disks of the touching-blobs scene: radius 18, centers 34 px
/// apart, so they overlap in a narrow neck around `x = 47`.
pub const TOUCHING_DISKS: [Disk; 2] = [Disk::new(30, 40, 18), Disk::new(64, 40, 18)];

/// A 100x80 image holding [`TOUCHING_DISKS`].
///
/// The blobs form one 8-connected component, but their distance maxima
/// lie 34 px apart.
pub fn two_touching_disks() -> ColorGrid {
    disk_image(100, 80, &TOUCHING_DISKS)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &ColorGrid) -> TestResult<Vec<u8>> {
    Ok(rockcount_io::png::write_png(image)?)
}

/// Encode an image as an uncompressed 24-bit bottom-up BMP.
pub fn encode_bmp(image: &ColorGrid) -> Vec<u8> {
    let (w, h) = image.dimensions();
    let stride = (w as usize * 3).div_ceil(4) * 4;
    let offset = 14 + 40;
    let file_size = offset + stride * h as usize;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(w as i32).to_le_bytes());
    out.extend_from_slice(&(h as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    for y in (0..h).rev() {
        let start = out.len();
        for px in image.row(y) {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.resize(start + stride, 0);
    }
    out
}

/// Wrap encoded bytes in a `data:image/<subtype>;base64,` URL.
pub fn to_data_url(subtype: &str, bytes: &[u8]) -> String {
    format!("data:image/{};base64,{}", subtype, STANDARD.encode(bytes))
}

/// Base64-encode bytes with a line break every `width` characters, the
/// way MIME encoders wrap their output.
pub fn to_wrapped_base64(bytes: &[u8], width: usize) -> String {
    let encoded = STANDARD.encode(bytes);
    let width = width.max(1);
    let lines: Vec<&str> = encoded
        .as_bytes()
        .chunks(width)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_area_matches_painted_pixels() {
        let disk = Disk::new(20, 20, 10);
        let mut mask = blank_mask(41, 41);
        paint_disk(&mut mask, disk);
        assert_eq!(disk.area(), 317);
        assert_eq!(mask.count_foreground(), 317);
    }

    #[test]
    fn test_paint_rect_is_clipped() {
        let mut mask = blank_mask(10, 10);
        paint_rect(&mut mask, 8, 8, 5, 5);
        assert_eq!(mask.count_foreground(), 4);
    }

    #[test]
    fn test_touching_disks_overlap() {
        let [a, b] = TOUCHING_DISKS;
        assert!(a.contains(47, 40) && b.contains(47, 40));
        let image = two_touching_disks();
        assert_eq!(image.at(47, 40), FOREGROUND);
        assert_eq!(image.at(0, 0), BACKGROUND);
    }

    #[test]
    fn test_data_url() {
        assert_eq!(to_data_url("png", &[1, 2, 3]), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_bmp_layout() {
        let image = Grid::filled(3, 2, Rgb::new(1, 2, 3)).unwrap();
        let bmp = encode_bmp(&image);
        assert_eq!(bmp.len(), 54 + 2 * 12);
        assert_eq!(&bmp[54..57], &[3, 2, 1]);
        assert_eq!(&bmp[63..66], &[0, 0, 0]);
    }

    #[test]
    fn test_wrapped_base64() {
        assert_eq!(to_wrapped_base64(&[1, 2, 3, 4, 5, 6], 4), "AQID\nBAUG");
        assert_eq!(to_wrapped_base64(&[1, 2, 3], 76), "AQID");
    }
}
