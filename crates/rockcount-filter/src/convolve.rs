//! Convolution operations
//!
//! Separable convolution of 8-bit intensity grids. The horizontal pass
//! accumulates into an `f32` buffer and the vertical pass rounds once at
//! the end, so the two passes do not compound rounding error.

use crate::{FilterResult, Kernel};
use rockcount_core::{GrayGrid, Grid};

/// Map a possibly out-of-range index into `0..n` by mirroring about the
/// edge pixels without repeating them (`... 2 1 | 0 1 2 ... n-1 | n-2 ...`).
///
/// A single-pixel axis maps every index to 0.
#[inline]
pub fn reflect_101(i: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

/// Separable convolution: `kernel_x` along rows, then `kernel_y` along
/// columns, with reflect-101 borders.
pub fn convolve_sep(gray: &GrayGrid, kernel_x: &Kernel, kernel_y: &Kernel) -> FilterResult<GrayGrid> {
    let (w, h) = gray.dimensions();
    let wi = w as i64;
    let hi = h as i64;

    // Horizontal pass
    let kx = kernel_x.taps();
    let cx = kernel_x.center() as i64;
    let mut horizontal = vec![0.0f32; gray.data().len()];
    for y in 0..h {
        let row = gray.row(y);
        let out = &mut horizontal[y as usize * w as usize..(y as usize + 1) * w as usize];
        for (x, dst) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (k, &tap) in kx.iter().enumerate() {
                let sx = reflect_101(x as i64 + k as i64 - cx, wi);
                sum += row[sx] as f32 * tap;
            }
            *dst = sum;
        }
    }

    // Vertical pass
    let ky = kernel_y.taps();
    let cy = kernel_y.center() as i64;
    let out = Grid::from_fn(w, h, |x, y| {
        let mut sum = 0.0f32;
        for (k, &tap) in ky.iter().enumerate() {
            let sy = reflect_101(y as i64 + k as i64 - cy, hi);
            sum += horizontal[sy * w as usize + x as usize] * tap;
        }
        sum.round().clamp(0.0, 255.0) as u8
    })?;

    Ok(out)
}

/// Gaussian blur with a square `size x size` kernel and sigma derived from
/// the size (see [`Kernel::gaussian`]).
///
/// `size` must be odd; a size of 1 returns an unchanged copy.
pub fn gaussian_blur(gray: &GrayGrid, size: u32) -> FilterResult<GrayGrid> {
    let kernel = Kernel::gaussian(size, 0.0)?;
    if kernel.size() == 1 {
        return Ok(gray.clone());
    }
    convolve_sep(gray, &kernel, &kernel)
}
