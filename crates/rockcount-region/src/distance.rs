//! Exact Euclidean distance transform
//!
//! Separable lower-envelope-of-parabolas algorithm (Felzenszwalb and
//! Huttenlocher): a 1-D squared-distance transform down every column, then
//! along every row of the column result. Linear in the pixel count and
//! exact, unlike chamfer approximations.

use crate::{RegionError, RegionResult};
use rockcount_core::{BinaryMask, DistanceField, Grid};

/// Scratch buffers for [`transform_1d`], reused across lines.
struct Envelope {
    /// Parabola vertex positions
    sites: Vec<usize>,
    /// Left boundary of each parabola's interval
    bounds: Vec<f64>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            sites: Vec::with_capacity(n),
            bounds: Vec::with_capacity(n),
        }
    }
}

/// 1-D squared distance transform of `f` into `out`.
///
/// Infinite entries of `f` are not sites. When no entry is finite the
/// output is all infinite.
fn transform_1d(f: &[f64], out: &mut [f64], env: &mut Envelope) {
    env.sites.clear();
    env.bounds.clear();

    for (q, &fq) in f.iter().enumerate() {
        if !fq.is_finite() {
            continue;
        }
        let mut s = f64::NEG_INFINITY;
        while let (Some(&p), Some(&last_bound)) = (env.sites.last(), env.bounds.last()) {
            let qf = q as f64;
            let pf = p as f64;
            s = ((fq + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf);
            if s <= last_bound {
                env.sites.pop();
                env.bounds.pop();
                s = f64::NEG_INFINITY;
            } else {
                break;
            }
        }
        env.sites.push(q);
        env.bounds.push(s);
    }

    if env.sites.is_empty() {
        out.fill(f64::INFINITY);
        return;
    }

    let mut k = 0;
    for (q, dst) in out.iter_mut().enumerate() {
        let qf = q as f64;
        while k + 1 < env.sites.len() && env.bounds[k + 1] < qf {
            k += 1;
        }
        let p = env.sites[k];
        let d = qf - p as f64;
        *dst = d * d + f[p];
    }
}

/// Euclidean distance from every foreground pixel to the nearest
/// background pixel; background pixels get 0.
///
/// Only pixels inside the image count as background.
///
/// # Errors
///
/// Returns [`RegionError::NoBackground`] when the mask has no background
/// pixel, since every distance would be undefined.
pub fn distance_transform(mask: &BinaryMask) -> RegionResult<DistanceField> {
    if mask.is_full_mask() {
        return Err(RegionError::NoBackground);
    }
    let (w, h) = mask.dimensions();
    let (wu, hu) = (w as usize, h as usize);

    let mut squared: Vec<f64> = mask
        .data()
        .iter()
        .map(|&fg| if fg { f64::INFINITY } else { 0.0 })
        .collect();

    // Columns
    let mut env = Envelope::with_capacity(wu.max(hu));
    let mut line = vec![0.0f64; hu];
    let mut result = vec![0.0f64; hu];
    for x in 0..wu {
        for (y, v) in line.iter_mut().enumerate() {
            *v = squared[y * wu + x];
        }
        transform_1d(&line, &mut result, &mut env);
        for (y, &v) in result.iter().enumerate() {
            squared[y * wu + x] = v;
        }
    }

    // Rows
    let mut row_out = vec![0.0f64; wu];
    for row in squared.chunks_exact_mut(wu) {
        transform_1d(row, &mut row_out, &mut env);
        row.copy_from_slice(&row_out);
    }

    let field = Grid::from_vec(w, h, squared.into_iter().map(|d| d.sqrt() as f32).collect())?;
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(mask: &BinaryMask) -> Vec<f32> {
        let (w, h) = mask.dimensions();
        let mut out = Vec::new();
        for y in 0..h as i64 {
            for x in 0..w as i64 {
                let mut best = i64::MAX;
                for by in 0..h as i64 {
                    for bx in 0..w as i64 {
                        if !mask.at(bx as u32, by as u32) {
                            best = best.min((bx - x).pow(2) + (by - y).pow(2));
                        }
                    }
                }
                out.push((best as f64).sqrt() as f32);
            }
        }
        out
    }

    #[test]
    fn test_matches_brute_force() {
        let mask = Grid::from_fn(13, 9, |x, y| {
            let dx = x as i32 - 6;
            let dy = y as i32 - 4;
            dx * dx + dy * dy <= 16 || (x == 0 && y < 3) || (x > 9 && y > 5)
        })
        .unwrap();
        let field = distance_transform(&mask).unwrap();
        assert_eq!(field.data(), brute_force(&mask).as_slice());
    }

    #[test]
    fn test_single_background_pixel() {
        let mut mask = Grid::filled(5, 4, true).unwrap();
        mask.set(0, 0, false).unwrap();
        let field = distance_transform(&mask).unwrap();
        assert_eq!(field.at(0, 0), 0.0);
        assert_eq!(field.at(3, 0), 3.0);
        assert_eq!(field.at(4, 3), 5.0);
    }

    #[test]
    fn test_background_is_zero() {
        let mask = Grid::from_fn(6, 6, |x, _| x >= 3).unwrap();
        let field = distance_transform(&mask).unwrap();
        assert_eq!(field.at(0, 2), 0.0);
        assert_eq!(field.at(2, 2), 0.0);
        assert_eq!(field.at(3, 2), 1.0);
        // The image edge is not background
        assert_eq!(field.at(5, 2), 3.0);
    }

    #[test]
    fn test_full_mask_is_an_error() {
        let mask = Grid::filled(3, 3, true).unwrap();
        assert!(matches!(
            distance_transform(&mask),
            Err(RegionError::NoBackground)
        ));
    }
}
