//! Convolution kernels
//!
//! One-dimensional kernels for separable filtering. A 2-D Gaussian is the
//! outer product of two 1-D Gaussians, so the blur runs as a horizontal
//! pass followed by a vertical pass with the same [`Kernel`].

use crate::{FilterError, FilterResult};

/// Precomputed Gaussian taps for small kernels with unspecified sigma.
///
/// These are the binomial-like tables used by mainstream imaging libraries
/// for sizes 1, 3, 5 and 7, so a 5-tap blur matches their output exactly.
const SMALL_GAUSSIAN_TAPS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// A 1-D convolution kernel with an odd number of taps centered on the
/// middle tap.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    taps: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from explicit taps.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `taps` is empty, has an even
    /// length, or contains a non-finite value.
    pub fn from_slice(taps: &[f32]) -> FilterResult<Self> {
        if taps.is_empty() || taps.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel needs an odd number of taps, got {}",
                taps.len()
            )));
        }
        if taps.iter().any(|t| !t.is_finite()) {
            return Err(FilterError::InvalidKernel(
                "kernel taps must be finite".to_string(),
            ));
        }
        Ok(Self {
            taps: taps.to_vec(),
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// A non-positive `sigma` is derived from the size:
    /// `sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8`. For sizes up to 7 with
    /// derived sigma the fixed small-kernel tables are used instead.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        check_size(size)?;

        if sigma <= 0.0 && size <= 7 {
            return Self::from_slice(SMALL_GAUSSIAN_TAPS[(size / 2) as usize]);
        }

        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        };
        let center = (size / 2) as f32;
        let scale = -0.5 / (sigma * sigma);
        let mut taps: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - center;
                (scale * d * d).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self::from_slice(&taps)
    }

    /// Number of taps.
    #[inline]
    pub fn size(&self) -> u32 {
        self.taps.len() as u32
    }

    /// Index of the center tap.
    #[inline]
    pub fn center(&self) -> u32 {
        self.size() / 2
    }

    /// Tap at index `i`, or `None` when out of range.
    #[inline]
    pub fn get(&self, i: u32) -> Option<f32> {
        self.taps.get(i as usize).copied()
    }

    /// All taps.
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Sum of all taps.
    pub fn sum(&self) -> f32 {
        self.taps.iter().sum()
    }
}

fn check_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel size must be odd and positive, got {}",
            size
        )));
    }
    Ok(())
}
