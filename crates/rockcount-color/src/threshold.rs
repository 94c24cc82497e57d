//! Thresholding operations
//!
//! This module provides functions to convert intensity images to binary
//! masks:
//!
//! - Otsu's method (automatic threshold selection)
//! - Fixed threshold
//!
//! Polarity is inverted throughout: pixels at or below the threshold are
//! foreground, because the objects being counted are darker than the
//! background they sit on.

use crate::convert::to_gray;
use crate::{ColorError, ColorResult};
use rockcount_core::{BinaryMask, ColorGrid, GrayGrid};
use rockcount_filter::gaussian_blur;

/// Cutoff used by [`ThresholdPolicy::Fixed`] when no value is given.
pub const DEFAULT_FIXED_THRESHOLD: u8 = 127;

/// How the binarization cutoff is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdPolicy {
    /// Otsu's method on the smoothed intensity histogram
    #[default]
    Otsu,
    /// A constant cutoff
    Fixed(u8),
}

impl ThresholdPolicy {
    /// The deterministic fallback policy (`Fixed(127)`).
    pub fn fixed_default() -> Self {
        ThresholdPolicy::Fixed(DEFAULT_FIXED_THRESHOLD)
    }
}

/// Options for [`binarize`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinarizeOptions {
    /// Smoothing radius; the Gaussian kernel size is `blur_radius | 1`.
    /// Zero or negative disables smoothing.
    pub blur_radius: i32,
    /// Threshold selection
    pub policy: ThresholdPolicy,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            blur_radius: 5,
            policy: ThresholdPolicy::Otsu,
        }
    }
}

impl BinarizeOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing radius
    pub fn with_blur_radius(mut self, radius: i32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Set the threshold policy
    pub fn with_policy(mut self, policy: ThresholdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Gaussian kernel size, or `None` when smoothing is disabled.
    ///
    /// The radius is forced odd (`radius | 1`), so 4 and 5 both give a
    /// 5-tap kernel.
    pub fn kernel_size(&self) -> Option<u32> {
        (self.blur_radius > 0).then(|| (self.blur_radius as u32) | 1)
    }

    fn validate(&self) -> ColorResult<()> {
        // Beyond this a kernel spans more than any realistic photo
        const MAX_BLUR_RADIUS: i32 = 1 << 12;
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(ColorError::InvalidParameters(format!(
                "blur radius {} exceeds {}",
                self.blur_radius, MAX_BLUR_RADIUS
            )));
        }
        Ok(())
    }
}

/// Output of [`binarize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binarization {
    /// Foreground mask, same size as the input image
    pub mask: BinaryMask,
    /// The cutoff that was applied (foreground is `<= threshold`)
    pub threshold: u8,
}

/// 256-bin intensity histogram.
pub fn gray_histogram(gray: &GrayGrid) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in gray.data() {
        hist[v as usize] += 1;
    }
    hist
}

/// Compute Otsu's threshold.
///
/// Returns the intensity `t` maximizing the between-class variance of the
/// populations `{v <= t}` and `{v > t}`. Among equal maxima the smallest
/// `t` wins. A uniform image (one populated bin) yields 0.
pub fn compute_otsu_threshold(gray: &GrayGrid) -> u8 {
    otsu_from_histogram(&gray_histogram(gray))
}

fn otsu_from_histogram(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_t = 0u8;
    let mut best_sigma = 0.0f64;
    let mut w0 = 0u64;
    let mut sum0 = 0.0f64;

    for (t, &count) in hist.iter().enumerate() {
        w0 += count;
        sum0 += t as f64 * count as f64;
        let w1 = total - w0;
        if w0 == 0 || w1 == 0 {
            continue;
        }
        let m0 = sum0 / w0 as f64;
        let m1 = (sum_all - sum0) / w1 as f64;
        let diff = m0 - m1;
        let sigma = w0 as f64 * w1 as f64 * diff * diff;
        if sigma > best_sigma {
            best_sigma = sigma;
            best_t = t as u8;
        }
    }

    best_t
}

/// Inverted binarization: pixels `<= threshold` become foreground.
pub fn threshold_inverted(gray: &GrayGrid, threshold: u8) -> BinaryMask {
    gray.map(|v| v <= threshold)
}

/// Convert a color image to a foreground mask.
///
/// Steps: luma conversion, optional Gaussian smoothing, threshold
/// selection per [`BinarizeOptions::policy`], inverted thresholding.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for an oversized blur radius.
pub fn binarize(image: &ColorGrid, options: &BinarizeOptions) -> ColorResult<Binarization> {
    options.validate()?;

    let gray = to_gray(image);
    let gray = match options.kernel_size() {
        Some(size) => gaussian_blur(&gray, size)?,
        None => gray,
    };

    let threshold = match options.policy {
        ThresholdPolicy::Otsu => compute_otsu_threshold(&gray),
        ThresholdPolicy::Fixed(t) => t,
    };

    Ok(Binarization {
        mask: threshold_inverted(&gray, threshold),
        threshold,
    })
}
