//! rockcount-color - Intensity conversion and binarization
//!
//! This crate turns a decoded color image into a binary foreground mask:
//!
//! - **Conversion**: luma-weighted color to intensity ([`to_gray`])
//! - **Histogram**: 256-bin intensity histogram ([`gray_histogram`])
//! - **Thresholding**: Otsu's method and fixed cutoffs, with inverted
//!   polarity so dark objects on a light background become foreground
//! - **Binarization**: the full gray → smooth → threshold chain
//!   ([`binarize`])
//!
//! # Examples
//!
//! ```
//! use rockcount_color::{BinarizeOptions, binarize};
//! use rockcount_core::{Grid, Rgb};
//!
//! // A dark 4x4 square on a light 12x12 background
//! let image = Grid::from_fn(12, 12, |x, y| {
//!     if (4..8).contains(&x) && (4..8).contains(&y) { Rgb::gray(30) } else { Rgb::gray(220) }
//! })
//! .unwrap();
//! let options = BinarizeOptions::default().with_blur_radius(0);
//! let result = binarize(&image, &options).unwrap();
//! assert_eq!(result.mask.count_foreground(), 16);
//! ```

pub mod convert;
mod error;
pub mod threshold;

pub use error::{ColorError, ColorResult};

pub use convert::to_gray;
pub use threshold::{
    BinarizeOptions, Binarization, DEFAULT_FIXED_THRESHOLD, ThresholdPolicy, binarize,
    compute_otsu_threshold, gray_histogram, threshold_inverted,
};
