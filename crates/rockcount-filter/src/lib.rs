//! rockcount-filter - Image smoothing
//!
//! This crate provides the smoothing step that precedes thresholding:
//!
//! - 1-D convolution kernels (Gaussian or explicit taps)
//! - Separable convolution of 8-bit intensity grids with reflect-101 borders
//! - Gaussian blur with the kernel-size-derived sigma used by common
//!   imaging libraries

pub mod convolve;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use convolve::{convolve_sep, gaussian_blur, reflect_101};
