//! rockcount-core - Pixel grids shared by every stage of the pipeline
//!
//! This crate provides the data model the rest of the workspace operates on:
//!
//! - [`Grid`] - A dense, row-major 2-D grid of samples
//! - [`ColorGrid`] - Decoded 3-channel image ([`Rgb`] samples)
//! - [`GrayGrid`] - Single-channel 8-bit intensity image
//! - [`BinaryMask`] - Foreground/background mask (`true` = object pixel)
//! - [`DistanceField`] - Per-pixel distance to the nearest background pixel
//! - [`LabelGrid`] - Region labels (0 = background, 1..=K = regions)
//!
//! Grids are owned values. Each pipeline stage reads one grid and returns a
//! new one, so nothing a caller holds is ever modified behind its back.

pub mod color;
pub mod error;
pub mod grid;

pub use color::Rgb;
pub use error::{Error, Result};
pub use grid::{BinaryMask, ColorGrid, DistanceField, GrayGrid, Grid, LabelGrid};
