//! Color to intensity conversion

use rockcount_core::{ColorGrid, GrayGrid};

/// Convert a color image to 8-bit intensity using luma weights
/// (`0.299 R + 0.587 G + 0.114 B`).
pub fn to_gray(image: &ColorGrid) -> GrayGrid {
    image.map(|px| px.luma())
}
