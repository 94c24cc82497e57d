//! rockcount - Count rocks and grains in photographs
//!
//! Dark objects on a lighter background are counted in five stages:
//!
//! - Decode a payload (raw bytes, base64 or a `data:image/...` URL)
//! - Binarize with Gaussian smoothing and an Otsu or fixed threshold
//! - Clean the mask with a disk opening followed by a disk closing
//! - Separate regions with a distance-transform watershed (feature
//!   `watershed`), or with 8-connected components
//! - Count the regions whose area lies in an inclusive band
//!
//! Analysis never fails with `Err`: problems are reported in the
//! [`AnalysisResult`] as `method: none` with an error message.
//!
//! # Example
//!
//! ```
//! use rockcount::{AnalysisParams, Grid, Method, Rgb, RockCounter};
//!
//! // Two dark 20x20 squares on a light background
//! let image = Grid::from_fn(100, 50, |x, y| {
//!     let in_square = (15..35).contains(&y) && ((10..30).contains(&x) || (60..80).contains(&x));
//!     if in_square { Rgb::gray(30) } else { Rgb::gray(220) }
//! })
//! .unwrap();
//!
//! let counter = RockCounter::new(AnalysisParams::default().with_watershed(false));
//! let result = counter.analyze_grid(&image);
//! assert_eq!(result.count, 2);
//! assert_eq!(result.method, Method::ConnectedComponents);
//! assert!(result.error.is_none());
//! ```

mod error;
mod params;
mod pipeline;
mod result;
pub mod strategy;

// Re-export core types (primary data structures used everywhere)
pub use rockcount_core::{
    BinaryMask, ColorGrid, DistanceField, Error, GrayGrid, Grid, LabelGrid, Result, Rgb,
};

// Re-export stage crates as modules to avoid name conflicts
pub use rockcount_color as color;
pub use rockcount_filter as filter;
pub use rockcount_io as io;
pub use rockcount_morph as morph;
pub use rockcount_region as region;

pub use error::{AnalysisError, ErrorKind};
pub use params::AnalysisParams;
pub use pipeline::{RockCounter, count_rocks};
pub use result::{AnalysisResult, Method};
pub use strategy::{Capabilities, Separation, Separator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_types_reexported() {
        let err: Error = Grid::<u8>::new(0, 1).unwrap_err();
        let wrapped: AnalysisError = err.into();
        assert_eq!(wrapped.kind(), ErrorKind::ProcessingFailure);
        let _: Result<ColorGrid> = ColorGrid::new(2, 2);
        assert_eq!(Rgb::gray(7), Rgb::new(7, 7, 7));
    }
}
