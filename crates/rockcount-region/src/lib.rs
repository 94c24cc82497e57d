//! rockcount-region - Region labeling and separation
//!
//! This crate turns a cleaned foreground mask into labeled regions and
//! counts them:
//!
//! - **Connected component labeling** - 8-connected union-find labeling
//!   with dense labels
//! - **Region statistics** - per-label areas and the shared [`AreaBand`]
//!   filter
//! - **Distance transform** - exact Euclidean distance to the background
//!   (feature `watershed`)
//! - **Watershed separation** - distance-maxima seeds and marker-controlled
//!   flooding that split touching regions (feature `watershed`)
//!
//! # Examples
//!
//! ```
//! use rockcount_core::Grid;
//! use rockcount_region::{AreaBand, ConnectivityType, RegionStats, label_connected_components};
//!
//! // Two 8x8 squares in a 40x20 mask
//! let mask = Grid::from_fn(40, 20, |x, y| {
//!     (2..10).contains(&y) && ((2..10).contains(&x) || (20..28).contains(&x))
//! })
//! .unwrap();
//! let labels = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
//! let stats = RegionStats::from_labels(&labels);
//! assert_eq!(stats.area(1), Some(64));
//!
//! let band = AreaBand::new();
//! assert_eq!(band.count(&stats, 40, 20).unwrap(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod label;

#[cfg(feature = "watershed")]
pub mod distance;
#[cfg(feature = "watershed")]
pub mod watershed;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::{ConnectivityType, label_connected_components};
pub use label::{AreaBand, BandCount, RegionStats};

#[cfg(feature = "watershed")]
pub use distance::distance_transform;
#[cfg(feature = "watershed")]
pub use watershed::{
    MarkerSet, Seed, WatershedOptions, find_seeds, watershed_from_markers, watershed_segmentation,
};
