//! Analysis parameters
//!
//! Every knob of the pipeline in one serde-friendly record. Missing fields
//! take their defaults when deserialized, so a caller can send `{}` or just
//! the values it wants to change.

use rockcount_color::{BinarizeOptions, DEFAULT_FIXED_THRESHOLD, ThresholdPolicy};
use rockcount_morph::CleanupOptions;
use rockcount_region::AreaBand;
use serde::{Deserialize, Serialize};

/// Tuning parameters for [`RockCounter`](crate::RockCounter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Smoothing radius; kernel size is `blur | 1`, non-positive disables
    pub blur: i32,
    /// Otsu threshold when `true`, fixed cutoff 127 otherwise
    pub use_otsu: bool,
    /// Opening disk radius
    pub open_radius: u32,
    /// Closing disk radius
    pub close_radius: u32,
    /// Try watershed separation before plain connected components
    pub use_watershed: bool,
    /// Smallest region area counted, in pixels
    pub min_area_px: u32,
    /// Largest region area counted, as a fraction of the image area
    pub max_area_frac: f64,
    /// Minimum spacing between watershed seeds, in pixels
    pub watershed_min_distance: u32,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        let binarize = BinarizeOptions::default();
        let cleanup = CleanupOptions::default();
        let band = AreaBand::default();
        Self {
            blur: binarize.blur_radius,
            use_otsu: binarize.policy == ThresholdPolicy::Otsu,
            open_radius: cleanup.open_radius,
            close_radius: cleanup.close_radius,
            use_watershed: true,
            min_area_px: band.min_area_px,
            max_area_frac: band.max_area_frac,
            watershed_min_distance: 10,
        }
    }
}

impl AnalysisParams {
    /// Create new parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing radius
    pub fn with_blur(mut self, blur: i32) -> Self {
        self.blur = blur;
        self
    }

    /// Choose between Otsu and the fixed cutoff
    pub fn with_otsu(mut self, use_otsu: bool) -> Self {
        self.use_otsu = use_otsu;
        self
    }

    /// Set the opening and closing radii
    pub fn with_cleanup_radii(mut self, open_radius: u32, close_radius: u32) -> Self {
        self.open_radius = open_radius;
        self.close_radius = close_radius;
        self
    }

    /// Enable or disable watershed separation
    pub fn with_watershed(mut self, use_watershed: bool) -> Self {
        self.use_watershed = use_watershed;
        self
    }

    /// Set the smallest counted area
    pub fn with_min_area_px(mut self, min_area_px: u32) -> Self {
        self.min_area_px = min_area_px;
        self
    }

    /// Set the largest counted area fraction
    pub fn with_max_area_frac(mut self, max_area_frac: f64) -> Self {
        self.max_area_frac = max_area_frac;
        self
    }

    /// Set the watershed seed spacing
    pub fn with_watershed_min_distance(mut self, min_distance: u32) -> Self {
        self.watershed_min_distance = min_distance;
        self
    }

    /// Binarization options derived from these parameters
    pub fn binarize_options(&self) -> BinarizeOptions {
        let policy = if self.use_otsu {
            ThresholdPolicy::Otsu
        } else {
            ThresholdPolicy::Fixed(DEFAULT_FIXED_THRESHOLD)
        };
        BinarizeOptions::new()
            .with_blur_radius(self.blur)
            .with_policy(policy)
    }

    /// Cleanup options derived from these parameters
    pub fn cleanup_options(&self) -> CleanupOptions {
        CleanupOptions::new()
            .with_open_radius(self.open_radius)
            .with_close_radius(self.close_radius)
    }

    /// Area band derived from these parameters
    pub fn area_band(&self) -> AreaBand {
        AreaBand::new()
            .with_min_area_px(self.min_area_px)
            .with_max_area_frac(self.max_area_frac)
    }
}
