//! Region statistics and area filtering
//!
//! Both separation strategies end the same way: measure the area of every
//! labeled region, then count the regions whose area lies in an
//! [`AreaBand`]. Regions outside the band are dropped, never merged.

use crate::{RegionError, RegionResult};
use log::debug;
use rockcount_core::LabelGrid;

/// Per-label pixel areas of a [`LabelGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionStats {
    /// `areas[i]` is the area of label `i + 1`
    areas: Vec<u64>,
}

impl RegionStats {
    /// Measure every positive label in `labels`.
    ///
    /// Labels need not be dense; unused ids get area 0 and are skipped by
    /// [`RegionStats::iter`].
    pub fn from_labels(labels: &LabelGrid) -> Self {
        let mut areas = vec![0u64; labels.max_label() as usize];
        for &label in labels.data() {
            if label > 0 {
                areas[label as usize - 1] += 1;
            }
        }
        Self { areas }
    }

    /// Number of regions with at least one pixel
    pub fn len(&self) -> usize {
        self.areas.iter().filter(|&&a| a > 0).count()
    }

    /// Whether no region has any pixel
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Area of `label`, or `None` for label 0 and unknown labels
    pub fn area(&self, label: u32) -> Option<u64> {
        let idx = (label as usize).checked_sub(1)?;
        self.areas.get(idx).copied().filter(|&a| a > 0)
    }

    /// Iterate `(label, area)` over non-empty regions in label order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.areas
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a > 0)
            .map(|(i, &a)| (i as u32 + 1, a))
    }
}

/// Outcome of applying an [`AreaBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandCount {
    /// Regions inside the band
    pub kept: usize,
    /// Regions smaller than `min_area_px`
    pub too_small: usize,
    /// Regions larger than the area cap
    pub too_large: usize,
}

/// Inclusive area band `min_area_px ..= floor(H * W * max_area_frac)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaBand {
    /// Smallest area counted, in pixels
    pub min_area_px: u32,
    /// Largest area counted, as a fraction of the image area
    pub max_area_frac: f64,
}

impl Default for AreaBand {
    fn default() -> Self {
        Self {
            min_area_px: 50,
            max_area_frac: 0.4,
        }
    }
}

impl AreaBand {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum area
    pub fn with_min_area_px(mut self, min_area_px: u32) -> Self {
        self.min_area_px = min_area_px;
        self
    }

    /// Set the maximum area fraction
    pub fn with_max_area_frac(mut self, max_area_frac: f64) -> Self {
        self.max_area_frac = max_area_frac;
        self
    }

    /// Reject a fraction that is negative or not finite.
    ///
    /// A fraction above one is accepted and leaves no effective cap.
    pub fn validate(&self) -> RegionResult<()> {
        if !self.max_area_frac.is_finite() || self.max_area_frac < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "max_area_frac must be finite and non-negative, got {}",
                self.max_area_frac
            )));
        }
        Ok(())
    }

    /// Area cap for a `width x height` image: `floor(H * W * max_area_frac)`.
    pub fn max_area_px(&self, width: u32, height: u32) -> u64 {
        let total = width as u64 * height as u64;
        (total as f64 * self.max_area_frac).floor() as u64
    }

    /// Classify every region in `stats` against the band.
    pub fn apply(&self, stats: &RegionStats, width: u32, height: u32) -> RegionResult<BandCount> {
        self.validate()?;
        let max_area = self.max_area_px(width, height);
        let min_area = self.min_area_px as u64;

        let mut result = BandCount::default();
        for (_, area) in stats.iter() {
            if area < min_area {
                result.too_small += 1;
            } else if area > max_area {
                result.too_large += 1;
            } else {
                result.kept += 1;
            }
        }

        debug!(
            "area band {}..={} px: kept {}, dropped {} small / {} large",
            min_area, max_area, result.kept, result.too_small, result.too_large
        );
        Ok(result)
    }

    /// Number of regions in `stats` whose area lies in the band.
    pub fn count(&self, stats: &RegionStats, width: u32, height: u32) -> RegionResult<usize> {
        Ok(self.apply(stats, width, height)?.kept)
    }
}
