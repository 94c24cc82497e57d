//! Region separation strategies
//!
//! A [`Separator`] turns a cleaned foreground mask into a count. Both
//! strategies finish through the same area-band filter, so they differ only
//! in how the regions are labeled.

use crate::{AnalysisError, Method};
use log::debug;
use rockcount_core::{BinaryMask, LabelGrid};
use rockcount_region::{AreaBand, ConnectivityType, RegionStats, label_connected_components};

/// Optional capabilities compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Distance-transform watershed separation (cargo feature `watershed`)
    pub watershed: bool,
}

impl Capabilities {
    /// Capabilities of the current build
    pub fn detect() -> Self {
        Self {
            watershed: cfg!(feature = "watershed"),
        }
    }

    /// No optional capability; every request falls back to connected
    /// components
    pub fn minimal() -> Self {
        Self { watershed: false }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Outcome of a [`Separator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separation {
    /// Regions inside the area band
    pub count: u64,
    /// Labeled regions before filtering
    pub regions: usize,
    /// Labeling that actually ran
    pub method: Method,
}

/// Labels a foreground mask and counts the regions in an area band.
pub trait Separator {
    /// The method this separator reports when it does its own labeling
    fn method(&self) -> Method;

    /// Label `mask` and count its in-band regions.
    fn separate(&self, mask: &BinaryMask) -> Result<Separation, AnalysisError>;
}

/// Shared tail of every strategy: measure the labels and apply the band.
fn count_in_band(
    labels: &LabelGrid,
    band: &AreaBand,
    method: Method,
) -> Result<Separation, AnalysisError> {
    let stats = RegionStats::from_labels(labels);
    let kept = band.count(&stats, labels.width(), labels.height())?;
    Ok(Separation {
        count: kept as u64,
        regions: stats.len(),
        method,
    })
}

/// 8-connected component labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponents {
    band: AreaBand,
}

impl ConnectedComponents {
    /// Create a connected-component separator counting within `band`
    pub fn new(band: AreaBand) -> Self {
        Self { band }
    }
}

impl Separator for ConnectedComponents {
    fn method(&self) -> Method {
        Method::ConnectedComponents
    }

    fn separate(&self, mask: &BinaryMask) -> Result<Separation, AnalysisError> {
        self.band.validate()?;
        let labels = label_connected_components(mask, ConnectivityType::EightWay)?;
        count_in_band(&labels, &self.band, self.method())
    }
}

/// Distance-transform watershed, falling back to connected components when
/// the capability is missing or no seed qualifies.
#[derive(Debug, Clone, PartialEq)]
pub struct Watershed {
    band: AreaBand,
    min_distance: u32,
    available: bool,
    fallback: ConnectedComponents,
}

impl Watershed {
    /// Create a watershed separator.
    ///
    /// `capabilities.watershed == false` makes every call delegate to
    /// [`ConnectedComponents`].
    pub fn new(band: AreaBand, min_distance: u32, capabilities: Capabilities) -> Self {
        Self {
            fallback: ConnectedComponents::new(band.clone()),
            band,
            min_distance,
            available: capabilities.watershed,
        }
    }

    /// Whether this separator can run the watershed itself
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[cfg(feature = "watershed")]
    fn try_watershed(&self, mask: &BinaryMask) -> Result<Option<Separation>, AnalysisError> {
        use rockcount_region::{WatershedOptions, watershed_segmentation};

        let options = WatershedOptions::new().with_min_distance(self.min_distance);
        match watershed_segmentation(mask, &options)? {
            Some(labels) => count_in_band(&labels, &self.band, self.method()).map(Some),
            None => Ok(None),
        }
    }

    #[cfg(not(feature = "watershed"))]
    fn try_watershed(&self, _mask: &BinaryMask) -> Result<Option<Separation>, AnalysisError> {
        Ok(None)
    }
}

impl Separator for Watershed {
    fn method(&self) -> Method {
        Method::Watershed
    }

    fn separate(&self, mask: &BinaryMask) -> Result<Separation, AnalysisError> {
        self.band.validate()?;
        if self.available {
            if let Some(separation) = self.try_watershed(mask)? {
                return Ok(separation);
            }
            debug!("no watershed seeds, delegating to connected components");
        } else {
            debug!("watershed unavailable, delegating to connected components");
        }
        self.fallback.separate(mask)
    }
}
