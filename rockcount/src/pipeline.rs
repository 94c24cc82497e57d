//! The counting pipeline
//!
//! decode -> binarize -> cleanup -> separate -> filter -> count. Every
//! failure along the way is caught and reported inside the
//! [`AnalysisResult`]; the public entry points never return `Err`.

use crate::strategy::{Capabilities, ConnectedComponents, Separation, Separator, Watershed};
use crate::{AnalysisError, AnalysisParams, AnalysisResult};
use log::{debug, warn};
use rockcount_color::binarize;
use rockcount_core::ColorGrid;
use rockcount_io::{ImagePayload, decode_image};
use rockcount_morph::cleanup;

/// Counts foreground objects in images with fixed parameters.
///
/// The analyzer holds no per-image state, so one instance can process any
/// number of images, from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct RockCounter {
    params: AnalysisParams,
    capabilities: Capabilities,
}

impl Default for RockCounter {
    fn default() -> Self {
        Self::new(AnalysisParams::default())
    }
}

impl RockCounter {
    /// Create an analyzer with the capabilities of this build
    pub fn new(params: AnalysisParams) -> Self {
        Self::with_capabilities(params, Capabilities::detect())
    }

    /// Create an analyzer with explicit capabilities.
    ///
    /// Passing [`Capabilities::minimal`] forces connected components even
    /// when `use_watershed` is set.
    pub fn with_capabilities(params: AnalysisParams, capabilities: Capabilities) -> Self {
        Self {
            params,
            capabilities,
        }
    }

    /// Get the parameters
    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Get the capabilities
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Analyze an encoded image (raw bytes, base64 text or a data URL).
    pub fn analyze<'a>(&self, payload: impl Into<ImagePayload<'a>>) -> AnalysisResult {
        Self::report(self.try_analyze(payload))
    }

    /// Analyze an already decoded image.
    pub fn analyze_grid(&self, image: &ColorGrid) -> AnalysisResult {
        Self::report(self.try_analyze_grid(image))
    }

    /// Like [`RockCounter::analyze`], but keeps the typed error.
    pub fn try_analyze<'a>(
        &self,
        payload: impl Into<ImagePayload<'a>>,
    ) -> Result<Separation, AnalysisError> {
        let image = decode_image(payload)?;
        self.try_analyze_grid(&image)
    }

    /// Like [`RockCounter::analyze_grid`], but keeps the typed error.
    pub fn try_analyze_grid(&self, image: &ColorGrid) -> Result<Separation, AnalysisError> {
        let (w, h) = image.dimensions();
        debug!("analyzing {}x{} image", w, h);

        let binarization = binarize(image, &self.params.binarize_options())?;
        debug!(
            "threshold {}: {} foreground px",
            binarization.threshold,
            binarization.mask.count_foreground()
        );

        let mask = cleanup(&binarization.mask, &self.params.cleanup_options())?;
        debug!("after cleanup: {} foreground px", mask.count_foreground());

        let separation = self.separator().separate(&mask)?;
        debug!(
            "{} of {} regions counted ({})",
            separation.count, separation.regions, separation.method
        );
        Ok(separation)
    }

    fn separator(&self) -> Box<dyn Separator> {
        let band = self.params.area_band();
        if self.params.use_watershed {
            Box::new(Watershed::new(
                band,
                self.params.watershed_min_distance,
                self.capabilities,
            ))
        } else {
            Box::new(ConnectedComponents::new(band))
        }
    }

    fn report(outcome: Result<Separation, AnalysisError>) -> AnalysisResult {
        match outcome {
            Ok(separation) => AnalysisResult::counted(separation.count, separation.method),
            Err(err) => {
                warn!("analysis failed: {}", err);
                AnalysisResult::failed(&err)
            }
        }
    }
}

/// Count objects in one encoded image.
///
/// Shorthand for `RockCounter::new(params.clone()).analyze(payload)`.
pub fn count_rocks<'a>(
    payload: impl Into<ImagePayload<'a>>,
    params: &AnalysisParams,
) -> AnalysisResult {
    RockCounter::new(params.clone()).analyze(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Method};
    use rockcount_core::{Grid, Rgb};

    fn blob_image() -> ColorGrid {
        Grid::from_fn(40, 40, |x, y| {
            if (10..30).contains(&x) && (10..30).contains(&y) {
                Rgb::gray(30)
            } else {
                Rgb::gray(220)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_single_blob() {
        let counter = RockCounter::new(AnalysisParams::default().with_watershed(false));
        let result = counter.analyze_grid(&blob_image());
        assert!(result.is_success());
        assert_eq!(result.count, 1);
        assert_eq!(result.method, Method::ConnectedComponents);
    }

    #[test]
    fn test_minimal_capabilities_never_report_watershed() {
        let counter =
            RockCounter::with_capabilities(AnalysisParams::default(), Capabilities::minimal());
        let result = counter.analyze_grid(&blob_image());
        assert_eq!(result.method, Method::ConnectedComponents);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn test_garbage_text_fails_softly() {
        let result = count_rocks("not an image", &AnalysisParams::default());
        assert_eq!(result.count, 0);
        assert_eq!(result.method, Method::None);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_try_analyze_keeps_error_kind() {
        let counter = RockCounter::default();
        let err = counter.try_analyze("data:text/plain;base64,AAAA").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEnvelope);
        let err = counter.try_analyze(&b"\x89PNG\r\n"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndecodableImage);
    }

    #[test]
    fn test_invalid_params_are_processing_failures() {
        let params = AnalysisParams::default().with_max_area_frac(f64::NAN);
        let err = RockCounter::new(params)
            .try_analyze_grid(&blob_image())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcessingFailure);
    }
}
