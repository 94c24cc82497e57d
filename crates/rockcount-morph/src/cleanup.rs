//! Mask cleanup
//!
//! Opening with one disk removes specks and thin bridges, then closing with
//! a second disk fills pinholes and notches left by thresholding.

use crate::binary::{close, open};
use crate::{MorphError, MorphResult, Sel};
use log::debug;
use rockcount_core::BinaryMask;

/// Largest accepted disk radius
pub const MAX_RADIUS: u32 = 1 << 10;

/// Options for [`cleanup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Radius of the opening disk (0 skips the opening)
    pub open_radius: u32,
    /// Radius of the closing disk (0 skips the closing)
    pub close_radius: u32,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            open_radius: 2,
            close_radius: 3,
        }
    }
}

impl CleanupOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening radius
    pub fn with_open_radius(mut self, radius: u32) -> Self {
        self.open_radius = radius;
        self
    }

    /// Set the closing radius
    pub fn with_close_radius(mut self, radius: u32) -> Self {
        self.close_radius = radius;
        self
    }

    fn validate(&self) -> MorphResult<()> {
        for (name, radius) in [("open", self.open_radius), ("close", self.close_radius)] {
            if radius > MAX_RADIUS {
                return Err(MorphError::InvalidParameters(format!(
                    "{} radius {} exceeds {}",
                    name, radius, MAX_RADIUS
                )));
            }
        }
        Ok(())
    }
}

/// Open then close `mask` with disk structuring elements.
///
/// A radius of 0 leaves the mask unchanged for that step.
pub fn cleanup(mask: &BinaryMask, options: &CleanupOptions) -> MorphResult<BinaryMask> {
    options.validate()?;

    let opened = match options.open_radius {
        0 => mask.clone(),
        r => open(mask, &Sel::create_disk(r)?)?,
    };
    let closed = match options.close_radius {
        0 => opened,
        r => close(&opened, &Sel::create_disk(r)?)?,
    };

    debug!(
        "cleanup: open r={} close r={}, foreground {} -> {}",
        options.open_radius,
        options.close_radius,
        mask.count_foreground(),
        closed.count_foreground()
    );
    Ok(closed)
}
