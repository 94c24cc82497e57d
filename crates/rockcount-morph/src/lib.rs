//! rockcount-morph - Morphological operations on binary masks
//!
//! This crate provides:
//!
//! - Structuring elements (SEL), including the elliptical disk used for
//!   mask cleanup
//! - Binary morphology: erosion, dilation, opening, closing
//! - Mask cleanup: opening then closing with independently sized disks
//!
//! Pixels outside the image never change a result: erosion treats them as
//! foreground and dilation as background.
//!
//! # Examples
//!
//! ```
//! use rockcount_core::Grid;
//! use rockcount_morph::{CleanupOptions, cleanup};
//!
//! // A lone pixel is removed by the opening
//! let mut mask = Grid::new(20, 20).unwrap();
//! mask.set(10, 10, true).unwrap();
//! let cleaned = cleanup(&mask, &CleanupOptions::default()).unwrap();
//! assert!(cleaned.is_empty_mask());
//! ```

pub mod binary;
pub mod cleanup;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{close, dilate, erode, open};
pub use cleanup::{CleanupOptions, cleanup};
