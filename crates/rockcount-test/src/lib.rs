//! rockcount-test - Regression test framework for rockcount
//!
//! This crate provides a small regression test harness plus synthetic
//! image fixtures, so regression tests need no image files on disk.
//!
//! - **Compare** (default): every check is recorded and a failed check
//!   fails the test at [`RegParams::cleanup`]
//! - **Display**: checks are still evaluated, and tests may print extra
//!   diagnostics guarded by [`RegParams::display`]
//!
//! # Usage
//!
//! ```ignore
//! use rockcount_test::{RegParams, disk_image};
//!
//! let mut rp = RegParams::new("pipeline");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    BACKGROUND, Disk, FOREGROUND, TOUCHING_DISKS, blank_mask, disk_image, encode_bmp, encode_png,
    mask_to_image, paint_disk, paint_rect, to_data_url, to_wrapped_base64, two_touching_disks,
};
pub use params::{RegParams, RegTestMode};
