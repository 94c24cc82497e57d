//! Binarization regression test
//!
//! Dark disks on a light background must come out as foreground with
//! their painted areas, with and without smoothing.
//!
//! Run with:
//! ```
//! cargo test -p rockcount-color --test threshold_reg
//! ```

use rockcount_color::{BinarizeOptions, ThresholdPolicy, binarize, compute_otsu_threshold, to_gray};
use rockcount_test::{BACKGROUND, Disk, FOREGROUND, RegParams, disk_image};

#[test]
fn threshold_reg() {
    let mut rp = RegParams::new("threshold");

    let disk = Disk::new(30, 30, 10);
    let image = disk_image(60, 60, &[disk]);
    let area = disk.area() as f64;

    // Unsmoothed: Otsu lands on the object level itself
    let options = BinarizeOptions::new().with_blur_radius(0);
    let sharp = binarize(&image, &options).expect("binarize failed");
    rp.compare_values(FOREGROUND.luma() as f64, sharp.threshold as f64, 0.0);
    rp.compare_values(area, sharp.mask.count_foreground() as f64, 0.0);

    // Fixed policy agrees on a two-level image
    let options = options.with_policy(ThresholdPolicy::fixed_default());
    let fixed = binarize(&image, &options).expect("binarize failed");
    rp.compare_values(127.0, fixed.threshold as f64, 0.0);
    rp.compare_masks(&sharp.mask, &fixed.mask);

    // Default smoothing moves the edge by at most a pixel ring
    let smooth = binarize(&image, &BinarizeOptions::default()).expect("binarize failed");
    rp.check(
        smooth.threshold > FOREGROUND.luma() && smooth.threshold < BACKGROUND.luma(),
        "smoothed threshold between the two levels",
    );
    rp.compare_values(area, smooth.mask.count_foreground() as f64, 70.0);
    rp.check(smooth.mask.at(30, 30), "disk center is foreground");
    rp.check(!smooth.mask.at(0, 0), "corner is background");

    // Uniform image: nothing to separate
    let blank = disk_image(16, 16, &[]);
    rp.compare_values(0.0, compute_otsu_threshold(&to_gray(&blank)) as f64, 0.0);
    let result = binarize(&blank, &BinarizeOptions::default()).expect("binarize failed");
    rp.compare_values(0.0, result.mask.count_foreground() as f64, 0.0);

    assert!(rp.cleanup(), "threshold regression test failed");
}
