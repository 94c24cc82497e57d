//! Convolution regression test
//!
//! Gaussian smoothing as used before thresholding: flat areas stay flat,
//! edges spread by at most the kernel radius, and symmetric scenes stay
//! symmetric.
//!
//! Run with:
//! ```
//! cargo test -p rockcount-filter --test convolve_reg
//! ```

use rockcount_core::{GrayGrid, Grid};
use rockcount_filter::{Kernel, convolve_sep, gaussian_blur};
use rockcount_test::{Disk, RegParams};

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    // Vertical step edge at x = 10
    let step: GrayGrid = Grid::from_fn(20, 10, |x, _| if x < 10 { 0 } else { 255 }).expect("step");
    let blurred = gaussian_blur(&step, 5).expect("blur 5");
    for y in 0..10 {
        let row = blurred.row(y);
        rp.check(row.windows(2).all(|p| p[0] <= p[1]), "edge stays monotone");
        rp.compare_values(0.0, row[7] as f64, 0.0);
        rp.compare_values(255.0, row[12] as f64, 0.0);
    }
    // Halfway between the two levels at the edge itself
    rp.compare_values(127.5, (blurred.at(9, 5) as f64 + blurred.at(10, 5) as f64) / 2.0, 1.0);

    // Mirror symmetry survives the small-kernel tables exactly
    let disk = Disk::new(15, 12, 7);
    let scene: GrayGrid = Grid::from_fn(31, 25, |x, y| {
        if disk.contains(x as i64, y as i64) { 40 } else { 210 }
    })
    .expect("scene");
    for size in [3, 5, 7] {
        let b = gaussian_blur(&scene, size).expect("blur");
        let symmetric = (0..25).all(|y| (0..31).all(|x| b.at(x, y) == b.at(30 - x, y)));
        rp.check(symmetric, "blur keeps mirror symmetry");
        rp.compare_values(40.0, b.at(15, 12) as f64, 0.0);
        rp.compare_values(210.0, b.at(0, 0) as f64, 0.0);
    }

    // Computed-sigma kernels stay normalized
    let flat: GrayGrid = Grid::filled(16, 16, 123).expect("flat");
    for size in [9, 15] {
        let b = gaussian_blur(&flat, size).expect("large blur");
        rp.check(b == flat, "flat image unchanged by large kernel");
    }

    // Explicit taps along rows only
    let row_taps = Kernel::from_slice(&[0.25, 0.5, 0.25]).expect("row kernel");
    let identity = Kernel::from_slice(&[1.0]).expect("identity kernel");
    let impulse: GrayGrid =
        Grid::from_fn(7, 3, |x, _| if x == 3 { 100 } else { 0 }).expect("impulse");
    let spread = convolve_sep(&impulse, &row_taps, &identity).expect("row convolve");
    rp.compare_values(25.0, spread.at(2, 1) as f64, 0.0);
    rp.compare_values(50.0, spread.at(3, 1) as f64, 0.0);
    rp.compare_values(25.0, spread.at(4, 1) as f64, 0.0);
    rp.compare_values(0.0, spread.at(1, 1) as f64, 0.0);
    rp.compare_values(0.0, spread.at(3, 0) as f64, 0.0);

    assert!(rp.cleanup(), "convolve regression test failed");
}
