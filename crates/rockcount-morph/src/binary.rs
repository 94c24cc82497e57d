//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for binary masks.
//!
//! Each operation walks the SEL as horizontal hit runs ([`Sel::hit_spans`])
//! and answers "how many foreground pixels lie in this row interval" from a
//! per-row prefix count, so the cost per pixel is proportional to the SEL
//! height rather than its area.

use crate::{MorphResult, Sel};
use rockcount_core::{BinaryMask, Grid};

/// Per-row prefix counts of foreground pixels.
///
/// `prefix[y * (w + 1) + x]` is the number of foreground pixels in
/// `row(y)[..x]`.
struct RowPrefix {
    stride: usize,
    counts: Vec<u32>,
}

impl RowPrefix {
    fn new(mask: &BinaryMask) -> Self {
        let w = mask.width() as usize;
        let stride = w + 1;
        let mut counts = Vec::with_capacity(stride * mask.height() as usize);
        for y in 0..mask.height() {
            let mut acc = 0u32;
            counts.push(0);
            for &fg in mask.row(y) {
                acc += fg as u32;
                counts.push(acc);
            }
        }
        Self { stride, counts }
    }

    /// Foreground count in `row(y)[x0..=x1]`; the interval must be in range.
    #[inline]
    fn count(&self, y: usize, x0: usize, x1: usize) -> u32 {
        let base = y * self.stride;
        self.counts[base + x1 + 1] - self.counts[base + x0]
    }
}

/// Clip the run `x + dx_start ..= x + dx_end` to `0..w`.
#[inline]
fn clip_run(x: i64, dx_start: i32, dx_end: i32, w: i64) -> Option<(usize, usize)> {
    let x0 = (x + dx_start as i64).max(0);
    let x1 = (x + dx_end as i64).min(w - 1);
    (x0 <= x1).then_some((x0 as usize, x1 as usize))
}

/// Dilate a binary mask
///
/// Dilation expands foreground regions: an output pixel is set when any
/// source pixel under the reflected SEL is set. Pixels outside the image
/// are background.
pub fn dilate(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let (w, h) = mask.dimensions();
    let prefix = RowPrefix::new(mask);
    // Dilation uses the reflected SEL: source offset is -(dx, dy)
    let spans: Vec<_> = sel
        .hit_spans()
        .into_iter()
        .map(|s| (-s.dy, -s.dx_end, -s.dx_start))
        .collect();

    let out = Grid::from_fn(w, h, |x, y| {
        spans.iter().any(|&(dy, dx_start, dx_end)| {
            let sy = y as i64 + dy as i64;
            if sy < 0 || sy >= h as i64 {
                return false;
            }
            match clip_run(x as i64, dx_start, dx_end, w as i64) {
                Some((x0, x1)) => prefix.count(sy as usize, x0, x1) > 0,
                None => false,
            }
        })
    })?;
    Ok(out)
}

/// Erode a binary mask
///
/// Erosion shrinks foreground regions: an output pixel stays set only when
/// every source pixel under the SEL is set. Pixels outside the image count
/// as foreground, so objects touching the border are not eaten from that
/// side.
pub fn erode(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let (w, h) = mask.dimensions();
    let prefix = RowPrefix::new(mask);
    let spans = sel.hit_spans();

    let out = Grid::from_fn(w, h, |x, y| {
        spans.iter().all(|s| {
            let sy = y as i64 + s.dy as i64;
            if sy < 0 || sy >= h as i64 {
                return true;
            }
            match clip_run(x as i64, s.dx_start, s.dx_end, w as i64) {
                Some((x0, x1)) => prefix.count(sy as usize, x0, x1) as usize == x1 - x0 + 1,
                None => true,
            }
        })
    })?;
    Ok(out)
}

/// Open a binary mask
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let eroded = erode(mask, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary mask
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and gaps in foreground regions.
pub fn close(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let dilated = dilate(mask, sel)?;
    erode(&dilated, sel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> BinaryMask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        Grid::from_fn(w, h, |x, y| rows[y as usize].as_bytes()[x as usize] == b'x').unwrap()
    }

    #[test]
    fn test_dilate_point_gives_sel_footprint() {
        let mut mask: BinaryMask = Grid::new(9, 9).unwrap();
        mask.set(4, 4, true).unwrap();
        let sel = Sel::create_disk(2).unwrap();
        let dilated = dilate(&mask, &sel).unwrap();
        assert_eq!(dilated.count_foreground(), 17);
        assert!(dilated.at(4, 2));
        assert!(!dilated.at(3, 2));
        assert!(dilated.at(2, 3));
    }

    #[test]
    fn test_erode_square() {
        let mask = mask_from(&[
            ".......", ".xxxxx.", ".xxxxx.", ".xxxxx.", ".xxxxx.", ".xxxxx.", ".......",
        ]);
        let sel = Sel::create_brick(3, 3).unwrap();
        let eroded = erode(&mask, &sel).unwrap();
        assert_eq!(eroded.count_foreground(), 9);
        assert!(eroded.at(3, 3));
        assert!(!eroded.at(1, 1));
    }

    #[test]
    fn test_border_is_neutral() {
        // A full mask survives erosion and an empty one stays empty under
        // dilation: the outside never contributes.
        let sel = Sel::create_disk(3).unwrap();
        let full = Grid::filled(6, 5, true).unwrap();
        assert!(erode(&full, &sel).unwrap().is_full_mask());
        let empty: BinaryMask = Grid::new(6, 5).unwrap();
        assert!(dilate(&empty, &sel).unwrap().is_empty_mask());
    }

    #[test]
    fn test_open_removes_specks_keeps_blobs() {
        let mask = mask_from(&[
            "x.........",
            "..........",
            "...xxxx...",
            "...xxxx...",
            "...xxxx...",
            "...xxxx...",
            "..........",
        ]);
        let sel = Sel::create_brick(3, 3).unwrap();
        let opened = open(&mask, &sel).unwrap();
        assert!(!opened.at(0, 0));
        assert_eq!(opened.count_foreground(), 16);
    }

    #[test]
    fn test_close_fills_gap() {
        let mask = mask_from(&["xxx.xxx", "xxx.xxx", "xxx.xxx"]);
        let sel = Sel::create_brick(3, 1).unwrap();
        let closed = close(&mask, &sel).unwrap();
        assert!(closed.is_full_mask());
    }

    #[test]
    fn test_asymmetric_sel_is_reflected_for_dilation() {
        // Hits at the origin and one pixel to its right
        let sel = Sel::from_string("...\n.xx\n...").unwrap();
        let mask = mask_from(&["..x.."]);
        let dilated = dilate(&mask, &sel).unwrap();
        assert_eq!(dilated.data(), &[false, false, true, true, false]);
        let eroded = erode(&dilated, &sel).unwrap();
        assert_eq!(eroded.data(), &[false, false, true, false, false]);
    }
}
