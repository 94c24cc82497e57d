//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological operations.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - part of the neighborhood
    Hit = 1,
}

/// A horizontal run of hits, relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitSpan {
    /// Row offset
    pub dy: i32,
    /// First column offset (inclusive)
    pub dx_start: i32,
    /// Last column offset (inclusive)
    pub dx_end: i32,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create an empty structuring element with its origin at the center
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; width as usize * height as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a disk of diameter `2 * radius + 1`.
    ///
    /// Row `dy` covers the columns `|dx| <= round(sqrt(r^2 - dy^2))`, the
    /// same elliptical footprint common imaging libraries produce for a
    /// square kernel. Radius 0 is the single-pixel identity element.
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let size = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| MorphError::InvalidSel(format!("disk radius {} too large", radius)))?;
        let mut sel = Self::new(size, size)?;
        let r = radius as i64;
        for dy in -r..=r {
            let half = (((r * r - dy * dy) as f64).sqrt()).round() as i64;
            for dx in -half..=half {
                sel.set_element((dx + r) as u32, (dy + r) as u32, SelElement::Hit);
            }
        }
        Ok(sel)
    }

    /// Create a structuring element from a string pattern
    ///
    /// Rows are separated by newlines; `x` is a hit and `.` a don't-care.
    /// The origin is the center.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut sel = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let elem = match c {
                    'x' | 'X' => SelElement::Hit,
                    '.' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?}",
                            other
                        )));
                    }
                };
                sel.set_element(x as u32, y as u32, elem);
            }
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Set an element at (x, y); out-of-range positions are ignored
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = elem;
        }
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width as usize;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx % width) as i32;
                    let y = (idx / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// Maximal horizontal runs of hits, in row-major order.
    pub fn hit_spans(&self) -> Vec<HitSpan> {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let mut spans = Vec::new();

        for (y, row) in self.data.chunks_exact(self.width as usize).enumerate() {
            let mut start = None;
            for (x, &elem) in row.iter().chain(std::iter::once(&SelElement::DontCare)).enumerate() {
                match (elem, start) {
                    (SelElement::Hit, None) => start = Some(x as i32),
                    (SelElement::DontCare, Some(s)) => {
                        spans.push(HitSpan {
                            dy: y as i32 - cy,
                            dx_start: s - cx,
                            dx_end: x as i32 - 1 - cx,
                        });
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sel: &Sel) -> String {
        (0..sel.height())
            .map(|y| {
                (0..sel.width())
                    .map(|x| match sel.get_element(x, y) {
                        Some(SelElement::Hit) => 'x',
                        _ => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_disk_radius_2() {
        let sel = Sel::create_disk(2).unwrap();
        assert_eq!(render(&sel), "..x..\nxxxxx\nxxxxx\nxxxxx\n..x..");
        assert_eq!(sel.hit_count(), 17);
    }

    #[test]
    fn test_disk_radius_3() {
        let sel = Sel::create_disk(3).unwrap();
        assert_eq!(
            render(&sel),
            "...x...\n.xxxxx.\nxxxxxxx\nxxxxxxx\nxxxxxxx\n.xxxxx.\n...x..."
        );
        assert_eq!(sel.origin_x(), 3);
        assert_eq!(sel.origin_y(), 3);
    }

    #[test]
    fn test_disk_radius_0_is_identity() {
        let sel = Sel::create_disk(0).unwrap();
        assert_eq!(sel.width(), 1);
        assert_eq!(sel.hit_offsets().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_from_string_and_spans() {
        let sel = Sel::from_string("x.x\nxxx\n...").unwrap();
        assert_eq!(sel.hit_count(), 5);
        assert_eq!(
            sel.hit_spans(),
            vec![
                HitSpan { dy: -1, dx_start: -1, dx_end: -1 },
                HitSpan { dy: -1, dx_start: 1, dx_end: 1 },
                HitSpan { dy: 0, dx_start: -1, dx_end: 1 },
            ]
        );
    }

    #[test]
    fn test_invalid_sels() {
        assert!(Sel::new(0, 3).is_err());
        assert!(Sel::from_string("").is_err());
        assert!(Sel::from_string("xx\nx").is_err());
        assert!(Sel::from_string("xo").is_err());
        assert!(Sel::create_disk(u32::MAX).is_err());
    }

    #[test]
    fn test_brick_offsets() {
        let sel = Sel::create_brick(3, 1).unwrap();
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets, vec![(-1, 0), (0, 0), (1, 0)]);
    }
}
