//! Watershed separation of touching regions
//!
//! Touching objects merge into one connected component. Their distance
//! transform still has one maximum per object, so the maxima seed a
//! marker-controlled watershed on the negated distance that splits the
//! component along its necks.
//!
//! The steps are exposed individually ([`find_seeds`], [`MarkerSet`],
//! [`watershed_from_markers`]) and chained by [`watershed_segmentation`].

use crate::RegionResult;
use crate::distance::distance_transform;
use log::debug;
use rockcount_core::{BinaryMask, DistanceField, Grid, LabelGrid};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Options for watershed separation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatershedOptions {
    /// Minimum seed spacing and border margin, in pixels
    pub min_distance: u32,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self { min_distance: 10 }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum seed distance
    pub fn with_min_distance(mut self, min_distance: u32) -> Self {
        self.min_distance = min_distance;
        self
    }
}

/// A distance-field maximum used as a watershed marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub x: u32,
    pub y: u32,
    /// Distance-field value at the seed
    pub value: f32,
}

/// Sliding maximum over `[i - r, i + r]` clipped to the line.
fn running_max(line: &[f32], r: usize, out: &mut [f32]) {
    let n = line.len();
    for (i, dst) in out.iter_mut().enumerate() {
        let lo = i.saturating_sub(r);
        let hi = (i + r).min(n - 1);
        *dst = line[lo..=hi].iter().copied().fold(f32::NEG_INFINITY, f32::max);
    }
}

/// Maximum of each pixel's `(2r+1) x (2r+1)` neighbourhood, clipped at the
/// image edges.
fn maximum_filter(field: &DistanceField, r: usize) -> Vec<f32> {
    let (w, h) = field.dimensions();
    let (wu, hu) = (w as usize, h as usize);

    let mut horizontal = vec![0.0f32; wu * hu];
    for (src, dst) in field
        .data()
        .chunks_exact(wu)
        .zip(horizontal.chunks_exact_mut(wu))
    {
        running_max(src, r, dst);
    }

    let mut out = vec![0.0f32; wu * hu];
    let mut column = vec![0.0f32; hu];
    let mut column_max = vec![0.0f32; hu];
    for x in 0..wu {
        for (y, v) in column.iter_mut().enumerate() {
            *v = horizontal[y * wu + x];
        }
        running_max(&column, r, &mut column_max);
        for (y, &v) in column_max.iter().enumerate() {
            out[y * wu + x] = v;
        }
    }
    out
}

/// Find watershed seeds in a distance field.
///
/// A pixel qualifies when its value is positive, equals the maximum of its
/// `(2d+1) x (2d+1)` neighbourhood, and lies at least `d` pixels from every
/// image edge (`d = min_distance`). Candidates are then taken strongest
/// first, raster order breaking ties, and a candidate closer than `d`
/// (Chebyshev) to an already kept seed is discarded.
pub fn find_seeds(field: &DistanceField, options: &WatershedOptions) -> Vec<Seed> {
    let (w, h) = field.dimensions();
    let d = options.min_distance as u64;
    if 2 * d >= w as u64 || 2 * d >= h as u64 {
        return Vec::new();
    }
    let d = d as u32;
    let local_max = maximum_filter(field, d as usize);

    let mut candidates = Vec::new();
    for y in d..h - d {
        for x in d..w - d {
            let idx = field.index_of(x, y);
            let value = field.data()[idx];
            if value > 0.0 && value == local_max[idx] {
                candidates.push(Seed { x, y, value });
            }
        }
    }
    // Stable: equal values keep raster order
    candidates.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut kept: Vec<Seed> = Vec::new();
    for c in candidates {
        let too_close = kept
            .iter()
            .any(|k| k.x.abs_diff(c.x).max(k.y.abs_diff(c.y)) < d);
        if !too_close {
            kept.push(c);
        }
    }
    kept
}

/// Marker image for [`watershed_from_markers`]: marker `i` (1-based, in
/// seed order) sits at the position of seed `i - 1`; every other pixel is 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    markers: LabelGrid,
    len: u32,
}

impl MarkerSet {
    /// Place one marker per seed on a `width x height` grid.
    pub fn from_seeds(seeds: &[Seed], width: u32, height: u32) -> RegionResult<Self> {
        let mut markers: LabelGrid = Grid::new(width, height)?;
        for (i, seed) in seeds.iter().enumerate() {
            markers.set(seed.x, seed.y, i as u32 + 1)?;
        }
        Ok(Self {
            markers,
            len: seeds.len() as u32,
        })
    }

    /// Number of markers
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether there are no markers
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The marker image
    pub fn markers(&self) -> &LabelGrid {
        &self.markers
    }
}

/// An entry of the flooding queue: highest distance first, then the
/// earliest pushed.
#[derive(Debug, Clone, Copy)]
struct FloodPixel {
    value: f32,
    age: u64,
    index: usize,
}

impl PartialEq for FloodPixel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloodPixel {}

impl PartialOrd for FloodPixel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloodPixel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| other.age.cmp(&self.age))
    }
}

/// Marker-controlled watershed on the negated distance field.
///
/// Pixels are flooded in order of decreasing distance, 4-connected, and
/// only inside `mask`. Each flooded pixel takes the label of the pixel that
/// reached it first. Mask pixels no marker can reach keep label 0, and
/// markers outside the mask are ignored.
pub fn watershed_from_markers(
    field: &DistanceField,
    markers: &MarkerSet,
    mask: &BinaryMask,
) -> RegionResult<LabelGrid> {
    field.check_same_size(mask)?;
    field.check_same_size(markers.markers())?;
    let (w, h) = field.dimensions();

    let mut labels: LabelGrid = Grid::new(w, h)?;
    let mut heap = BinaryHeap::new();
    let mut age = 0u64;

    for (index, &marker) in markers.markers().data().iter().enumerate() {
        if marker == 0 || !mask.data()[index] {
            continue;
        }
        labels.data_mut()[index] = marker;
        heap.push(FloodPixel {
            value: field.data()[index],
            age,
            index,
        });
        age += 1;
    }

    let wu = w as usize;
    while let Some(FloodPixel { index, .. }) = heap.pop() {
        let label = labels.data()[index];
        let x = (index % wu) as i64;
        let y = (index / wu) as i64;
        for (dx, dy) in [(0i64, -1i64), (-1, 0), (1, 0), (0, 1)] {
            let (nx, ny) = (x + dx, y + dy);
            if !labels.contains(nx, ny) {
                continue;
            }
            let n = ny as usize * wu + nx as usize;
            if !mask.data()[n] || labels.data()[n] != 0 {
                continue;
            }
            labels.data_mut()[n] = label;
            heap.push(FloodPixel {
                value: field.data()[n],
                age,
                index: n,
            });
            age += 1;
        }
    }

    debug!(
        "watershed flooded {} markers over {}x{} mask",
        markers.len(),
        w,
        h
    );
    Ok(labels)
}

/// Distance transform, seeding and flooding in one call.
///
/// Returns `Ok(None)` when no seed qualifies, so the caller can fall back
/// to plain connected-component labeling.
///
/// # Errors
///
/// [`RegionError::NoBackground`](crate::RegionError::NoBackground) for an
/// all-foreground mask.
pub fn watershed_segmentation(
    mask: &BinaryMask,
    options: &WatershedOptions,
) -> RegionResult<Option<LabelGrid>> {
    let field = distance_transform(mask)?;
    let seeds = find_seeds(&field, options);
    debug!(
        "found {} watershed seeds (min_distance {})",
        seeds.len(),
        options.min_distance
    );
    if seeds.is_empty() {
        return Ok(None);
    }

    let (w, h) = mask.dimensions();
    let markers = MarkerSet::from_seeds(&seeds, w, h)?;
    watershed_from_markers(&field, &markers, mask).map(Some)
}
