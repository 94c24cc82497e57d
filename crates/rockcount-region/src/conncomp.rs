//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary masks. It uses Union-Find (disjoint set) data structure for
//! efficient labeling.

use crate::error::RegionResult;
use log::debug;
use rockcount_core::{BinaryMask, Grid, LabelGrid};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbors already visited in a raster scan: left, then the row above
    fn causal_offsets(self) -> &'static [(i64, i64)] {
        match self {
            ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
            ConnectivityType::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// Disjoint-set forest over provisional labels.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Slot 0 is the background and never joins a set
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        // Smaller root wins so representatives follow raster order
        let (keep, drop) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[drop as usize] = keep;
        keep
    }
}

/// Label all connected components in a binary mask
///
/// Background pixels get label 0. Components get dense labels `1..=K` in
/// the raster order of their first pixel.
pub fn label_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<LabelGrid> {
    let (w, h) = mask.dimensions();
    let mut labels: LabelGrid = Grid::new(w, h)?;
    let mut sets = UnionFind::new();
    let offsets = connectivity.causal_offsets();

    // First pass: provisional labels and equivalences
    for y in 0..h {
        for x in 0..w {
            if !mask.at(x, y) {
                continue;
            }
            let mut current = 0u32;
            for &(dx, dy) in offsets {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if !labels.contains(nx, ny) {
                    continue;
                }
                let neighbor = labels.at(nx as u32, ny as u32);
                if neighbor == 0 {
                    continue;
                }
                current = if current == 0 {
                    sets.find(neighbor)
                } else {
                    sets.union(current, neighbor)
                };
            }
            if current == 0 {
                current = sets.make_set();
            }
            let idx = labels.index_of(x, y);
            labels.data_mut()[idx] = current;
        }
    }

    // Second pass: resolve to roots and compact to 1..=K
    let mut dense = vec![0u32; sets.parent.len()];
    let mut next = 0u32;
    for i in 0..labels.data().len() {
        let provisional = labels.data()[i];
        if provisional == 0 {
            continue;
        }
        let root = sets.find(provisional) as usize;
        if dense[root] == 0 {
            next += 1;
            dense[root] = next;
        }
        labels.data_mut()[i] = dense[root];
    }

    debug!(
        "labeled {} components ({:?}) in {}x{} mask",
        next, connectivity, w, h
    );
    Ok(labels)
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
    fn test_diagonal_touch_depends_on_connectivity() {
        let mask = mask_from(&["x..", ".x.", "..x"]);
        let eight = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight.max_label(), 1);
        let four = label_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(four.max_label(), 3);
        assert_eq!(four.at(0, 0), 1);
        assert_eq!(four.at(2, 2), 3);
    }

    #[test]
    fn test_u_shape_merges() {
        // Two arms are provisionally distinct until the bottom row joins them
        let mask = mask_from(&["x...x", "x...x", "xxxxx"]);
        let labels = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.max_label(), 1);
        assert!(labels.data().iter().all(|&l| l <= 1));
    }

    #[test]
    fn test_labels_are_dense_in_raster_order() {
        let mask = mask_from(&["..x.x", "x....", "....x"]);
        let labels = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.at(2, 0), 1);
        assert_eq!(labels.at(4, 0), 2);
        assert_eq!(labels.at(0, 1), 3);
        assert_eq!(labels.at(4, 2), 4);
        assert_eq!(labels.at(1, 1), 0);
    }

    #[test]
    fn test_anti_diagonal_join() {
        // Up-right neighbor joins two provisional labels
        let mask = mask_from(&["x.x", ".x."]);
        let labels = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.max_label(), 1);
    }

    #[test]
    fn test_empty_mask() {
        let mask = Grid::filled(4, 4, false).unwrap();
        let labels = label_connected_components(&mask, ConnectivityType::default()).unwrap();
        assert_eq!(labels.max_label(), 0);
    }
}
