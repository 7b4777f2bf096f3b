//! Connected region labeling and multiplicity counting
//!
//! Foreground cells are grouped under 8-connectivity: two cells belong to the
//! same region when they share an edge or a corner. Labeling runs in two
//! raster passes over a union-find forest. The first pass looks at the
//! already visited neighbours (west, north-west, north, north-east) and merges
//! their provisional labels; the second pass resolves every cell to its root
//! and renumbers regions in the order their first cell is met.

use crate::analysis::mask::ForegroundMask;
use crate::io::error::Result;
use crate::io::loader::load_grid;
use ndarray::{Array2, ArrayView2};
use std::path::Path;

// Neighbours already visited by a row-major scan
const PRIOR_NEIGHBOURS: [(isize, isize); 4] = [(0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// Disjoint-set forest over provisional labels
///
/// Roots are always the smallest label of their set, so resolving a cell
/// never points it at a label created later in the scan.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    const fn new() -> Self {
        Self { parent: Vec::new() }
    }

    fn make_set(&mut self) -> usize {
        let label = self.parent.len();
        self.parent.push(label);
        label
    }

    fn find(&mut self, label: usize) -> usize {
        let mut current = label;
        while let Some(&parent) = self.parent.get(current) {
            if parent == current {
                break;
            }
            // Path halving
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = grandparent;
            }
            current = grandparent;
        }
        current
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (keep, merge) = (root_a.min(root_b), root_a.max(root_b));
            if let Some(slot) = self.parent.get_mut(merge) {
                *slot = keep;
            }
        }
    }
}

/// Label image and region sizes produced by [`label_regions`]
#[derive(Debug, Clone)]
pub struct RegionLabels {
    /// Region label per cell, 0 for background and 1.. for regions
    pub labels: Array2<u32>,
    /// Pixel count of each region, indexed by `label - 1`
    pub sizes: Vec<usize>,
}

impl RegionLabels {
    /// Number of regions found
    pub const fn region_count(&self) -> usize {
        self.sizes.len()
    }

    /// Pixel count of one region, `None` for background or unknown labels
    pub fn size_of(&self, label: u32) -> Option<usize> {
        (label as usize)
            .checked_sub(1)
            .and_then(|index| self.sizes.get(index))
            .copied()
    }

    /// Consume the labeling, keeping only the multiplicities
    pub fn into_multiplicities(self) -> Vec<usize> {
        self.sizes
    }
}

/// Partition foreground cells into maximal 8-connected regions
pub fn label_regions(mask: &ForegroundMask) -> RegionLabels {
    let (rows, cols) = mask.dim();
    let mut provisional = Array2::<usize>::zeros((rows, cols));
    let mut forest = DisjointSet::new();
    // Label 0 is reserved for background
    forest.make_set();

    for (row, col) in mask.iter_foreground() {
        let mut assigned = 0;
        for (d_row, d_col) in PRIOR_NEIGHBOURS {
            let neighbour = row
                .checked_add_signed(d_row)
                .zip(col.checked_add_signed(d_col))
                .and_then(|position| provisional.get(position).copied())
                .unwrap_or(0);
            if neighbour == 0 {
                continue;
            }
            if assigned == 0 {
                assigned = neighbour;
            } else {
                forest.union(assigned, neighbour);
                assigned = assigned.min(neighbour);
            }
        }
        if assigned == 0 {
            assigned = forest.make_set();
        }
        if let Some(cell) = provisional.get_mut((row, col)) {
            *cell = assigned;
        }
    }

    let mut compact = vec![0u32; forest.parent.len()];
    let mut sizes = Vec::new();
    let mut labels = Array2::<u32>::zeros((rows, cols));

    for (row, col) in mask.iter_foreground() {
        let root = forest.find(provisional.get((row, col)).copied().unwrap_or(0));
        let Some(slot) = compact.get_mut(root) else {
            continue;
        };
        if *slot == 0 {
            sizes.push(0);
            *slot = sizes.len() as u32;
        }
        let label = *slot;
        if let Some(size) = sizes.get_mut(label as usize - 1) {
            *size += 1;
        }
        if let Some(cell) = labels.get_mut((row, col)) {
            *cell = label;
        }
    }

    RegionLabels { labels, sizes }
}

/// Threshold a grid and label its foreground regions
pub fn label_grid<T: PartialOrd>(grid: &ArrayView2<'_, T>, threshold: &T) -> RegionLabels {
    label_regions(&ForegroundMask::from_threshold(grid, threshold))
}

/// Multiplicity of every 8-connected region with `value >= threshold`
///
/// Regions are listed in raster order of their first cell. A grid with no
/// foreground yields an empty list.
pub fn count_regions<T: PartialOrd>(grid: &ArrayView2<'_, T>, threshold: &T) -> Vec<usize> {
    label_grid(grid, threshold).into_multiplicities()
}

/// Load a TIFF image and count its regions
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or is not two-dimensional;
/// the shape check happens before thresholding
pub fn count_image_regions<P: AsRef<Path>>(path: P, threshold: i64) -> Result<Vec<usize>> {
    let grid = load_grid(path)?;
    Ok(count_regions(&grid.view(), &(threshold as f64)))
}
