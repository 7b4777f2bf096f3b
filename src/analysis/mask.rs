use bitvec::prelude::*;
use ndarray::ArrayView2;
use std::fmt;

/// Row-major bitset marking which cells of a grid are foreground
///
/// A cell is foreground iff its intensity is greater than or equal to the
/// threshold. Out-of-bounds queries report background.
#[derive(Clone, Debug)]
pub struct ForegroundMask {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl ForegroundMask {
    /// Create a mask with every cell set to background
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Threshold a grid, marking cells with `value >= threshold`
    pub fn from_threshold<T: PartialOrd>(grid: &ArrayView2<'_, T>, threshold: &T) -> Self {
        let (rows, cols) = grid.dim();
        let mut mask = Self::new(rows, cols);
        for ((row, col), value) in grid.indexed_iter() {
            if value >= threshold {
                mask.set(row, col);
            }
        }
        mask
    }

    /// Mark a cell as foreground
    pub fn set(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            self.bits.set(row * self.cols + col, true);
        }
    }

    /// Test whether a cell is foreground
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Grid dimensions as (rows, cols)
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Test if no cell is foreground
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count foreground cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate foreground cells in row-major order
    pub fn iter_foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols.max(1);
        self.bits
            .iter_ones()
            .map(move |index| (index / cols, index % cols))
    }
}

impl fmt::Display for ForegroundMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ForegroundMask({}x{}, {} set)",
            self.rows,
            self.cols,
            self.count()
        )
    }
}
