//! Row-major dense matrix.

use alloc::vec::Vec;

/// Row-major `rows × cols` matrix backed by an owned buffer.
///
/// A matrix with `rows == 0`, `cols == 0`, or a buffer shorter than
/// `rows * cols` is *empty*, and every diagnostic treats it as a no-op input.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    /// Row-major element storage, length `>= rows * cols`.
    pub data: Vec<f64>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Matrix {
    /// Wrap an existing row-major buffer.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self { data, rows, cols }
    }

    /// A `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { data: alloc::vec![0.0; rows.saturating_mul(cols)], rows, cols }
    }

    /// Build from row slices. Every row must have the length of the first;
    /// returns `None` otherwise.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for r in rows {
            let r = r.as_ref();
            if r.len() != cols {
                return None;
            }
            data.extend_from_slice(r);
        }
        Some(Self { data, rows: rows.len(), cols })
    }

    /// `true` when the matrix carries no usable elements.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
            || self.cols == 0
            || self
                .rows
                .checked_mul(self.cols)
                .map_or(true, |n| self.data.len() < n)
    }

    /// Number of meaningful elements (`rows * cols`, or 0 when empty).
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.rows * self.cols
        }
    }

    /// Borrow row `r`. Returns `None` when empty or out of range.
    pub fn row(&self, r: usize) -> Option<&[f64]> {
        if self.is_empty() || r >= self.rows {
            return None;
        }
        let start = r * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Mutably borrow row `r`. Returns `None` when empty or out of range.
    pub fn row_mut(&mut self, r: usize) -> Option<&mut [f64]> {
        if self.is_empty() || r >= self.rows {
            return None;
        }
        let start = r * self.cols;
        self.data.get_mut(start..start + self.cols)
    }

    /// Iterate over the rows. Yields nothing for an empty matrix.
    pub fn iter_rows(&self) -> core::slice::ChunksExact<'_, f64> {
        let cols = self.cols.max(1);
        self.data[..self.len()].chunks_exact(cols)
    }

    /// Mutably iterate over the rows. Yields nothing for an empty matrix.
    pub fn iter_rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, f64> {
        let cols = self.cols.max(1);
        let len = self.len();
        self.data[..len].chunks_exact_mut(cols)
    }

    /// Free the buffer and zero the shape. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.rows = 0;
        self.cols = 0;
    }
}
