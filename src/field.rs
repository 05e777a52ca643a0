//! Embedding field and its geometric diagnostics.
//!
//! A [`Field`] wraps one [`Matrix`]; each row is one informational element
//! embedded in a shared `cols`-dimensional space.
//!
//! # Coherence
//!
//! ```text
//! c      = (1/n) Σ_r x_r
//! cos_r  = <x_r, c> / (max(‖x_r‖, EPS) · max(‖c‖, EPS))
//! C      = (1/n) Σ_r cos_r
//! ```
//!
//! Nominally in `[-1, 1]`; not clamped. A zero row or a zero centroid hits the
//! `EPS` clamp and contributes `0` rather than `NaN`. Rows whose squared norm
//! overflows are rescaled before the division, so huge but finite
//! coordinates still give a finite answer.
//!
//! # Perturbation
//!
//! [`Field::perturb`] is the only mutating operation in the crate. It adds
//! `epsilon · det_sign(row * cols + col)` to every coordinate, then rescales
//! each row to unit norm when its norm exceeds `EPS`.

use alloc::vec::Vec;

use crate::error::DiagnosticError;
use crate::graph::try_buffer;
use crate::matrix::Matrix;
use crate::scalar::EPS;
use crate::vector::{add_inplace, cosine, det_sign, norm, scale_inplace, zero};

/// A set of embeddings sharing one vector space.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Element embeddings, one per row.
    pub coordinates: Matrix,
}

impl Field {
    /// Wrap a coordinate matrix.
    pub fn new(coordinates: Matrix) -> Self {
        Self { coordinates }
    }

    /// Build from row slices; `None` if the rows are ragged.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        Matrix::from_rows(rows).map(Self::new)
    }

    /// Number of elements (rows).
    pub fn rows(&self) -> usize {
        self.coordinates.rows
    }

    /// Embedding dimension (columns).
    pub fn cols(&self) -> usize {
        self.coordinates.cols
    }

    /// `true` when the coordinate matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Mean over rows of each row's Euclidean norm. `0` for an empty field.
    pub fn mean_norm(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mut sum = 0.0;
        for row in self.coordinates.iter_rows() {
            sum += norm(row);
        }
        sum / self.rows() as f64
    }

    /// Mean of the field's rows. Empty for an empty field.
    pub fn try_centroid(&self) -> Result<Vec<f64>, DiagnosticError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let cols = self.cols();
        let mut centroid = try_buffer("centroid", cols)?;
        centroid.resize(cols, 0.0);
        zero(&mut centroid);
        for row in self.coordinates.iter_rows() {
            add_inplace(&mut centroid, row);
        }
        scale_inplace(&mut centroid, 1.0 / self.rows() as f64);
        Ok(centroid)
    }

    /// Mean cosine similarity of every row to the centroid. `0` for an empty field.
    ///
    /// Finite for any finite coordinates whose column sums stay below
    /// `f64::MAX`; a centroid that overflows yields `NaN`.
    pub fn try_coherence(&self) -> Result<f64, DiagnosticError> {
        if self.is_empty() {
            return Ok(0.0);
        }
        let centroid = self.try_centroid()?;
        let c_norm = norm(&centroid);

        let mut sum_cos = 0.0;
        for row in self.coordinates.iter_rows() {
            sum_cos += cosine(row, &centroid, norm(row), c_norm);
        }
        Ok(sum_cos / self.rows() as f64)
    }

    /// [`Field::try_coherence`], answering `0` if the centroid cannot be allocated.
    pub fn coherence(&self) -> f64 {
        self.try_coherence().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "coherence unavailable");
            0.0
        })
    }

    /// Apply the deterministic alternating-sign perturbation in place.
    ///
    /// Leaves an empty field untouched. Rows that perturb to a norm at or
    /// below `EPS` keep their raw perturbed values.
    pub fn perturb(&mut self, epsilon: f64) {
        if self.is_empty() {
            return;
        }
        let cols = self.cols();
        for (r, row) in self.coordinates.iter_rows_mut().enumerate() {
            let base = r * cols;
            for (c, x) in row.iter_mut().enumerate() {
                *x += epsilon * det_sign(base + c);
            }
            let n = norm(row);
            if n > EPS {
                scale_inplace(row, 1.0 / n);
            }
        }
    }

    /// Free the coordinates and zero the shape. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.coordinates.release();
    }
}

impl From<Matrix> for Field {
    fn from(coordinates: Matrix) -> Self {
        Self::new(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_field_is_neutral() {
        let mut f = Field::default();
        assert_eq!(f.mean_norm(), 0.0);
        assert_eq!(f.coherence(), 0.0);
        f.perturb(0.5);
        assert!(f.is_empty());
        assert_eq!(f.try_centroid().unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_mean_norm() {
        let f = Field::from_rows(&[[3.0, 4.0], [0.0, 1.0]]).unwrap();
        assert_abs_diff_eq!(f.mean_norm(), 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_centroid() {
        let f = Field::from_rows(&[[1.0, 0.0], [0.0, 1.0], [2.0, 2.0]]).unwrap();
        let c = f.try_centroid().unwrap();
        assert_eq!(c.len(), 2);
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_coherence_identical_rows_is_one() {
        let f = Field::from_rows(&[[0.3, -1.2, 2.0]; 4]).unwrap();
        assert_abs_diff_eq!(f.coherence(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coherence_opposite_rows_is_zero_not_nan() {
        let f = Field::from_rows(&[[1.0, 2.0], [-1.0, -2.0]]).unwrap();
        let c = f.coherence();
        assert!(c.is_finite(), "coherence = {}", c);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn test_coherence_zero_row_contributes_nothing() {
        let f = Field::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
        // Centroid (0.5, 0); first row cos = 1, zero row cos = 0.
        assert_abs_diff_eq!(f.coherence(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_coherence_orthogonal_pair() {
        let f = Field::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_abs_diff_eq!(f.coherence(), core::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_perturb_applies_alternating_pattern_then_normalises() {
        let mut f = Field::from_rows(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        f.perturb(0.5);
        // Row 0 → (1.5, 0.5), row 1 → (1.5, 0.5): flat indices 2, 3 keep parity.
        let n = libm::sqrt(1.5 * 1.5 + 0.5 * 0.5);
        for r in 0..2 {
            let row = f.coordinates.row(r).unwrap();
            assert_abs_diff_eq!(row[0], 1.5 / n, epsilon = 1e-15);
            assert_abs_diff_eq!(row[1], 0.5 / n, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_perturb_flat_index_spans_rows() {
        // Odd column count: row 1 starts at an odd flat index.
        let mut f = Field::from_rows(&[[0.0; 3], [0.0; 3]]).unwrap();
        f.perturb(1e-13);
        // Row norm ≈ 1.7e-13 is below EPS, so the raw values survive.
        assert_eq!(f.coordinates.data, [1e-13, -1e-13, 1e-13, -1e-13, 1e-13, -1e-13]);
    }

    #[test]
    fn test_perturb_zero_epsilon_on_unit_rows_is_noop() {
        let mut f = Field::from_rows(&[[1.0, 0.0], [0.0, -1.0]]).unwrap();
        let before = f.clone();
        f.perturb(0.0);
        assert_eq!(f, before);
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let big = Field::from_rows(&[[1e200, 1e200], [2e200, 1e200]]).unwrap();
        let small = Field::from_rows(&[[1.0, 1.0], [2.0, 1.0]]).unwrap();

        let c = big.coherence();
        assert!(c.is_finite(), "coherence = {}", c);
        assert_abs_diff_eq!(c, small.coherence(), epsilon = 1e-12);
        assert_abs_diff_eq!(big.mean_norm() / 1e200, small.mean_norm(), epsilon = 1e-12);

        let mut p = big.clone();
        p.perturb(0.0);
        let mut q = small.clone();
        q.perturb(0.0);
        for (x, y) in p.coordinates.data.iter().zip(q.coordinates.data.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_from_matrix() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let f = Field::from(m.clone());
        assert_eq!(f, Field::new(m));
        assert_eq!((f.rows(), f.cols()), (2, 2));
    }

    #[test]
    fn test_release_round_trip() {
        let mut f = Field::from_rows(&[[1.0, 2.0]]).unwrap();
        f.release();
        assert_eq!((f.rows(), f.cols()), (0, 0));
        assert!(f.coordinates.data.is_empty());
        f.release();
        assert!(f.is_empty());
    }
}
