//! Dense vector kernels and the owned [`Vector`] buffer.
//!
//! Kernels take slices and never resize them. Two-buffer kernels walk the
//! common prefix of both slices, so a short buffer limits the work instead of
//! reading past its end. Sums accumulate left to right in index order.

use alloc::vec::Vec;

use crate::scalar::{clamp_min, EPS};

/// Dot product `Σ a[i]·b[i]`.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    let mut s = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        s += x * y;
    }
    s
}

/// Euclidean norm `sqrt(Σ a[i]²)`.
///
/// When the plain sum of squares overflows, the elements are rescaled by the
/// largest magnitude first, so any finite input gives a finite norm unless
/// the norm itself exceeds `f64::MAX`.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    let n = libm::sqrt(dot(a, a));
    if n.is_finite() {
        n
    } else {
        scaled_norm(a, n)
    }
}

#[cold]
fn scaled_norm(a: &[f64], plain: f64) -> f64 {
    let mut scale: f64 = 0.0;
    for &x in a {
        scale = scale.max(libm::fabs(x));
    }
    if !scale.is_finite() || scale == 0.0 {
        return plain;
    }
    let mut s = 0.0;
    for &x in a {
        let r = x / scale;
        s += r * r;
    }
    scale * libm::sqrt(s)
}

/// Cosine of the angle between `a` and `b`, given their norms.
///
/// Norms are clamped to at least `EPS`, so a zero vector gives `0`. Falls back
/// to pre-normalised operands when the plain product overflows.
#[inline]
pub fn cosine(a: &[f64], b: &[f64], a_norm: f64, b_norm: f64) -> f64 {
    let a_norm = clamp_min(a_norm, EPS);
    let b_norm = clamp_min(b_norm, EPS);
    let num = dot(a, b);
    let den = a_norm * b_norm;
    if num.is_finite() && den.is_finite() {
        return num / den;
    }
    let mut s = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        s += (x / a_norm) * (y / b_norm);
    }
    s
}

/// Overwrite every element with `0.0`.
#[inline]
pub fn zero(dst: &mut [f64]) {
    dst.fill(0.0);
}

/// `dst[i] += src[i]`.
#[inline]
pub fn add_inplace(dst: &mut [f64], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d += s;
    }
}

/// `dst[i] *= k`.
#[inline]
pub fn scale_inplace(dst: &mut [f64], k: f64) {
    for d in dst.iter_mut() {
        *d *= k;
    }
}

/// `dst[i] = src[i]`.
#[inline]
pub fn copy(dst: &mut [f64], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = *s;
    }
}

/// Alternating sign pattern: `+1.0` for even `idx`, `-1.0` for odd.
///
/// The perturbation direction. Pure function of index parity; no RNG, no state.
#[inline]
pub fn det_sign(idx: usize) -> f64 {
    if idx & 1 == 1 {
        -1.0
    } else {
        1.0
    }
}

/// Caller-populated dense vector.
///
/// The engine reads it and never resizes it. [`Vector::release`] frees the
/// buffer and leaves an empty descriptor behind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// Element storage.
    pub data: Vec<f64>,
}

impl Vector {
    /// Wrap an existing buffer.
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// A zero vector of the given length.
    pub fn zeros(length: usize) -> Self {
        Self { data: alloc::vec![0.0; length] }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Euclidean norm of the whole vector.
    pub fn norm(&self) -> f64 {
        norm(&self.data)
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Free the buffer. Releasing an already released vector is a no-op.
    pub fn release(&mut self) {
        self.data = Vec::new();
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, -5.0, 6.0];
        assert_eq!(dot(&a, &b), 12.0);
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(norm(&[]), 0.0);
    }

    #[test]
    fn test_norm_survives_overflowing_squares() {
        let n = norm(&[3e200, 4e200]);
        assert!(n.is_finite(), "norm = {}", n);
        assert!((n / 5e200 - 1.0).abs() < 1e-15, "norm = {}", n);
        assert_eq!(norm(&[f64::INFINITY, 1.0]), f64::INFINITY);
        assert!(norm(&[f64::NAN, 1.0]).is_nan());
    }

    #[test]
    fn test_cosine() {
        assert_eq!(cosine(&[1.0, 0.0], &[2.0, 0.0], 1.0, 2.0), 1.0);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0], 0.0, 1.0), 0.0);
        let a = [1e200, 1e200];
        let b = [2e200, 1e200];
        let c = cosine(&a, &b, norm(&a), norm(&b));
        let expected = 3.0 / (2f64.sqrt() * 5f64.sqrt());
        assert!((c - expected).abs() < 1e-12, "cosine = {}", c);
    }

    #[test]
    fn test_dot_uses_common_prefix() {
        assert_eq!(dot(&[1.0, 1.0, 1.0], &[2.0]), 2.0);
    }

    #[test]
    fn test_inplace_kernels() {
        let mut v = [1.0, 2.0, 3.0];
        add_inplace(&mut v, &[1.0, 1.0, 1.0]);
        assert_eq!(v, [2.0, 3.0, 4.0]);
        scale_inplace(&mut v, 0.5);
        assert_eq!(v, [1.0, 1.5, 2.0]);
        copy(&mut v, &[9.0, 8.0, 7.0]);
        assert_eq!(v, [9.0, 8.0, 7.0]);
        zero(&mut v);
        assert_eq!(v, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_det_sign_alternates() {
        let signs: Vec<f64> = (0..6).map(det_sign).collect();
        assert_eq!(signs, [1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_vector_views() {
        let v = Vector::from(alloc::vec![3.0, 4.0]);
        assert_eq!(v, Vector::new(alloc::vec![3.0, 4.0]));
        assert_eq!(v.as_slice(), [3.0, 4.0]);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(Vector::zeros(3).norm(), 0.0);
        assert_eq!(Vector::default().as_slice(), &[] as &[f64]);
    }

    #[test]
    fn test_vector_release_is_idempotent() {
        let mut v = Vector::new(alloc::vec![1.0, 2.0]);
        assert_eq!(v.len(), 2);
        v.release();
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
        v.release();
        assert!(v.is_empty());
    }
}
