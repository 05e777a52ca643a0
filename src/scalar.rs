//! Scalar guards shared by every diagnostic.
//!
//! All transcendental functions route through `libm` so that `std` and
//! `no_std` builds agree bit-for-bit.
//!
//! # Invariants
//! - `safe_log` never returns `-inf` or `NaN` for non-negative finite input.
//! - `safe_exp` never overflows to `+inf` for finite input.

/// Smallest magnitude treated as non-zero by the diagnostics.
pub const EPS: f64 = 1e-12;

/// Clamp applied to the argument of [`safe_exp`]. `ln(f64::MAX) ≈ 709.78`.
pub const EXP_LIMIT: f64 = 709.0;

/// `max(x, m)`.
///
/// Returns `m` when `x` is `NaN`, so the guards downstream stay finite.
#[inline]
pub fn clamp_min(x: f64, m: f64) -> f64 {
    if x < m || x.is_nan() {
        m
    } else {
        x
    }
}

/// Natural logarithm with the argument clamped to at least [`EPS`].
#[inline]
pub fn safe_log(x: f64) -> f64 {
    libm::log(clamp_min(x, EPS))
}

/// Numerically stable `ln(1 + x)` for small `x`.
#[inline]
pub fn safe_log1p(x: f64) -> f64 {
    libm::log1p(x)
}

/// `exp(x)` with `x` clamped to `[-EXP_LIMIT, EXP_LIMIT]`.
#[inline]
pub fn safe_exp(x: f64) -> f64 {
    libm::exp(x.clamp(-EXP_LIMIT, EXP_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_min_picks_larger() {
        assert_eq!(clamp_min(0.5, 1.0), 1.0);
        assert_eq!(clamp_min(2.0, 1.0), 2.0);
        assert_eq!(clamp_min(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_safe_log_of_zero_is_finite() {
        let v = safe_log(0.0);
        assert!(v.is_finite(), "safe_log(0) = {}", v);
        assert!((v - libm::log(EPS)).abs() < 1e-12);
    }

    #[test]
    fn test_safe_log_matches_ln_above_eps() {
        assert!((safe_log(1.0)).abs() < 1e-15);
        assert!((safe_log(core::f64::consts::E) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_safe_log1p_small_argument() {
        // ln(1 + 1e-15) ≈ 1e-15; naive ln(1.0 + x) loses this entirely.
        let v = safe_log1p(1e-15);
        assert!((v - 1e-15).abs() < 1e-28, "log1p(1e-15) = {:e}", v);
    }

    #[test]
    fn test_safe_exp_does_not_overflow() {
        assert!(safe_exp(1e6).is_finite());
        assert_eq!(safe_exp(1e6), libm::exp(EXP_LIMIT));
        assert!(safe_exp(-1e6) > 0.0);
        assert_eq!(safe_exp(0.0), 1.0);
    }
}
