//! General-purpose decay shapes over a time-like scalar.
//!
//! The diagnostics in this crate never call these; they exist for callers that
//! need a bounded, deterministic weighting of age or step count.
//!
//! | Kernel | Shape (for `t > 0`) |
//! |--------|---------------------|
//! | [`exponential`] | `exp(-t / tau)` |
//! | [`linear`] | `max(0, 1 - t / t_max)` |
//! | [`power`] | `(1 + t)^(-alpha)` |
//!
//! Every kernel returns exactly `1.0` for `t <= 0`.

use crate::scalar::{clamp_min, safe_exp, EPS};

/// Exponential decay `exp(-t / tau)`. `tau` is clamped to at least [`EPS`].
pub fn exponential(t: f64, tau: f64) -> f64 {
    let tau = clamp_min(tau, EPS);
    if t <= 0.0 {
        return 1.0;
    }
    safe_exp(-t / tau)
}

/// Linear decay `1 - t / t_max`, floored at zero. `t_max` is clamped to at least [`EPS`].
pub fn linear(t: f64, t_max: f64) -> f64 {
    let t_max = clamp_min(t_max, EPS);
    if t <= 0.0 {
        return 1.0;
    }
    let v = 1.0 - t / t_max;
    if v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Power-law decay `(1 + t)^(-alpha)`. Negative `alpha` is treated as zero.
pub fn power(t: f64, alpha: f64) -> f64 {
    let alpha = if alpha < 0.0 { 0.0 } else { alpha };
    if t <= 0.0 {
        return 1.0;
    }
    libm::pow(1.0 + t, -alpha)
}
