//! Stability diagnostics.
//!
//! Two quantities, both diagnostic magnitudes rather than pass/fail signals:
//!
//! - [`epistemic_stability`]: finite-difference sensitivity of coherence to the
//!   fixed alternating-sign perturbation, `|C(perturb(F, ε)) - C(F)| / ε`.
//!   Runs on a private copy; the caller's field is never touched.
//! - [`structural_stability`]: the proxy `coherence / (1 + entropy)`, monotone
//!   increasing in coherence and decreasing in entropy.

use crate::error::{DiagnosticError, StabilityError};
use crate::field::Field;
use crate::graph::{try_buffer, Graph};
use crate::matrix::Matrix;

/// Perturbation magnitude used by [`epistemic_stability`].
pub const STABILITY_EPSILON: f64 = 1e-6;

/// Configuration for [`epistemic_stability_with`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityConfig {
    /// Perturbation magnitude. Default: [`STABILITY_EPSILON`].
    /// Zero, negative or non-finite values fall back to the default.
    pub epsilon: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self { epsilon: STABILITY_EPSILON }
    }
}

impl StabilityConfig {
    /// The epsilon actually applied.
    pub fn effective_epsilon(&self) -> f64 {
        if self.epsilon.is_finite() && self.epsilon > 0.0 {
            self.epsilon
        } else {
            STABILITY_EPSILON
        }
    }
}

/// Coherence sensitivity under the default perturbation.
///
/// `graph` is accepted for future graph-coupled terms and currently not read.
/// Returns `0` for an empty field or if the scratch copy cannot be allocated.
pub fn epistemic_stability(field: &Field, graph: Option<&Graph>) -> f64 {
    epistemic_stability_with(field, graph, &StabilityConfig::default())
}

/// [`epistemic_stability`] with an explicit configuration.
pub fn epistemic_stability_with(
    field: &Field,
    graph: Option<&Graph>,
    config: &StabilityConfig,
) -> f64 {
    try_epistemic_stability(field, graph, config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stability unavailable");
        0.0
    })
}

/// Fallible form of [`epistemic_stability_with`].
pub fn try_epistemic_stability(
    field: &Field,
    _graph: Option<&Graph>,
    config: &StabilityConfig,
) -> Result<f64, DiagnosticError> {
    if field.is_empty() {
        return Ok(0.0);
    }
    let eps = config.effective_epsilon();
    let c0 = field.try_coherence()?;

    let src = &field.coordinates;
    let len = src.len();
    let mut data = try_buffer("stability scratch", len)?;
    data.extend_from_slice(&src.data[..len]);
    let mut scratch = Field::new(Matrix::new(data, src.rows, src.cols));

    scratch.perturb(eps);
    let c1 = scratch.try_coherence()?;
    scratch.release();

    tracing::trace!(c0, c1, eps, "stability");
    Ok(libm::fabs(c1 - c0) / eps)
}

/// Structural stability proxy `coherence / (1 + entropy)`.
///
/// Both inputs must be finite and non-negative.
pub fn structural_stability(entropy: f64, coherence: f64) -> Result<f64, StabilityError> {
    if !entropy.is_finite() {
        return Err(StabilityError::NonFiniteEntropy);
    }
    if entropy < 0.0 {
        return Err(StabilityError::NegativeEntropy);
    }
    if !coherence.is_finite() {
        return Err(StabilityError::NonFiniteCoherence);
    }
    if coherence < 0.0 {
        return Err(StabilityError::NegativeCoherence);
    }
    Ok(coherence / (1.0 + entropy))
}
