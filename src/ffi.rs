//! Python FFI bindings via PyO3.
//!
//! Exposes the diagnostics as the `_native` extension module with plain
//! sequence arguments (NumPy arrays extract as sequences).
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from hil.core.native import _native
//!
//! src, dst, weight = [0, 1, 1], [1, 0, 2], [1.0, 1.0, 1.0]
//! _native.graph_entropy(src, dst, weight, 3)
//! _native.graph_metrics(src, dst, weight, 3)   # {"density": ..., "entropy": ..., ...}
//!
//! vectors = [[1.0, 0.0], [0.5, 0.5], [0.0, 1.0]]
//! _native.field_coherence(vectors)
//! _native.epistemic_stability(vectors)
//! ```

use std::collections::HashMap;

use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::error::DiagnosticError;
use crate::field::Field;
use crate::graph::Graph;
use crate::metrics::GraphMetrics;
use crate::stability::epistemic_stability;

fn unavailable(e: DiagnosticError) -> PyErr {
    PyMemoryError::new_err(e.to_string())
}

/// Argument checks shared by the graph entry points, then validation.
fn graph_from_arrays(
    src: Vec<u32>,
    dst: Vec<u32>,
    weight: Vec<f64>,
    num_nodes: usize,
) -> PyResult<Graph> {
    if src.len() != dst.len() || src.len() != weight.len() {
        return Err(PyValueError::new_err(format!(
            "src, dst, weight must have identical lengths, got {}, {}, {}",
            src.len(),
            dst.len(),
            weight.len()
        )));
    }
    if num_nodes < 1 {
        return Err(PyValueError::new_err("num_nodes must be >= 1"));
    }
    let graph = Graph { num_nodes, num_edges: src.len(), src, dst, weight };
    graph
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(graph)
}

fn field_from_rows(vectors: Vec<Vec<f64>>) -> PyResult<Field> {
    Field::from_rows(&vectors)
        .ok_or_else(|| PyValueError::new_err("vectors must be a rectangular 2-D array"))
}

/// Structural entropy (nats) of the weighted-degree distribution.
///
/// Args:
///     src, dst:  1-D uint32 arrays of edge endpoints
///     weight:    1-D float64 array of non-negative finite weights
///     num_nodes: node count (>= 1)
#[pyfunction]
pub fn graph_entropy(
    src: Vec<u32>,
    dst: Vec<u32>,
    weight: Vec<f64>,
    num_nodes: usize,
) -> PyResult<f64> {
    let graph = graph_from_arrays(src, dst, weight, num_nodes)?;
    graph.try_entropy().map_err(unavailable)
}

/// Dict of every graph metric: num_nodes, num_edges, total_weight, density,
/// entropy, components.
#[pyfunction]
pub fn graph_metrics(
    src: Vec<u32>,
    dst: Vec<u32>,
    weight: Vec<f64>,
    num_nodes: usize,
) -> PyResult<HashMap<String, f64>> {
    let graph = graph_from_arrays(src, dst, weight, num_nodes)?;
    let metrics = GraphMetrics::compute(&graph).map_err(unavailable)?;
    Ok(metrics.iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Mean Euclidean norm of the rows.
#[pyfunction]
pub fn field_mean_norm(vectors: Vec<Vec<f64>>) -> PyResult<f64> {
    Ok(field_from_rows(vectors)?.mean_norm())
}

/// Mean cosine similarity of each row to the centroid.
#[pyfunction]
pub fn field_coherence(vectors: Vec<Vec<f64>>) -> PyResult<f64> {
    field_from_rows(vectors)?.try_coherence().map_err(unavailable)
}

/// Return a perturbed copy of `vectors`; the input list is not modified.
#[pyfunction]
pub fn field_perturb(vectors: Vec<Vec<f64>>, epsilon: f64) -> PyResult<Vec<Vec<f64>>> {
    let mut field = field_from_rows(vectors)?;
    field.perturb(epsilon);
    Ok(field.coordinates.iter_rows().map(|r| r.to_vec()).collect())
}

/// Coherence sensitivity under the fixed deterministic perturbation.
#[pyfunction]
#[pyo3(name = "epistemic_stability")]
pub fn epistemic_stability_py(vectors: Vec<Vec<f64>>) -> PyResult<f64> {
    let field = field_from_rows(vectors)?;
    Ok(epistemic_stability(&field, None))
}

/// HIL native diagnostics.
#[pymodule]
pub fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(graph_entropy, m)?)?;
    m.add_function(wrap_pyfunction!(graph_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(field_mean_norm, m)?)?;
    m.add_function(wrap_pyfunction!(field_coherence, m)?)?;
    m.add_function(wrap_pyfunction!(field_perturb, m)?)?;
    m.add_function(wrap_pyfunction!(epistemic_stability_py, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("EPS", crate::scalar::EPS)?;
    Ok(())
}
