//! One-call structural summary of a graph.
//!
//! Bundles the size counters with density, entropy and component count so a
//! binding layer can cross the boundary once instead of four times.

use crate::error::DiagnosticError;
use crate::graph::Graph;

/// Structural summary of a [`Graph`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphMetrics {
    /// Node count.
    pub num_nodes: usize,
    /// Edge count.
    pub num_edges: usize,
    /// Sum of edge weights.
    pub total_weight: f64,
    /// See [`Graph::density`].
    pub density: f64,
    /// See [`Graph::try_entropy`].
    pub entropy: f64,
    /// See [`Graph::connected_components`].
    pub components: usize,
}

impl GraphMetrics {
    /// Compute every metric. Assumes the graph has been validated.
    pub fn compute(graph: &Graph) -> Result<Self, DiagnosticError> {
        Ok(Self {
            num_nodes: graph.num_nodes,
            num_edges: graph.num_edges,
            total_weight: graph.total_weight(),
            density: graph.density(),
            entropy: graph.try_entropy()?,
            components: graph.connected_components()?,
        })
    }

    /// `(name, value)` pairs in a fixed order, counters widened to `f64`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("num_nodes", self.num_nodes as f64),
            ("num_edges", self.num_edges as f64),
            ("total_weight", self.total_weight),
            ("density", self.density),
            ("entropy", self.entropy),
            ("components", self.components as f64),
        ]
        .into_iter()
    }
}
