//! Error types.
//!
//! Degenerate inputs (empty field, zero total degree, isolated nodes) are not
//! errors; the diagnostics answer them with a neutral `0.0`. Only malformed
//! graphs, failed transient allocations and out-of-domain proxy inputs are
//! reported here.

use thiserror::Error;

/// Edge array named in [`GraphError::MissingEdgeArray`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeArray {
    /// Source node indices.
    Src,
    /// Destination node indices.
    Dst,
    /// Edge weights.
    Weight,
}

impl core::fmt::Display for EdgeArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            EdgeArray::Src => "src",
            EdgeArray::Dst => "dst",
            EdgeArray::Weight => "weight",
        })
    }
}

/// Why a graph failed validation.
///
/// Validation stops at the first violation. Edges are scanned in index order,
/// checking `src`, then `dst`, then the weight.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// No graph was supplied.
    #[error("graph is absent")]
    Absent,
    /// `num_nodes == 0`.
    #[error("graph has no nodes")]
    NoNodes,
    /// `num_nodes` exceeds what `u32` endpoints can address.
    #[error("graph declares {num_nodes} nodes, more than u32 endpoints can address")]
    TooManyNodes {
        /// Declared node count.
        num_nodes: usize,
    },
    /// `num_edges > 0` but one of the parallel edge arrays is shorter than `num_edges`.
    #[error("edge array `{array}` holds {len} entries but num_edges is {num_edges}")]
    MissingEdgeArray {
        /// The short array.
        array: EdgeArray,
        /// Its actual length.
        len: usize,
        /// Declared edge count.
        num_edges: usize,
    },
    /// An edge endpoint is `>= num_nodes`.
    #[error("edge {edge} references node {node} but num_nodes is {num_nodes}")]
    NodeOutOfRange {
        /// Edge index.
        edge: usize,
        /// Offending endpoint.
        node: u32,
        /// Declared node count.
        num_nodes: usize,
    },
    /// An edge weight is `NaN` or infinite.
    #[error("edge {edge} has a non-finite weight")]
    NonFiniteWeight {
        /// Edge index.
        edge: usize,
    },
    /// An edge weight is negative.
    #[error("edge {edge} has a negative weight")]
    NegativeWeight {
        /// Edge index.
        edge: usize,
    },
}

/// A diagnostic could not be computed.
///
/// Distinct from any numeric answer: "zero components" and "could not
/// count components" are different facts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiagnosticError {
    /// A transient buffer could not be reserved.
    #[error("could not allocate {requested} elements for {what}")]
    AllocationFailed {
        /// Which buffer.
        what: &'static str,
        /// Element count requested.
        requested: usize,
    },
}

/// Input to [`structural_stability`](crate::stability::structural_stability) out of domain.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StabilityError {
    /// Entropy is `NaN` or infinite.
    #[error("entropy must be finite")]
    NonFiniteEntropy,
    /// Entropy is negative.
    #[error("entropy must be >= 0")]
    NegativeEntropy,
    /// Coherence is `NaN` or infinite.
    #[error("coherence must be finite")]
    NonFiniteCoherence,
    /// Coherence is negative.
    #[error("coherence must be >= 0")]
    NegativeCoherence,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_graph_error_messages_name_the_violation() {
        let e = GraphError::MissingEdgeArray { array: EdgeArray::Weight, len: 1, num_edges: 3 };
        assert_eq!(
            e.to_string(),
            "edge array `weight` holds 1 entries but num_edges is 3"
        );
        let e = GraphError::NodeOutOfRange { edge: 2, node: 9, num_nodes: 4 };
        assert_eq!(e.to_string(), "edge 2 references node 9 but num_nodes is 4");
    }

    #[test]
    fn test_allocation_error_message() {
        let e = DiagnosticError::AllocationFailed { what: "bfs queue", requested: 12 };
        assert_eq!(e.to_string(), "could not allocate 12 elements for bfs queue");
    }
}
