//! Weighted graph and its structural diagnostics.
//!
//! Nodes are implicit (`0..num_nodes`) and carry no payload. Edges are three
//! parallel arrays `(src, dst, weight)` of length `num_edges`. Every diagnostic
//! treats the graph as undirected: edge `(s, d, w)` adds `w` to the degree of
//! both endpoints and one adjacency entry in each direction.
//!
//! # Contract
//!
//! Call [`Graph::validate`] first. The diagnostics do not re-validate; on a
//! malformed graph they skip what they cannot read (short edge arrays,
//! out-of-range endpoints) and return a best-effort number with no meaning.
//!
//! # Algorithms
//!
//! - Structural entropy: Shannon entropy (nats) of the weighted-degree distribution.
//! - Connected components: CSR adjacency (degree pass, prefix sum, fill pass),
//!   then BFS from every unvisited node. O(V + E).

use alloc::vec::Vec;

use crate::error::{DiagnosticError, EdgeArray, GraphError};
use crate::scalar::{safe_log, EPS};

/// Largest node count `u32` endpoints can address.
pub const MAX_NODES: u64 = u32::MAX as u64 + 1;

/// Reserve an exact-capacity buffer, reporting failure instead of aborting.
pub(crate) fn try_buffer<T>(what: &'static str, requested: usize) -> Result<Vec<T>, DiagnosticError> {
    let mut v = Vec::new();
    v.try_reserve_exact(requested)
        .map_err(|_| DiagnosticError::AllocationFailed { what, requested })?;
    Ok(v)
}

/// Caller-populated weighted graph.
///
/// Fields are public so callers can fill buffers directly; [`Graph::from_edges`]
/// and [`Graph::push_edge`] keep `num_edges` in step with the arrays.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    /// Node count; nodes are `0..num_nodes`.
    pub num_nodes: usize,
    /// Declared edge count.
    pub num_edges: usize,
    /// Source endpoint of each edge.
    pub src: Vec<u32>,
    /// Destination endpoint of each edge.
    pub dst: Vec<u32>,
    /// Non-negative finite weight of each edge.
    pub weight: Vec<f64>,
}

impl Graph {
    /// A graph of `num_nodes` isolated nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self { num_nodes, ..Self::default() }
    }

    /// Build from `(src, dst, weight)` triples.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32, f64)]) -> Self {
        let mut g = Self::new(num_nodes);
        g.src.reserve_exact(edges.len());
        g.dst.reserve_exact(edges.len());
        g.weight.reserve_exact(edges.len());
        for &(s, d, w) in edges {
            g.push_edge(s, d, w);
        }
        g
    }

    /// Append one edge and bump `num_edges`.
    pub fn push_edge(&mut self, src: u32, dst: u32, weight: f64) {
        self.src.push(src);
        self.dst.push(dst);
        self.weight.push(weight);
        self.num_edges += 1;
    }

    /// Iterate `(src, dst, weight)` over the first `num_edges` entries that all
    /// three arrays actually hold.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.src
            .iter()
            .zip(self.dst.iter())
            .zip(self.weight.iter())
            .take(self.num_edges)
            .map(|((&s, &d), &w)| (s, d, w))
    }

    /// `true` when the graph declares at least one edge.
    pub fn has_edges(&self) -> bool {
        self.num_edges > 0
    }

    /// Sum of edge weights.
    pub fn total_weight(&self) -> f64 {
        let mut s = 0.0;
        for (_, _, w) in self.edges() {
            s += w;
        }
        s
    }

    // ── Validation ─────────────────────────────────────────────────────────

    /// Check structural consistency. Never mutates.
    ///
    /// Rejects zero nodes, more than [`MAX_NODES`] nodes, edge arrays shorter
    /// than `num_edges`, endpoints `>= num_nodes`, and weights that are
    /// negative or not finite.
    pub fn validate(&self) -> Result<(), GraphError> {
        let result = self.check();
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "graph rejected");
        }
        result
    }

    /// [`Graph::validate`] collapsed to a boolean.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check(&self) -> Result<(), GraphError> {
        if self.num_nodes == 0 {
            return Err(GraphError::NoNodes);
        }
        if self.num_nodes as u64 > MAX_NODES {
            return Err(GraphError::TooManyNodes { num_nodes: self.num_nodes });
        }
        if self.num_edges > 0 {
            for (array, len) in [
                (EdgeArray::Src, self.src.len()),
                (EdgeArray::Dst, self.dst.len()),
                (EdgeArray::Weight, self.weight.len()),
            ] {
                if len < self.num_edges {
                    return Err(GraphError::MissingEdgeArray {
                        array,
                        len,
                        num_edges: self.num_edges,
                    });
                }
            }
        }
        for (edge, (s, d, w)) in self.edges().enumerate() {
            for node in [s, d] {
                if node as usize >= self.num_nodes {
                    return Err(GraphError::NodeOutOfRange {
                        edge,
                        node,
                        num_nodes: self.num_nodes,
                    });
                }
            }
            if !w.is_finite() {
                return Err(GraphError::NonFiniteWeight { edge });
            }
            if w < 0.0 {
                return Err(GraphError::NegativeWeight { edge });
            }
        }
        Ok(())
    }

    // ── Degree ─────────────────────────────────────────────────────────────

    /// Weighted degree of every node, written into `out`.
    ///
    /// `out` is zeroed first, then each edge adds its weight to both
    /// endpoints. Entries beyond `out.len()` are skipped, so `out` should
    /// hold `num_nodes` elements.
    pub fn degree_into(&self, out: &mut [f64]) {
        out.fill(0.0);
        for (s, d, w) in self.edges() {
            if let Some(slot) = out.get_mut(s as usize) {
                *slot += w;
            }
            if let Some(slot) = out.get_mut(d as usize) {
                *slot += w;
            }
        }
    }

    /// Weighted degree sequence as a fresh buffer of length `num_nodes`.
    pub fn try_degree(&self) -> Result<Vec<f64>, DiagnosticError> {
        let mut out = try_buffer("degree sequence", self.num_nodes)?;
        out.resize(self.num_nodes, 0.0);
        self.degree_into(&mut out);
        Ok(out)
    }

    // ── Density ────────────────────────────────────────────────────────────

    /// `num_edges / (n(n-1)/2)`, clamped to `[0, 1]`; `0` when `n <= 1`.
    ///
    /// A structural proxy: multi-edges and self-loops are counted as-is.
    pub fn density(&self) -> f64 {
        let n = self.num_nodes as f64;
        if n <= 1.0 {
            return 0.0;
        }
        let max_edges = n * (n - 1.0) / 2.0;
        if max_edges <= 0.0 {
            return 0.0;
        }
        (self.num_edges as f64 / max_edges).clamp(0.0, 1.0)
    }

    // ── Entropy ────────────────────────────────────────────────────────────

    /// Structural entropy `H = -Σ p_i ln p_i` with `p_i = degree_i / Σ degree`.
    ///
    /// Terms with `p_i <= EPS` contribute nothing. Returns `0` for zero nodes
    /// or when the total degree is at most `EPS`.
    pub fn try_entropy(&self) -> Result<f64, DiagnosticError> {
        if self.num_nodes == 0 {
            return Ok(0.0);
        }
        let deg = self.try_degree()?;

        let mut total = 0.0;
        for &d in &deg {
            total += d;
        }
        if total <= EPS {
            return Ok(0.0);
        }

        let mut h = 0.0;
        for &d in &deg {
            let p = d / total;
            if p > EPS {
                h -= p * safe_log(p);
            }
        }
        Ok(h)
    }

    /// [`Graph::try_entropy`], answering `0` if the degree buffer cannot be allocated.
    pub fn entropy(&self) -> f64 {
        self.try_entropy().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "entropy unavailable");
            0.0
        })
    }

    // ── Connected components ───────────────────────────────────────────────

    /// Number of connected components.
    ///
    /// `Ok(0)` only when `num_nodes == 0`; `n` isolated nodes give `Ok(n)`.
    /// Fails only when a transient buffer cannot be allocated.
    pub fn connected_components(&self) -> Result<usize, DiagnosticError> {
        let n = self.num_nodes;
        if n == 0 {
            return Ok(0);
        }
        let adj = Adjacency::build(self)?;

        let mut seen: Vec<bool> = try_buffer("visited flags", n)?;
        seen.resize(n, false);
        let mut queue: Vec<usize> = try_buffer("bfs queue", n)?;

        let mut components = 0;
        for start in 0..n {
            if seen[start] {
                continue;
            }
            components += 1;

            queue.clear();
            queue.push(start);
            seen[start] = true;
            let mut head = 0;
            while head < queue.len() {
                let v = queue[head];
                head += 1;
                for &u in adj.neighbours(v) {
                    let u = u as usize;
                    if !seen[u] {
                        seen[u] = true;
                        queue.push(u);
                    }
                }
            }
        }
        Ok(components)
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Free the edge arrays and zero the descriptor. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.src = Vec::new();
        self.dst = Vec::new();
        self.weight = Vec::new();
        self.num_nodes = 0;
        self.num_edges = 0;
    }
}

/// Free-function form of [`Graph::validate`] that also rejects an absent graph.
pub fn validate(graph: Option<&Graph>) -> Result<(), GraphError> {
    match graph {
        Some(g) => g.validate(),
        None => {
            tracing::debug!("graph rejected: absent");
            Err(GraphError::Absent)
        }
    }
}

/// Undirected adjacency in compressed-sparse-row form.
///
/// Neighbours of `v` are `targets[offsets[v]..offsets[v + 1]]`. Edges with an
/// endpoint outside `0..num_nodes` are dropped.
struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<u32>,
}

impl Adjacency {
    fn build(graph: &Graph) -> Result<Self, DiagnosticError> {
        let n = graph.num_nodes;
        let in_range = |s: u32, d: u32| (s as usize) < n && (d as usize) < n;

        let mut offsets: Vec<usize> = try_buffer("adjacency offsets", n + 1)?;
        offsets.resize(n + 1, 0);
        for (s, d, _) in graph.edges() {
            if in_range(s, d) {
                offsets[s as usize + 1] += 1;
                offsets[d as usize + 1] += 1;
            }
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let mut targets: Vec<u32> = try_buffer("adjacency targets", offsets[n])?;
        targets.resize(offsets[n], 0);
        let mut cursor: Vec<usize> = try_buffer("adjacency cursor", n)?;
        cursor.extend_from_slice(&offsets[..n]);
        for (s, d, _) in graph.edges() {
            if in_range(s, d) {
                let (si, di) = (s as usize, d as usize);
                targets[cursor[si]] = d;
                cursor[si] += 1;
                targets[cursor[di]] = s;
                cursor[di] += 1;
            }
        }
        Ok(Self { offsets, targets })
    }

    fn neighbours(&self, v: usize) -> &[u32] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }
}
