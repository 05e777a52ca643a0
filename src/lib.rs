//! # hil-native
//!
//! Deterministic structural and geometric diagnostics over a weighted graph and
//! a field of vector embeddings.
//!
//! ---
//!
//! ## This is a computation layer, not a theory layer.
//!
//! Every function here is a pure function of its explicit inputs and returns a
//! number. Nothing is labelled, thresholded, stored or interpreted. Identical
//! inputs give identical bits: reductions run in index order, transcendental
//! functions go through `libm`, and the only "randomness" is an alternating
//! sign pattern indexed by coordinate position.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! caller builds Graph ──► validate ──► degree / density / entropy / components
//!                                            │
//! caller builds Field ──► mean_norm / coherence ──► epistemic_stability
//!                                   ▲                     │
//!                                   └── perturb (private copy) ◄┘
//! ```
//!
//! ## Module overview
//!
//! | Module | Key items | What it does |
//! |--------|-----------|--------------|
//! | [`scalar`] | [`scalar::EPS`], [`scalar::safe_log`], [`scalar::safe_exp`] | Clamped scalar guards |
//! | [`decay`] | [`decay::exponential`], [`decay::linear`], [`decay::power`] | General-purpose decay shapes |
//! | [`vector`] | [`Vector`], [`vector::dot`], [`vector::det_sign`] | Dense vector kernels |
//! | [`matrix`] | [`Matrix`] | Row-major owned buffer |
//! | [`graph`] | [`Graph`] | Validation, weighted degree, density, entropy, BFS components |
//! | [`field`] | [`Field`] | Mean norm, coherence, deterministic perturbation |
//! | [`stability`] | [`epistemic_stability`], [`structural_stability`] | Coherence sensitivity and the entropy/coherence proxy |
//! | [`metrics`] | [`GraphMetrics`] | One-call graph summary |
//! | [`error`] | [`GraphError`], [`DiagnosticError`], [`StabilityError`] | Typed failures |
//! | `ffi` | `_native` | Python bindings (requires `python-ffi` feature) |
//!
//! ## Degenerate input
//!
//! Empty fields, zero-degree graphs, zero rows and single-node graphs are valid
//! and answered with a neutral `0`. Malformed graphs are caught by
//! [`Graph::validate`], which callers run before trusting any graph diagnostic.
//! A transient allocation that cannot be satisfied surfaces as
//! [`DiagnosticError`] from the `try_*` forms and from
//! [`Graph::connected_components`], never as a fake count.
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable `std`
//! for `std::error::Error` integration, `serde` for serialisation of the value
//! types, and `python-ffi` for the PyO3 extension module.
//!
//! ## Example
//!
//! ```rust
//! use hil_native::{Field, Graph, epistemic_stability};
//!
//! let graph = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
//! graph.validate().unwrap();
//! assert_eq!(graph.connected_components(), Ok(1));
//! assert!((graph.entropy() - 3f64.ln()).abs() < 1e-12);
//!
//! let field = Field::from_rows(&[[1.0, 0.0], [0.5, 0.5], [0.0, 1.0]]).unwrap();
//! let s = epistemic_stability(&field, Some(&graph));
//! assert!(s.is_finite());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod scalar;
pub mod decay;
pub mod vector;
pub mod matrix;
pub mod graph;
pub mod field;
pub mod stability;
pub mod metrics;
pub mod error;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use error::{DiagnosticError, EdgeArray, GraphError, StabilityError};
pub use field::Field;
pub use graph::Graph;
pub use matrix::Matrix;
pub use metrics::GraphMetrics;
pub use stability::{
    epistemic_stability, epistemic_stability_with, structural_stability,
    try_epistemic_stability, StabilityConfig, STABILITY_EPSILON,
};
pub use vector::Vector;
