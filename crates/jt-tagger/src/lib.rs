//! # jt-tagger
//!
//! Per-jet constituent selection, tensorization, and tagging inference.
//!
//! The pipeline runs once per jet passing a kinematic preselection:
//! candidates near the jet axis are partitioned into charged, neutral, and
//! lost-track categories, converted into eight fixed-layout input tensors
//! whose shapes are computed per jet, and pushed through an
//! [`InferenceEngine`](jt_core::InferenceEngine) to produce a per-class
//! score vector. Inference faults degrade to a sentinel vector; they never
//! escape the pipeline.
//!
//! ## Architecture
//!
//! This crate depends on the `InferenceEngine` and `EvaluationSink` traits
//! from jt-core, NOT on a concrete model runtime or output store.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Model-defined constants: categories, tensor widths, class names.
pub mod categories;
/// Cone association and category partitioning of candidates.
pub mod categorize;
/// Inference orchestration, aggregation, and the three-phase evaluator.
pub mod evaluate;
/// Flat input-buffer construction: feature rows, four-vectors, padding.
pub mod features;
/// Clamped-count tensor shape resolution.
pub mod shapes;

pub use categories::{Category, CLASS_NAMES, CONE_RADIUS, VEC4_WIDTH};
pub use categorize::{categorize, delta_r, Constituents};
pub use evaluate::{aggregate, run_inference, JetEvaluator, SENTINEL_SCORE};
pub use features::{build_request, FeatureFn, FeatureTable};
pub use shapes::{resolve, CategoryCounts, TensorSpec};
