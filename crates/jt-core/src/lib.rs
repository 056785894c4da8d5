//! # jt-core
//!
//! Core types and traits for JetTag.
//!
//! This crate defines the shared data model (jets, candidates, evaluation
//! records) and the two seams of the pipeline: the model-execution engine
//! and the output sinks. The evaluation logic in `jt-tagger` depends only
//! on the traits here, never on a concrete ONNX runtime or histogram store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{EvaluationSink, InferenceEngine};
pub use types::{
    Candidate, EvalConfig, EvalSummary, EvaluationRecord, EventInput, InferenceRequest, Jet,
};
