//! # jt-hist
//!
//! In-memory histogram and row storage for JetTag evaluation output.
//!
//! The external framework owns the real output file; this crate provides
//! the append-only, single-writer stand-in the evaluator writes into: a
//! [`HistogramSink`] implementing the `EvaluationSink` trait, and a
//! serializable [`EvaluationArtifact`] snapshot of everything it
//! accumulated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod histogram;
pub mod sink;

pub use histogram::{Histogram1D, Histogram2D};
pub use sink::{EvaluationArtifact, HistogramSink};
