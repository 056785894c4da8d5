//! Core traits for JetTag.
//!
//! This module defines the trait-based architecture that enables
//! dependency inversion: the evaluation pipeline does not depend on a
//! concrete model runtime or on concrete output stores.

use crate::types::{EvaluationRecord, InferenceRequest, Jet};
use crate::Result;

/// Stateless model-execution engine.
///
/// Implementations run a pre-trained model on one named-tensor request and
/// return one flat tensor per requested output name. The pipeline issues
/// at most one call at a time, always with batch size 1.
pub trait InferenceEngine: Send + Sync {
    /// Execute the model on one request.
    fn run(&self, request: &InferenceRequest, output_names: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Engine name for diagnostics (e.g. "ONNXRuntime").
    fn name(&self) -> &str;
}

impl<T: InferenceEngine + ?Sized> InferenceEngine for &T {
    fn run(&self, request: &InferenceRequest, output_names: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).run(request, output_names)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Destination for per-jet evaluation output.
///
/// Sinks are injected into the evaluator so the core can be tested with
/// in-memory fakes. Each callback fires at most once per jet: kinematics
/// for every jet entering evaluation, scores and the record only when the
/// jet aggregates successfully.
pub trait EvaluationSink {
    /// Record the kinematics of a jet entering evaluation.
    fn record_kinematics(&mut self, jet: &Jet);

    /// Record the per-class score vector of a successfully evaluated jet.
    ///
    /// `scores` has the same length as the evaluator's class-name list.
    fn record_scores(&mut self, jet: &Jet, scores: &[f32]);

    /// Append one evaluation row.
    fn append_record(&mut self, record: &EvaluationRecord);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyEngine;

    impl InferenceEngine for DummyEngine {
        fn run(
            &self,
            _request: &InferenceRequest,
            output_names: &[String],
        ) -> Result<Vec<Vec<f32>>> {
            Ok(vec![Vec::new(); output_names.len()])
        }

        fn name(&self) -> &str {
            "Dummy"
        }
    }

    #[test]
    fn test_dummy_engine() {
        let engine = DummyEngine;
        assert_eq!(engine.name(), "Dummy");
        let outputs = engine
            .run(&InferenceRequest::default(), &["softmax".to_string()])
            .unwrap();
        assert_eq!(outputs.len(), 1);
    }
}
