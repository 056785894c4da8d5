//! Inference orchestration, per-jet aggregation, and the evaluator.
//!
//! The orchestrator is the only stage that may "fail", and it fails into a
//! sentinel score vector rather than an error: a fault in the external
//! engine must never escape the per-jet loop.

use jt_core::{
    Candidate, EvalConfig, EvalSummary, EvaluationRecord, EvaluationSink, EventInput,
    InferenceEngine, InferenceRequest, Jet,
};

use crate::categories::{self, CONE_RADIUS};
use crate::categorize;
use crate::features::{self, FeatureTable};

/// Invalid-score marker substituted when inference cannot produce output.
pub const SENTINEL_SCORE: f32 = -1.0;

/// Run one batch-1 inference call, degrading to the sentinel vector on any
/// failure.
///
/// An engine fault, an empty result, and an empty first output tensor all
/// yield `n_classes` copies of [`SENTINEL_SCORE`] with a leveled
/// diagnostic. No retry is attempted.
pub fn run_inference(
    engine: &dyn InferenceEngine,
    request: &InferenceRequest,
    output_names: &[String],
    n_classes: usize,
) -> Vec<f32> {
    match engine.run(request, output_names) {
        Ok(outputs) => match outputs.into_iter().next() {
            Some(first) if !first.is_empty() => first,
            _ => {
                tracing::warn!(engine = engine.name(), "empty inference output");
                vec![SENTINEL_SCORE; n_classes]
            }
        },
        Err(err) => {
            tracing::error!(engine = engine.name(), error = %err, "inference failed");
            vec![SENTINEL_SCORE; n_classes]
        }
    }
}

/// Merge jet kinematics with an inference result into one record and
/// forward it to the sink.
///
/// When the score vector does not match the class-name list, no record is
/// produced and the sink receives no score or row call for this jet.
pub fn aggregate(
    jet: &Jet,
    scores: Vec<f32>,
    class_names: &[String],
    sink: &mut dyn EvaluationSink,
) -> Option<EvaluationRecord> {
    if scores.len() != class_names.len() {
        tracing::warn!(
            got = scores.len(),
            expected = class_names.len(),
            "unexpected score vector length, dropping jet record"
        );
        return None;
    }

    let record = EvaluationRecord {
        jet_pt: jet.pt,
        jet_eta: jet.eta,
        jet_phi: jet.phi,
        jet_mass: jet.mass,
        scores,
    };
    sink.record_scores(jet, &record.scores);
    sink.append_record(&record);
    Some(record)
}

/// Three-phase jet evaluation driver.
///
/// Construct once with a config and an engine, call
/// [`process_event`](JetEvaluator::process_event) per event, and
/// [`finalize`](JetEvaluator::finalize) to retrieve the run counters.
/// Processing is single-threaded and event-sequential; the per-jet tensor
/// request is rebuilt from scratch for every jet.
pub struct JetEvaluator<E> {
    engine: E,
    config: EvalConfig,
    features: FeatureTable,
    class_names: Vec<String>,
    output_names: Vec<String>,
    summary: EvalSummary,
}

impl<E: InferenceEngine> JetEvaluator<E> {
    /// Create an evaluator with the placeholder feature table.
    pub fn new(config: EvalConfig, engine: E) -> Self {
        Self::with_features(config, engine, FeatureTable::default())
    }

    /// Create an evaluator with explicit per-category feature formulas.
    pub fn with_features(config: EvalConfig, engine: E, features: FeatureTable) -> Self {
        let class_names = categories::class_names();
        tracing::info!(
            engine = engine.name(),
            model = %config.model_path.display(),
            classes = class_names.len(),
            "initialized jet evaluator"
        );
        Self {
            engine,
            config,
            features,
            class_names,
            output_names: categories::output_names(),
            summary: EvalSummary::default(),
        }
    }

    /// Class-name list keying every record's score vector.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Counters accumulated so far.
    pub fn summary(&self) -> &EvalSummary {
        &self.summary
    }

    /// Process one event's jets, forwarding output to `sink`.
    ///
    /// Returns the records aggregated for this event. An invalid input
    /// collection skips the whole event with a warning; partial events
    /// (some jets aggregated, some dropped) are expected behavior.
    pub fn process_event(
        &mut self,
        event: &EventInput,
        sink: &mut dyn EvaluationSink,
    ) -> Vec<EvaluationRecord> {
        self.summary.events += 1;

        let (jets, candidates) = match (&event.jets, &event.candidates) {
            (Some(jets), Some(candidates)) => (jets, candidates),
            _ => {
                self.summary.events_skipped += 1;
                tracing::warn!("invalid input collection, skipping event");
                return Vec::new();
            }
        };

        tracing::info!(jets = jets.len(), candidates = candidates.len(), "processing event");

        let mut records = Vec::new();
        for jet in jets {
            if jet.pt < self.config.jet_pt_min || jet.eta.abs() > self.config.jet_eta_max {
                self.summary.jets_preselection_dropped += 1;
                continue;
            }
            if let Some(record) = self.process_jet(jet, candidates, sink) {
                records.push(record);
            }
        }
        records
    }

    fn process_jet(
        &mut self,
        jet: &Jet,
        candidates: &[Candidate],
        sink: &mut dyn EvaluationSink,
    ) -> Option<EvaluationRecord> {
        self.summary.jets_evaluated += 1;
        sink.record_kinematics(jet);

        let constituents = categorize::categorize(jet, candidates, CONE_RADIUS);
        let request = features::build_request(&constituents, &self.features);
        tracing::debug!(
            cpf = constituents.charged.len(),
            lt = constituents.lost_tracks.len(),
            npf = constituents.neutral.len(),
            "built inference request"
        );

        let scores =
            run_inference(&self.engine, &request, &self.output_names, self.class_names.len());

        match aggregate(jet, scores, &self.class_names, sink) {
            Some(record) => {
                tracing::debug!(
                    pt = jet.pt,
                    eta = jet.eta,
                    leading = record.scores.first().copied().unwrap_or(SENTINEL_SCORE),
                    "jet evaluated"
                );
                Some(record)
            }
            None => {
                self.summary.jets_output_dropped += 1;
                None
            }
        }
    }

    /// Finish the run and return the accumulated counters.
    pub fn finalize(self) -> EvalSummary {
        tracing::info!(
            events = self.summary.events,
            jets = self.summary.jets_evaluated,
            dropped = self.summary.jets_preselection_dropped,
            "evaluation complete"
        );
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jt_core::{Error, Result};

    struct FixedEngine(Vec<Vec<f32>>);

    impl InferenceEngine for FixedEngine {
        fn run(&self, _: &InferenceRequest, _: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    struct FaultyEngine;

    impl InferenceEngine for FaultyEngine {
        fn run(&self, _: &InferenceRequest, _: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::Inference("model blew up".into()))
        }

        fn name(&self) -> &str {
            "Faulty"
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        kinematics: usize,
        scores: usize,
        records: Vec<EvaluationRecord>,
    }

    impl EvaluationSink for RecordingSink {
        fn record_kinematics(&mut self, _jet: &Jet) {
            self.kinematics += 1;
        }

        fn record_scores(&mut self, _jet: &Jet, _scores: &[f32]) {
            self.scores += 1;
        }

        fn append_record(&mut self, record: &EvaluationRecord) {
            self.records.push(record.clone());
        }
    }

    fn jet() -> Jet {
        Jet { pt: 50.0, eta: 1.0, phi: 0.0, mass: 10.0 }
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("class_{i}")).collect()
    }

    #[test]
    fn engine_fault_yields_sentinel_vector() {
        let scores = run_inference(
            &FaultyEngine,
            &InferenceRequest::default(),
            &["softmax".to_string()],
            29,
        );
        assert_eq!(scores.len(), 29);
        assert!(scores.iter().all(|&s| s == SENTINEL_SCORE));
    }

    #[test]
    fn empty_output_yields_sentinel_vector() {
        for outputs in [Vec::new(), vec![Vec::new()]] {
            let scores = run_inference(
                &FixedEngine(outputs),
                &InferenceRequest::default(),
                &["softmax".to_string()],
                4,
            );
            assert_eq!(scores, vec![SENTINEL_SCORE; 4]);
        }
    }

    #[test]
    fn valid_output_passes_through() {
        let scores = run_inference(
            &FixedEngine(vec![vec![0.25, 0.75]]),
            &InferenceRequest::default(),
            &["softmax".to_string()],
            2,
        );
        assert_eq!(scores, vec![0.25, 0.75]);
    }

    #[test]
    fn aggregate_builds_record_and_fires_sink() {
        let mut sink = RecordingSink::default();
        let record = aggregate(&jet(), vec![0.5, 0.5], &names(2), &mut sink);
        let record = record.expect("lengths match");
        assert_eq!(record.jet_pt, 50.0);
        assert_eq!(record.scores, vec![0.5, 0.5]);
        assert_eq!(sink.scores, 1);
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn aggregate_length_mismatch_drops_record() {
        let mut sink = RecordingSink::default();
        let record = aggregate(&jet(), vec![0.5], &names(2), &mut sink);
        assert!(record.is_none());
        assert_eq!(sink.scores, 0);
        assert!(sink.records.is_empty());
    }

    #[test]
    fn invalid_collections_skip_event() {
        let mut evaluator = JetEvaluator::new(EvalConfig::default(), FaultyEngine);
        let mut sink = RecordingSink::default();

        let no_jets = EventInput { jets: None, candidates: Some(Vec::new()) };
        let no_cands = EventInput { jets: Some(vec![jet()]), candidates: None };
        assert!(evaluator.process_event(&no_jets, &mut sink).is_empty());
        assert!(evaluator.process_event(&no_cands, &mut sink).is_empty());

        let summary = evaluator.finalize();
        assert_eq!(summary.events, 2);
        assert_eq!(summary.events_skipped, 2);
        assert_eq!(summary.jets_evaluated, 0);
    }
}
