//! Common data types for JetTag.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_jet_pt_min() -> f64 {
    20.0
}

fn default_jet_eta_max() -> f64 {
    2.4
}

/// A reconstructed jet, read-only input to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    /// Transverse momentum (GeV).
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle (radians).
    pub phi: f64,
    /// Invariant mass (GeV).
    pub mass: f64,
}

/// A particle-flow candidate, read-only input to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Transverse momentum (GeV).
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle (radians).
    pub phi: f64,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Whether track-fit information is available for this candidate.
    #[serde(default)]
    pub has_track_details: bool,
    /// Number of missing inner-detector hits on the track.
    #[serde(default)]
    pub lost_inner_hits: i32,
}

/// One event's input collections.
///
/// A `None` collection models an invalid upstream handle: the event is
/// skipped with a warning, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventInput {
    /// Reconstructed jets, or `None` if the jet handle was invalid.
    pub jets: Option<Vec<Jet>>,
    /// Particle-flow candidates, or `None` if the candidate handle was invalid.
    pub candidates: Option<Vec<Candidate>>,
}

/// Named flat input tensors for one single-jet inference call.
///
/// The three vectors are parallel: `data[i]` is the flat buffer for the
/// tensor named `names[i]` with ONNX shape `shapes[i]`. A request is
/// rebuilt from scratch for every jet; it is never mutated in place across
/// jets.
#[derive(Debug, Clone, Default)]
pub struct InferenceRequest {
    /// Input tensor names, in model order.
    pub names: Vec<String>,
    /// Flat row-major buffers, one per input.
    pub data: Vec<Vec<f32>>,
    /// Tensor shapes, one per input (leading dimension is the batch).
    pub shapes: Vec<Vec<i64>>,
}

impl InferenceRequest {
    /// Append one named tensor to the request.
    pub fn push(&mut self, name: impl Into<String>, shape: Vec<i64>, data: Vec<f32>) {
        self.names.push(name.into());
        self.shapes.push(shape);
        self.data.push(data);
    }

    /// Number of input tensors in the request.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the request carries no tensors.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One evaluated jet: kinematics plus the per-class score vector.
///
/// The score vector is keyed by the evaluator's class-name list; the two
/// always have equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Jet transverse momentum (GeV).
    pub jet_pt: f64,
    /// Jet pseudorapidity.
    pub jet_eta: f64,
    /// Jet azimuthal angle (radians).
    pub jet_phi: f64,
    /// Jet invariant mass (GeV).
    pub jet_mass: f64,
    /// Per-class model scores, in class-name order.
    pub scores: Vec<f32>,
}

/// Configuration values for the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Path to the ONNX model file.
    pub model_path: PathBuf,
    /// Minimum jet transverse momentum (GeV) for preselection.
    #[serde(default = "default_jet_pt_min")]
    pub jet_pt_min: f64,
    /// Maximum jet |eta| for preselection.
    #[serde(default = "default_jet_eta_max")]
    pub jet_eta_max: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            jet_pt_min: default_jet_pt_min(),
            jet_eta_max: default_jet_eta_max(),
        }
    }
}

/// Counters reported when an evaluation run finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalSummary {
    /// Events processed.
    pub events: u64,
    /// Events skipped because an input collection was invalid.
    pub events_skipped: u64,
    /// Jets that passed preselection and were evaluated.
    pub jets_evaluated: u64,
    /// Jets dropped by the pt/eta preselection.
    pub jets_preselection_dropped: u64,
    /// Jets dropped by the aggregator's output-length guard.
    pub jets_output_dropped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.jet_pt_min, 20.0);
        assert_eq!(config.jet_eta_max, 2.4);
    }

    #[test]
    fn config_serde_defaults() {
        let config: EvalConfig = serde_json::from_str(r#"{"model_path": "model.onnx"}"#).unwrap();
        assert_eq!(config.jet_pt_min, 20.0);
        assert_eq!(config.jet_eta_max, 2.4);
    }

    #[test]
    fn candidate_serde_defaults() {
        let cand: Candidate =
            serde_json::from_str(r#"{"pt": 5.0, "eta": 0.1, "phi": 0.2, "charge": 0}"#).unwrap();
        assert!(!cand.has_track_details);
        assert_eq!(cand.lost_inner_hits, 0);
    }

    #[test]
    fn request_push() {
        let mut request = InferenceRequest::default();
        assert!(request.is_empty());
        request.push("input_1", vec![1, 2, 3], vec![0.0; 6]);
        assert_eq!(request.len(), 1);
        assert_eq!(request.names[0], "input_1");
        assert_eq!(request.shapes[0], vec![1, 2, 3]);
        assert_eq!(request.data[0].len(), 6);
    }
}
