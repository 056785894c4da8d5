//! Histogram and row sinks for jet evaluation output.

use jt_core::{EvaluationRecord, EvaluationSink, Jet};
use serde::Serialize;

use crate::histogram::{Histogram1D, Histogram2D};

/// In-memory evaluation output store.
///
/// Holds the kinematic histograms (filled per preselected jet), one score
/// histogram per class and the pt-vs-leading-score map (filled per
/// aggregated jet), and the appended evaluation rows.
#[derive(Debug, Clone)]
pub struct HistogramSink {
    class_names: Vec<String>,
    jet_pt: Histogram1D,
    jet_eta: Histogram1D,
    score_hists: Vec<Histogram1D>,
    pt_vs_leading: Histogram2D,
    records: Vec<EvaluationRecord>,
}

impl HistogramSink {
    /// Create a sink with one score histogram per class name.
    pub fn new(class_names: Vec<String>) -> Self {
        let score_hists = class_names
            .iter()
            .map(|name| {
                Histogram1D::new(format!("prob_{name}"), format!("{name} probability"), 100, 0.0, 1.0)
            })
            .collect();
        Self {
            class_names,
            jet_pt: Histogram1D::new("jetPt", "Jet pT", 100, 0.0, 500.0),
            jet_eta: Histogram1D::new("jetEta", "Jet eta", 50, -2.5, 2.5),
            score_hists,
            pt_vs_leading: Histogram2D::new(
                "ptVsProb",
                "Jet pT vs leading score",
                100,
                0.0,
                500.0,
                100,
                0.0,
                1.0,
            ),
            records: Vec::new(),
        }
    }

    /// Rows appended so far.
    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    /// Snapshot everything accumulated so far.
    pub fn artifact(&self) -> EvaluationArtifact {
        self.clone().into_artifact()
    }

    /// Consume the sink into its serializable artifact.
    pub fn into_artifact(self) -> EvaluationArtifact {
        EvaluationArtifact {
            class_names: self.class_names,
            jet_pt: self.jet_pt,
            jet_eta: self.jet_eta,
            score_hists: self.score_hists,
            pt_vs_leading: self.pt_vs_leading,
            records: self.records,
        }
    }
}

impl EvaluationSink for HistogramSink {
    fn record_kinematics(&mut self, jet: &Jet) {
        self.jet_pt.fill(jet.pt);
        self.jet_eta.fill(jet.eta);
    }

    fn record_scores(&mut self, jet: &Jet, scores: &[f32]) {
        for (hist, score) in self.score_hists.iter_mut().zip(scores) {
            hist.fill(f64::from(*score));
        }
        if let Some(&leading) = scores.first() {
            self.pt_vs_leading.fill(jet.pt, f64::from(leading));
        }
    }

    fn append_record(&mut self, record: &EvaluationRecord) {
        self.records.push(record.clone());
    }
}

/// Serializable snapshot of one evaluation run's output.
///
/// The score histograms are parallel to `class_names`; `records` carries
/// one row per aggregated jet.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationArtifact {
    /// Class names keying the score histograms and record score vectors.
    pub class_names: Vec<String>,
    /// Jet transverse-momentum histogram.
    pub jet_pt: Histogram1D,
    /// Jet pseudorapidity histogram.
    pub jet_eta: Histogram1D,
    /// One score histogram per class.
    pub score_hists: Vec<Histogram1D>,
    /// Jet pt vs leading-class score.
    pub pt_vs_leading: Histogram2D,
    /// One row per aggregated jet.
    pub records: Vec<EvaluationRecord>,
}
