//! Flat input-buffer construction.
//!
//! Buffers are zero-initialized, filled highest-pt-first up to the
//! resolved count, and left zero-padded past the end of the candidate
//! list. The per-category feature formulas are a pluggable strategy table;
//! the four-vector block (pt, eta, phi, energy) is universal.

use jt_core::{Candidate, InferenceRequest};

use crate::categories::{self, Category, VEC4_WIDTH};
use crate::categorize::Constituents;
use crate::shapes::{self, TensorSpec};

/// Per-candidate feature formula.
///
/// Writes one feature row; the slice is pre-zeroed and has the category's
/// feature width.
pub type FeatureFn = fn(&Candidate, &mut [f32]);

fn placeholder_features(_cand: &Candidate, _row: &mut [f32]) {}

/// Strategy table mapping each live category to its feature formula.
///
/// The default table leaves every feature row zeroed; real formulas are a
/// model-contract detail installed by the caller.
#[derive(Debug, Clone, Copy)]
pub struct FeatureTable {
    charged: FeatureFn,
    lost_track: FeatureFn,
    neutral: FeatureFn,
}

impl FeatureTable {
    /// Table whose entries leave every feature row zeroed.
    pub fn placeholder() -> Self {
        Self {
            charged: placeholder_features,
            lost_track: placeholder_features,
            neutral: placeholder_features,
        }
    }

    /// Table with explicit per-category formulas.
    pub fn new(charged: FeatureFn, lost_track: FeatureFn, neutral: FeatureFn) -> Self {
        Self { charged, lost_track, neutral }
    }

    /// Formula for one category; the vertex category has no live source.
    fn entry(&self, category: Category) -> Option<FeatureFn> {
        match category {
            Category::Charged => Some(self.charged),
            Category::LostTrack => Some(self.lost_track),
            Category::Neutral => Some(self.neutral),
            Category::Vertex => None,
        }
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Fill the flat feature buffer for one category.
///
/// Candidates beyond `effective_count` are dropped (the list is sorted by
/// descending pt, so the highest-pt candidates are retained); rows past
/// the end of the list stay zero.
pub fn fill_features(spec: &TensorSpec, candidates: &[&Candidate], feature_fn: FeatureFn) -> Vec<f32> {
    let width = spec.feature_width;
    let mut buffer = vec![0.0_f32; spec.feature_len()];
    for (row, cand) in candidates.iter().take(spec.effective_count).enumerate() {
        feature_fn(cand, &mut buffer[row * width..(row + 1) * width]);
    }
    buffer
}

/// Fill the flat four-vector buffer for one category.
///
/// Row layout is (pt, eta, phi, energy) with the massless-candidate
/// convention `E = pt * cosh(eta)`.
pub fn fill_vec4(spec: &TensorSpec, candidates: &[&Candidate]) -> Vec<f32> {
    let mut buffer = vec![0.0_f32; spec.vec4_len()];
    for (row, cand) in candidates.iter().take(spec.effective_count).enumerate() {
        let base = row * VEC4_WIDTH;
        buffer[base] = cand.pt as f32;
        buffer[base + 1] = cand.eta as f32;
        buffer[base + 2] = cand.phi as f32;
        buffer[base + 3] = (cand.pt * cand.eta.cosh()) as f32;
    }
    buffer
}

/// Build the eight-tensor request for one jet's constituents.
///
/// Input order is fixed by the model: the four feature tensors (charged,
/// lost-track, neutral, vertex) followed by the four four-vector tensors
/// in the same category order. The request is built fresh; nothing is
/// carried over from a previous jet.
pub fn build_request(constituents: &Constituents<'_>, table: &FeatureTable) -> InferenceRequest {
    let specs = shapes::resolve(constituents.counts());
    let names = categories::input_names();
    let (feature_names, vec4_names) = names.split_at(specs.len());

    let mut request = InferenceRequest::default();
    for (name, spec) in feature_names.iter().zip(&specs) {
        let candidates = constituents.list(spec.category);
        let data = match table.entry(spec.category) {
            Some(feature_fn) => fill_features(spec, candidates, feature_fn),
            None => vec![0.0_f32; spec.feature_len()],
        };
        request.push(name.clone(), spec.feature_shape(), data);
    }
    for (name, spec) in vec4_names.iter().zip(&specs) {
        let candidates = constituents.list(spec.category);
        request.push(name.clone(), spec.vec4_shape(), fill_vec4(spec, candidates));
    }
    request
}
