//! Clamped-count tensor shape resolution.

use crate::categories::{Category, VEC4_WIDTH};

/// Observed constituent multiplicities for the three live categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    /// Charged candidates in the cone.
    pub charged: usize,
    /// Lost tracks in the cone.
    pub lost_tracks: usize,
    /// Neutral candidates in the cone.
    pub neutral: usize,
}

/// Resolved tensor geometry for one category's pair of input tensors.
///
/// `effective_count` is never zero: an empty category still yields one
/// all-zero row so the model never sees a degenerate tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorSpec {
    /// The category this spec describes.
    pub category: Category,
    /// Clamped candidate count, `1 <= effective_count <= max_count`.
    pub effective_count: usize,
    /// Per-candidate feature-vector width.
    pub feature_width: usize,
}

impl TensorSpec {
    /// ONNX shape of the feature tensor: `[1, effective_count, feature_width]`.
    pub fn feature_shape(&self) -> Vec<i64> {
        vec![1, self.effective_count as i64, self.feature_width as i64]
    }

    /// ONNX shape of the four-vector tensor: `[1, effective_count, 4]`.
    pub fn vec4_shape(&self) -> Vec<i64> {
        vec![1, self.effective_count as i64, VEC4_WIDTH as i64]
    }

    /// Flat length of the feature buffer.
    pub fn feature_len(&self) -> usize {
        self.effective_count * self.feature_width
    }

    /// Flat length of the four-vector buffer.
    pub fn vec4_len(&self) -> usize {
        self.effective_count * VEC4_WIDTH
    }
}

/// Resolve tensor specs for all four categories.
///
/// Total over non-negative counts; there is no error path. The vertex
/// category is pinned to exactly one placeholder row regardless of any
/// upstream data (its `max_count` is reserved for a future source).
pub fn resolve(counts: CategoryCounts) -> [TensorSpec; 4] {
    Category::ALL.map(|category| {
        let observed = match category {
            Category::Charged => counts.charged,
            Category::LostTrack => counts.lost_tracks,
            Category::Neutral => counts.neutral,
            Category::Vertex => 1,
        };
        let effective_count = match category {
            Category::Vertex => 1,
            _ => observed.clamp(1, category.max_count()),
        };
        TensorSpec { category, effective_count, feature_width: category.feature_width() }
    })
}
