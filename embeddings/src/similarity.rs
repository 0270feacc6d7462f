//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};
use crate::table::IngredientId;

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors, or either vector has zero length
/// - -1.0 means opposite vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(cosine_with_magnitudes(a, b, magnitude(a), magnitude(b)))
}

/// Compute the dot product between two embeddings.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(dot(a, b))
}

/// Euclidean length of a vector.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity with precomputed magnitudes. Callers guarantee equal lengths.
pub(crate) fn cosine_with_magnitudes(a: &[f32], b: &[f32], magnitude_a: f32, magnitude_b: f32) -> f32 {
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    // Rounding can push parallel vectors a hair past 1.0.
    (dot(a, b) / (magnitude_a * magnitude_b)).clamp(-1.0, 1.0)
}

/// One neighbor returned by a similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Row id of the neighbor.
    pub id: IngredientId,

    /// Canonical name of the neighbor.
    pub name: String,

    /// Cosine similarity to the query.
    pub score: f32,
}

impl SimilarityResult {
    /// Create a new similarity result.
    pub fn new(id: IngredientId, name: impl Into<String>, score: f32) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }
}

/// Rank scored candidates and keep the best `k` at or above `min_score`.
///
/// Ordering is descending by score with ties broken by ascending id, so the
/// output is reproducible for a fixed table. NaN scores are discarded.
pub fn top_k<I>(scores: I, k: usize, min_score: f32) -> Vec<(IngredientId, f32)>
where
    I: IntoIterator<Item = (IngredientId, f32)>,
{
    let mut ranked: Vec<(IngredientId, OrderedFloat<f32>)> = scores
        .into_iter()
        .filter(|(_, score)| !score.is_nan())
        .map(|(id, score)| (id, OrderedFloat(score)))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(k)
        .filter(|(_, score)| score.0 >= min_score)
        .map(|(id, score)| (id, score.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_never_exceeds_one() {
        let a = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!(sim <= 1.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(cosine_similarity(&a, &b).is_err());
        assert!(dot_product(&a, &b).is_err());
    }

    #[test]
    fn test_top_k_orders_and_breaks_ties_by_id() {
        let scores = vec![(0, 0.5), (3, 0.9), (1, 0.9), (2, 0.7)];
        let ranked = top_k(scores, 3, 0.0);
        assert_eq!(ranked, vec![(1, 0.9), (3, 0.9), (2, 0.7)]);
    }

    #[test]
    fn test_top_k_applies_threshold_after_cutoff() {
        let scores = vec![(0, 0.95), (1, 0.6), (2, 0.8)];
        let ranked = top_k(scores, 2, 0.7);
        assert_eq!(ranked, vec![(0, 0.95), (2, 0.8)]);

        let ranked = top_k(vec![(0, 0.95), (1, 0.6), (2, 0.8)], 5, 0.85);
        assert_eq!(ranked, vec![(0, 0.95)]);
    }

    #[test]
    fn test_top_k_skips_nan() {
        let ranked = top_k(vec![(0, f32::NAN), (1, 0.8)], 1, 0.0);
        assert_eq!(ranked, vec![(1, 0.8)]);
    }
}
