//! Nearest-neighbor lookups over the ingredient embedding space.

use std::sync::Arc;

use tracing::debug;

use crate::error::{EmbeddingError, Result};
use crate::similarity::{SimilarityResult, cosine_with_magnitudes, top_k};
use crate::table::{EmbeddingTable, IngredientIndex};

/// Minimum score for a neighbor to count as compatible.
pub const DEFAULT_THRESHOLD: f32 = 0.7;

/// A similarity index over a shared, read-only embedding table.
///
/// The table and the name index are held behind `Arc` so several indexes
/// (for example with different thresholds) can share one loaded table.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    /// Embedding rows.
    table: Arc<EmbeddingTable>,

    /// Name ⇄ row id mapping.
    ingredients: Arc<IngredientIndex>,

    /// Minimum score kept in results.
    threshold: f32,
}

impl SimilarityIndex {
    /// Create a new similarity index.
    ///
    /// Fails when the name index and the table do not describe the same rows.
    pub fn new(table: Arc<EmbeddingTable>, ingredients: Arc<IngredientIndex>) -> Result<Self> {
        if table.len() != ingredients.len() {
            return Err(EmbeddingError::RowCountMismatch {
                names: ingredients.len(),
                rows: table.len(),
            });
        }

        Ok(Self {
            table,
            ingredients,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// Set the minimum similarity score.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Find up to `n` ingredients most similar to `name`.
    ///
    /// Unknown names yield an empty result. The query ingredient itself is
    /// never returned.
    pub fn nearest(&self, name: &str, n: usize) -> Vec<SimilarityResult> {
        let Some(query_id) = self.ingredients.id(name) else {
            debug!("No embedding for ingredient: {name}");
            return Vec::new();
        };
        let (Some(query), Some(query_magnitude)) =
            (self.table.get(query_id), self.table.magnitude(query_id))
        else {
            return Vec::new();
        };

        let scores = self
            .table
            .iter()
            .filter(|(id, _, _)| *id != query_id)
            .map(|(id, row, row_magnitude)| {
                (id, cosine_with_magnitudes(query, row, query_magnitude, row_magnitude))
            });

        let results: Vec<SimilarityResult> = top_k(scores, n, self.threshold)
            .into_iter()
            .filter_map(|(id, score)| {
                self.ingredients
                    .name(id)
                    .map(|neighbor| SimilarityResult::new(id, neighbor, score))
            })
            .collect();

        debug!("Found {} neighbors for {name}", results.len());
        results
    }

    /// Compute similarity between two known ingredients.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let a = self.ingredients.id(a)?;
        let b = self.ingredients.id(b)?;

        Some(cosine_with_magnitudes(
            self.table.get(a)?,
            self.table.get(b)?,
            self.table.magnitude(a)?,
            self.table.magnitude(b)?,
        ))
    }

    /// Check if an ingredient has an embedding.
    pub fn contains(&self, name: &str) -> bool {
        self.ingredients.contains(name)
    }

    /// Minimum similarity score.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// Get the number of indexed ingredients.
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> SimilarityIndex {
        let names = ["chicken", "turkey", "duck", "rice", "tofu", "quail", "water"];
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.95, 0.31, 0.0],
            vec![0.9, 0.43, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.8, 0.6, 0.0],
            vec![0.95, 0.31, 0.0],
            vec![0.0, 0.0, 0.0],
        ];
        SimilarityIndex::new(
            Arc::new(EmbeddingTable::from_rows(rows).unwrap()),
            Arc::new(IngredientIndex::from_names(names).unwrap()),
        )
        .unwrap()
    }

    fn names(results: &[SimilarityResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_unknown_ingredient_is_empty() {
        let index = fixture();
        assert!(index.nearest("dragonfruit", 3).is_empty());
    }

    #[test]
    fn test_nearest_excludes_self_and_respects_n() {
        let index = fixture();
        let results = index.nearest(" Chicken ", 2);

        assert_eq!(names(&results), vec!["turkey", "quail"]);
        assert!(results.iter().all(|r| r.name != "chicken"));
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let index = fixture();
        let results = index.nearest("chicken", 3);

        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 5);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[2].name, "duck");
    }

    #[test]
    fn test_threshold_filters_weak_neighbors() {
        let index = fixture().with_threshold(0.85);
        let results = index.nearest("chicken", 10);

        assert_eq!(names(&results), vec!["turkey", "quail", "duck"]);
        for result in &results {
            assert!(result.score >= 0.85 && result.score <= 1.0);
        }
    }

    #[test]
    fn test_zero_vector_has_no_neighbors() {
        let index = fixture().with_threshold(0.0);
        let results = index.nearest("water", 3);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert!(fixture().nearest("water", 3).is_empty());
    }

    #[test]
    fn test_similarity_between_known_ingredients() {
        let index = fixture();
        let sim = index.similarity("chicken", "rice").unwrap();
        assert!(sim.abs() < 1e-6);
        assert!(index.similarity("chicken", "dragonfruit").is_none());
    }

    #[test]
    fn test_row_count_mismatch() {
        let result = SimilarityIndex::new(
            Arc::new(EmbeddingTable::from_rows(vec![vec![1.0]]).unwrap()),
            Arc::new(IngredientIndex::from_names(["a", "b"]).unwrap()),
        );
        assert!(matches!(
            result,
            Err(EmbeddingError::RowCountMismatch { names: 2, rows: 1 })
        ));
    }
}
