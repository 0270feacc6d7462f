//! Ingredient enhancement.
//!
//! The `IngredientEnhancer` canonicalizes a raw ingredient list, grows it with
//! embedding neighbors that clear the similarity threshold, and attaches a
//! category to every resulting ingredient.

use std::sync::Arc;

use flavorgraph_embeddings::{SimilarityIndex, SimilarityResult, canonical_name};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::categories::{Category, CategoryTable};
use crate::error::{HybridError, Result};

/// Default number of neighbors each input ingredient may contribute.
pub const DEFAULT_MAX_SIMILAR: usize = 3;

/// Output of one enhancement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedIngredients {
    /// Canonicalized inputs, in input order, duplicates kept.
    pub original: Vec<String>,

    /// Inputs plus suggestions, deduplicated in first-seen order.
    pub enhanced: Vec<String>,

    /// Category of every enhanced ingredient, in `enhanced` order.
    pub categories: IndexMap<String, Category>,
}

/// Expands ingredient lists with compatible FlavorGraph ingredients.
#[derive(Debug, Clone)]
pub struct IngredientEnhancer {
    index: Arc<SimilarityIndex>,
    categories: Arc<CategoryTable>,
    max_similar: usize,
}

impl IngredientEnhancer {
    /// Create an enhancer over shared tables.
    pub fn new(index: Arc<SimilarityIndex>, categories: Arc<CategoryTable>) -> Self {
        Self {
            index,
            categories,
            max_similar: DEFAULT_MAX_SIMILAR,
        }
    }

    /// Set how many neighbors each ingredient may contribute.
    pub fn with_max_similar(mut self, max_similar: usize) -> Self {
        self.max_similar = max_similar;
        self
    }

    /// Enhance an ingredient list.
    ///
    /// Returns `None` when the request cannot be processed; callers must treat
    /// that as a failed request, not as "nothing to add".
    pub fn process<S: AsRef<str>>(&self, ingredients: &[S]) -> Option<ProcessedIngredients> {
        match self.try_process(ingredients) {
            Ok(processed) => Some(processed),
            Err(e) => {
                error!("Error processing ingredients: {e}");
                None
            }
        }
    }

    /// Enhance an ingredient list, reporting why it failed.
    pub fn try_process<S: AsRef<str>>(&self, ingredients: &[S]) -> Result<ProcessedIngredients> {
        let original = ingredients
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                let name = canonical_name(raw.as_ref());
                if name.is_empty() {
                    Err(HybridError::EmptyIngredient(position))
                } else {
                    Ok(name)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut enhanced: IndexSet<String> = original.iter().cloned().collect();
        for name in &original {
            for neighbor in self.similar(name) {
                debug!("Suggesting {} for {name} ({:.3})", neighbor.name, neighbor.score);
                enhanced.insert(neighbor.name);
            }
        }

        let categories: IndexMap<String, Category> = enhanced
            .iter()
            .map(|name| (name.clone(), self.categories.category(name)))
            .collect();

        info!(
            "Enhanced {} ingredients to {}",
            original.len(),
            enhanced.len()
        );

        Ok(ProcessedIngredients {
            original,
            enhanced: enhanced.into_iter().collect(),
            categories,
        })
    }

    /// Compatible neighbors of one ingredient.
    pub fn similar(&self, ingredient: &str) -> Vec<SimilarityResult> {
        self.index.nearest(ingredient, self.max_similar)
    }

    /// Category of one ingredient.
    pub fn category_of(&self, ingredient: &str) -> Category {
        self.categories.category(ingredient)
    }

    /// The underlying similarity index.
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorgraph_embeddings::{EmbeddingTable, IngredientIndex};
    use pretty_assertions::assert_eq;

    fn enhancer() -> IngredientEnhancer {
        let names = ["chicken", "turkey", "rice", "jasmine_rice", "garlic", "shallot"];
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.95, 0.31, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.98, 0.2],
            vec![0.0, 0.0, 1.0],
            vec![0.1, 0.0, 0.99],
        ];
        let index = SimilarityIndex::new(
            Arc::new(EmbeddingTable::from_rows(rows).unwrap()),
            Arc::new(IngredientIndex::from_names(names).unwrap()),
        )
        .unwrap();
        let categories = CategoryTable::from_pairs([
            ("chicken", "meat"),
            ("turkey", "meat"),
            ("rice", "grain"),
            ("garlic", "vegetable"),
        ]);

        IngredientEnhancer::new(Arc::new(index), Arc::new(categories))
    }

    #[test]
    fn test_original_is_canonical_and_keeps_duplicates() {
        let processed = enhancer().process(&["Chicken", " rice ", "chicken"]).unwrap();
        assert_eq!(processed.original, vec!["chicken", "rice", "chicken"]);
    }

    #[test]
    fn test_enhanced_adds_neighbors_without_duplicates() {
        let processed = enhancer().process(&["chicken", "turkey", "rice"]).unwrap();

        assert_eq!(
            processed.enhanced,
            vec!["chicken", "turkey", "rice", "jasmine_rice"]
        );
    }

    #[test]
    fn test_every_enhanced_ingredient_has_a_category() {
        let processed = enhancer().process(&["rice", "Garlic", "Soy Sauce"]).unwrap();

        assert_eq!(
            processed.enhanced,
            vec!["rice", "garlic", "soy_sauce", "jasmine_rice", "shallot"]
        );
        for name in &processed.enhanced {
            assert!(processed.categories.contains_key(name));
        }
        assert_eq!(processed.categories["garlic"].label(), "vegetable");
        assert!(processed.categories["soy_sauce"].is_unknown());
        assert!(processed.categories["shallot"].is_unknown());
    }

    #[test]
    fn test_max_similar_limits_suggestions() {
        let processed = enhancer()
            .with_max_similar(1)
            .process(&["garlic"])
            .unwrap();
        assert_eq!(processed.enhanced, vec!["garlic", "shallot"]);
    }

    #[test]
    fn test_blank_ingredient_fails_request() {
        let enhancer = enhancer();
        assert!(enhancer.process(&["chicken", "  "]).is_none());
        assert!(matches!(
            enhancer.try_process(&["chicken", "  "]),
            Err(HybridError::EmptyIngredient(1))
        ));
    }

    #[test]
    fn test_process_is_deterministic() {
        let enhancer = enhancer();
        let first = enhancer.process(&["chicken", "rice", "garlic"]).unwrap();
        let second = enhancer.process(&["chicken", "rice", "garlic"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let processed = enhancer().process::<&str>(&[]).unwrap();
        assert!(processed.original.is_empty());
        assert!(processed.enhanced.is_empty());
        assert!(processed.categories.is_empty());
    }
}
