//! Hybrid recipe system implementation.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use flavorgraph_embeddings::EmbeddingError;
use futures::FutureExt;
use flavorgraph_recipe_text::{ParsedRecipe, RecipeTextParser};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::categories::Category;
use crate::config::HybridConfig;
use crate::enhancer::{IngredientEnhancer, ProcessedIngredients};
use crate::error::{HybridError, Result};
use crate::generator::RecipeGenerator;
use crate::loader::FlavorGraphTables;

/// Enhancement details attached to a generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    /// Canonicalized user ingredients.
    pub original_ingredients: Vec<String>,

    /// User ingredients plus compatible suggestions.
    pub enhanced_ingredients: Vec<String>,

    /// Category of every enhanced ingredient.
    pub categories: IndexMap<String, Category>,
}

impl From<ProcessedIngredients> for RecipeMetadata {
    fn from(processed: ProcessedIngredients) -> Self {
        Self {
            original_ingredients: processed.original,
            enhanced_ingredients: processed.enhanced,
            categories: processed.categories,
        }
    }
}

/// A generated recipe with its enhancement metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub metadata: RecipeMetadata,
}

impl RecipeRecord {
    /// Combine a parsed recipe with enhancement metadata.
    pub fn new(recipe: ParsedRecipe, metadata: RecipeMetadata) -> Self {
        Self {
            title: recipe.title,
            ingredients: recipe.ingredients,
            directions: recipe.directions,
            metadata,
        }
    }
}

/// Hybrid recipe system combining ingredient enhancement and generation.
///
/// This is the main entry point. It coordinates:
/// - FlavorGraph ingredient enhancement
/// - Prompt construction for the generation backend
/// - Parsing of generated text into a structured recipe
pub struct HybridRecipeSystem {
    /// Ingredient enhancer.
    enhancer: IngredientEnhancer,

    /// Recipe text generator.
    generator: Arc<dyn RecipeGenerator>,

    /// Parser for the generator's output dialect.
    parser: RecipeTextParser,
}

impl HybridRecipeSystem {
    /// Create a new hybrid recipe system builder.
    pub fn builder() -> HybridRecipeSystemBuilder {
        HybridRecipeSystemBuilder::new()
    }

    /// Load the configured tables and build the system.
    pub async fn load(config: HybridConfig, generator: Arc<dyn RecipeGenerator>) -> Result<Self> {
        config.validate()?;
        let tables = FlavorGraphTables::load(&config.data).await?;

        Self::builder()
            .with_config(config)
            .with_tables(tables)
            .with_generator(generator)
            .build()
    }

    /// Generate a recipe from user ingredients.
    ///
    /// With `enhance` set, the prompt lists the enhanced ingredients,
    /// otherwise only the user's own. Any failure, including a panicking
    /// generator, is logged and yields `None`.
    pub async fn generate_recipe<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        enhance: bool,
    ) -> Option<RecipeRecord> {
        match self.try_generate_recipe(ingredients, enhance).await {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                error!("Error in hybrid system: {e}");
                None
            }
        }
    }

    /// Generate a recipe, reporting why it failed.
    pub async fn try_generate_recipe<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        enhance: bool,
    ) -> Result<RecipeRecord> {
        let processed = self.enhancer.try_process(ingredients)?;

        let selected = if enhance {
            &processed.enhanced
        } else {
            &processed.original
        };
        let prompt = self.parser.dialect().prompt(selected.as_slice());

        let name = self.generator.name();
        if !self.generator.is_available() {
            return Err(HybridError::GeneratorNotConfigured(format!(
                "{name} is not available"
            )));
        }
        debug!("Prompting {name} with: {prompt}");

        let text = AssertUnwindSafe(self.generator.generate(&prompt))
            .catch_unwind()
            .await
            .map_err(|_| HybridError::GeneratorPanicked(name.to_string()))??;
        let recipe = self.parser.parse(&text);
        if recipe.is_empty() {
            return Err(HybridError::EmptyRecipe);
        }

        info!("Generated recipe: {}", recipe.title);
        Ok(RecipeRecord::new(recipe, processed.into()))
    }

    /// The ingredient enhancer.
    pub fn enhancer(&self) -> &IngredientEnhancer {
        &self.enhancer
    }

    /// The output parser.
    pub fn parser(&self) -> &RecipeTextParser {
        &self.parser
    }
}

/// Builder for the hybrid recipe system.
pub struct HybridRecipeSystemBuilder {
    config: HybridConfig,
    tables: Option<FlavorGraphTables>,
    generator: Option<Arc<dyn RecipeGenerator>>,
}

impl HybridRecipeSystemBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: HybridConfig::default(),
            tables: None,
            generator: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: HybridConfig) -> Self {
        self.config = config;
        self
    }

    /// Set preloaded tables.
    pub fn with_tables(mut self, tables: FlavorGraphTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Set the recipe generator.
    pub fn with_generator(mut self, generator: Arc<dyn RecipeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the system.
    pub fn build(self) -> Result<HybridRecipeSystem> {
        let config = self.config;
        config.validate()?;

        let tables = self
            .tables
            .ok_or_else(|| HybridError::Config("FlavorGraph tables not provided".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| HybridError::Config("recipe generator not provided".to_string()))?;

        let index = tables
            .similarity_index()?
            .with_threshold(config.similarity.threshold);

        let expected = config.similarity.embedding_dim;
        let actual = index.dimension();
        if expected != 0 && !index.is_empty() && actual != expected {
            return Err(EmbeddingError::DimensionMismatch { expected, actual }.into());
        }
        let enhancer = IngredientEnhancer::new(Arc::new(index), Arc::clone(&tables.categories))
            .with_max_similar(config.similarity.max_similar_ingredients);
        let parser = RecipeTextParser::new(config.parser.dialect);

        info!(
            "Hybrid recipe system ready: {} ingredients, {:?} dialect, generator {}",
            tables.ingredients.len(),
            parser.dialect(),
            generator.name()
        );

        Ok(HybridRecipeSystem {
            enhancer,
            generator,
            parser,
        })
    }
}

impl Default for HybridRecipeSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flavorgraph_embeddings::{EmbeddingTable, IngredientIndex};

    use crate::categories::CategoryTable;

    struct EchoGenerator;

    #[async_trait]
    impl RecipeGenerator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            let list = prompt.trim_start_matches("items:").trim();
            Ok(format!("title: echo\ningredients: {}", list.replace(", ", " -- ")))
        }
    }

    fn tables() -> FlavorGraphTables {
        FlavorGraphTables::new(
            EmbeddingTable::from_rows(vec![vec![1.0, 0.0], vec![0.9, 0.1]]).unwrap(),
            IngredientIndex::from_names(["beef", "lamb"]).unwrap(),
            CategoryTable::new(),
        )
    }

    #[test]
    fn test_builder_requires_tables_and_generator() {
        let result = HybridRecipeSystem::builder().build();
        assert!(matches!(result, Err(HybridError::Config(_))));

        let result = HybridRecipeSystem::builder().with_tables(tables()).build();
        assert!(matches!(result, Err(HybridError::Config(_))));
    }

    #[test]
    fn test_builder_checks_embedding_dimension() {
        let result = HybridRecipeSystem::builder()
            .with_tables(tables())
            .with_generator(Arc::new(EchoGenerator))
            .build();
        assert!(matches!(result, Err(HybridError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_prompt_lists_selected_ingredients() {
        let system = HybridRecipeSystem::builder()
            .with_config(HybridConfig::default().with_embedding_dim(2))
            .with_tables(tables())
            .with_generator(Arc::new(EchoGenerator))
            .build()
            .unwrap();

        let enhanced = system.generate_recipe(&["Beef"], true).await.unwrap();
        assert_eq!(enhanced.ingredients, vec!["beef", "lamb"]);

        let plain = system.generate_recipe(&["Beef"], false).await.unwrap();
        assert_eq!(plain.ingredients, vec!["beef"]);
        assert_eq!(plain.metadata.enhanced_ingredients, vec!["beef", "lamb"]);
    }
}
