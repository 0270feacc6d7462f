//! # Hybrid Recipe System
//!
//! This crate combines FlavorGraph ingredient embeddings with a recipe
//! generation model:
//!
//! - **Enhancement**: Expand user ingredients with compatible ones
//! - **Categories**: Label every ingredient from the category table
//! - **Generation**: Prompt a text generator with the ingredient list
//! - **Parsing**: Turn the generated text into a structured recipe
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Hybrid Recipe System                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │  Similarity  │  │   Category   │  │    Recipe    │           │
//! │  │    Index     │  │    Table     │  │  Generator   │           │
//! │  └──────────────┘  └──────────────┘  └──────────────┘           │
//! │         │                │                  │                   │
//! │         └───────┬────────┘                  │                   │
//! │                 ▼                           │                   │
//! │         ┌──────────────┐                    │                   │
//! │         │  Ingredient  │──── prompt ───────►│                   │
//! │         │   Enhancer   │                    │                   │
//! │         └──────────────┘                    ▼                   │
//! │                                     ┌──────────────┐            │
//! │                                     │ Recipe Text  │            │
//! │                                     │    Parser    │            │
//! │                                     └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use flavorgraph_hybrid::{HybridConfig, HybridRecipeSystem, InferenceApiGenerator};
//!
//! let config = HybridConfig::load("flavorgraph.toml").await?;
//! let generator = Arc::new(InferenceApiGenerator::new(config.generation.clone())?);
//! let system = HybridRecipeSystem::load(config, generator).await?;
//!
//! if let Some(recipe) = system.generate_recipe(&["chicken", "rice", "garlic"], true).await {
//!     println!("{}", recipe.title);
//! }
//! ```

pub mod categories;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod generator;
pub mod loader;
pub mod system;

pub use categories::{Category, CategoryTable};
pub use config::{DataConfig, GenerationConfig, HybridConfig, ParserConfig, SimilarityConfig};
pub use enhancer::{IngredientEnhancer, ProcessedIngredients};
pub use error::{HybridError, Result};
pub use generator::{InferenceApiGenerator, RecipeGenerator};
pub use loader::FlavorGraphTables;
pub use system::{HybridRecipeSystem, HybridRecipeSystemBuilder, RecipeMetadata, RecipeRecord};

// Re-export from dependencies for convenience
pub use flavorgraph_embeddings::{
    EmbeddingTable, IngredientIndex, SimilarityIndex, SimilarityResult, canonical_name,
};
pub use flavorgraph_recipe_text::{ParsedRecipe, ParserDialect, RecipeTextParser};
