//! Configuration for the hybrid recipe system.

use std::path::{Path, PathBuf};

use flavorgraph_recipe_text::ParserDialect;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HybridError, Result};

/// Configuration for the hybrid recipe system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Where the FlavorGraph tables live.
    pub data: DataConfig,

    /// Ingredient enhancement settings.
    pub similarity: SimilarityConfig,

    /// Recipe generation backend settings.
    pub generation: GenerationConfig,

    /// Generated text layout.
    pub parser: ParserConfig,
}

impl HybridConfig {
    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity.threshold = threshold;
        self
    }

    /// Set how many neighbors each ingredient may contribute.
    pub fn with_max_similar(mut self, max_similar: usize) -> Self {
        self.similarity.max_similar_ingredients = max_similar;
        self
    }

    /// Set the expected embedding dimension (0 disables the check).
    pub fn with_embedding_dim(mut self, dimension: usize) -> Self {
        self.similarity.embedding_dim = dimension;
        self
    }

    /// Set the parser dialect.
    pub fn with_dialect(mut self, dialect: ParserDialect) -> Self {
        self.parser.dialect = dialect;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let similarity = &self.similarity;
        if !(0.0..=1.0).contains(&similarity.threshold) {
            return Err(HybridError::Config(format!(
                "similarity threshold must be between 0 and 1, got {}",
                similarity.threshold
            )));
        }
        if similarity.max_similar_ingredients == 0 {
            return Err(HybridError::Config(
                "max_similar_ingredients must be positive".to_string(),
            ));
        }

        let generation = &self.generation;
        if generation.model.trim().is_empty() {
            return Err(HybridError::Config("generation model is empty".to_string()));
        }
        if generation.min_length > generation.max_length {
            return Err(HybridError::Config(format!(
                "min_length {} exceeds max_length {}",
                generation.min_length, generation.max_length
            )));
        }
        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(HybridError::Config(format!(
                "top_p must be in (0, 1], got {}",
                generation.top_p
            )));
        }
        if generation.temperature <= 0.0 {
            return Err(HybridError::Config(format!(
                "temperature must be positive, got {}",
                generation.temperature
            )));
        }
        if generation.timeout_secs == 0 {
            return Err(HybridError::Config(
                "generation timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&text)
    }
}

/// Locations of the FlavorGraph data files.
///
/// Relative file paths are resolved against `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the FlavorGraph checkout.
    pub base_dir: PathBuf,

    /// Node table (CSV with `node_id` and `name` columns).
    pub nodes_file: PathBuf,

    /// Ingredient → category table (CSV with `ingredient` and `category` columns).
    pub categories_file: PathBuf,

    /// Embeddings (JSON object of node id → vector).
    pub embedding_file: PathBuf,
}

impl DataConfig {
    /// Create a data config with the standard FlavorGraph layout under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            nodes_file: PathBuf::from("input/nodes_191120.csv"),
            categories_file: PathBuf::from(
                "input/dict_ingr2cate - Top300+FDB400+HyperFoods104=616.csv",
            ),
            embedding_file: PathBuf::from("output/kitchenette_embeddings.json"),
        }
    }

    /// Resolved path of the node table.
    pub fn nodes_path(&self) -> PathBuf {
        self.base_dir.join(&self.nodes_file)
    }

    /// Resolved path of the category table.
    pub fn categories_path(&self) -> PathBuf {
        self.base_dir.join(&self.categories_file)
    }

    /// Resolved path of the embedding file.
    pub fn embedding_path(&self) -> PathBuf {
        self.base_dir.join(&self.embedding_file)
    }

    /// Verify the base directory, each file's directory, and each file exist.
    pub fn verify_paths(&self) -> Result<()> {
        if !self.base_dir.is_dir() {
            return Err(HybridError::MissingPath {
                kind: "directory",
                path: self.base_dir.clone(),
            });
        }

        for file in [self.nodes_path(), self.categories_path(), self.embedding_path()] {
            if let Some(parent) = file.parent().filter(|p| !p.is_dir()) {
                return Err(HybridError::MissingPath {
                    kind: "directory",
                    path: parent.to_path_buf(),
                });
            }
            if !file.is_file() {
                return Err(HybridError::MissingPath {
                    kind: "file",
                    path: file,
                });
            }
        }

        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(dirs::data_dir().unwrap_or_default().join("flavorgraph"))
    }
}

/// Ingredient enhancement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum cosine similarity for a suggested ingredient (0.0 to 1.0).
    pub threshold: f32,

    /// Maximum suggestions per input ingredient.
    pub max_similar_ingredients: usize,

    /// Expected embedding dimension; 0 accepts any.
    pub embedding_dim: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            max_similar_ingredients: 3,
            embedding_dim: flavorgraph_embeddings::DEFAULT_DIMENSION,
        }
    }
}

/// Recipe generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model served by the inference endpoint.
    pub model: String,

    /// Inference API base URL.
    pub base_url: String,

    /// API token; falls back to the `HF_API_TOKEN` environment variable.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub max_length: u32,
    pub min_length: u32,
    pub no_repeat_ngram_size: u32,
    pub do_sample: bool,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "flax-community/t5-recipe-generation".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_key: None,
            max_length: 512,
            min_length: 64,
            no_repeat_ngram_size: 3,
            do_sample: true,
            top_k: 60,
            top_p: 0.95,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

/// Generated text layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Dialect the generation backend emits.
    pub dialect: ParserDialect,
}
