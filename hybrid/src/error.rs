//! Error types for the hybrid recipe system.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for hybrid system operations.
pub type Result<T> = std::result::Result<T, HybridError>;

/// Errors that can occur in the hybrid recipe system.
#[derive(Error, Debug)]
pub enum HybridError {
    /// Embedding table error.
    #[error("embedding error: {0}")]
    Embedding(#[from] flavorgraph_embeddings::EmbeddingError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required file or directory does not exist.
    #[error("{kind} not found: {}", path.display())]
    MissingPath { kind: &'static str, path: PathBuf },

    /// A data file could not be parsed as CSV.
    #[error("malformed {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Loading finished without a single embedded ingredient.
    #[error("no ingredients loaded: none of {nodes} nodes has an embedding")]
    NoIngredients { nodes: usize },

    /// An input ingredient was blank.
    #[error("empty ingredient at position {0}")]
    EmptyIngredient(usize),

    /// Generator not configured.
    #[error("generator not configured: {0}")]
    GeneratorNotConfigured(String),

    /// The generator panicked while producing text.
    #[error("generator {0} panicked")]
    GeneratorPanicked(String),

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from the generator.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Generated text contained no recognizable recipe.
    #[error("generated text contained no recipe")]
    EmptyRecipe,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file parse error.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
