//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while building or querying embedding tables.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The ingredient index and embedding table disagree on size.
    #[error("row count mismatch: {names} ingredient names for {rows} embedding rows")]
    RowCountMismatch { names: usize, rows: usize },

    /// Two raw names collapsed to the same canonical name.
    #[error("duplicate ingredient: {0}")]
    DuplicateIngredient(String),

    /// A name was empty after canonicalization.
    #[error("empty ingredient name at row {0}")]
    EmptyName(usize),

    /// Zero-width embeddings.
    #[error("embedding table has zero dimension")]
    EmptyTable,
}
