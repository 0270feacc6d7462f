//! # Embeddings
//!
//! This crate holds the FlavorGraph ingredient embedding space and answers
//! nearest-neighbor queries over it.
//!
//! ## Features
//!
//! - **Embedding Table**: Dense, immutable rows of ingredient vectors
//! - **Ingredient Index**: Canonical name ⇄ row id mapping
//! - **Similarity Search**: Thresholded top-N cosine neighbors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  IngredientIndex ──► row id ──► EmbeddingTable                  │
//! │         │                            │                          │
//! │         └──────────► SimilarityIndex ◄┘                         │
//! │                            │                                    │
//! │                            ▼                                    │
//! │                    SimilarityResult                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod index;
pub mod similarity;
pub mod table;

pub use error::{EmbeddingError, Result};
pub use index::SimilarityIndex;
pub use similarity::{SimilarityResult, cosine_similarity};
pub use table::{EmbeddingTable, IngredientId, IngredientIndex, canonical_name};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of the FlavorGraph ingredient embeddings.
pub const DEFAULT_DIMENSION: usize = 300;
