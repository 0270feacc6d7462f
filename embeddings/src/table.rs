//! Immutable ingredient tables: embedding rows and the name ⇄ id index.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::magnitude;

/// Dense row identifier of an ingredient.
pub type IngredientId = usize;

/// Canonicalize a raw ingredient name for table lookups.
///
/// Lower-cases, trims, and replaces spaces with underscores, so
/// `" Soy Sauce "` becomes `"soy_sauce"`.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Fixed-length embedding rows, one per ingredient id.
///
/// The table never changes after construction. Row magnitudes are computed
/// once up front so similarity scans only pay for the dot products.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingTable {
    rows: Vec<Embedding>,

    #[serde(skip)]
    magnitudes: Vec<f32>,

    dimension: usize,
}

impl EmbeddingTable {
    /// Build a table, taking the dimension from the first row.
    pub fn from_rows(rows: Vec<Embedding>) -> Result<Self> {
        let dimension = rows.first().map_or(0, Vec::len);
        if !rows.is_empty() && dimension == 0 {
            return Err(EmbeddingError::EmptyTable);
        }
        Self::with_dimension(dimension, rows)
    }

    /// Build a table whose rows must all have `dimension` entries.
    pub fn with_dimension(dimension: usize, rows: Vec<Embedding>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|row| row.len() != dimension) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let magnitudes = rows.iter().map(|row| magnitude(row)).collect();
        debug!("Built embedding table: {} rows x {dimension}", rows.len());

        Ok(Self {
            rows,
            magnitudes,
            dimension,
        })
    }

    /// Get the embedding for an id.
    pub fn get(&self, id: IngredientId) -> Option<&[f32]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    /// Euclidean norm of a row.
    pub fn magnitude(&self, id: IngredientId) -> Option<f32> {
        self.magnitudes.get(id).copied()
    }

    /// Iterate `(id, row, magnitude)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (IngredientId, &[f32], f32)> {
        self.rows
            .iter()
            .zip(self.magnitudes.iter())
            .enumerate()
            .map(|(id, (row, mag))| (id, row.as_slice(), *mag))
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Bidirectional map between canonical ingredient names and row ids.
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    ids: HashMap<String, IngredientId>,
    names: Vec<String>,
}

impl IngredientIndex {
    /// Assign dense ids to names in iteration order.
    ///
    /// Names are canonicalized first. Two names that canonicalize to the same
    /// key, or a name that is blank, are rejected.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for raw in names {
            let name = canonical_name(raw.as_ref());
            let id = index.names.len();
            if name.is_empty() {
                return Err(EmbeddingError::EmptyName(id));
            }
            if index.ids.contains_key(&name) {
                return Err(EmbeddingError::DuplicateIngredient(name));
            }
            index.ids.insert(name.clone(), id);
            index.names.push(name);
        }
        Ok(index)
    }

    /// Look up the id of a raw or canonical name.
    pub fn id(&self, name: &str) -> Option<IngredientId> {
        self.ids.get(&canonical_name(name)).copied()
    }

    /// Reverse lookup of an id.
    pub fn name(&self, id: IngredientId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Check if a name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some()
    }

    /// All canonical names in id order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of ingredients.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
