//! Loading of the FlavorGraph tables from disk.
//!
//! The node table names every ingredient, the embedding file maps node ids to
//! vectors, and the category table labels ingredients. Nodes that have no
//! embedding are dropped so every indexed name owns exactly one table row;
//! a load that keeps no node at all is an error.

use std::collections::HashMap;
use std::sync::Arc;

use flavorgraph_embeddings::{Embedding, EmbeddingTable, IngredientIndex, SimilarityIndex};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{info, warn};

use crate::categories::CategoryTable;
use crate::config::DataConfig;
use crate::error::{HybridError, Result};

const NODES_FILE: &str = "nodes file";
const CATEGORIES_FILE: &str = "categories file";

/// The three read-only tables the core is built from.
#[derive(Debug, Clone)]
pub struct FlavorGraphTables {
    /// Embedding rows.
    pub embeddings: Arc<EmbeddingTable>,

    /// Name ⇄ row id mapping.
    pub ingredients: Arc<IngredientIndex>,

    /// Ingredient categories.
    pub categories: Arc<CategoryTable>,
}

impl FlavorGraphTables {
    /// Wrap already-built tables.
    pub fn new(
        embeddings: EmbeddingTable,
        ingredients: IngredientIndex,
        categories: CategoryTable,
    ) -> Self {
        Self {
            embeddings: Arc::new(embeddings),
            ingredients: Arc::new(ingredients),
            categories: Arc::new(categories),
        }
    }

    /// Load the tables from the configured files.
    pub async fn load(config: &DataConfig) -> Result<Self> {
        config.verify_paths()?;

        info!("Loading FlavorGraph data from {}", config.base_dir.display());
        let nodes = fs::read_to_string(config.nodes_path()).await?;
        let embeddings = fs::read_to_string(config.embedding_path()).await?;
        let categories = fs::read_to_string(config.categories_path()).await?;

        Self::from_sources(&nodes, &embeddings, &categories)
    }

    /// Build the tables from file contents.
    pub fn from_sources(nodes_csv: &str, embeddings_json: &str, categories_csv: &str) -> Result<Self> {
        let nodes = parse_nodes(nodes_csv)?;
        let node_count = nodes.len();
        let mut vectors: HashMap<String, Embedding> = serde_json::from_str(embeddings_json)?;

        let mut names = Vec::with_capacity(nodes.len());
        let mut rows = Vec::with_capacity(nodes.len());
        let mut skipped = 0usize;
        for (node_id, name) in nodes {
            match vectors.remove(&node_id) {
                Some(row) => {
                    names.push(name);
                    rows.push(row);
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Skipped {skipped} nodes without embeddings");
        }
        if names.is_empty() {
            return Err(HybridError::NoIngredients { nodes: node_count });
        }

        let ingredients = IngredientIndex::from_names(&names)?;
        let embeddings = EmbeddingTable::from_rows(rows)?;
        let categories = CategoryTable::from_pairs(parse_categories(categories_csv)?);

        info!(
            "FlavorGraph data loaded: {} ingredients ({} dims), {} categories",
            ingredients.len(),
            embeddings.dimension(),
            categories.len()
        );

        Ok(Self::new(embeddings, ingredients, categories))
    }

    /// Build a similarity index over these tables.
    pub fn similarity_index(&self) -> Result<SimilarityIndex> {
        SimilarityIndex::new(Arc::clone(&self.embeddings), Arc::clone(&self.ingredients))
            .map_err(HybridError::from)
    }
}

/// One row of the nodes table. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct NodeRow {
    node_id: String,
    name: String,
}

/// One row of the category table.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    ingredient: String,
    category: String,
}

/// Parse `(node_id, name)` pairs.
fn parse_nodes(text: &str) -> Result<Vec<(String, String)>> {
    read_rows::<NodeRow>(text, NODES_FILE)
        .map(|row| row.map(|row| (row.node_id, row.name)))
        .collect()
}

/// Parse `(ingredient, category)` pairs.
fn parse_categories(text: &str) -> Result<Vec<(String, String)>> {
    read_rows::<CategoryRow>(text, CATEGORIES_FILE)
        .map(|row| row.map(|row| (row.ingredient, row.category)))
        .collect()
}

/// Deserialize header-keyed rows with trimmed fields.
fn read_rows<'a, T>(text: &'a str, file: &'static str) -> impl Iterator<Item = Result<T>> + 'a
where
    T: DeserializeOwned + 'a,
{
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .into_deserialize()
        .map(move |row| row.map_err(|source| HybridError::Csv { file, source }))
}
