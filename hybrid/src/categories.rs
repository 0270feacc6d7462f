//! Ingredient category lookups.

use std::collections::HashMap;
use std::fmt;

use flavorgraph_embeddings::canonical_name;
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "unknown";

/// Category of an ingredient, or the explicit unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    /// Category label from the table.
    Known(String),
    /// The ingredient is not in the table.
    Unknown,
}

impl Category {
    /// Display label; `"unknown"` for the sentinel.
    pub fn label(&self) -> &str {
        match self {
            Category::Known(label) => label,
            Category::Unknown => UNKNOWN,
        }
    }

    /// True for the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Known(label) => label,
            Category::Unknown => UNKNOWN.to_string(),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        if label == UNKNOWN {
            Category::Unknown
        } else {
            Category::Known(label)
        }
    }
}

/// Read-only map from canonical ingredient name to category label.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    entries: HashMap<String, String>,
}

impl CategoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(ingredient, category)` pairs.
    ///
    /// Ingredient names are canonicalized. When a name repeats, the first
    /// row wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        for (ingredient, category) in pairs {
            entries
                .entry(canonical_name(ingredient.as_ref()))
                .or_insert_with(|| category.into());
        }
        Self { entries }
    }

    /// Category of an ingredient; never fails.
    pub fn category(&self, ingredient: &str) -> Category {
        self.entries
            .get(&canonical_name(ingredient))
            .map_or(Category::Unknown, |label| Category::Known(label.clone()))
    }

    /// Number of categorized ingredients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
