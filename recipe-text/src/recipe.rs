//! Structured recipe produced by the parser.

use serde::{Deserialize, Serialize};

/// A recipe recovered from generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    /// Recipe title, empty when the text had none.
    pub title: String,

    /// Ingredient lines in generation order.
    pub ingredients: Vec<String>,

    /// Direction steps in generation order.
    pub directions: Vec<String>,
}

impl ParsedRecipe {
    /// True when nothing at all was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.ingredients.is_empty() && self.directions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ParsedRecipe::default().is_empty());
    }

    #[test]
    fn test_title_only_is_not_empty() {
        let recipe = ParsedRecipe {
            title: "Soup".to_string(),
            ..Default::default()
        };
        assert!(!recipe.is_empty());
    }
}
