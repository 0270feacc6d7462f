//! Dialect-specific parsing of generated recipe text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recipe::ParsedRecipe;

const TITLE_MARKER: &str = "title:";
const INGREDIENTS_MARKER: &str = "ingredients:";
const DIRECTIONS_MARKER: &str = "directions:";

/// Separator between inline items on a section-marker line.
const ITEM_SEPARATOR: &str = "--";

/// Text layout emitted by a generation backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserDialect {
    /// One section per line, opened by `title:`, `ingredients:` or
    /// `directions:`. Inline items are separated by `--` and marker-less
    /// lines continue the open list section.
    #[default]
    SectionMarker,

    /// One blob split on the `ingredients:` and `directions:` markers.
    /// Ingredients are comma separated, directions period separated.
    DelimiterSplit,
}

impl ParserDialect {
    /// Prompt prefix the matching generation backend expects.
    pub fn prompt_prefix(self) -> &'static str {
        match self {
            ParserDialect::SectionMarker => "items:",
            ParserDialect::DelimiterSplit => INGREDIENTS_MARKER,
        }
    }

    /// Build a generation prompt listing `ingredients`.
    pub fn prompt<S: AsRef<str>>(self, ingredients: &[S]) -> String {
        let list = ingredients
            .iter()
            .map(S::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {list}", self.prompt_prefix())
    }
}

/// Active section while scanning section-marker text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Title,
    Ingredients,
    Directions,
}

/// Parser for one configured dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeTextParser {
    dialect: ParserDialect,
}

impl RecipeTextParser {
    /// Create a parser for `dialect`.
    pub fn new(dialect: ParserDialect) -> Self {
        Self { dialect }
    }

    /// The configured dialect.
    pub fn dialect(&self) -> ParserDialect {
        self.dialect
    }

    /// Parse generated text. Never fails; unrecognized text yields an empty recipe.
    pub fn parse(&self, text: &str) -> ParsedRecipe {
        let recipe = match self.dialect {
            ParserDialect::SectionMarker => parse_section_markers(text),
            ParserDialect::DelimiterSplit => parse_delimited(text),
        };

        debug!(
            "Parsed recipe {:?}: {} ingredients, {} directions",
            recipe.title,
            recipe.ingredients.len(),
            recipe.directions.len()
        );
        recipe
    }
}

fn parse_section_markers(text: &str) -> ParsedRecipe {
    let mut recipe = ParsedRecipe::default();
    let mut section = Section::None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(TITLE_MARKER) {
            recipe.title = rest.trim().to_string();
            section = Section::Title;
        } else if let Some(rest) = line.strip_prefix(INGREDIENTS_MARKER) {
            section = Section::Ingredients;
            recipe.ingredients.extend(split_items(rest, ITEM_SEPARATOR));
        } else if let Some(rest) = line.strip_prefix(DIRECTIONS_MARKER) {
            section = Section::Directions;
            recipe.directions.extend(split_items(rest, ITEM_SEPARATOR));
        } else if !line.is_empty() {
            match section {
                Section::Ingredients => recipe.ingredients.push(line.to_string()),
                Section::Directions => recipe.directions.push(line.to_string()),
                // Titles are single-line.
                Section::None | Section::Title => {}
            }
        }
    }

    recipe
}

fn parse_delimited(text: &str) -> ParsedRecipe {
    let (head, body) = text.split_once(INGREDIENTS_MARKER).unwrap_or((text, ""));

    let title = head
        .split_once(TITLE_MARKER)
        .map(|(_, title)| title.trim().to_string())
        .unwrap_or_default();

    let (ingredients, directions) = body.split_once(DIRECTIONS_MARKER).unwrap_or((body, ""));

    ParsedRecipe {
        title,
        ingredients: split_items(ingredients, ",").collect(),
        directions: split_items(directions, ".")
            .filter(|step| !step.chars().all(|c| c.is_ascii_digit()))
            .collect(),
    }
}

fn split_items<'a>(text: &'a str, separator: &'a str) -> impl Iterator<Item = String> + 'a {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
}
