//! # Recipe Text
//!
//! Converts the free-form text produced by a recipe generation model into a
//! structured [`ParsedRecipe`].
//!
//! Generation backends disagree on layout, so the parser is configured with
//! exactly one [`ParserDialect`]:
//!
//! ```text
//! SectionMarker                         DelimiterSplit
//! ─────────────                         ──────────────
//! title: Stir Fry                       title: stew ingredients: beef, potato
//! ingredients: chicken -- rice          directions: brown the beef. simmer.
//! directions: chop -- cook
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use flavorgraph_recipe_text::{ParserDialect, RecipeTextParser};
//!
//! let parser = RecipeTextParser::new(ParserDialect::SectionMarker);
//! let recipe = parser.parse("title: Toast\ningredients: bread -- butter");
//! assert_eq!(recipe.title, "Toast");
//! assert_eq!(recipe.ingredients, vec!["bread", "butter"]);
//! ```

pub mod parser;
pub mod recipe;

pub use parser::{ParserDialect, RecipeTextParser};
pub use recipe::ParsedRecipe;
