mod ingredient;
mod matching;
mod pantry;
mod recipe;

pub use ingredient::{IngredientDetail, IngredientSubstitute, SubstituteMap};
pub use matching::{MatchQueryRequest, MatchResult, MissingIngredient};
pub use pantry::{PantryItem, PantrySet};
pub use recipe::{Recipe, RecipeIngredient};
