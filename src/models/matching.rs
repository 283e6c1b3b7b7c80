use serde::{Deserialize, Serialize};

use super::Recipe;

/// A required ingredient that is neither on hand nor covered by a substitute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingIngredient {
    pub ingredient_id: String,
    /// Display name, filled in best-effort after ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: f64,
    pub unit: String,
}

/// Coverage score of one recipe against the pantry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub recipe: Recipe,
    /// 0.0 to 100.0, unrounded
    pub coverage_pct: f64,
    pub missing_ingredients: Vec<MissingIngredient>,
    pub can_make: bool,
}

/// Body of `POST /matches/query`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchQueryRequest {
    /// Free-text prompt, reserved for semantic re-ranking
    pub prompt: String,
    /// Reserved; scoring is always pantry-based
    pub pantry_constrained: bool,
    pub max_missing: i64,
}
