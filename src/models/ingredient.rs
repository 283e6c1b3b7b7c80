use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dictionary entry for an ingredient.
///
/// The dictionary service serialises its rows without field tags, hence the
/// capitalised keys on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientDetail {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// An ingredient that may stand in for another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSubstitute {
    pub ingredient_id: String,
    pub substitute_id: String,
    #[serde(default)]
    pub ratio: f64,
    #[serde(default)]
    pub notes: String,
}

/// Substitute lists keyed by the ingredient they replace.
///
/// A missing key means "no known substitutes".
pub type SubstituteMap = HashMap<String, Vec<IngredientSubstitute>>;
