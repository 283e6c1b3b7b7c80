use serde::{Deserialize, Deserializer, Serialize};

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub id: String,
    pub ingredient_id: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// Optional lines never count toward coverage and are never reported missing
    #[serde(default)]
    pub is_optional: bool,
}

/// A recipe from the recipe catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prep_minutes: i32,
    #[serde(default)]
    pub cook_minutes: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Ingredient lines that are not optional, in recipe order
    pub fn required_ingredients(&self) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients.iter().filter(|ing| !ing.is_optional)
    }
}

// Upstream services emit `null` for empty lists
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
