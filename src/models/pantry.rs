use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single inventory row as returned by the pantry service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryItem {
    pub id: String,
    pub ingredient_id: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

/// Ingredient ids currently on hand.
///
/// Quantity is ignored: any row for an ingredient counts as having it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantrySet(HashSet<String>);

impl PantrySet {
    pub fn contains(&self, ingredient_id: &str) -> bool {
        self.0.contains(ingredient_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[PantryItem]> for PantrySet {
    fn from(items: &[PantryItem]) -> Self {
        Self(items.iter().map(|i| i.ingredient_id.clone()).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for PantrySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
