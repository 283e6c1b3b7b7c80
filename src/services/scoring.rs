use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{MatchResult, MissingIngredient, PantrySet, Recipe, SubstituteMap};

/// Scores a single recipe against the pantry
///
/// Only required (non-optional) ingredient lines count. A line is covered when
/// its ingredient is on hand or, if a substitute map is supplied, when any of
/// its substitutes is on hand. Uncovered lines are reported in recipe order.
///
/// A recipe with no required lines is fully covered and always makeable.
pub fn score_recipe(
    recipe: &Recipe,
    pantry: &PantrySet,
    substitutes: Option<&SubstituteMap>,
    max_missing: usize,
) -> MatchResult {
    let mut required = 0usize;
    let mut matched = 0usize;
    let mut missing = Vec::new();

    for ing in recipe.required_ingredients() {
        required += 1;

        if pantry.contains(&ing.ingredient_id)
            || has_substitute_on_hand(&ing.ingredient_id, pantry, substitutes)
        {
            matched += 1;
            continue;
        }

        missing.push(MissingIngredient {
            ingredient_id: ing.ingredient_id.clone(),
            name: None,
            quantity: ing.quantity,
            unit: ing.unit.clone(),
        });
    }

    let coverage_pct = if required == 0 {
        100.0
    } else {
        100.0 * matched as f64 / required as f64
    };

    MatchResult {
        recipe: recipe.clone(),
        coverage_pct,
        can_make: missing.len() <= max_missing,
        missing_ingredients: missing,
    }
}

fn has_substitute_on_hand(
    ingredient_id: &str,
    pantry: &PantrySet,
    substitutes: Option<&SubstituteMap>,
) -> bool {
    substitutes
        .and_then(|map| map.get(ingredient_id))
        .is_some_and(|subs| subs.iter().any(|s| pantry.contains(&s.substitute_id)))
}

/// Orders results best-first and drops the ones that cannot be made
///
/// Higher coverage first, then fewer missing ingredients, then recipe id so
/// that equal scores always come back in the same order.
pub fn rank_and_filter(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(compare_results);
    results.retain(|r| r.can_make);
    results
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.coverage_pct
        .total_cmp(&a.coverage_pct)
        .then_with(|| a.missing_ingredients.len().cmp(&b.missing_ingredients.len()))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

/// Ingredient ids whose substitutes could change a score: required by at
/// least one recipe and not on hand.
pub fn substitute_candidates(recipes: &[Recipe], pantry: &PantrySet) -> HashSet<String> {
    recipes
        .iter()
        .flat_map(Recipe::required_ingredients)
        .filter(|ing| !pantry.contains(&ing.ingredient_id))
        .map(|ing| ing.ingredient_id.clone())
        .collect()
}

/// Distinct ingredient ids reported missing across all results
pub fn missing_ingredient_ids(results: &[MatchResult]) -> HashSet<String> {
    results
        .iter()
        .flat_map(|r| r.missing_ingredients.iter())
        .map(|m| m.ingredient_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientSubstitute, RecipeIngredient};

    fn ingredient(ingredient_id: &str, optional: bool) -> RecipeIngredient {
        RecipeIngredient {
            id: format!("ri-{}", ingredient_id),
            ingredient_id: ingredient_id.to_string(),
            quantity: 1.0,
            unit: "unit".to_string(),
            is_optional: optional,
        }
    }

    fn recipe(id: &str, required: &[&str], optional: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            tags: vec![],
            prep_minutes: 10,
            cook_minutes: 20,
            ingredients: required
                .iter()
                .map(|i| ingredient(i, false))
                .chain(optional.iter().map(|i| ingredient(i, true)))
                .collect(),
        }
    }

    fn pantry(ids: &[&str]) -> PantrySet {
        ids.iter().copied().collect()
    }

    fn substitute(ingredient_id: &str, substitute_id: &str) -> IngredientSubstitute {
        IngredientSubstitute {
            ingredient_id: ingredient_id.to_string(),
            substitute_id: substitute_id.to_string(),
            ratio: 1.0,
            notes: String::new(),
        }
    }

    fn missing_ids(result: &MatchResult) -> Vec<&str> {
        result
            .missing_ingredients
            .iter()
            .map(|m| m.ingredient_id.as_str())
            .collect()
    }

    fn result_with(id: &str, coverage_pct: f64, missing: usize, can_make: bool) -> MatchResult {
        MatchResult {
            recipe: recipe(id, &[], &[]),
            coverage_pct,
            missing_ingredients: (0..missing)
                .map(|i| MissingIngredient {
                    ingredient_id: format!("m{}", i),
                    name: None,
                    quantity: 1.0,
                    unit: "g".to_string(),
                })
                .collect(),
            can_make,
        }
    }

    #[test]
    fn test_partial_coverage() {
        let bread = recipe("bread", &["flour", "water", "yeast"], &[]);
        let pantry = pantry(&["flour", "water"]);

        let result = score_recipe(&bread, &pantry, None, 0);
        assert!((result.coverage_pct - 66.67).abs() < 0.01);
        assert_eq!(missing_ids(&result), vec!["yeast"]);
        assert!(!result.can_make);

        let result = score_recipe(&bread, &pantry, None, 1);
        assert!(result.can_make);
    }

    #[test]
    fn test_only_optional_ingredients() {
        let garnish = recipe("garnish", &[], &["garlic"]);

        let result = score_recipe(&garnish, &pantry(&[]), None, 0);
        assert_eq!(result.coverage_pct, 100.0);
        assert!(result.missing_ingredients.is_empty());
        assert!(result.can_make);
    }

    #[test]
    fn test_no_ingredients_at_all() {
        let empty = recipe("empty", &[], &[]);
        let result = score_recipe(&empty, &pantry(&["anything"]), None, 0);
        assert_eq!(result.coverage_pct, 100.0);
        assert!(result.can_make);
    }

    #[test]
    fn test_optional_ingredients_never_missing() {
        let toast = recipe("toast", &["bread"], &["butter", "jam"]);
        let result = score_recipe(&toast, &pantry(&["bread"]), None, 0);
        assert_eq!(result.coverage_pct, 100.0);
        assert!(result.missing_ingredients.is_empty());
    }

    #[test]
    fn test_missing_keeps_recipe_order_and_details() {
        let cake = recipe("cake", &["eggs", "flour", "sugar", "butter"], &[]);
        let result = score_recipe(&cake, &pantry(&["flour"]), None, 5);

        assert_eq!(missing_ids(&result), vec!["eggs", "sugar", "butter"]);
        assert_eq!(result.coverage_pct, 25.0);
        let first = &result.missing_ingredients[0];
        assert_eq!(first.quantity, 1.0);
        assert_eq!(first.unit, "unit");
        assert_eq!(first.name, None);
    }

    #[test]
    fn test_substitute_on_hand_covers_ingredient() {
        let cookies = recipe("cookies", &["flour", "butter"], &[]);
        let mut subs = SubstituteMap::new();
        subs.insert(
            "butter".to_string(),
            vec![substitute("butter", "ghee"), substitute("butter", "margarine")],
        );

        let result = score_recipe(&cookies, &pantry(&["flour", "margarine"]), Some(&subs), 0);
        assert_eq!(result.coverage_pct, 100.0);
        assert!(result.missing_ingredients.is_empty());
        assert!(result.can_make);
    }

    #[test]
    fn test_substitutes_ignored_without_map() {
        let cookies = recipe("cookies", &["flour", "butter"], &[]);
        let result = score_recipe(&cookies, &pantry(&["flour", "margarine"]), None, 0);

        assert_eq!(missing_ids(&result), vec!["butter"]);
        assert_eq!(result.coverage_pct, 50.0);
    }

    #[test]
    fn test_substitute_not_on_hand_still_missing() {
        let cookies = recipe("cookies", &["butter"], &[]);
        let mut subs = SubstituteMap::new();
        subs.insert("butter".to_string(), vec![substitute("butter", "ghee")]);

        let result = score_recipe(&cookies, &pantry(&[]), Some(&subs), 0);
        assert_eq!(missing_ids(&result), vec!["butter"]);
        assert_eq!(result.coverage_pct, 0.0);
    }

    #[test]
    fn test_scoring_does_not_touch_inputs() {
        let bread = recipe("bread", &["flour", "yeast"], &[]);
        let original = bread.clone();
        let set = pantry(&["flour"]);

        let first = score_recipe(&bread, &set, None, 1);
        let second = score_recipe(&bread, &set, None, 1);

        assert_eq!(bread, original);
        assert_eq!(first, second);
    }

    #[test]
    fn test_coverage_grows_with_pantry() {
        let stew = recipe("stew", &["beef", "carrot", "onion", "potato"], &[]);
        let mut on_hand: Vec<&str> = vec![];
        let mut previous = score_recipe(&stew, &pantry(&on_hand), None, 0).coverage_pct;

        for id in ["beef", "carrot", "onion", "potato"] {
            on_hand.push(id);
            let current = score_recipe(&stew, &pantry(&on_hand), None, 0).coverage_pct;
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 100.0);
    }

    #[test]
    fn test_rank_by_coverage_then_missing() {
        let ranked = rank_and_filter(vec![
            result_with("b", 50.0, 2, true),
            result_with("c", 100.0, 0, true),
            result_with("a", 50.0, 1, true),
        ]);

        let ids: Vec<&str> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rank_ties_broken_by_recipe_id() {
        let ranked = rank_and_filter(vec![
            result_with("zucchini-bake", 75.0, 1, true),
            result_with("apple-pie", 75.0, 1, true),
            result_with("mango-lassi", 75.0, 1, true),
        ]);

        let ids: Vec<&str> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["apple-pie", "mango-lassi", "zucchini-bake"]);
    }

    #[test]
    fn test_filter_drops_unmakeable() {
        let ranked = rank_and_filter(vec![
            result_with("a", 90.0, 1, false),
            result_with("b", 80.0, 1, true),
            result_with("c", 10.0, 3, false),
        ]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].recipe.id, "b");
        assert!(ranked.iter().all(|r| r.can_make));
    }

    #[test]
    fn test_ranking_law_holds() {
        let ranked = rank_and_filter(vec![
            result_with("a", 33.3, 2, true),
            result_with("b", 66.6, 1, true),
            result_with("c", 66.6, 0, true),
            result_with("d", 100.0, 0, true),
            result_with("e", 0.0, 3, true),
        ]);

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.coverage_pct > b.coverage_pct
                    || (a.coverage_pct == b.coverage_pct
                        && a.missing_ingredients.len() <= b.missing_ingredients.len())
            );
        }
    }

    #[test]
    fn test_substitute_candidates() {
        let recipes = vec![
            recipe("bread", &["flour", "yeast"], &["seeds"]),
            recipe("pasta", &["flour", "eggs"], &[]),
            recipe("omelette", &["eggs"], &["chives"]),
        ];

        let mut candidates: Vec<String> = substitute_candidates(&recipes, &pantry(&["flour"]))
            .into_iter()
            .collect();
        candidates.sort();

        assert_eq!(candidates, vec!["eggs".to_string(), "yeast".to_string()]);
    }

    #[test]
    fn test_missing_ingredient_ids_deduplicates() {
        let set = pantry(&[]);
        let results = vec![
            score_recipe(&recipe("a", &["eggs", "milk"], &[]), &set, None, 5),
            score_recipe(&recipe("b", &["eggs"], &[]), &set, None, 5),
        ];

        let ids = missing_ingredient_ids(&results);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("eggs"));
        assert!(ids.contains("milk"));
    }
}
