use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use crate::{
    error::{AppError, AppResult},
    models::{MatchResult, PantrySet, Recipe, SubstituteMap},
    services::{
        providers::{DictionaryProvider, PantryProvider, RecipeProvider},
        scoring::{missing_ingredient_ids, rank_and_filter, score_recipe, substitute_candidates},
    },
};

/// Default upper bound for one dictionary lookup during fan-out
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Scores the recipe catalog against the live pantry
///
/// Every call reads fresh data from the providers; nothing is cached between
/// requests. Pantry and recipe failures abort the request, dictionary failures
/// only cost the affected enrichment.
pub struct MatchingService {
    pantry: Arc<dyn PantryProvider>,
    recipes: Arc<dyn RecipeProvider>,
    dictionary: Arc<dyn DictionaryProvider>,
    lookup_timeout: Duration,
}

impl MatchingService {
    pub fn new(
        pantry: Arc<dyn PantryProvider>,
        recipes: Arc<dyn RecipeProvider>,
        dictionary: Arc<dyn DictionaryProvider>,
    ) -> Self {
        Self {
            pantry,
            recipes,
            dictionary,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Scores every recipe and returns the makeable ones, best first
    ///
    /// `max_missing` below zero is treated as zero. With `allow_subs`, a
    /// missing ingredient counts as covered when one of its substitutes is on
    /// hand.
    pub async fn score(&self, allow_subs: bool, max_missing: i64) -> AppResult<Vec<MatchResult>> {
        let start = Instant::now();
        let max_missing = usize::try_from(max_missing).unwrap_or(0);

        let pantry_items = self
            .pantry
            .fetch_pantry()
            .await
            .map_err(|e| AppError::upstream("fetch pantry", e))?;

        let recipes = self
            .recipes
            .fetch_recipes()
            .await
            .map_err(|e| AppError::upstream("fetch recipes", e))?;

        let pantry = PantrySet::from(pantry_items.as_slice());

        let substitutes = if allow_subs {
            Some(self.prefetch_substitutes(&recipes, &pantry).await)
        } else {
            None
        };

        let scored: Vec<MatchResult> = recipes
            .iter()
            .map(|recipe| score_recipe(recipe, &pantry, substitutes.as_ref(), max_missing))
            .collect();

        let mut results = rank_and_filter(scored);
        self.resolve_names(&mut results).await;

        tracing::info!(
            pantry_items = pantry.len(),
            recipes = recipes.len(),
            matches = results.len(),
            allow_subs,
            max_missing,
            processing_time_ms = start.elapsed().as_millis(),
            "Scoring completed"
        );

        Ok(results)
    }

    /// Looks up substitutes for every ingredient that some recipe needs and
    /// the pantry lacks
    ///
    /// Ingredients whose lookup fails or returns nothing are left out of the
    /// map, which the scorer reads as "no substitutes".
    pub async fn prefetch_substitutes(
        &self,
        recipes: &[Recipe],
        pantry: &PantrySet,
    ) -> SubstituteMap {
        let candidates = substitute_candidates(recipes, pantry);
        if candidates.is_empty() {
            return SubstituteMap::new();
        }

        let requested = candidates.len();
        let substitutes = self
            .fan_out(candidates, "substitutes", |dictionary, id| async move {
                let subs = dictionary.fetch_substitutes(&id).await?;
                Ok::<_, AppError>((!subs.is_empty()).then_some(subs))
            })
            .await;

        tracing::debug!(
            requested,
            with_substitutes = substitutes.len(),
            "Substitutes prefetched"
        );

        substitutes
    }

    /// Fills in display names of missing ingredients, best-effort
    ///
    /// Each distinct id is looked up once; every occurrence of that id across
    /// the results receives the same name. Ids that cannot be resolved keep
    /// an empty name.
    pub async fn resolve_names(&self, results: &mut [MatchResult]) {
        let ids = missing_ingredient_ids(results);
        if ids.is_empty() {
            return;
        }

        let names = self
            .fan_out(ids, "ingredient name", |dictionary, id| async move {
                let detail = dictionary.fetch_ingredient(&id).await?;
                Ok::<_, AppError>(detail.map(|d| d.name).filter(|name| !name.is_empty()))
            })
            .await;

        for missing in results
            .iter_mut()
            .flat_map(|r| r.missing_ingredients.iter_mut())
        {
            if let Some(name) = names.get(&missing.ingredient_id) {
                missing.name = Some(name.clone());
            }
        }
    }

    /// Runs one dictionary lookup per id concurrently and waits for all of them
    ///
    /// Each task hands back its own `(id, outcome)`; only the calling task
    /// builds the map. Errors, empty answers and timeouts all collapse to "no
    /// entry". Dropping the returned future aborts every lookup still running.
    async fn fan_out<T, F, Fut>(
        &self,
        ids: HashSet<String>,
        what: &'static str,
        lookup: F,
    ) -> HashMap<String, T>
    where
        T: Send + 'static,
        F: Fn(Arc<dyn DictionaryProvider>, String) -> Fut,
        Fut: Future<Output = AppResult<Option<T>>> + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        for id in ids {
            let lookup_timeout = self.lookup_timeout;
            let fut = lookup(self.dictionary.clone(), id.clone());
            tasks.spawn(async move {
                let outcome = tokio::time::timeout(lookup_timeout, fut).await;
                (id, outcome)
            });
        }

        let mut found = HashMap::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(Ok(Some(value))))) => {
                    found.insert(id, value);
                }
                Ok((id, Ok(Ok(None)))) => {
                    tracing::debug!(ingredient_id = %id, lookup = what, "No data from dictionary");
                }
                Ok((id, Ok(Err(e)))) => {
                    tracing::warn!(
                        ingredient_id = %id,
                        lookup = what,
                        error = %e,
                        "Dictionary lookup failed"
                    );
                }
                Ok((id, Err(_))) => {
                    tracing::warn!(
                        ingredient_id = %id,
                        lookup = what,
                        timeout_ms = self.lookup_timeout.as_millis(),
                        "Dictionary lookup timed out"
                    );
                }
                Err(e) => {
                    tracing::error!(lookup = what, error = %e, "Task join error");
                }
            }
        }

        found
    }
}
