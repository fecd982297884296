// ABOUTME: Recipe catalog combining remote search, the user recipe store, and the cache
// ABOUTME: Absorbs upstream failures into observable fetch statuses and merges sources by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Catalog
//!
//! The catalog is the surface screens talk to. List queries
//! (trending, latest, keyword search, category) never fail because an
//! upstream failed: they return a [`CatalogPage`] whose [`FetchStatus`]
//! says whether the page is complete, partial, or empty because of an
//! error. Store operations (my recipes, detail, submit) surface their
//! errors unchanged.
//!
//! Cache keys:
//! - `trending:<limit>`
//! - `latest:<limit>`
//! - `search:<lowercase keyword>:<limit>`
//! - `category:<lowercase category>:<limit>`
//! - `detail:local:<documentId>`
//!
//! Limits are clamped to `[1, 100]` before a key is built, so `trending(500)`
//! and `trending(100)` share one entry.

/// Catalog construction from configuration
pub mod factory;
/// Merging of local and remote results
pub mod merge;
/// Fetch status reporting
pub mod status;

pub use merge::merge_by_id;
pub use status::{CatalogPage, FetchStatus};

use crate::cache::{CacheConfig, CacheLayer, CacheValue, SingleFlight};
use crate::constants::cache::{keys, TTL_DETAIL_SECS, TTL_LIST_SECS};
use crate::constants::search::{
    DEFAULT_CATEGORY_LIMIT, DEFAULT_LATEST_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_TRENDING_LIMIT,
};
use crate::errors::{RecipeError, RecipeResult};
use crate::logging::CatalogLogger;
use crate::models::{Recipe, RecipeDraft, RecipeId, RecipeOrigin};
use crate::store::RecipeStore;
use dashmap::DashMap;
use futures_util::future::join;
use recipe_providers::{clamp_limit, with_retry, RecipeSearchProvider, RetryBackoffConfig, SortKey};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Page sizes, freshness windows, and retry policy used by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    /// Default page size for `trending`
    pub trending_limit: u32,
    /// Default page size for `latest`
    pub latest_limit: u32,
    /// Default page size for `search_by_keyword`
    pub search_limit: u32,
    /// Default page size for `by_category`
    pub category_limit: u32,
    /// Freshness window for list queries
    pub list_ttl: Duration,
    /// Freshness window for detail lookups
    pub detail_ttl: Duration,
    /// Retry policy for remote search calls
    pub retry: RetryBackoffConfig,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            trending_limit: DEFAULT_TRENDING_LIMIT,
            latest_limit: DEFAULT_LATEST_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            category_limit: DEFAULT_CATEGORY_LIMIT,
            list_ttl: Duration::from_secs(TTL_LIST_SECS),
            detail_ttl: Duration::from_secs(TTL_DETAIL_SECS),
            retry: RetryBackoffConfig::default(),
        }
    }
}

/// Unified recipe access over the remote provider and the user store
pub struct RecipeCatalog {
    search: Arc<dyn RecipeSearchProvider>,
    store: RecipeStore,
    cache: CacheLayer<CacheValue>,
    settings: CatalogSettings,
    list_flights: SingleFlight<CatalogPage>,
    detail_flights: SingleFlight<RecipeResult<Recipe>>,
    statuses: DashMap<String, FetchStatus>,
}

impl RecipeCatalog {
    /// Create a catalog over a search provider and a store
    #[must_use]
    pub fn new(
        search: Arc<dyn RecipeSearchProvider>,
        store: RecipeStore,
        cache: &CacheConfig,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            search,
            store,
            cache: CacheLayer::new(cache),
            settings,
            list_flights: SingleFlight::new(),
            detail_flights: SingleFlight::new(),
            statuses: DashMap::new(),
        }
    }

    /// Catalog settings in use
    #[must_use]
    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Most popular remote recipes
    pub async fn trending(&self, limit: Option<u32>) -> CatalogPage {
        let limit = clamp_limit(limit.unwrap_or(self.settings.trending_limit));
        let key = format!("{}:{limit}", keys::TRENDING);
        self.browse(key, "", limit, SortKey::Popularity).await
    }

    /// Most recent remote recipes
    pub async fn latest(&self, limit: Option<u32>) -> CatalogPage {
        let limit = clamp_limit(limit.unwrap_or(self.settings.latest_limit));
        let key = format!("{}:{limit}", keys::LATEST);
        self.browse(key, "", limit, SortKey::Time).await
    }

    /// Popular remote recipes for a category such as `breakfast` or `dessert`
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidQuery` if `category` is blank
    pub async fn by_category(
        &self,
        category: &str,
        limit: Option<u32>,
    ) -> RecipeResult<CatalogPage> {
        let category = category.trim();
        if category.is_empty() {
            return Err(RecipeError::invalid_query("category must not be blank"));
        }

        let limit = clamp_limit(limit.unwrap_or(self.settings.category_limit));
        let key = format!("{}:{}:{limit}", keys::CATEGORY, category.to_lowercase());
        Ok(self.browse(key, category, limit, SortKey::Popularity).await)
    }

    /// Keyword search across remote recipes and the user's own recipes
    ///
    /// Local recipes whose title, description, or ingredients contain the
    /// keyword come first; remote results follow, minus any whose bare id a
    /// local recipe already holds.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidQuery` if `query` is blank after trimming
    pub async fn search_by_keyword(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> RecipeResult<CatalogPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RecipeError::invalid_query("search keyword must not be blank"));
        }

        let limit = clamp_limit(limit.unwrap_or(self.settings.search_limit));
        let needle = query.to_lowercase();
        let key = format!("{}:{needle}:{limit}", keys::SEARCH);

        let started = Instant::now();
        let page = match self.cache.get(&key) {
            Some(CacheValue::List(recipes)) => CatalogPage::new(recipes, FetchStatus::Cached),
            _ => {
                self.list_flights
                    .run(&key, || self.fetch_search(&key, query, &needle, limit))
                    .await
            }
        };
        Ok(self.finish(&key, page, started))
    }

    /// Every recipe the user has submitted; never cached
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Storage` if the store fails
    pub async fn my_recipes(&self) -> RecipeResult<Vec<Recipe>> {
        self.store.list_all().await
    }

    /// Full recipe for a namespaced id
    ///
    /// Only `local:` ids resolve; anything else is `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown or non-local ids, or `Storage` if the
    /// store fails
    pub async fn get_detail(&self, id: &str) -> RecipeResult<Recipe> {
        let recipe_id = RecipeId::parse(id.trim());
        if recipe_id.origin() != RecipeOrigin::Local {
            return Err(RecipeError::not_found(format!("recipe '{}'", id.trim())));
        }

        let key = format!("{}:{recipe_id}", keys::DETAIL);
        if let Some(CacheValue::Single(recipe)) = self.cache.get(&key) {
            debug!(key = %key, "Recipe detail served from cache");
            return Ok(recipe);
        }

        self.detail_flights
            .run(&key, || self.fetch_detail(&key, &recipe_id))
            .await
    }

    /// Save a user recipe, returning its namespaced `local:` id
    ///
    /// Cached keyword searches are dropped and searches still in flight are
    /// detached, so every search started after this returns sees the new
    /// recipe.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an incomplete draft or `Storage` if the
    /// write fails
    pub async fn submit_recipe(&self, draft: &RecipeDraft) -> RecipeResult<String> {
        let id = self.store.create(draft).await?;
        let searches = format!("{}:*", keys::SEARCH);
        let removed = self.cache.invalidate_pattern(&searches)?;
        let detached = self.list_flights.forget_matching(&searches)?;
        debug!(
            id = %id,
            removed,
            detached,
            "Invalidated cached searches after recipe submission"
        );
        Ok(RecipeId::new(RecipeOrigin::Local, id).to_string())
    }

    /// Status of the most recent query for a cache key such as `trending:5`
    #[must_use]
    pub fn last_fetch_status(&self, key: &str) -> Option<FetchStatus> {
        self.statuses.get(key).map(|status| *status)
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached results, including expired ones not yet swept
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    async fn browse(&self, key: String, query: &str, limit: u32, sort: SortKey) -> CatalogPage {
        let started = Instant::now();
        let page = match self.cache.get(&key) {
            Some(CacheValue::List(recipes)) => CatalogPage::new(recipes, FetchStatus::Cached),
            _ => {
                self.list_flights
                    .run(&key, || self.fetch_remote(&key, query, limit, sort))
                    .await
            }
        };
        self.finish(&key, page, started)
    }

    async fn fetch_remote(&self, key: &str, query: &str, limit: u32, sort: SortKey) -> CatalogPage {
        let fetched_at = Instant::now();
        match self.remote_search(query, limit, sort).await {
            Ok(recipes) => {
                self.cache_list(key, &recipes, fetched_at);
                CatalogPage::new(recipes, FetchStatus::Fresh)
            }
            Err(e) => {
                warn!(
                    key,
                    provider = self.search.name(),
                    error = %e,
                    "Remote recipe fetch failed, serving empty page"
                );
                CatalogPage::failed(e.code())
            }
        }
    }

    async fn fetch_search(&self, key: &str, query: &str, needle: &str, limit: u32) -> CatalogPage {
        let fetched_at = Instant::now();
        let (remote, local) = join(
            self.remote_search(query, limit, SortKey::Popularity),
            self.store.list_all(),
        )
        .await;

        let local = local
            .map(|recipes| {
                recipes
                    .into_iter()
                    .filter(|recipe| recipe.matches_keyword(needle))
                    .collect::<Vec<_>>()
            })
            .map_err(|e| {
                warn!(key, error = %e, "Recipe store failed during search");
                e.code()
            });

        match (remote, local) {
            (Ok(remote), Ok(local)) => {
                let recipes = merge_by_id(local, remote);
                self.cache_list(key, &recipes, fetched_at);
                CatalogPage::new(recipes, FetchStatus::Fresh)
            }
            (Ok(remote), Err(store_code)) => {
                CatalogPage::new(merge_by_id(Vec::new(), remote), FetchStatus::Degraded(store_code))
            }
            (Err(e), Ok(local)) if !local.is_empty() => {
                warn!(key, error = %e, "Remote search failed, serving local matches only");
                CatalogPage::new(merge_by_id(local, Vec::new()), FetchStatus::Degraded(e.code()))
            }
            (Err(e), _) => {
                warn!(key, error = %e, "Remote search failed, serving empty page");
                CatalogPage::failed(e.code())
            }
        }
    }

    async fn fetch_detail(&self, key: &str, recipe_id: &RecipeId) -> RecipeResult<Recipe> {
        let fetched_at = Instant::now();
        let recipe = self.store.get_by_id(recipe_id.bare()).await?;
        self.cache.put_if_newer(
            key,
            CacheValue::Single(recipe.clone()),
            self.settings.detail_ttl,
            fetched_at,
        );
        Ok(recipe)
    }

    async fn remote_search(
        &self,
        query: &str,
        limit: u32,
        sort: SortKey,
    ) -> RecipeResult<Vec<Recipe>> {
        with_retry(&self.settings.retry, self.search.name(), || {
            self.search.search(query, limit, sort)
        })
        .await
    }

    fn cache_list(&self, key: &str, recipes: &[Recipe], fetched_at: Instant) {
        self.cache.put_if_newer(
            key,
            CacheValue::List(recipes.to_vec()),
            self.settings.list_ttl,
            fetched_at,
        );
    }

    fn finish(&self, key: &str, page: CatalogPage, started: Instant) -> CatalogPage {
        self.statuses.insert(key.to_owned(), page.status);
        CatalogLogger::log_fetch(
            key,
            page.status,
            page.recipes.len(),
            started.elapsed().as_millis() as u64,
        );
        page
    }
}
