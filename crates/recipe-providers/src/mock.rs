// ABOUTME: In-memory recipe search provider serving canned results for tests
// ABOUTME: Counts calls, records requests, and can simulate latency or failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{RecipeError, RecipeResult};
use crate::models::Recipe;
use crate::search::{clamp_limit, RecipeSearchProvider, SortKey};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// One request received by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query string as received
    pub query: String,
    /// Requested page size before clamping
    pub limit: u32,
    /// Requested ordering
    pub sort: SortKey,
}

/// Mock search provider for testing (no API calls)
pub struct MockSearchProvider {
    recipes: Vec<Recipe>,
    failure: Mutex<Option<RecipeError>>,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchProvider {
    /// Create a mock that answers every search from `recipes`
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            failure: Mutex::new(None),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose searches fail with `error`
    #[must_use]
    pub fn failing(error: RecipeError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Self::new(Vec::new())
        }
    }

    /// Delay every response by `delay`
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make subsequent searches fail (or succeed again with `None`)
    pub async fn set_failure(&self, failure: Option<RecipeError>) {
        *self.failure.lock().await = failure;
    }

    /// Number of searches received so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in arrival order
    pub async fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl RecipeSearchProvider for MockSearchProvider {
    fn name(&self) -> &str {
        "mock search"
    }

    async fn search(&self, query: &str, limit: u32, sort: SortKey) -> RecipeResult<Vec<Recipe>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(SearchRequest {
            query: query.to_owned(),
            limit,
            sort,
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(error) = self.failure.lock().await.clone() {
            return Err(error);
        }

        let needle = query.trim().to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| needle.is_empty() || recipe.matches_keyword(&needle))
            .take(clamp_limit(limit) as usize)
            .cloned()
            .collect())
    }
}
