// ABOUTME: Cache layer for recipe catalog query results with per-entry freshness windows
// ABOUTME: Sharded in-memory storage, background sweeping, and single-flight fetch sharing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Sharded in-memory cache with TTL and capacity eviction
pub mod memory;
/// Sharing of one in-flight fetch between concurrent identical misses
pub mod single_flight;

pub use memory::CacheLayer;
pub use single_flight::SingleFlight;

use crate::constants::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS};
use crate::errors::{RecipeError, RecipeResult};
use crate::models::Recipe;
use std::time::Duration;

/// Compile a cache key glob such as `search:*`
fn key_pattern(pattern: &str) -> RecipeResult<glob::Pattern> {
    glob::Pattern::new(pattern).map_err(|e| {
        RecipeError::invalid_query(format!("invalid cache key pattern '{pattern}': {e}"))
    })
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries; the oldest entry is evicted beyond this
    pub max_entries: usize,
    /// Interval between background sweeps of expired entries
    pub cleanup_interval: Duration,
    /// Enable the background sweep task (disable in tests)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

/// Value stored by the catalog cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    /// Result page of a list query (trending, latest, search, category)
    List(Vec<Recipe>),
    /// Single recipe from a detail lookup
    Single(Recipe),
}
