// ABOUTME: Cache-related constants for freshness windows, capacity, and cleanup intervals
// ABOUTME: List queries stay fresh briefly, single-recipe lookups a little longer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Freshness window for trending/latest/search/category lists (1 minute)
pub const TTL_LIST_SECS: u64 = 60;

/// Freshness window for a single recipe detail lookup (5 minutes)
pub const TTL_DETAIL_SECS: u64 = 300;

/// Default maximum cache entries
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

/// Default interval between background sweeps of expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 120;

/// Cache key prefixes, one per catalog query shape
pub mod keys {
    /// Trending list prefix
    pub const TRENDING: &str = "trending";
    /// Latest list prefix
    pub const LATEST: &str = "latest";
    /// Keyword search prefix
    pub const SEARCH: &str = "search";
    /// Category browse prefix
    pub const CATEGORY: &str = "category";
    /// Single recipe detail prefix
    pub const DETAIL: &str = "detail";
}
