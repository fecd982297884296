// ABOUTME: Application constants for the recipe catalog organized by domain
// ABOUTME: Re-exports cache, search, store, and service name constant modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache freshness windows, capacity, and cleanup intervals
pub mod cache;
/// Search API wire names and page size bounds
pub mod search;
/// Document store collection and field names
pub mod store;

/// Service names used in logs and error messages
pub mod service_names {
    /// Remote recipe search provider
    pub const RECIPE_SEARCH_API: &str = "Spoonacular API";
    /// Default service name for structured logging
    pub const RECIPE_CATALOG: &str = "recipe-catalog";
}
