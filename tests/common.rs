// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, recipe fixtures, and catalog construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recipe_catalog`

use recipe_catalog::cache::CacheConfig;
use recipe_catalog::catalog::{CatalogSettings, RecipeCatalog};
use recipe_catalog::models::{Recipe, RecipeId, RecipeOrigin};
use recipe_catalog::providers::{RecipeSearchProvider, RetryBackoffConfig};
use recipe_catalog::store::{InMemoryDocumentBackend, RecipeStore};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Remote recipe fixture
pub fn remote_recipe(bare: &str, title: &str) -> Recipe {
    Recipe::new(&RecipeId::new(RecipeOrigin::Remote, bare), title).unwrap()
}

/// Raw user document fields as written by the add-recipe screen
pub fn user_document(name: &str, ingredients: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} made at home"),
        "ingredients": ingredients,
        "instructions": "Prep\nCook",
        "imageUri": null
    })
}

/// Cache configuration without the background task
pub fn test_cache_config() -> CacheConfig {
    CacheConfig {
        max_entries: 100,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false,
    }
}

/// Catalog settings with retries disabled and the given list freshness window
pub fn test_settings(list_ttl: Duration) -> CatalogSettings {
    CatalogSettings {
        list_ttl,
        retry: RetryBackoffConfig::disabled(),
        ..CatalogSettings::default()
    }
}

/// Catalog over a search provider and an in-memory store
pub fn create_test_catalog(
    search: Arc<dyn RecipeSearchProvider>,
    backend: Arc<InMemoryDocumentBackend>,
    settings: CatalogSettings,
) -> RecipeCatalog {
    init_test_logging();
    RecipeCatalog::new(
        search,
        RecipeStore::new(backend),
        &test_cache_config(),
        settings,
    )
}
