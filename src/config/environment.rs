// ABOUTME: Environment configuration for the recipe catalog with defaults for every setting
// ABOUTME: Parses and validates API, cache, page size, retry, and document store variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `RECIPE_API_KEY` | required |
//! | `RECIPE_API_BASE_URL` | `https://api.spoonacular.com` |
//! | `RECIPE_HTTP_TIMEOUT_SECS` / `RECIPE_HTTP_CONNECT_TIMEOUT_SECS` | 30 / 10 |
//! | `RECIPE_CACHE_LIST_TTL_SECS` / `RECIPE_CACHE_DETAIL_TTL_SECS` | 60 / 300 |
//! | `RECIPE_CACHE_MAX_ENTRIES` / `RECIPE_CACHE_CLEANUP_INTERVAL_SECS` | 1000 / 120 |
//! | `RECIPE_CACHE_BACKGROUND_CLEANUP` | true |
//! | `RECIPE_TRENDING_LIMIT` / `RECIPE_LATEST_LIMIT` | 5 / 5 |
//! | `RECIPE_SEARCH_LIMIT` / `RECIPE_CATEGORY_LIMIT` | 10 / 5 |
//! | `RECIPE_RETRY_MAX_ATTEMPTS` | 2 |
//! | `RECIPE_RETRY_BASE_DELAY_MS` / `RECIPE_RETRY_MAX_DELAY_MS` | 250 / 2000 |
//! | `RECIPE_STORE_BACKEND` | `memory` |
//! | `RECIPE_STORE_COLLECTION` | `recipes` |
//! | `FIRESTORE_PROJECT_ID` | required for the firestore backend |
//! | `FIRESTORE_BASE_URL` | `https://firestore.googleapis.com/v1` |
//! | `FIRESTORE_AUTH_TOKEN` / `FIRESTORE_API_KEY` | unset |

use crate::cache::CacheConfig;
use crate::catalog::CatalogSettings;
use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, TTL_DETAIL_SECS, TTL_LIST_SECS,
};
use crate::constants::search::{
    DEFAULT_BASE_URL, DEFAULT_CATEGORY_LIMIT, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LATEST_LIMIT,
    DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT_SECS, DEFAULT_TRENDING_LIMIT,
};
use crate::constants::store::{DEFAULT_FIRESTORE_BASE_URL, RECIPES_COLLECTION};
use crate::errors::{RecipeError, RecipeResult};
use recipe_providers::{HttpClientConfig, RemoteSearchConfig, RetryBackoffConfig};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Document backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendKind {
    /// Process-local backend
    Memory,
    /// Firestore REST backend
    Firestore,
}

impl FromStr for StoreBackendKind {
    type Err = RecipeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "firestore" => Ok(Self::Firestore),
            other => Err(RecipeError::config(format!(
                "Unknown RECIPE_STORE_BACKEND '{other}' (expected memory or firestore)"
            ))),
        }
    }
}

/// Firestore connection settings
#[derive(Clone)]
pub struct FirestoreConfig {
    /// Google Cloud project id
    pub project_id: String,
    /// REST API base URL
    pub base_url: String,
    /// OAuth bearer token
    pub auth_token: Option<String>,
    /// Web API key sent as the `key` query parameter
    pub api_key: Option<String>,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_owned(),
            auth_token: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Document store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend to use
    pub backend: StoreBackendKind,
    /// Collection holding user recipes
    pub collection: String,
    /// Firestore settings, present when the firestore backend is selected
    pub firestore: Option<FirestoreConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackendKind::Memory,
            collection: RECIPES_COLLECTION.to_owned(),
            firestore: None,
        }
    }
}

/// Complete recipe catalog configuration
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Remote search client
    pub search: RemoteSearchConfig,
    /// Cache sizing and cleanup
    pub cache: CacheConfig,
    /// Page sizes, freshness windows, and retry policy
    pub catalog: CatalogSettings,
    /// Document store
    pub store: StoreConfig,
}

impl CatalogConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Config` if a required variable is missing or a
    /// value cannot be parsed
    pub fn from_env() -> RecipeResult<Self> {
        let api_key = optional_env("RECIPE_API_KEY")
            .ok_or_else(|| RecipeError::config("RECIPE_API_KEY must be set"))?;

        let search = RemoteSearchConfig {
            base_url: parse_base_url("RECIPE_API_BASE_URL", DEFAULT_BASE_URL)?,
            api_key,
            http: HttpClientConfig {
                timeout: Duration::from_secs(parse_env(
                    "RECIPE_HTTP_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
                connect_timeout: Duration::from_secs(parse_env(
                    "RECIPE_HTTP_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?),
            },
        };

        let cache = CacheConfig {
            max_entries: parse_env("RECIPE_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES)?,
            cleanup_interval: Duration::from_secs(parse_nonzero(
                "RECIPE_CACHE_CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )?),
            enable_background_cleanup: parse_env("RECIPE_CACHE_BACKGROUND_CLEANUP", true)?,
        };

        let retry_defaults = RetryBackoffConfig::default();
        let catalog = CatalogSettings {
            trending_limit: parse_limit("RECIPE_TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?,
            latest_limit: parse_limit("RECIPE_LATEST_LIMIT", DEFAULT_LATEST_LIMIT)?,
            search_limit: parse_limit("RECIPE_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?,
            category_limit: parse_limit("RECIPE_CATEGORY_LIMIT", DEFAULT_CATEGORY_LIMIT)?,
            list_ttl: Duration::from_secs(parse_env("RECIPE_CACHE_LIST_TTL_SECS", TTL_LIST_SECS)?),
            detail_ttl: Duration::from_secs(parse_env(
                "RECIPE_CACHE_DETAIL_TTL_SECS",
                TTL_DETAIL_SECS,
            )?),
            retry: RetryBackoffConfig {
                max_attempts: parse_env("RECIPE_RETRY_MAX_ATTEMPTS", retry_defaults.max_attempts)?,
                base_delay_ms: parse_env(
                    "RECIPE_RETRY_BASE_DELAY_MS",
                    retry_defaults.base_delay_ms,
                )?,
                max_delay_ms: parse_env("RECIPE_RETRY_MAX_DELAY_MS", retry_defaults.max_delay_ms)?,
                ..retry_defaults
            },
        };

        let backend: StoreBackendKind = env_var_or("RECIPE_STORE_BACKEND", "memory").parse()?;
        let firestore = match backend {
            StoreBackendKind::Memory => None,
            StoreBackendKind::Firestore => Some(FirestoreConfig {
                project_id: optional_env("FIRESTORE_PROJECT_ID").ok_or_else(|| {
                    RecipeError::config(
                        "FIRESTORE_PROJECT_ID must be set for the firestore backend",
                    )
                })?,
                base_url: parse_base_url("FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL)?,
                auth_token: optional_env("FIRESTORE_AUTH_TOKEN"),
                api_key: optional_env("FIRESTORE_API_KEY"),
            }),
        };
        let store = StoreConfig {
            backend,
            collection: optional_env("RECIPE_STORE_COLLECTION")
                .unwrap_or_else(|| RECIPES_COLLECTION.to_owned()),
            firestore,
        };

        Ok(Self {
            search,
            cache,
            catalog,
            store,
        })
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Trimmed, non-empty environment variable
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> RecipeResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_env(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| RecipeError::config(format!("Invalid {key} value '{raw}': {e}")))
    })
}

fn parse_limit(key: &str, default: u32) -> RecipeResult<u32> {
    let limit = parse_env(key, default)?;
    if limit == 0 {
        return Err(RecipeError::config(format!("{key} must be at least 1")));
    }
    Ok(limit)
}

fn parse_nonzero(key: &str, default: u64) -> RecipeResult<u64> {
    match parse_env(key, default)? {
        0 => Err(RecipeError::config(format!("{key} must be at least 1"))),
        value => Ok(value),
    }
}

fn parse_base_url(key: &str, default: &str) -> RecipeResult<String> {
    let raw = env_var_or(key, default);
    let parsed = Url::parse(raw.trim())
        .map_err(|e| RecipeError::config(format!("Invalid {key} value '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RecipeError::config(format!(
            "{key} must be an http or https URL, got '{raw}'"
        )));
    }
    Ok(raw.trim().trim_end_matches('/').to_owned())
}
