// ABOUTME: Remote recipe search provider for the recipe catalog
// ABOUTME: Search client, provider trait, authenticated HTTP client, retry utilities, and mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe search provider implementations and core abstractions.
//!
//! The catalog talks to the third-party search API only through the
//! [`RecipeSearchProvider`] trait. [`RemoteSearchClient`] is the production
//! implementation; [`MockSearchProvider`] serves canned results in tests.

// Re-export recipe-core modules so provider code can keep `use crate::errors::*` etc.
pub use recipe_core::constants;
pub use recipe_core::errors;
pub use recipe_core::models;

/// HTTP client construction and API key injection middleware
pub mod http_client;
/// In-memory search provider for tests
pub mod mock;
/// Exponential backoff for retryable provider failures
pub mod retry;
/// Remote recipe search client and provider trait
pub mod search;

pub use http_client::{build_client, with_api_key, ApiKeyMiddleware, HttpClientConfig};
pub use mock::{MockSearchProvider, SearchRequest};
pub use retry::{with_retry, RetryBackoffConfig};
pub use search::{
    clamp_limit, RecipeSearchProvider, RemoteSearchClient, RemoteSearchConfig, SortKey,
};
