// ABOUTME: Remote recipe search client for the Spoonacular complexSearch endpoint
// ABOUTME: Builds queries, decodes results into canonical recipes, and classifies failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remote Recipe Search Client
//!
//! Wraps the third-party `recipes/complexSearch` endpoint. The API key is
//! attached by [`ApiKeyMiddleware`](crate::http_client::ApiKeyMiddleware),
//! so no call site ever handles the credential.
//!
//! # Failure classification
//! - 2xx: body decoded; malformed bodies fail with `RecipeError::Decode`
//! - 429: `RecipeError::RateLimited` (retryable)
//! - 5xx or transport failure: `RecipeError::Network` (retryable)
//! - other 4xx: `RecipeError::RequestRejected` (not retryable)
//!
//! # Example
//! ```rust,no_run
//! use recipe_providers::{RemoteSearchClient, RemoteSearchConfig, SortKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RemoteSearchClient::new(RemoteSearchConfig {
//!     api_key: "your_api_key".to_owned(),
//!     ..RemoteSearchConfig::default()
//! })?;
//! let recipes = client.search("pasta", 10, SortKey::Popularity).await?;
//! # Ok(())
//! # }
//! ```

use crate::constants::search::{
    API_KEY_PARAM, COMPLEX_SEARCH_PATH, DEFAULT_BASE_URL, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};
use crate::constants::service_names::RECIPE_SEARCH_API;
use crate::errors::{RecipeError, RecipeResult};
use crate::http_client::{build_client, with_api_key, HttpClientConfig};
use crate::models::{text_from_value, ListField, Recipe, RecipeId, RecipeOrigin};
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Longest response body excerpt carried in a rejected-request error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Result ordering requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most popular first
    Popularity,
    /// Most recent first
    Time,
}

impl SortKey {
    /// Wire value of the `sort` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Time => "time",
        }
    }
}

/// Clamp a requested page size into the range the provider accepts
#[must_use]
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// Source of remote recipe search results
#[async_trait]
pub trait RecipeSearchProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Search recipes; an empty `query` browses without a keyword
    ///
    /// # Errors
    ///
    /// Returns `Network`, `RateLimited`, `Decode`, or `RequestRejected`
    async fn search(&self, query: &str, limit: u32, sort: SortKey) -> RecipeResult<Vec<Recipe>>;
}

/// Remote search client configuration
#[derive(Clone)]
pub struct RemoteSearchConfig {
    /// API base URL (default: <https://api.spoonacular.com>)
    pub base_url: String,
    /// API key sent as the `apiKey` query parameter
    pub api_key: String,
    /// Request timeouts
    pub http: HttpClientConfig,
}

impl Default for RemoteSearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            http: HttpClientConfig::default(),
        }
    }
}

impl fmt::Debug for RemoteSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("http", &self.http)
            .finish()
    }
}

/// `complexSearch` response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// Provider ids arrive as numbers, occasionally as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderId {
    Number(u64),
    Text(String),
}

impl ProviderId {
    fn into_bare(self) -> Option<String> {
        match self {
            Self::Number(id) => Some(id.to_string()),
            Self::Text(id) => {
                let id = id.trim();
                (!id.is_empty()).then(|| id.to_owned())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultItem {
    id: ProviderId,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    image: Value,
    #[serde(default)]
    summary: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    ingredients: ListField,
    #[serde(default)]
    extended_ingredients: ListField,
    #[serde(default)]
    instructions: ListField,
}

impl SearchResultItem {
    fn into_recipe(self) -> Option<Recipe> {
        let bare = self.id.into_bare()?;
        let title = text_from_value(&self.title)?;
        let ingredients = if self.ingredients.as_slice().is_empty() {
            self.extended_ingredients.into_vec()
        } else {
            self.ingredients.into_vec()
        };

        let recipe = Recipe::new(&RecipeId::new(RecipeOrigin::Remote, bare), title)
            .ok()?
            .with_image_url(text_from_value(&self.image).unwrap_or_default())
            .with_summary(text_from_value(&self.summary))
            .with_description(text_from_value(&self.description).unwrap_or_default())
            .with_ingredients(ingredients)
            .with_instructions(self.instructions.into_vec());
        Some(recipe)
    }
}

/// Decode a `complexSearch` body into canonical recipes
///
/// Items that cannot be normalized (no id, blank title) are skipped; the
/// body as a whole must still be a JSON object with a `results` array.
///
/// # Errors
///
/// Returns `RecipeError::Decode` when the body is not a valid search response
pub fn decode_search_body(body: &[u8]) -> RecipeResult<Vec<Recipe>> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|e| RecipeError::decode(RECIPE_SEARCH_API, format!("JSON parse error: {e}")))?;

    let recipes = response
        .results
        .into_iter()
        .filter_map(|item| {
            let decoded =
                serde_json::from_value::<SearchResultItem>(item).map(SearchResultItem::into_recipe);
            match decoded {
                Ok(Some(recipe)) => Some(recipe),
                Ok(None) => {
                    debug!("Skipping search result without usable id or title");
                    None
                }
                Err(e) => {
                    debug!(error = %e, "Skipping undecodable search result");
                    None
                }
            }
        })
        .collect();

    Ok(recipes)
}

/// Remote recipe search API client
pub struct RemoteSearchClient {
    search_url: String,
    http: ClientWithMiddleware,
}

impl RemoteSearchClient {
    /// Create a new search client
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Config` if the API key is blank or the HTTP
    /// client cannot be built
    pub fn new(config: RemoteSearchConfig) -> RecipeResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(RecipeError::config("recipe search API key is not set"));
        }

        let client = build_client(&config.http)?;
        let search_url = format!(
            "{}/{COMPLEX_SEARCH_PATH}",
            config.base_url.trim_end_matches('/')
        );
        debug!(%search_url, "Created remote recipe search client");

        Ok(Self {
            search_url,
            http: with_api_key(client, API_KEY_PARAM, config.api_key),
        })
    }

    /// Search recipes
    ///
    /// `limit` is clamped to `[1, 100]`. An empty `query` browses the whole
    /// catalog in the requested order.
    ///
    /// # Errors
    ///
    /// See the module documentation for the failure classification
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        sort: SortKey,
    ) -> RecipeResult<Vec<Recipe>> {
        let number = clamp_limit(limit).to_string();
        debug!(query, number = %number, sort = sort.as_str(), "Searching remote recipes");

        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("query", query),
                ("number", number.as_str()),
                ("sort", sort.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RecipeError::network(RECIPE_SEARCH_API, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            return Err(RecipeError::rate_limited(RECIPE_SEARCH_API, retry_after_secs));
        }
        if status.is_server_error() {
            return Err(RecipeError::network(
                RECIPE_SEARCH_API,
                format!("HTTP {status}"),
            ));
        }
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(RecipeError::request_rejected(
                RECIPE_SEARCH_API,
                status.as_u16(),
                excerpt,
            ));
        }
        if !status.is_success() {
            return Err(RecipeError::decode(
                RECIPE_SEARCH_API,
                format!("unexpected HTTP {status}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RecipeError::network(RECIPE_SEARCH_API, e.to_string()))?;
        decode_search_body(&body)
    }
}

#[async_trait]
impl RecipeSearchProvider for RemoteSearchClient {
    fn name(&self) -> &str {
        RECIPE_SEARCH_API
    }

    async fn search(&self, query: &str, limit: u32, sort: SortKey) -> RecipeResult<Vec<Recipe>> {
        Self::search(self, query, limit, sort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(5), 5);
        assert_eq!(clamp_limit(500), 100);
    }

    #[test]
    fn test_decode_normalizes_items() {
        let body = br#"{"results":[
            {"id":716429,"title":"Pasta with Garlic","image":"https://img/716429.jpg",
             "ingredients":"pasta, garlic, oil","instructions":"Boil\nToss"},
            {"id":"abc","title":"No Image"},
            {"id":1,"title":"  "},
            {"title":"No id"}
        ]}"#;
        let recipes = decode_search_body(body).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, "remote:716429");
        assert_eq!(recipes[0].ingredients, vec!["pasta", "garlic", "oil"]);
        assert_eq!(recipes[0].instructions, vec!["Boil", "Toss"]);
        assert_eq!(recipes[1].id, "remote:abc");
        assert!(recipes[1].image_url.is_empty());
        assert!(recipes[1].ingredients.is_empty());
        assert_eq!(recipes[1].description, "");
    }

    #[test]
    fn test_extended_ingredients_fallback() {
        let body = br#"{"results":[{"id":9,"title":"Soup",
            "extendedIngredients":[{"original":"1 onion"},{"original":"2 cups stock"}]}]}"#;
        let recipes = decode_search_body(body).unwrap();
        assert_eq!(recipes[0].ingredients, vec!["1 onion", "2 cups stock"]);
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let error = decode_search_body(b"<html>oops</html>").unwrap_err();
        assert_eq!(error.code(), ErrorCode::DecodeError);

        let error = decode_search_body(br#"{"totalResults": 0}"#).unwrap_err();
        assert_eq!(error.code(), ErrorCode::DecodeError);
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let result = RemoteSearchClient::new(RemoteSearchConfig::default());
        assert!(matches!(result, Err(RecipeError::Config { .. })));
    }
}
