// ABOUTME: HTTP client construction with configurable timeouts for provider API calls
// ABOUTME: Injects the API credential on every request through one middleware
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::search::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::errors::{RecipeError, RecipeResult};
use http::Extensions;
use reqwest::{Client, ClientBuilder, Request, Response};
use reqwest_middleware::{ClientWithMiddleware, Middleware, Next};
use std::fmt;
use std::time::Duration;

/// Timeouts applied to every outbound provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Build a pooled HTTP client with the configured timeouts
///
/// # Errors
///
/// Returns `RecipeError::Config` if the TLS backend cannot be initialised
pub fn build_client(config: &HttpClientConfig) -> RecipeResult<Client> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| RecipeError::config(format!("failed to build HTTP client: {e}")))
}

/// Appends the API credential as a query parameter to every request
pub struct ApiKeyMiddleware {
    param: &'static str,
    api_key: String,
}

impl ApiKeyMiddleware {
    /// Create a middleware that adds `param=<api_key>` to each request URL
    #[must_use]
    pub fn new(param: &'static str, api_key: impl Into<String>) -> Self {
        Self {
            param,
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for ApiKeyMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyMiddleware")
            .field("param", &self.param)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait::async_trait]
impl Middleware for ApiKeyMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(self.param, &self.api_key);
        next.run(req, extensions).await
    }
}

/// Wrap a client so that every request carries the API credential
#[must_use]
pub fn with_api_key(
    client: Client,
    param: &'static str,
    api_key: impl Into<String>,
) -> ClientWithMiddleware {
    reqwest_middleware::ClientBuilder::new(client)
        .with(ApiKeyMiddleware::new(param, api_key))
        .build()
}
