// ABOUTME: Integration tests for the remote recipe search client against a mock HTTP server
// ABOUTME: Covers credentials, query parameters, limit clamping, and failure classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use recipe_catalog::errors::{ErrorCode, RecipeError};
use recipe_catalog::providers::{
    with_retry, RemoteSearchClient, RemoteSearchConfig, RetryBackoffConfig, SortKey,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/recipes/complexSearch";

fn client_for(server: &MockServer) -> RemoteSearchClient {
    common::init_test_logging();
    RemoteSearchClient::new(RemoteSearchConfig {
        base_url: server.uri(),
        api_key: "test-key".to_owned(),
        ..RemoteSearchConfig::default()
    })
    .unwrap()
}

fn search_body() -> serde_json::Value {
    json!({
        "results": [
            {
                "id": 716_429,
                "title": "Pasta with Garlic",
                "image": "https://img.example/716429.jpg"
            },
            {"id": 715_538, "title": "Bruschetta", "image": "https://img.example/715538.jpg"}
        ],
        "offset": 0,
        "number": 2,
        "totalResults": 2
    })
}

#[tokio::test]
async fn test_search_sends_credential_and_parameters() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("query", "pasta"))
        .and(query_param("number", "10"))
        .and(query_param("sort", "popularity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let recipes = client_for(&server)
        .search("pasta", 10, SortKey::Popularity)
        .await?;

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, "remote:716429");
    assert_eq!(recipes[0].title, "Pasta with Garlic");
    assert_eq!(recipes[0].image_url, "https://img.example/716429.jpg");
    assert!(recipes[0].ingredients.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_browse_by_time_with_empty_query() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", ""))
        .and(query_param("number", "5"))
        .and(query_param("sort", "time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let recipes = client_for(&server).search("", 5, SortKey::Time).await?;

    assert!(recipes.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_limit_is_clamped() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("number", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("number", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.search("pasta", 500, SortKey::Popularity).await?;
    client.search("pasta", 0, SortKey::Popularity).await?;
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_is_classified() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .search("", 5, SortKey::Popularity)
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::RateLimited);
    assert!(error.is_retryable());
    assert_eq!(error.retry_after_secs(), Some(3));
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_network_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .search("soup", 5, SortKey::Popularity)
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::NetworkError);
    assert!(error.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_rejected_request_is_not_retryable() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"status": "failure", "code": 401})),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .search("soup", 5, SortKey::Popularity)
        .await
        .unwrap_err();

    match &error {
        RecipeError::RequestRejected { status, message, .. } => {
            assert_eq!(*status, 401);
            assert!(message.contains("failure"));
        }
        other => panic!("expected rejected request, got {other:?}"),
    }
    assert_eq!(error.code(), ErrorCode::DecodeError);
    assert!(!error.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .search("soup", 5, SortKey::Popularity)
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::DecodeError);
    Ok(())
}

#[tokio::test]
async fn test_connection_failure_is_network_error() -> Result<()> {
    let client = RemoteSearchClient::new(RemoteSearchConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        api_key: "test-key".to_owned(),
        ..RemoteSearchConfig::default()
    })?;

    let error = client
        .search("soup", 5, SortKey::Popularity)
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::NetworkError);
    Ok(())
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failure() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = RetryBackoffConfig {
        max_attempts: 2,
        base_delay_ms: 10,
        max_delay_ms: 50,
        jitter_factor: 0.0,
    };
    let recipes = with_retry(&policy, "search", || {
        client.search("pasta", 10, SortKey::Popularity)
    })
    .await?;

    assert_eq!(recipes.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_retry_after_beyond_ceiling_returns_rate_limited() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = RetryBackoffConfig {
        max_attempts: 3,
        base_delay_ms: 10,
        max_delay_ms: 2_000,
        jitter_factor: 0.0,
    };
    let error = with_retry(&policy, "search", || {
        client.search("pasta", 10, SortKey::Popularity)
    })
    .await
    .unwrap_err();

    assert_eq!(error.code(), ErrorCode::RateLimited);
    assert_eq!(error.retry_after_secs(), Some(60));
    Ok(())
}
