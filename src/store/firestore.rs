// ABOUTME: Firestore REST v1 document backend for the recipes collection
// ABOUTME: Converts Firestore typed values to plain JSON and pages through collection listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Firestore REST backend
//!
//! Documents are addressed as
//! `<base>/projects/<project>/databases/(default)/documents/<collection>/<id>`.
//! Field values travel in Firestore's typed encoding
//! (`{"stringValue": "..."}`, `{"arrayValue": {"values": [...]}}`, ...) and
//! are converted to and from plain JSON here so the rest of the crate only
//! ever sees `serde_json::Value`.

use super::{Document, DocumentBackend};
use crate::config::FirestoreConfig;
use crate::constants::store::FIRESTORE_LIST_PAGE_SIZE;
use crate::errors::{RecipeError, RecipeResult};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use recipe_providers::{build_client, with_api_key, HttpClientConfig};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use url::Url;

/// Query parameter carrying the Firestore API key
const API_KEY_PARAM: &str = "key";

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

impl FirestoreDocument {
    fn into_document(self) -> anyhow::Result<Document> {
        let id = self
            .name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("document name '{}' has no id", self.name))?
            .to_owned();
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), from_firestore_value(value)))
            .collect();
        Ok(Document::new(id, fields))
    }
}

/// Firestore REST document backend
pub struct FirestoreBackend {
    documents_url: Url,
    auth_token: Option<String>,
    http: ClientWithMiddleware,
}

impl FirestoreBackend {
    /// Create a backend for the configured project
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Config` if the project id is blank, the base URL
    /// is invalid, or the HTTP client cannot be built
    pub fn new(config: &FirestoreConfig, http: &HttpClientConfig) -> RecipeResult<Self> {
        let project_id = config.project_id.trim();
        if project_id.is_empty() {
            return Err(RecipeError::config("Firestore project id is not set"));
        }

        let mut documents_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| RecipeError::config(format!("Invalid Firestore base URL: {e}")))?;
        documents_url
            .path_segments_mut()
            .map_err(|()| RecipeError::config("Firestore base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(["projects", project_id, "databases", "(default)", "documents"]);

        let client = build_client(http)?;
        let http = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => with_api_key(client, API_KEY_PARAM, key.to_owned()),
            _ => ClientBuilder::new(client).build(),
        };
        info!(url = %documents_url, "Created Firestore document backend");

        Ok(Self {
            documents_url,
            auth_token: config
                .auth_token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            http,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Documents URL extended by percent-encoded path segments
    fn documents_path(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> anyhow::Result<reqwest::Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .with_context(|| format!("Firestore {operation} request failed"))?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow!("Firestore {operation} returned HTTP {status}: {body}"))
    }
}

#[async_trait]
impl DocumentBackend for FirestoreBackend {
    fn name(&self) -> &str {
        "firestore"
    }

    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> anyhow::Result<String> {
        let body = serde_json::to_vec(&json!({ "fields": to_firestore_fields(&fields) }))
            .context("Failed to encode Firestore document")?;
        let request = self
            .http
            .post(self.documents_path(&[collection]))
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(request, "create").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(anyhow!("Firestore collection '{collection}' not found"));
        }

        let created: FirestoreDocument = response
            .json()
            .await
            .context("Failed to decode created Firestore document")?;
        Ok(created.into_document()?.id)
    }

    async fn fetch(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
        let url = self.documents_path(&[collection, id]);
        let response = self.send(self.http.get(url), "get").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: FirestoreDocument = response
            .json()
            .await
            .context("Failed to decode Firestore document")?;
        document.into_document().map(Some)
    }

    async fn fetch_all(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        let url = self.documents_path(&[collection]);
        let page_size = FIRESTORE_LIST_PAGE_SIZE.to_string();
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(url.clone())
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = self.send(request, "list").await?;
            if response.status() == StatusCode::NOT_FOUND {
                break;
            }
            let page: ListDocumentsResponse = response
                .json()
                .await
                .context("Failed to decode Firestore document list")?;

            for document in page.documents {
                match document.into_document() {
                    Ok(document) => documents.push(document),
                    Err(e) => debug!(error = %e, "Skipping Firestore document without id"),
                }
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }
}

/// Encode plain JSON fields as Firestore typed values
#[must_use]
pub fn to_firestore_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), to_firestore_value(value)))
        .collect()
}

/// Encode one plain JSON value as a Firestore typed value
#[must_use]
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => number.as_i64().map_or_else(
            || json!({ "doubleValue": number.as_f64() }),
            // int64 values are encoded as strings
            |integer| json!({ "integerValue": integer.to_string() }),
        ),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": to_firestore_fields(map) } }),
    }
}

/// Decode a Firestore typed value into plain JSON
///
/// Unknown value kinds decode to `null`.
#[must_use]
pub fn from_firestore_value(value: &Value) -> Value {
    let Some(typed) = value.as_object() else {
        return Value::Null;
    };

    if let Some(text) = typed.get("stringValue") {
        return text.clone();
    }
    if let Some(integer) = typed.get("integerValue") {
        return match integer {
            Value::String(text) => text
                .parse::<i64>()
                .map_or_else(|_| integer.clone(), Value::from),
            other => other.clone(),
        };
    }
    if let Some(double) = typed.get("doubleValue") {
        return double.clone();
    }
    if let Some(flag) = typed.get("booleanValue") {
        return flag.clone();
    }
    if let Some(array) = typed.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(from_firestore_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = typed.get("mapValue") {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), from_firestore_value(value)))
                    .collect()
            })
            .unwrap_or_default();
        return Value::Object(fields);
    }
    for passthrough in ["timestampValue", "referenceValue", "bytesValue", "geoPointValue"] {
        if let Some(raw) = typed.get(passthrough) {
            return raw.clone();
        }
    }
    Value::Null
}
