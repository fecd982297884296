// ABOUTME: Recipe store over a document collection holding user-submitted recipes
// ABOUTME: Validates drafts, wraps backend failures as storage errors, and normalizes documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Store
//!
//! [`RecipeStore`] is the only component that talks to the document
//! backend. Backends report failures as `anyhow::Error`; the store turns
//! every one of them into `RecipeError::Storage` so no backend error type
//! leaks past this module.

/// Raw documents and their conversion into canonical recipes
pub mod document;
/// Firestore REST backend
#[cfg(feature = "firestore")]
pub mod firestore;
/// Process-local backend for development and tests
pub mod memory;

pub use document::{draft_fields, normalize_document, Document};
#[cfg(feature = "firestore")]
pub use firestore::FirestoreBackend;
pub use memory::InMemoryDocumentBackend;

use crate::constants::store::RECIPES_COLLECTION;
use crate::errors::{RecipeError, RecipeResult};
use crate::models::{Recipe, RecipeDraft};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Document database backend
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Insert a new document, returning its generated id
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> anyhow::Result<String>;

    /// Fetch one document; `Ok(None)` when it does not exist
    async fn fetch(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>>;

    /// Fetch every document in a collection
    async fn fetch_all(&self, collection: &str) -> anyhow::Result<Vec<Document>>;
}

/// Access to user-submitted recipes
#[derive(Clone)]
pub struct RecipeStore {
    backend: Arc<dyn DocumentBackend>,
    collection: String,
}

impl RecipeStore {
    /// Create a store over the default `recipes` collection
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self::with_collection(backend, RECIPES_COLLECTION)
    }

    /// Create a store over a named collection
    #[must_use]
    pub fn with_collection(
        backend: Arc<dyn DocumentBackend>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            collection: collection.into(),
        }
    }

    /// Collection this store reads and writes
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Validate and persist a draft, returning the new document id
    ///
    /// # Errors
    ///
    /// Returns `Validation` (nothing is written) for an incomplete draft, or
    /// `Storage` if the backend write fails
    pub async fn create(&self, draft: &RecipeDraft) -> RecipeResult<String> {
        draft.validate()?;

        let id = self
            .backend
            .insert(&self.collection, draft_fields(draft))
            .await
            .map_err(|e| storage_error("create", &e))?;
        debug!(backend = self.backend.name(), id = %id, "Stored user recipe");
        Ok(id)
    }

    /// Load one recipe by document id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no document has this id (including ids no
    /// document can have, such as `..`), or `Storage` when the
    /// backend fails or the document cannot be normalized
    pub async fn get_by_id(&self, id: &str) -> RecipeResult<Recipe> {
        let id = id.trim();
        if !is_document_id(id) {
            return Err(RecipeError::not_found(format!("recipe '{id}'")));
        }

        let document = self
            .backend
            .fetch(&self.collection, id)
            .await
            .map_err(|e| storage_error("get", &e))?
            .ok_or_else(|| RecipeError::not_found(format!("recipe '{id}'")))?;

        normalize_document(&document).map_err(|e| {
            RecipeError::storage("get", format!("document '{id}' is malformed: {e}"))
        })
    }

    /// Load every recipe, skipping documents that cannot be normalized
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backend fails
    pub async fn list_all(&self) -> RecipeResult<Vec<Recipe>> {
        let documents = self
            .backend
            .fetch_all(&self.collection)
            .await
            .map_err(|e| storage_error("list", &e))?;

        Ok(documents
            .iter()
            .filter_map(|document| match normalize_document(document) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(id = %document.id, error = %e, "Skipping malformed recipe document");
                    None
                }
            })
            .collect())
    }
}

/// Ids a document can never have: blank, `.`, `..`, or containing `/`
fn is_document_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains('/')
}

fn storage_error(operation: &str, error: &anyhow::Error) -> RecipeError {
    RecipeError::storage(operation, format!("{error:#}"))
}
