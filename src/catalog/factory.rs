// ABOUTME: Builds a recipe catalog from environment-derived configuration
// ABOUTME: Selects the document backend and wires the search client, store, and cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::RecipeCatalog;
use crate::config::{CatalogConfig, StoreBackendKind};
use crate::errors::RecipeResult;
use crate::store::{DocumentBackend, InMemoryDocumentBackend, RecipeStore};
use recipe_providers::RemoteSearchClient;
use std::sync::Arc;
use tracing::info;

impl RecipeCatalog {
    /// Create a catalog from configuration
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Config` if the search client or the selected
    /// document backend cannot be created
    pub fn from_config(config: &CatalogConfig) -> RecipeResult<Self> {
        let search = Arc::new(RemoteSearchClient::new(config.search.clone())?);
        let backend = document_backend(config)?;
        info!(
            backend = backend.name(),
            collection = %config.store.collection,
            "Creating recipe catalog"
        );

        let store = RecipeStore::with_collection(backend, config.store.collection.clone());
        Ok(Self::new(search, store, &config.cache, config.catalog.clone()))
    }
}

fn document_backend(config: &CatalogConfig) -> RecipeResult<Arc<dyn DocumentBackend>> {
    match config.store.backend {
        StoreBackendKind::Memory => Ok(Arc::new(InMemoryDocumentBackend::new())),
        StoreBackendKind::Firestore => firestore_backend(config),
    }
}

#[cfg(feature = "firestore")]
fn firestore_backend(config: &CatalogConfig) -> RecipeResult<Arc<dyn DocumentBackend>> {
    use crate::errors::RecipeError;
    use crate::store::FirestoreBackend;

    let firestore = config
        .store
        .firestore
        .as_ref()
        .ok_or_else(|| RecipeError::config("Firestore backend selected without settings"))?;
    Ok(Arc::new(FirestoreBackend::new(firestore, &config.search.http)?))
}

#[cfg(not(feature = "firestore"))]
fn firestore_backend(_config: &CatalogConfig) -> RecipeResult<Arc<dyn DocumentBackend>> {
    Err(crate::errors::RecipeError::config(
        "Firestore backend selected but the `firestore` feature is disabled",
    ))
}
