// ABOUTME: Process-local document backend for development and tests
// ABOUTME: Keeps collections in memory, ordered by document id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Document, DocumentBackend};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

type Collection = BTreeMap<String, Map<String, Value>>;

/// In-memory document backend
#[derive(Default)]
pub struct InMemoryDocumentBackend {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw document under a chosen id, bypassing validation
    ///
    /// A non-object `fields` value is stored as a document with no fields.
    pub async fn seed(&self, collection: &str, id: &str, fields: Value) {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields);
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl DocumentBackend for InMemoryDocumentBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> anyhow::Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn fetch(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn fetch_all(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
