// ABOUTME: Configuration module for the recipe catalog
// ABOUTME: Environment-only configuration of the search client, cache, catalog, and store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing
pub mod environment;

pub use environment::{CatalogConfig, FirestoreConfig, StoreBackendKind, StoreConfig};
