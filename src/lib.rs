// ABOUTME: Main library entry point for the recipe catalog data-access layer
// ABOUTME: Unifies remote recipe search and user-submitted recipes behind one cached catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Catalog
//!
//! Typed access to recipes from two sources: a third-party search API and a
//! document collection of user-submitted recipes. Both are normalized into
//! one canonical [`models::Recipe`] and served through
//! [`catalog::RecipeCatalog`], which caches list queries, shares identical
//! in-flight fetches, and reports upstream failures as a [`catalog::FetchStatus`]
//! instead of an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use recipe_catalog::catalog::RecipeCatalog;
//! use recipe_catalog::config::CatalogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = RecipeCatalog::from_config(&CatalogConfig::from_env()?)?;
//!
//! let trending = catalog.trending(None).await;
//! if !trending.status.is_complete() {
//!     eprintln!("trending recipes unavailable: {}", trending.status);
//! }
//!
//! let pasta = catalog.search_by_keyword("pasta", None).await?;
//! println!("{} recipes", pasta.recipes.len());
//! # Ok(())
//! # }
//! ```

/// Core error taxonomy (re-exported from `recipe-core`)
pub use recipe_core::errors;

/// Canonical recipe models and normalization (re-exported from `recipe-core`)
pub use recipe_core::models;

/// Application constants (re-exported from `recipe-core`)
pub use recipe_core::constants;

/// Remote search provider (re-exported crate)
pub use recipe_providers as providers;

/// Query result caching
pub mod cache;

/// Unified recipe catalog
pub mod catalog;

/// Environment configuration
pub mod config;

/// Logging setup
pub mod logging;

/// User recipe storage
pub mod store;
