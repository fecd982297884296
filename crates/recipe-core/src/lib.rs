// ABOUTME: Core types and constants for the recipe catalog
// ABOUTME: Foundation crate with error taxonomy, canonical recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! catalog. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Error taxonomy with `RecipeError` and `ErrorCode`
//! - **models**: Canonical `Recipe`, namespaced ids, drafts, and field normalization
//! - **constants**: Page sizes, freshness windows, and wire-level names

/// Error taxonomy shared by the search client, the store, and the catalog
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Canonical recipe models and tolerant field normalization
pub mod models;
