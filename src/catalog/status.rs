// ABOUTME: Fetch outcome reporting for catalog queries
// ABOUTME: Distinguishes an empty successful result from an absorbed upstream failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ErrorCode;
use crate::models::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a catalog page was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "code", rename_all = "snake_case")]
pub enum FetchStatus {
    /// Every source answered; the result was fetched just now
    Fresh,
    /// Served from a cached result still inside its freshness window
    Cached,
    /// Some sources failed; the page holds what the others returned
    Degraded(ErrorCode),
    /// No source produced recipes; the page is empty because of this failure
    Failed(ErrorCode),
}

impl FetchStatus {
    /// Whether every source answered
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Fresh | Self::Cached)
    }

    /// Error class behind a degraded or failed fetch
    #[must_use]
    pub const fn error_code(self) -> Option<ErrorCode> {
        match self {
            Self::Degraded(code) | Self::Failed(code) => Some(code),
            Self::Fresh | Self::Cached => None,
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => f.write_str("fresh"),
            Self::Cached => f.write_str("cached"),
            Self::Degraded(code) => write!(f, "degraded({code:?})"),
            Self::Failed(code) => write!(f, "failed({code:?})"),
        }
    }
}

/// One page of catalog results with the status of the fetch behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Recipes in display order
    pub recipes: Vec<Recipe>,
    /// How the page was produced
    pub status: FetchStatus,
}

impl CatalogPage {
    /// Create a page
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>, status: FetchStatus) -> Self {
        Self { recipes, status }
    }

    /// Empty page produced by a failed fetch
    #[must_use]
    pub const fn failed(code: ErrorCode) -> Self {
        Self::new(Vec::new(), FetchStatus::Failed(code))
    }

    /// Whether the page holds no recipes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
