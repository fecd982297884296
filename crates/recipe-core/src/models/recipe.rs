// ABOUTME: Canonical origin-agnostic Recipe model with namespaced identifiers
// ABOUTME: Remote search results and user documents are both converted into this shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{RecipeError, RecipeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeOrigin {
    /// Third-party recipe search provider
    Remote,
    /// User-submitted document store
    Local,
}

impl RecipeOrigin {
    /// Namespace prefix used in recipe ids
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

/// Recipe id split into origin namespace and bare id
///
/// Ids without a recognised prefix are treated as remote ids, matching
/// provider ids that reach the catalog without a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeId {
    origin: RecipeOrigin,
    bare: String,
}

impl RecipeId {
    /// Create an id in the given namespace
    #[must_use]
    pub fn new(origin: RecipeOrigin, bare: impl Into<String>) -> Self {
        Self {
            origin,
            bare: bare.into(),
        }
    }

    /// Parse a namespaced id such as `local:abc123` or `remote:716429`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        for origin in [RecipeOrigin::Local, RecipeOrigin::Remote] {
            if let Some(bare) = raw
                .strip_prefix(origin.prefix())
                .and_then(|rest| rest.strip_prefix(':'))
            {
                return Self::new(origin, bare);
            }
        }
        Self::new(RecipeOrigin::Remote, raw)
    }

    /// Origin namespace
    #[must_use]
    pub const fn origin(&self) -> RecipeOrigin {
        self.origin
    }

    /// Id without its namespace prefix
    #[must_use]
    pub fn bare(&self) -> &str {
        &self.bare
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin.prefix(), self.bare)
    }
}

/// Canonical recipe representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Namespaced id (`remote:<providerId>` or `local:<documentId>`)
    pub id: String,
    /// Non-empty title
    pub title: String,
    /// Image location, empty when the source has none
    #[serde(default)]
    pub image_url: String,
    /// Short teaser, only provided by the remote provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description, empty when the source has none
    #[serde(default)]
    pub description: String,
    /// Ordered ingredients
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Source of this recipe
    pub origin: RecipeOrigin,
}

impl Recipe {
    /// Create a recipe with the required fields, leaving the rest empty
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Validation` if `title` is blank
    pub fn new(id: &RecipeId, title: impl Into<String>) -> RecipeResult<Self> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(RecipeError::validation("title", "must not be blank"));
        }

        Ok(Self {
            id: id.to_string(),
            title: title.to_owned(),
            image_url: String::new(),
            summary: None,
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            origin: id.origin(),
        })
    }

    /// Set the image location
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the teaser summary
    #[must_use]
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the ingredient list
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Set the instruction steps
    #[must_use]
    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    /// Parsed namespaced id
    #[must_use]
    pub fn recipe_id(&self) -> RecipeId {
        RecipeId::parse(&self.id)
    }

    /// Id without the namespace prefix
    #[must_use]
    pub fn bare_id(&self) -> &str {
        self.id.split_once(':').map_or(&self.id, |(_, bare)| bare)
    }

    /// Case-insensitive keyword match against title, description, and ingredients
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(needle))
    }
}
