// ABOUTME: Draft of a user-submitted recipe and its write-side validation
// ABOUTME: Builds drafts from free-text form input and rejects blank required fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::normalize::{clean_entries, split_list_text};
use crate::errors::{RecipeError, RecipeResult};
use serde::{Deserialize, Serialize};

/// A recipe the user wants to save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    /// Recipe name (required)
    pub name: String,
    /// Description (required)
    pub description: String,
    /// Ingredients, at least one required
    pub ingredients: Vec<String>,
    /// Instruction steps, at least one required
    pub instructions: Vec<String>,
    /// Optional image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl RecipeDraft {
    /// Build a draft from the add-recipe form's free-text fields
    ///
    /// Ingredient and instruction text is split one entry per line, or on
    /// commas when the text is a single line.
    #[must_use]
    pub fn from_form(
        name: &str,
        description: &str,
        ingredients: &str,
        instructions: &str,
        image_uri: Option<&str>,
    ) -> Self {
        Self {
            name: name.trim().to_owned(),
            description: description.trim().to_owned(),
            ingredients: split_list_text(ingredients),
            instructions: split_list_text(instructions),
            image_uri: image_uri
                .map(str::trim)
                .filter(|uri| !uri.is_empty())
                .map(str::to_owned),
        }
    }

    /// Check that every required field is present
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Validation` naming the first blank required field
    pub fn validate(&self) -> RecipeResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::validation("name", "must not be blank"));
        }
        if self.description.trim().is_empty() {
            return Err(RecipeError::validation("description", "must not be blank"));
        }
        if clean_entries(&self.ingredients).is_empty() {
            return Err(RecipeError::validation(
                "ingredients",
                "at least one ingredient is required",
            ));
        }
        if clean_entries(&self.instructions).is_empty() {
            return Err(RecipeError::validation(
                "instructions",
                "at least one instruction step is required",
            ));
        }
        Ok(())
    }
}
