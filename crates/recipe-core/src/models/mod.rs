// ABOUTME: Canonical recipe data models shared by every recipe source
// ABOUTME: Recipe, RecipeOrigin, RecipeId, RecipeDraft, and tolerant field normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// User recipe drafts and write-side validation
pub mod draft;
/// Tolerant coercion of list-or-text and loosely typed fields
pub mod normalize;
/// Canonical recipe, origin, and namespaced id
pub mod recipe;

pub use draft::RecipeDraft;
pub use normalize::{clean_entries, list_from_value, split_list_text, text_from_value, ListField};
pub use recipe::{Recipe, RecipeId, RecipeOrigin};
