// ABOUTME: Merges local and remote recipe lists into one deduplicated sequence
// ABOUTME: Bare-id collisions keep the local recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::Recipe;
use std::collections::HashSet;

/// Merge local recipes ahead of remote ones, keeping one recipe per bare id
///
/// Order within each source is preserved. When a remote recipe shares its
/// bare id with a local one, the local recipe is kept; duplicates within a
/// single source keep their first occurrence.
#[must_use]
pub fn merge_by_id(local: Vec<Recipe>, remote: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::with_capacity(local.len() + remote.len());
    local
        .into_iter()
        .chain(remote)
        .filter(|recipe| seen.insert(recipe.bare_id().to_owned()))
        .collect()
}
