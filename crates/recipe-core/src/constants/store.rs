// ABOUTME: Document store constants for the user recipe collection
// ABOUTME: Field names match the documents written by the mobile app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Collection holding user-submitted recipes
pub const RECIPES_COLLECTION: &str = "recipes";

/// Default Firestore REST base URL
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firestore page size used when listing a collection
pub const FIRESTORE_LIST_PAGE_SIZE: u32 = 300;

/// Document field names
pub mod fields {
    /// Recipe title
    pub const NAME: &str = "name";
    /// Recipe description
    pub const DESCRIPTION: &str = "description";
    /// Ingredient list or text
    pub const INGREDIENTS: &str = "ingredients";
    /// Instruction list or text
    pub const INSTRUCTIONS: &str = "instructions";
    /// Image location written by the app
    pub const IMAGE_URI: &str = "imageUri";
    /// Image location read by older detail screens
    pub const IMAGE_URL: &str = "imageUrl";
}
