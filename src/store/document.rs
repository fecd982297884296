// ABOUTME: Raw recipe documents and the single normalization step into canonical recipes
// ABOUTME: Also maps drafts onto the stored field layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::store::fields;
use crate::errors::{RecipeError, RecipeResult};
use crate::models::{
    list_from_value, text_from_value, Recipe, RecipeDraft, RecipeId, RecipeOrigin,
};
use serde_json::{Map, Value};

/// A stored document: its id plus plain JSON fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id within its collection
    pub id: String,
    /// Field values
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    fn text(&self, field: &str) -> Option<String> {
        self.fields.get(field).and_then(text_from_value)
    }

    fn list(&self, field: &str) -> Vec<String> {
        self.fields.get(field).map(list_from_value).unwrap_or_default()
    }
}

/// Convert a stored document into a local recipe
///
/// `name` must be present and non-blank. Other fields are optional and
/// tolerate any scalar type; list fields accept arrays or delimited text;
/// the image is read from `imageUri`, falling back to `imageUrl`.
///
/// # Errors
///
/// Returns `RecipeError::Validation` if the id or name is missing
pub fn normalize_document(document: &Document) -> RecipeResult<Recipe> {
    if document.id.trim().is_empty() {
        return Err(RecipeError::validation("id", "document id is blank"));
    }
    let title = document
        .text(fields::NAME)
        .ok_or_else(|| RecipeError::validation(fields::NAME, "missing or blank"))?;
    let image = document
        .text(fields::IMAGE_URI)
        .or_else(|| document.text(fields::IMAGE_URL))
        .unwrap_or_default();

    Ok(
        Recipe::new(&RecipeId::new(RecipeOrigin::Local, document.id.trim()), title)?
            .with_image_url(image)
            .with_description(document.text(fields::DESCRIPTION).unwrap_or_default())
            .with_ingredients(document.list(fields::INGREDIENTS))
            .with_instructions(document.list(fields::INSTRUCTIONS)),
    )
}

/// Field layout written for a new recipe
#[must_use]
pub fn draft_fields(draft: &RecipeDraft) -> Map<String, Value> {
    let list = |entries: &[String]| {
        Value::Array(
            entries
                .iter()
                .map(|entry| Value::String(entry.trim().to_owned()))
                .collect(),
        )
    };

    let mut map = Map::new();
    map.insert(fields::NAME.to_owned(), Value::String(draft.name.trim().to_owned()));
    map.insert(
        fields::DESCRIPTION.to_owned(),
        Value::String(draft.description.trim().to_owned()),
    );
    map.insert(fields::INGREDIENTS.to_owned(), list(&draft.ingredients));
    map.insert(fields::INSTRUCTIONS.to_owned(), list(&draft.instructions));
    map.insert(
        fields::IMAGE_URI.to_owned(),
        draft
            .image_uri
            .as_deref()
            .map_or(Value::Null, |uri| Value::String(uri.to_owned())),
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, fields: Value) -> Document {
        let Value::Object(map) = fields else {
            panic!("fields must be an object");
        };
        Document::new(id, map)
    }

    #[test]
    fn test_text_fields_are_split() {
        let recipe = normalize_document(&document(
            "abc",
            json!({
                "name": "Stew",
                "ingredients": "beef, carrots",
                "instructions": "Brown\nSimmer",
            }),
        ))
        .unwrap();
        assert_eq!(recipe.id, "local:abc");
        assert_eq!(recipe.ingredients, vec!["beef", "carrots"]);
        assert_eq!(recipe.instructions, vec!["Brown", "Simmer"]);
        assert_eq!(recipe.description, "");
    }

    #[test]
    fn test_null_text_is_empty_list() {
        let recipe = normalize_document(&document(
            "n",
            json!({"name": "Toast", "ingredients": "null", "instructions": null}),
        ))
        .unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn test_image_uri_preferred_over_image_url() {
        let recipe = normalize_document(&document(
            "i",
            json!({"name": "Cake", "imageUri": "content://cake", "imageUrl": "https://cake"}),
        ))
        .unwrap();
        assert_eq!(recipe.image_url, "content://cake");

        let fallback =
            normalize_document(&document("j", json!({"name": "Pie", "imageUrl": "https://pie"})))
                .unwrap();
        assert_eq!(fallback.image_url, "https://pie");
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!(normalize_document(&document("x", json!({"description": "no name"}))).is_err());
        assert!(normalize_document(&document("y", json!({"name": "  "}))).is_err());
    }

    #[test]
    fn test_draft_fields_layout() {
        let draft = RecipeDraft::from_form("Soup", "Warm", "water, salt", "Boil", None);
        let fields = Value::Object(draft_fields(&draft));
        assert_eq!(
            fields,
            json!({
                "name": "Soup",
                "description": "Warm",
                "ingredients": ["water", "salt"],
                "instructions": ["Boil"],
                "imageUri": null
            })
        );
    }
}
