// ABOUTME: Tolerant normalization of ingredient/instruction fields and loosely typed text
// ABOUTME: Turns single delimited strings, arrays, or absent values into clean sequences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Field normalization applied once at ingestion time.
//!
//! Upstream sources disagree on how list fields are represented: the search
//! API may send an array, user documents usually hold one free-text string,
//! and older documents contain the literal text `"null"`. Everything here
//! collapses those shapes into an ordered `Vec<String>`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text that older writers stored in place of an absent value
const NULL_LITERAL: &str = "null";

fn is_null_literal(text: &str) -> bool {
    text.eq_ignore_ascii_case(NULL_LITERAL)
}

/// Trim entries and drop blanks and `"null"` placeholders, preserving order
pub fn clean_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() || is_null_literal(trimmed) {
                None
            } else {
                Some(trimmed.to_owned())
            }
        })
        .collect()
}

/// Split free text into list entries
///
/// Newlines delimit entries when present; otherwise commas do.
#[must_use]
pub fn split_list_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || is_null_literal(trimmed) {
        return Vec::new();
    }

    if trimmed.contains('\n') {
        clean_entries(trimmed.lines())
    } else {
        clean_entries(trimmed.split(','))
    }
}

/// Normalize any JSON value into a list of entries
///
/// Arrays keep one entry per element. Object elements contribute their
/// `original` (ingredient) or `step` (instruction) text when present.
#[must_use]
pub fn list_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => split_list_text(text),
        Value::Array(items) => clean_entries(items.iter().filter_map(entry_text)),
        Value::Number(number) => clean_entries([number.to_string()]),
        Value::Null | Value::Bool(_) | Value::Object(_) => Vec::new(),
    }
}

fn entry_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(map) => map
            .get("original")
            .or_else(|| map.get("step"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        Value::Null | Value::Bool(_) | Value::Array(_) => None,
    }
}

/// Coerce a scalar JSON value into trimmed text
///
/// Returns `None` for null, blank, `"null"`, arrays, and objects.
#[must_use]
pub fn text_from_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() || is_null_literal(&text) {
        None
    } else {
        Some(text)
    }
}

/// A list field that accepts an array, a delimited string, or nothing
///
/// Use with `#[serde(default)]` so an absent field also becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListField(Vec<String>);

impl ListField {
    /// Consume the field, yielding its entries
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Borrow the entries
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ListField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(list_from_value(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comma_separated_string_splits() {
        assert_eq!(split_list_text("a, b, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_newline_takes_precedence_over_comma() {
        assert_eq!(
            split_list_text("2 eggs, beaten\n1 cup flour\r\n\nsalt"),
            vec!["2 eggs, beaten", "1 cup flour", "salt"]
        );
    }

    #[test]
    fn test_null_literal_is_empty() {
        assert!(split_list_text("null").is_empty());
        assert!(split_list_text("  NULL ").is_empty());
        assert!(list_from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_array_values_are_cleaned() {
        let value = json!(["  flour ", "", null, "null", 2, {"original": "1 tsp salt"}]);
        assert_eq!(list_from_value(&value), vec!["flour", "2", "1 tsp salt"]);
    }

    #[test]
    fn test_step_objects() {
        let value = json!([{"number": 1, "step": "Boil water"}, {"step": "Add pasta"}]);
        assert_eq!(list_from_value(&value), vec!["Boil water", "Add pasta"]);
    }

    #[test]
    fn test_text_from_value_coercion() {
        assert_eq!(text_from_value(&json!(" Tasty ")), Some("Tasty".to_owned()));
        assert_eq!(text_from_value(&json!(42)), Some("42".to_owned()));
        assert_eq!(text_from_value(&json!("null")), None);
        assert_eq!(text_from_value(&json!(["x"])), None);
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        items: ListField,
    }

    #[test]
    fn test_list_field_absent_and_null() {
        let absent: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(absent.items.as_slice().is_empty());

        let null: Holder = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(null.items.as_slice().is_empty());

        let text: Holder = serde_json::from_value(json!({"items": "x,y"})).unwrap();
        assert_eq!(text.items.into_vec(), vec!["x", "y"]);
    }
}
