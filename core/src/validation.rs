//! Recursive collection of validation errors returned by the API.
//!
//! # Design
//! The collection mirrors the JSON payload shape instead of flattening it:
//! the reserved `errors` key holds this node's own errors, every other key
//! becomes a named child collection. Children keep the payload's key order,
//! which is why the crate turns on `serde_json`'s `preserve_order` feature.
//! Parsing is strict and fails fast: the first malformed entry aborts with
//! an error naming what was wrong, rather than producing a half-built tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Reserved payload key holding a node's own errors.
const ERRORS_KEY: &str = "errors";

/// A single validation failure reported for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Attribute the error applies to, e.g. `name`.
    pub attribute: String,
    /// Numeric error code.
    pub code: i64,
    /// Human-readable description.
    pub message: String,
}

/// A node in the validation-error tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorCollection {
    errors: Vec<ValidationError>,
    nested: Vec<(String, ValidationErrorCollection)>,
}

impl ValidationErrorCollection {
    /// Build a collection from a decoded JSON payload.
    ///
    /// The value must be an object. Its `errors` entry, when present, must
    /// be an array of `{attribute, code, message}` records; every other
    /// entry must itself be an object and is parsed recursively.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::MalformedPayload("expected a JSON object".to_string()))?;

        let mut errors = Vec::new();
        let mut nested = Vec::new();
        for (key, entry) in map {
            if key == ERRORS_KEY {
                let items = entry.as_array().ok_or_else(|| {
                    Error::MalformedPayload(format!("`{ERRORS_KEY}` must be an array"))
                })?;
                for item in items {
                    let error = ValidationError::deserialize(item)
                        .map_err(|e| Error::MalformedPayload(e.to_string()))?;
                    errors.push(error);
                }
            } else {
                let child = Self::from_value(entry)?;
                nested.push((key.clone(), child));
            }
        }
        Ok(Self { errors, nested })
    }

    /// This node's own errors, in payload order.
    pub fn shallow_all(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Every error in the subtree: own errors first, then each child's
    /// errors depth-first in child order.
    pub fn deep_all(&self) -> Vec<&ValidationError> {
        let mut all: Vec<&ValidationError> = self.errors.iter().collect();
        for (_, child) in &self.nested {
            all.extend(child.deep_all());
        }
        all
    }

    /// Total number of errors in the subtree.
    pub fn deep_size(&self) -> usize {
        self.errors.len()
            + self
                .nested
                .iter()
                .map(|(_, child)| child.deep_size())
                .sum::<usize>()
    }

    /// The child collection stored under `key`, if any.
    pub fn for_key(&self, key: &str) -> Option<&ValidationErrorCollection> {
        self.nested
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, child)| child)
    }

    /// The child collection for the positional key `index{index}`, if any.
    ///
    /// Array elements are reported under synthesized keys, so an error on
    /// the first element of a `labels` list lives at `labels -> index0`.
    pub fn for_index(&self, index: usize) -> Option<&ValidationErrorCollection> {
        self.for_key(&format!("index{index}"))
    }

    /// This node's own errors whose attribute matches `attribute`.
    pub fn on_attribute(&self, attribute: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| error.attribute == attribute)
            .collect()
    }

    /// The ordered child collections.
    pub fn nested(&self) -> &[(String, ValidationErrorCollection)] {
        &self.nested
    }
}

impl fmt::Display for ValidationErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if !self.errors.is_empty() {
            write!(f, "errors:[")?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "({} {})", error.code, error.message)?;
            }
            write!(f, "]")?;
            first = false;
        }
        for (key, child) in &self.nested {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}:[{child}]")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &str) -> ValidationErrorCollection {
        let value: Value = serde_json::from_str(json).unwrap();
        ValidationErrorCollection::from_value(&value).unwrap()
    }

    const CARD_PAYLOAD: &str = r#"{
        "card": {
            "errors": [
                {"attribute": "name", "code": 5001, "message": "name must not be blank"}
            ],
            "labels": {
                "index0": {
                    "errors": [
                        {"attribute": "color", "code": 5105, "message": "color is not an allowed value"}
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn empty_object_is_an_empty_collection() {
        let root = collection("{}");
        assert!(root.shallow_all().is_empty());
        assert!(root.deep_all().is_empty());
        assert_eq!(root.deep_size(), 0);
        assert!(root.nested().is_empty());
        assert_eq!(root.to_string(), "");
    }

    #[test]
    fn own_errors_are_shallow_and_deep() {
        let root = collection(
            r#"{"errors": [
                {"attribute": "name", "code": 1, "message": "a"},
                {"attribute": "desc", "code": 2, "message": "b"}
            ]}"#,
        );
        assert_eq!(root.shallow_all().len(), 2);
        assert_eq!(root.deep_size(), 2);
        let codes: Vec<i64> = root.deep_all().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![1, 2]);
    }

    #[test]
    fn nested_payload_builds_a_tree() {
        let root = collection(CARD_PAYLOAD);
        assert!(root.shallow_all().is_empty());
        assert_eq!(root.deep_size(), 2);

        let card = root.for_key("card").unwrap();
        assert_eq!(card.shallow_all().len(), 1);
        assert_eq!(card.shallow_all()[0].attribute, "name");
        assert_eq!(card.shallow_all()[0].code, 5001);

        let label = card.for_key("labels").unwrap().for_index(0).unwrap();
        assert_eq!(label.shallow_all()[0].code, 5105);
    }

    #[test]
    fn deep_all_lists_own_errors_before_children() {
        let root = collection(CARD_PAYLOAD);
        let card = root.for_key("card").unwrap();
        let codes: Vec<i64> = card.deep_all().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![5001, 5105]);
    }

    #[test]
    fn children_keep_payload_order() {
        let root = collection(
            r#"{
                "zeta": {"errors": [{"attribute": "z", "code": 26, "message": "z"}]},
                "alpha": {"errors": [{"attribute": "a", "code": 1, "message": "a"}]}
            }"#,
        );
        let keys: Vec<&str> = root.nested().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        let codes: Vec<i64> = root.deep_all().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![26, 1]);
    }

    #[test]
    fn for_key_misses_return_none() {
        let root = collection(CARD_PAYLOAD);
        assert!(root.for_key("board").is_none());
        let card = root.for_key("card").unwrap();
        assert!(card.for_key("labels").unwrap().for_index(1).is_none());
    }

    #[test]
    fn on_attribute_filters_own_errors_only() {
        let root = collection(CARD_PAYLOAD);
        let card = root.for_key("card").unwrap();
        let matches = card.on_attribute("name");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].code, 5001);
        // color errors live on the nested label node, not on the card
        assert!(card.on_attribute("color").is_empty());
        assert!(card.on_attribute("missing").is_empty());
    }

    #[test]
    fn display_renders_codes_and_nested_keys() {
        let root = collection(CARD_PAYLOAD);
        let rendered = root.to_string();
        assert!(rendered.contains("(5001 name must not be blank)"));
        assert!(rendered.contains("card:["));
        assert!(rendered.contains("index0:["));

        let flat = collection(
            r#"{"errors": [
                {"attribute": "a", "code": 1, "message": "a"},
                {"attribute": "b", "code": 2, "message": "b"}
            ]}"#,
        );
        assert_eq!(flat.to_string(), "errors:[(1 a), (2 b)]");
    }

    #[test]
    fn top_level_must_be_an_object() {
        let value: Value = serde_json::from_str(r#"["errors"]"#).unwrap();
        let err = ValidationErrorCollection::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn errors_key_must_hold_an_array() {
        let value: Value = serde_json::from_str(r#"{"errors": "oops"}"#).unwrap();
        let err = ValidationErrorCollection::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(msg) if msg.contains("array")));
    }

    #[test]
    fn incomplete_error_records_are_rejected() {
        let value: Value =
            serde_json::from_str(r#"{"errors": [{"attribute": "name", "code": 1}]}"#).unwrap();
        let err = ValidationErrorCollection::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(msg) if msg.contains("message")));
    }

    #[test]
    fn scalar_under_a_named_key_is_rejected() {
        let value: Value = serde_json::from_str(r#"{"card": "broken"}"#).unwrap();
        let err = ValidationErrorCollection::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn deeply_nested_errors_are_counted() {
        let root = collection(
            r#"{
                "a": {"b": {"c": {"errors": [
                    {"attribute": "x", "code": 9, "message": "deep"}
                ]}}}
            }"#,
        );
        assert_eq!(root.deep_size(), 1);
        let deep = root
            .for_key("a")
            .and_then(|a| a.for_key("b"))
            .and_then(|b| b.for_key("c"))
            .unwrap();
        assert_eq!(deep.shallow_all()[0].message, "deep");
    }
}
