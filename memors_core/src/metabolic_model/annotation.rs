//! This module provides the annotation types shared by metabolites, reactions, and genes
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Map of database names (e.g. `kegg.reaction`) to the identifiers in that database
pub type Annotation = IndexMap<String, AnnotationValue>;

/// Value of a single annotation entry, either one identifier or a list of them
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnnotationValue {
    /// Iterate over the identifiers regardless of shape
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            AnnotationValue::Single(value) => std::slice::from_ref(value),
            AnnotationValue::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }

    /// Check whether `value` is one of the identifiers
    pub fn contains(&self, value: &str) -> bool {
        self.values().any(|v| v == value)
    }

    /// The identifiers as a set, so that `"x"` and `["x"]` compare equal
    pub fn value_set(&self) -> BTreeSet<&str> {
        self.values().collect()
    }
}

/// Normalize the entries of `annotation` with a key in `keys` into `(key, value)` pairs
pub fn annotation_pairs(annotation: &Annotation, keys: &[&str]) -> BTreeSet<(String, String)> {
    keys.iter()
        .filter_map(|key| annotation.get(*key).map(|value| (key, value)))
        .flat_map(|(key, value)| value.values().map(|v| (key.to_string(), v.to_string())))
        .collect()
}

/// Convert a free-form JSON annotation object into an [`Annotation`]
///
/// Strings and lists of strings are kept, numbers are converted to their textual form,
/// and anything else (nested objects, nulls, booleans) is dropped.
pub fn annotation_from_value(value: Value) -> Annotation {
    let mut annotation = Annotation::new();
    let Value::Object(entries) = value else {
        return annotation;
    };
    for (key, entry) in entries {
        let converted = match entry {
            Value::String(s) => Some(AnnotationValue::Single(s)),
            Value::Number(n) => Some(AnnotationValue::Single(n.to_string())),
            Value::Array(items) => Some(AnnotationValue::Multiple(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        };
        if let Some(converted) = converted {
            annotation.insert(key, converted);
        }
    }
    annotation
}
