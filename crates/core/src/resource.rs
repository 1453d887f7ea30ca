//! Unstructured access to composed resources.
//!
//! Composed resources are arbitrary Kubernetes-style objects. The function only cares about
//! `metadata.name` and `metadata.annotations`, so rather than modelling every kind the object is
//! kept as a JSON map and read through a few accessors.

use std::collections::BTreeMap;

use function_proto::pb::Ready;
use serde_json::{Map, Value as JsonValue};

const METADATA: &str = "metadata";
const NAME: &str = "name";
const ANNOTATIONS: &str = "annotations";

/// A resource held as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unstructured(Map<String, JsonValue>);

impl Unstructured {
    pub fn new(object: Map<String, JsonValue>) -> Self {
        Self(object)
    }

    pub fn as_object(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    pub fn into_object(self) -> Map<String, JsonValue> {
        self.0
    }

    fn metadata(&self) -> Option<&Map<String, JsonValue>> {
        self.0.get(METADATA).and_then(JsonValue::as_object)
    }

    fn annotations_object(&self) -> Option<&Map<String, JsonValue>> {
        self.metadata()
            .and_then(|m| m.get(ANNOTATIONS))
            .and_then(JsonValue::as_object)
    }

    /// Returns `metadata.name`, or an empty string when it is absent or not a string.
    pub fn name(&self) -> &str {
        self.metadata()
            .and_then(|m| m.get(NAME))
            .and_then(JsonValue::as_str)
            .unwrap_or("")
    }

    /// Returns the string-valued entries of `metadata.annotations`.
    pub fn annotations(&self) -> BTreeMap<&str, &str> {
        self.annotations_object()
            .map(|a| {
                a.iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `metadata.annotations` contains `key`, whatever its value.
    pub fn has_annotation(&self, key: &str) -> bool {
        self.annotations_object()
            .is_some_and(|a| a.contains_key(key))
    }

    /// Merges `annotations` into `metadata.annotations`.
    ///
    /// Missing (or non-object) `metadata` and `annotations` fields are replaced by empty objects
    /// first. Entries already present under the same key are overwritten; all others are kept.
    pub fn add_annotations<K, V>(&mut self, annotations: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut metadata = take_object(&mut self.0, METADATA);
        let mut existing = take_object(&mut metadata, ANNOTATIONS);
        for (key, value) in annotations {
            existing.insert(key.into(), JsonValue::String(value.into()));
        }
        metadata.insert(ANNOTATIONS.to_owned(), JsonValue::Object(existing));
        self.0.insert(METADATA.to_owned(), JsonValue::Object(metadata));
    }
}

/// Removes and returns the object stored under `key`; anything else there is discarded.
fn take_object(parent: &mut Map<String, JsonValue>, key: &str) -> Map<String, JsonValue> {
    match parent.remove(key) {
        Some(JsonValue::Object(map)) => map,
        _ => Map::new(),
    }
}

/// A desired composed resource as seen by a function.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredComposed {
    pub resource: Unstructured,
    pub ready: Ready,
}
