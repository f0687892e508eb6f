//! Side-mapping for fields a model type does not declare.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Every key of a JSON object that its model type does not recognize.
///
/// Model types embed this with `#[serde(flatten)]`, so unknown fields are
/// captured on read and written back unchanged. Specification extensions
/// (keys starting with `x-`) are the usual occupants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, JsonValue>);

impl Extensions {
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Specification extensions (fields starting with `x-`).
    pub fn vendor(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter().filter(|(k, _)| k.starts_with("x-"))
    }

    /// Unknown fields that are not specification extensions.
    pub fn unrecognized(&self) -> impl Iterator<Item = &String> {
        self.0.keys().filter(|k| !k.starts_with("x-"))
    }
}

impl FromIterator<(String, JsonValue)> for Extensions {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
