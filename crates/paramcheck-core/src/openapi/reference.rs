//! References (`$ref`) and their resolution.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as JsonValue};

use super::{Parameter, Schema, Validate};
use crate::{Error, Result};

/// Upper bound on `$ref` chains followed by [`JsonPointerResolver`].
const MAX_REF_DEPTH: usize = 32;

/// A value that is either inline or reached through a `$ref` pointer.
///
/// A reference read from a document starts out `Unresolved`. Resolving it
/// keeps the pointer alongside the materialized value so the document
/// serializes back to the same `$ref`.
///
/// Keys next to `$ref` in a reference object are ignored, as OpenAPI 3.0
/// prescribes, and are not written back.
#[derive(Clone, Debug, PartialEq)]
pub enum Ref<T> {
    Unresolved { reference: String },
    Resolved { reference: Option<String>, value: T },
}

impl<T> Ref<T> {
    /// An inline value with no pointer.
    pub fn value(value: T) -> Self {
        Ref::Resolved {
            reference: None,
            value,
        }
    }

    /// A pointer that has not been materialized yet.
    pub fn reference(reference: impl Into<String>) -> Self {
        Ref::Unresolved {
            reference: reference.into(),
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Ref::Resolved { value, .. } => Some(value),
            Ref::Unresolved { .. } => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut T> {
        match self {
            Ref::Resolved { value, .. } => Some(value),
            Ref::Unresolved { .. } => None,
        }
    }

    pub fn reference_path(&self) -> Option<&str> {
        match self {
            Ref::Unresolved { reference } => Some(reference),
            Ref::Resolved { reference, .. } => reference.as_deref(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Ref::Resolved { .. })
    }

    /// Materialize an unresolved reference with `resolve`. Resolved values
    /// are left untouched.
    pub fn resolve_with<F>(&mut self, resolve: F) -> Result<()>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        if let Ref::Unresolved { reference } = self {
            let value = resolve(reference)?;
            let reference = std::mem::take(reference);
            *self = Ref::Resolved {
                reference: Some(reference),
                value,
            };
        }
        Ok(())
    }
}

impl<T> From<T> for Ref<T> {
    fn from(value: T) -> Self {
        Ref::value(value)
    }
}

impl<T: Validate> Validate for Ref<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Ref::Unresolved { reference } => Err(Error::reference(format!(
                "found unresolved ref: '{reference}'"
            ))),
            Ref::Resolved { value, .. } => value.validate(),
        }
    }
}

impl<T: Serialize> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Ref::Unresolved { reference }
            | Ref::Resolved {
                reference: Some(reference),
                ..
            } => json!({ "$ref": reference }).serialize(serializer),
            Ref::Resolved {
                reference: None,
                value,
            } => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        if let Some(reference) = raw.get("$ref").and_then(JsonValue::as_str) {
            if let Some(map) = raw.as_object().filter(|m| m.len() > 1) {
                let dropped: Vec<&str> = map
                    .keys()
                    .map(String::as_str)
                    .filter(|k| *k != "$ref")
                    .collect();
                log::debug!("Ignoring {:?} next to $ref '{}'", dropped, reference);
            }
            return Ok(Ref::reference(reference));
        }
        serde_json::from_value(raw)
            .map(Ref::value)
            .map_err(serde::de::Error::custom)
    }
}

/// Turns `$ref` pointers into concrete values.
pub trait ReferenceResolver {
    fn resolve_parameter(&self, reference: &str) -> Result<Parameter>;
    fn resolve_schema(&self, reference: &str) -> Result<Schema>;
}

/// Resolves document-local pointers (`#/components/parameters/limit`)
/// against a JSON document.
#[derive(Clone, Copy, Debug)]
pub struct JsonPointerResolver<'a> {
    document: &'a JsonValue,
}

impl<'a> JsonPointerResolver<'a> {
    pub fn new(document: &'a JsonValue) -> Self {
        Self { document }
    }

    /// Follow `reference` (and any chained `$ref`) to its target.
    pub fn target(&self, reference: &str) -> Result<&'a JsonValue> {
        let mut current = reference.to_string();
        for _ in 0..MAX_REF_DEPTH {
            let pointer = current.strip_prefix('#').ok_or_else(|| {
                Error::reference(format!("unsupported non-local reference '{current}'"))
            })?;
            let value = self
                .document
                .pointer(pointer)
                .ok_or_else(|| Error::reference(format!("'{current}' points to nothing")))?;
            match value.get("$ref").and_then(JsonValue::as_str) {
                Some(next) => {
                    log::debug!("Following reference {} -> {}", current, next);
                    current = next.to_string();
                }
                None => return Ok(value),
            }
        }
        Err(Error::reference(format!(
            "'{reference}' exceeds {MAX_REF_DEPTH} levels of indirection"
        )))
    }
}

impl ReferenceResolver for JsonPointerResolver<'_> {
    fn resolve_parameter(&self, reference: &str) -> Result<Parameter> {
        log::debug!("Resolving parameter reference: {}", reference);
        let target = self.target(reference)?;
        serde_json::from_value(target.clone()).map_err(|e| {
            Error::reference(format!("'{reference}' is not a parameter: {e}"))
        })
    }

    fn resolve_schema(&self, reference: &str) -> Result<Schema> {
        log::debug!("Resolving schema reference: {}", reference);
        self.target(reference).map(|target| Schema::new(target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ParameterLocation;

    fn document() -> JsonValue {
        json!({
            "components": {
                "parameters": {
                    "limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                    "alias": {"$ref": "#/components/parameters/limit"},
                    "loop": {"$ref": "#/components/parameters/loop"}
                },
                "schemas": {
                    "Id": {"type": "string", "format": "uuid"}
                }
            }
        })
    }

    #[test]
    fn test_ref_deserializes_pointer_as_unresolved() {
        let r: Ref<Parameter> =
            serde_json::from_value(json!({"$ref": "#/components/parameters/limit"})).unwrap();
        assert!(!r.is_resolved());
        assert_eq!(r.reference_path(), Some("#/components/parameters/limit"));
    }

    #[test]
    fn test_ref_siblings_are_ignored() {
        let r: Ref<Parameter> =
            serde_json::from_value(json!({"$ref": "#/x", "description": "shadowed"})).unwrap();
        assert_eq!(r, Ref::reference("#/x"));
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({"$ref": "#/x"}));
    }

    #[test]
    fn test_unresolved_ref_fails_validation() {
        let r: Ref<Parameter> = Ref::reference("#/components/parameters/missing");
        let err = r.validate().unwrap_err();
        assert!(matches!(err, Error::ReferenceResolution(_)));
    }

    #[test]
    fn test_resolve_follows_chained_refs() {
        let doc = document();
        let resolver = JsonPointerResolver::new(&doc);
        let mut r: Ref<Parameter> = Ref::reference("#/components/parameters/alias");
        r.resolve_with(|p| resolver.resolve_parameter(p)).unwrap();

        let param = r.as_value().unwrap();
        assert_eq!(param.name, "limit");
        assert_eq!(param.location, ParameterLocation::Query);
        // the pointer survives resolution and is what gets written back
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"$ref": "#/components/parameters/alias"})
        );
    }

    #[test]
    fn test_resolve_errors() {
        let doc = document();
        let resolver = JsonPointerResolver::new(&doc);

        let missing = resolver.resolve_parameter("#/components/parameters/nope");
        assert!(matches!(missing, Err(Error::ReferenceResolution(_))));

        let remote = resolver.resolve_parameter("common.yaml#/limit");
        assert!(matches!(remote, Err(Error::ReferenceResolution(_))));

        let cyclic = resolver.resolve_parameter("#/components/parameters/loop");
        assert!(matches!(cyclic, Err(Error::ReferenceResolution(_))));
    }

    #[test]
    fn test_resolve_schema() {
        let doc = document();
        let resolver = JsonPointerResolver::new(&doc);
        let schema = resolver.resolve_schema("#/components/schemas/Id").unwrap();
        assert_eq!(schema.as_json()["format"], "uuid");
    }
}
