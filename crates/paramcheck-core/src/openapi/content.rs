//! Content sub-model: media type keyed representations.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{ExampleRef, Extensions, Schema, SchemaRef, Validate};
use crate::{Error, Result};

/// `type/subtype` media types and ranges (`text/*`, `*/*`), with optional
/// parameters such as `; charset=utf-8`.
static MEDIA_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$&^_.+*-]+/[A-Za-z0-9!#$&^_.+*-]+(\s*;.*)?$")
        .expect("media type pattern is valid")
});

/// Map from media type to its description. Used by parameters whose
/// serialization depends on content negotiation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(BTreeMap<String, MediaType>);

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content with a single `application/json` entry.
    pub fn with_json_schema(schema: Schema) -> Self {
        let mut content = Self::new();
        content.insert("application/json", MediaType::with_schema(schema));
        content
    }

    pub fn insert(&mut self, media_type: impl Into<String>, value: MediaType) -> Option<MediaType> {
        self.0.insert(media_type.into(), value)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut MediaType)> {
        self.0.iter_mut()
    }
}

impl Validate for Content {
    fn validate(&self) -> Result<()> {
        for (key, media_type) in &self.0 {
            if !MEDIA_TYPE_RE.is_match(key) {
                return Err(Error::content(format!("invalid media type '{key}'")));
            }
            media_type
                .validate()
                .map_err(|e| Error::media_type_validation(key, e))?;
        }
        Ok(())
    }
}

/// Media Type Object: the schema and examples for one representation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, ExampleRef>,

    /// Encoding objects are passed through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub encoding: BTreeMap<String, JsonValue>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl MediaType {
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Default::default()
        }
    }
}

impl Validate for MediaType {
    fn validate(&self) -> Result<()> {
        match &self.schema {
            Some(schema) => schema.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_keys() {
        for key in [
            "application/json",
            "text/plain; charset=utf-8",
            "application/vnd.api+json",
            "*/*",
        ] {
            let mut content = Content::new();
            content.insert(key, MediaType::default());
            assert!(content.validate().is_ok(), "{key}");
        }

        let mut content = Content::new();
        content.insert("json", MediaType::default());
        let err = content.validate().unwrap_err();
        assert_eq!(err.to_string(), "content error: invalid media type 'json'");
    }

    #[test]
    fn test_nested_schema_error_names_media_type() {
        let content = Content::with_json_schema(Schema::new(json!({"type": "array"})));
        match content.validate() {
            Err(err @ Error::MediaTypeValidation { .. }) => {
                assert!(err.to_string().starts_with("media type 'application/json' is invalid"));
                let source = std::error::Error::source(&err).map(ToString::to_string);
                assert_eq!(
                    source.as_deref(),
                    Some("schema error: schema of type 'array' must define 'items'")
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_media_type_keeps_unknown_fields() {
        let raw = json!({
            "schema": {"type": "object"},
            "x-codegen": {"flatten": true}
        });
        let mt: MediaType = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(mt.extensions.get("x-codegen"), Some(&json!({"flatten": true})));
        assert_eq!(serde_json::to_value(&mt).unwrap(), raw);
    }
}
