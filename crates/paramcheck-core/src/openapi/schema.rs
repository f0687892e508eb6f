//! Schema sub-model.
//!
//! A schema is kept as the JSON value it was read from, since the full
//! JSON Schema vocabulary is open-ended. Validation here is structural:
//! it checks the keywords that decide a value's shape and recurses into
//! nested schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map as JsonMap, Value as JsonValue};

use super::{Ref, Validate};
use crate::{Error, Result};

/// A schema that may be inline or behind a `$ref`.
pub type SchemaRef = Ref<Schema>;

/// OpenAPI schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type
    String,
    /// Number type (float/double)
    Number,
    /// Integer type
    Integer,
    /// Boolean type
    Boolean,
    /// Array type
    Array,
    /// Object type
    Object,
    /// Null type (OpenAPI 3.1 type lists)
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Null => "null",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(SchemaType::String),
            "number" => Ok(SchemaType::Number),
            "integer" => Ok(SchemaType::Integer),
            "boolean" => Ok(SchemaType::Boolean),
            "array" => Ok(SchemaType::Array),
            "object" => Ok(SchemaType::Object),
            "null" => Ok(SchemaType::Null),
            other => Err(Error::schema(format!("unsupported 'type' value '{other}'"))),
        }
    }
}

/// A JSON Schema object describing a value's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    inner: JsonValue,
}

impl Schema {
    pub fn new(inner: JsonValue) -> Self {
        Self { inner }
    }

    /// Create a new Schema from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Ok(Self::new(serde_json::to_value(&yaml_value)?))
    }

    pub fn of_type(schema_type: SchemaType) -> Self {
        Self::new(json!({ "type": schema_type.as_str() }))
    }

    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of_type(SchemaType::Integer)
    }

    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    pub fn array_of(items: Schema) -> Self {
        Self::new(json!({ "type": "array", "items": items.inner }))
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.inner
    }

    /// The declared `type`, when it is a single known type name.
    pub fn schema_type(&self) -> Option<SchemaType> {
        self.inner.get("type")?.as_str()?.parse().ok()
    }
}

impl From<JsonValue> for Schema {
    fn from(inner: JsonValue) -> Self {
        Self::new(inner)
    }
}

impl Validate for Schema {
    fn validate(&self) -> Result<()> {
        validate_schema(&self.inner, "")
    }
}

fn fail(path: &str, msg: impl fmt::Display) -> Error {
    if path.is_empty() {
        Error::schema(msg.to_string())
    } else {
        Error::schema(format!("at '{path}': {msg}"))
    }
}

fn validate_schema(value: &JsonValue, path: &str) -> Result<()> {
    let obj = match value {
        JsonValue::Object(obj) => obj,
        JsonValue::Bool(_) => return Ok(()),
        _ => return Err(fail(path, "schema must be an object or a boolean")),
    };

    // nested refs are left for the document's own resolution pass
    if obj.contains_key("$ref") {
        return Ok(());
    }

    let types = declared_types(obj, path)?;
    if types.contains(&SchemaType::Array) && !obj.contains_key("items") {
        return Err(fail(path, "schema of type 'array' must define 'items'"));
    }

    if let Some(items) = obj.get("items") {
        validate_schema(items, &format!("{path}/items"))?;
    }

    if let Some(props) = obj.get("properties") {
        let props = props
            .as_object()
            .ok_or_else(|| fail(path, "'properties' must be an object"))?;
        for (name, prop) in props {
            validate_schema(prop, &format!("{path}/properties/{name}"))?;
        }
    }

    if let Some(additional) = obj.get("additionalProperties") {
        validate_schema(additional, &format!("{path}/additionalProperties"))?;
    }

    if let Some(not) = obj.get("not") {
        validate_schema(not, &format!("{path}/not"))?;
    }

    for keyword in ["allOf", "anyOf", "oneOf"] {
        if let Some(list) = obj.get(keyword) {
            let list = list
                .as_array()
                .ok_or_else(|| fail(path, format!("'{keyword}' must be an array")))?;
            for (i, sub) in list.iter().enumerate() {
                validate_schema(sub, &format!("{path}/{keyword}/{i}"))?;
            }
        }
    }

    if let Some(required) = obj.get("required") {
        let all_strings = required
            .as_array()
            .is_some_and(|names| names.iter().all(JsonValue::is_string));
        if !all_strings {
            return Err(fail(path, "'required' must be an array of strings"));
        }
    }

    Ok(())
}

fn declared_types(obj: &JsonMap<String, JsonValue>, path: &str) -> Result<Vec<SchemaType>> {
    let parse = |raw: &str| raw.parse::<SchemaType>().map_err(|e| fail(path, strip(e)));
    match obj.get("type") {
        None => Ok(Vec::new()),
        Some(JsonValue::String(raw)) => Ok(vec![parse(raw.as_str())?]),
        Some(JsonValue::Array(list)) => list
            .iter()
            .map(|t| {
                t.as_str()
                    .ok_or_else(|| fail(path, "'type' list entries must be strings"))
                    .and_then(parse)
            })
            .collect(),
        Some(_) => Err(fail(path, "'type' must be a string or an array of strings")),
    }
}

fn strip(err: Error) -> String {
    match err {
        Error::Schema(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_schemas_validate() {
        for schema in [
            Schema::string(),
            Schema::integer(),
            Schema::number(),
            Schema::of_type(SchemaType::Boolean),
            Schema::array_of(Schema::string()),
            Schema::new(json!(true)),
            Schema::new(json!({"$ref": "#/components/schemas/Pet"})),
        ] {
            assert!(schema.validate().is_ok(), "{schema:?}");
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = Schema::new(json!({"type": "int"})).validate().unwrap_err();
        assert_eq!(err.to_string(), "schema error: unsupported 'type' value 'int'");
    }

    #[test]
    fn test_array_requires_items() {
        let err = Schema::new(json!({"type": "array"})).validate().unwrap_err();
        assert!(matches!(err, Error::Schema(_)));

        let listed = Schema::new(json!({"type": ["array", "null"]}));
        assert!(listed.validate().is_err());
    }

    #[test]
    fn test_nested_error_reports_path() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "text"}}
            }
        }));
        let err = schema.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema error: at '/properties/tags/items': unsupported 'type' value 'text'"
        );
    }

    #[test]
    fn test_malformed_keywords() {
        assert!(Schema::new(json!("string")).validate().is_err());
        assert!(Schema::new(json!({"required": "id"})).validate().is_err());
        assert!(Schema::new(json!({"oneOf": {"type": "string"}})).validate().is_err());
        assert!(Schema::new(json!({"additionalProperties": {"type": 3}}))
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_yaml() -> crate::Result<()> {
        let schema = Schema::from_yaml("type: integer\nminimum: 1")?;
        assert_eq!(schema.schema_type(), Some(SchemaType::Integer));
        assert_eq!(schema.as_json()["minimum"], 1);
        Ok(())
    }
}
