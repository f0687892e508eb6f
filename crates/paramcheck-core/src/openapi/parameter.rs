//! A single parameter declaration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{
    is_false, Content, ExampleRef, Extensions, Location, ParameterLocation, ReferenceResolver,
    Schema, SchemaRef, Validate,
};
use crate::{Error, Result};

/// Information about a single parameter in an OpenAPI operation.
///
/// Fields at their default value are omitted when serializing. Any field
/// not declared here is kept in [`Parameter::extensions`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// The name of the parameter. Parameter names are case sensitive.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The location of the parameter.
    #[serde(rename = "in", default, skip_serializing_if = "Location::is_empty")]
    pub location: Location,

    /// A brief description of the parameter. CommonMark syntax MAY be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// How the parameter value is serialized (`form`, `simple`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Whether array/object values generate one parameter per item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    /// Sets the ability to pass empty-valued parameters.
    #[serde(rename = "allowEmptyValue", default, skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,

    /// Whether reserved characters (RFC3986) may appear unescaped.
    #[serde(rename = "allowReserved", default, skip_serializing_if = "is_false")]
    pub allow_reserved: bool,

    /// Declares this parameter to be deprecated.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,

    /// Determines whether this parameter is mandatory. Always true for path
    /// parameters built with [`Parameter::path`].
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// The schema defining the type used for the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    /// Example of the parameter's potential value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<JsonValue>,

    /// Named examples of the parameter's potential value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, ExampleRef>,

    /// Representations keyed by media type. Mutually exclusive with `schema`,
    /// even when present but empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Unrecognized fields, including `x-` specification extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Parameter {
    /// A parameter with the given name and location and every other field unset.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// A path parameter. Path parameters are always required.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(name, ParameterLocation::Path)
        }
    }

    /// A query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// A header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    /// A cookie parameter.
    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }

    /// Set the description.
    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Set whether the parameter is mandatory.
    pub fn with_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Set the schema, or clear it with `None`.
    pub fn with_schema(&mut self, schema: Option<Schema>) -> &mut Self {
        self.schema = schema.map(SchemaRef::from);
        self
    }

    /// Set the serialization style.
    pub fn with_style(&mut self, style: impl Into<String>) -> &mut Self {
        self.style = Some(style.into());
        self
    }

    /// Mark the parameter deprecated.
    pub fn with_deprecated(&mut self, deprecated: bool) -> &mut Self {
        self.deprecated = deprecated;
        self
    }

    /// Set the content map. Any map, even an empty one, conflicts with a schema.
    pub fn with_content(&mut self, content: Content) -> &mut Self {
        self.content = Some(content);
        self
    }

    /// Set the inline example value.
    pub fn with_example(&mut self, example: JsonValue) -> &mut Self {
        self.example = Some(example);
        self
    }

    /// Add an extension field, usually an `x-` key.
    pub fn with_extension(&mut self, key: impl Into<String>, value: JsonValue) -> &mut Self {
        self.extensions.insert(key, value);
        self
    }

    /// The schema value, when set inline or already resolved.
    pub fn schema_value(&self) -> Option<&Schema> {
        self.schema.as_ref().and_then(|s| s.as_value())
    }

    /// Materialize the `$ref` schemas this parameter points at: its own
    /// schema and the schema of every content entry.
    pub fn resolve_refs<R>(&mut self, resolver: &R) -> Result<()>
    where
        R: ReferenceResolver + ?Sized,
    {
        if let Some(schema) = self.schema.as_mut() {
            schema.resolve_with(|r| resolver.resolve_schema(r))?;
        }
        if let Some(content) = self.content.as_mut() {
            for (_, media_type) in content.iter_mut() {
                if let Some(schema) = media_type.schema.as_mut() {
                    schema.resolve_with(|r| resolver.resolve_schema(r))?;
                }
            }
        }
        Ok(())
    }
}

impl Validate for Parameter {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidName);
        }
        if self.location.known().is_none() {
            return Err(Error::InvalidLocation(self.location.to_string()));
        }
        if self.schema.is_some() && self.content.is_some() {
            return Err(Error::ConflictingSchemaAndContent {
                name: self.name.clone(),
            });
        }
        if let Some(schema) = &self.schema {
            schema
                .validate()
                .map_err(|e| Error::schema_validation(&self.name, e))?;
        }
        if let Some(content) = &self.content {
            content
                .validate()
                .map_err(|e| Error::content_validation(&self.name, e))?;
        }
        Ok(())
    }
}
