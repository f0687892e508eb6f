//! Ordered parameter collections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Location, Parameter, ParameterLocation, Ref, ReferenceResolver, Validate};
use crate::{Error, Result};

/// A parameter that may be inline or behind a `$ref`.
pub type ParameterRef = Ref<Parameter>;

/// The parameters of one operation, path item, or components bucket.
///
/// Order is preserved as read. It decides which member is reported when
/// validation fails and which member [`Parameters::lookup`] returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Vec<ParameterRef>);

impl Parameters {
    pub fn new() -> Self {
        Self(Vec::with_capacity(4))
    }

    pub fn push(&mut self, item: impl Into<ParameterRef>) {
        self.0.push(item.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterRef> {
        self.0.iter()
    }

    /// Resolved members, skipping pointers that have not been materialized.
    pub fn resolved(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter().filter_map(Ref::as_value)
    }

    /// First resolved parameter with exactly this location and name.
    pub fn lookup(&self, location: ParameterLocation, name: &str) -> Option<&Parameter> {
        self.resolved()
            .find(|p| p.location == location && p.name == name)
    }

    /// Materialize every `$ref` member, then the schema refs inside each
    /// member. Stops at the first pointer that cannot be resolved.
    pub fn resolve_refs<R>(&mut self, resolver: &R) -> Result<()>
    where
        R: ReferenceResolver + ?Sized,
    {
        for item in &mut self.0 {
            item.resolve_with(|r| resolver.resolve_parameter(r))?;
            if let Some(param) = item.as_value_mut() {
                param.resolve_refs(resolver)?;
            }
        }
        Ok(())
    }
}

impl Validate for Parameters {
    /// Validates members in order, then rejects a repeated `(in, name)`
    /// pair among resolved members. The first failure is returned.
    fn validate(&self) -> Result<()> {
        let mut seen: HashSet<(&Location, &str)> = HashSet::new();
        for item in &self.0 {
            item.validate()?;
            if let Some(param) = item.as_value() {
                if !seen.insert((&param.location, param.name.as_str())) {
                    return Err(Error::DuplicateParameter {
                        location: param.location.to_string(),
                        name: param.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a ParameterRef;
    type IntoIter = std::slice::Iter<'a, ParameterRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Parameters {
    type Item = ParameterRef;
    type IntoIter = std::vec::IntoIter<ParameterRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<ParameterRef> for Parameters {
    fn from_iter<I: IntoIterator<Item = ParameterRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self(iter.into_iter().map(Ref::value).collect())
    }
}

impl From<Vec<ParameterRef>> for Parameters {
    fn from(items: Vec<ParameterRef>) -> Self {
        Self(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{JsonPointerResolver, Schema};
    use serde_json::json;

    #[test]
    fn test_empty_collection() {
        let params = Parameters::new();
        assert!(params.is_empty());
        assert!(params.lookup(ParameterLocation::Query, "id").is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_lookup_skips_unresolved() {
        let mut params = Parameters::new();
        params.push(ParameterRef::reference("#/components/parameters/id"));
        params.push(Parameter::query("id"));

        let found = params.lookup(ParameterLocation::Query, "id").unwrap();
        assert_eq!(found, &Parameter::query("id"));
        assert!(params.lookup(ParameterLocation::Path, "id").is_none());
        assert!(params.lookup(ParameterLocation::Query, "ID").is_none());
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let mut first = Parameter::header("X-Trace");
        first.with_description("first");
        let mut second = Parameter::header("X-Trace");
        second.with_description("second");
        let params: Parameters = vec![first, second].into_iter().collect();

        let found = params.lookup(ParameterLocation::Header, "X-Trace").unwrap();
        assert_eq!(found.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_duplicate_in_same_location() {
        let params: Parameters = vec![
            Parameter::query("id"),
            Parameter::header("id"),
            Parameter::query("id"),
        ]
        .into_iter()
        .collect();
        match params.validate() {
            Err(Error::DuplicateParameter { location, name }) => {
                assert_eq!(location, "query");
                assert_eq!(name, "id");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_same_name_in_different_locations() {
        let params: Parameters = vec![Parameter::query("id"), Parameter::path("id")]
            .into_iter()
            .collect();
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_first_error_in_sequence_wins() {
        let mut bad_schema = Parameter::query("tags");
        bad_schema.with_schema(Some(Schema::new(json!({"type": "array"}))));
        let params: Parameters = vec![
            Parameter::query(""),
            bad_schema,
            Parameter::query("x"),
            Parameter::query("x"),
        ]
        .into_iter()
        .collect();
        assert!(matches!(params.validate(), Err(Error::InvalidName)));
    }

    #[test]
    fn test_duplicate_reported_before_later_member_error() {
        let params: Parameters = vec![
            Parameter::cookie("session"),
            Parameter::cookie("session"),
            Parameter::query(""),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            params.validate(),
            Err(Error::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_unresolved_member_fails_validation() {
        let mut params = Parameters::new();
        params.push(Parameter::query("id"));
        params.push(ParameterRef::reference("#/components/parameters/limit"));
        assert!(matches!(
            params.validate(),
            Err(Error::ReferenceResolution(_))
        ));
    }

    #[test]
    fn test_resolve_refs_then_validate() {
        let doc = json!({
            "components": {
                "parameters": {
                    "limit": {"name": "limit", "in": "query", "schema": {"$ref": "#/components/schemas/Limit"}},
                    "id": {"name": "id", "in": "path", "required": true}
                },
                "schemas": {"Limit": {"type": "integer", "maximum": 100}}
            }
        });
        let mut params: Parameters = serde_json::from_value(json!([
            {"$ref": "#/components/parameters/id"},
            {"$ref": "#/components/parameters/limit"},
            {"name": "q", "in": "query"}
        ]))
        .unwrap();
        assert!(params.lookup(ParameterLocation::Query, "limit").is_none());

        params.resolve_refs(&JsonPointerResolver::new(&doc)).unwrap();
        assert!(params.validate().is_ok());
        assert!(params.lookup(ParameterLocation::Path, "id").unwrap().required);
        assert!(params
            .lookup(ParameterLocation::Query, "limit")
            .and_then(Parameter::schema_value)
            .is_some());
    }

    #[test]
    fn test_resolved_refs_count_toward_duplicates() {
        let doc = json!({
            "components": {"parameters": {"id": {"name": "id", "in": "query"}}}
        });
        let mut params = Parameters::new();
        params.push(Parameter::query("id"));
        params.push(ParameterRef::reference("#/components/parameters/id"));

        params.resolve_refs(&JsonPointerResolver::new(&doc)).unwrap();
        assert!(matches!(
            params.validate(),
            Err(Error::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_serializes_as_list() {
        let mut params = Parameters::new();
        params.push(Parameter::path("id"));
        params.push(ParameterRef::reference("#/components/parameters/limit"));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!([
                {"name": "id", "in": "path", "required": true},
                {"$ref": "#/components/parameters/limit"}
            ])
        );
    }
}
