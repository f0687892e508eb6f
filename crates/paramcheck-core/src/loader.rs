//! Loading parameter declarations from JSON or YAML.
//!
//! A parameter file may hold a single parameter object, a list of
//! parameters, or an object with a `parameters` list next to the
//! `components` its `$ref`s point into.
//!
//! # Examples
//!
//! ```no_run
//! use paramcheck_core::loader::ParameterSet;
//! use paramcheck_core::error::Result;
//! use paramcheck_core::Validate;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let mut set = ParameterSet::from_file("parameters.yaml").await?;
//! set.resolve_refs()?;
//! set.parameters().validate()?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;
use std::str::FromStr;

use crate::openapi::{JsonPointerResolver, ParameterRef, Parameters};
use crate::Error;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// Parameters read from one document, plus the document itself for
/// resolving `$ref` pointers.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    document: JsonValue,
    parameters: Parameters,
}

impl ParameterSet {
    /// Load from a file path or an `http(s)` URL
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        match Url::parse(location) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Self::from_url(url.as_str()).await
            }
            _ => Self::from_file(location).await,
        }
    }

    /// Load from a file (JSON or YAML)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading parameters from file: {}", path.display());
        let content = fs::read_to_string(path).await?;
        content.parse::<Self>().map_err(|e| {
            Error::load(format!(
                "Failed to parse parameters at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load from a URL (JSON or YAML)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        log::debug!("Fetching parameters from: {}", url);
        let response = reqwest::get(url)
            .await
            .map_err(|e| Error::load(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::load(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| Error::load(format!("Failed to read response from {}: {}", url, e)))?;

        content
            .parse::<Self>()
            .map_err(|e| Error::load(format!("Failed to parse parameters from {}: {}", url, e)))
    }

    /// Build from an already parsed document
    pub fn from_document(document: JsonValue) -> crate::Result<Self> {
        let parameters: Parameters = match &document {
            JsonValue::Array(_) => serde_json::from_value(document.clone())?,
            JsonValue::Object(map) => match map.get("parameters") {
                Some(list) if list.is_array() => serde_json::from_value(list.clone())?,
                Some(_) => return Err(Error::load("'parameters' must be a list")),
                None => {
                    let single: ParameterRef = serde_json::from_value(document.clone())?;
                    std::iter::once(single).collect()
                }
            },
            _ => {
                return Err(Error::load(
                    "expected a parameter object or a list of parameters",
                ))
            }
        };
        log::debug!("Loaded {} parameter(s)", parameters.len());
        Ok(Self {
            document,
            parameters,
        })
    }

    /// Parse content as either JSON or YAML
    fn parse_content(content: &str) -> crate::Result<JsonValue> {
        // Try to parse as JSON first
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(json);
        }

        // If JSON parsing fails, try YAML
        if let Ok(json) = serde_yaml::from_str(content) {
            return Ok(json);
        }

        Err(Error::load("content is neither valid JSON nor YAML"))
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Materialize every `$ref` in the collection against this document
    pub fn resolve_refs(&mut self) -> crate::Result<()> {
        let resolver = JsonPointerResolver::new(&self.document);
        self.parameters.resolve_refs(&resolver)
    }
}

impl FromStr for ParameterSet {
    type Err = Error;

    fn from_str(content: &str) -> crate::Result<Self> {
        Self::from_document(Self::parse_content(content)?)
    }
}
