//! Error handling for the paramcheck library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Validation failures and
//! loading failures share the same type so callers only ever check one
//! `Result`.
//!
//! # Examples
//!
//! ```
//! use paramcheck_core::error::{Error, Result};
//! use paramcheck_core::{Parameter, Validate};
//!
//! fn check(param: &Parameter) -> Result<()> {
//!     param.validate()
//! }
//!
//! let mut param = Parameter::query("");
//! assert!(matches!(check(&param), Err(Error::InvalidName)));
//! param.name = "limit".to_string();
//! assert!(check(&param).is_ok());
//! ```

use thiserror::Error;

/// Result type for paramcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for paramcheck operations
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter name is empty
    #[error("parameter name can't be blank")]
    InvalidName,

    /// Parameter location is not one of path, query, header or cookie
    #[error("parameter can't have 'in' value '{0}'")]
    InvalidLocation(String),

    /// Both `schema` and `content` are set on one parameter
    #[error("parameter '{name}' cannot contain both schema and content")]
    ConflictingSchemaAndContent { name: String },

    /// The parameter's schema failed validation
    #[error("parameter '{name}' schema is invalid: {source}")]
    SchemaValidation {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// The parameter's content failed validation
    #[error("parameter '{name}' content is invalid: {source}")]
    ContentValidation {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A media type entry inside `content` failed validation
    #[error("media type '{media_type}' is invalid: {source}")]
    MediaTypeValidation {
        media_type: String,
        #[source]
        source: Box<Error>,
    },

    /// Two resolved parameters in one collection share location and name
    #[error("more than one '{location}' parameter has name '{name}'")]
    DuplicateParameter { location: String, name: String },

    /// A `$ref` could not be resolved
    #[error("reference error: {0}")]
    ReferenceResolution(String),

    /// Structural schema error
    #[error("schema error: {0}")]
    Schema(String),

    /// Structural content error
    #[error("content error: {0}")]
    Content(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Loading error (unreadable document, failed fetch)
    #[error("load error: {0}")]
    Load(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new load error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new reference resolution error
    pub fn reference<S: Into<String>>(msg: S) -> Self {
        Self::ReferenceResolution(msg.into())
    }

    /// Create a new schema error
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new content error
    pub fn content<S: Into<String>>(msg: S) -> Self {
        Self::Content(msg.into())
    }

    /// Wrap a nested schema failure with the owning parameter's name
    pub(crate) fn schema_validation(name: &str, source: Error) -> Self {
        Self::SchemaValidation {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a nested content failure with the owning parameter's name
    pub(crate) fn content_validation(name: &str, source: Error) -> Self {
        Self::ContentValidation {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a nested media type failure with its `content` key
    pub(crate) fn media_type_validation(media_type: &str, source: Error) -> Self {
        Self::MediaTypeValidation {
            media_type: media_type.to_string(),
            source: Box::new(source),
        }
    }

    /// Whether this error came from validating a document rather than
    /// reading or parsing it.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Io(_)
                | Self::Yaml(_)
                | Self::Json(_)
                | Self::Toml(_)
                | Self::Load(_)
                | Self::Config(_)
        )
    }
}
