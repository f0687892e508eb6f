//! OpenAPI parameter model and its nested sub-models.
//!
//! [`Parameter`] and [`Parameters`] are the entry points. Schema, content,
//! example and reference types are the collaborators a parameter delegates
//! to during validation.

mod content;
mod example;
mod extensions;
mod location;
mod parameter;
mod parameters;
mod reference;
mod schema;

pub use content::{Content, MediaType};
pub use example::{Example, ExampleRef};
pub use extensions::Extensions;
pub use location::{Location, ParameterLocation};
pub use parameter::Parameter;
pub use parameters::{ParameterRef, Parameters};
pub use reference::{JsonPointerResolver, Ref, ReferenceResolver};
pub use schema::{Schema, SchemaRef, SchemaType};

/// Structural validation shared by every model type.
///
/// Implementations are pure: they only read the value and return the first
/// error found.
pub trait Validate {
    fn validate(&self) -> crate::Result<()>;
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
