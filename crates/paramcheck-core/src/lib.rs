//! paramcheck Core Library
//!
//! This library models OpenAPI parameter declarations and validates the
//! structural rules a specification author must satisfy: legal locations,
//! no schema/content ambiguity, and unique `(in, name)` pairs per
//! collection.

pub mod config;
pub mod error;
pub mod loader;
pub mod openapi;

pub use crate::{
    config::{Config, OutputFormat},
    error::{Error, Result},
    loader::ParameterSet,
    openapi::{
        Content, Location, MediaType, Parameter, ParameterLocation, ParameterRef, Parameters,
        Ref, ReferenceResolver, Schema, SchemaRef, Validate,
    },
};
