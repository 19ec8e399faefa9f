//! Core types for schemagen.
//!
//! This crate provides:
//! - [`PropertyType`] / [`TypeDescriptor`] - Canonical property types
//! - [`ObjectSchema`] / [`SchemaProperty`] - The emitted schema model
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod types;

pub use error::{Error, ErrorContext, ErrorKind, LINKING_OBJECTS_USAGE, LinkingObjectsArgument, Result};
pub use schema::{DefaultValue, Literal, ObjectSchema, Properties, SchemaProperty};
pub use types::{PropertyType, TypeDescriptor};
