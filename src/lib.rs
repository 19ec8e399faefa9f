//! schemagen - Compile-time schema extraction for TypeScript model classes
//!
//! This crate re-exports all layers of schemagen for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: schemagen_runtime    — CLI, file driver, serialization
//! Layer 2: schemagen_transform  — Model detection, type mapping, schema emission
//! Layer 1: schemagen_syntax     — Lexer, parser, AST for the TypeScript subset
//! Layer 0: schemagen_foundation — Core types (ObjectSchema, PropertyType, Error)
//! ```

pub use schemagen_foundation as foundation;
pub use schemagen_runtime as runtime;
pub use schemagen_syntax as syntax;
pub use schemagen_transform as transform;
