//! Schema extraction for TypeScript model classes.
//!
//! This crate provides:
//! - [`transform`] - Extract schemas and compute source edits for one file
//! - [`TransformConfig`] - Recognized module, base class, and decorators
//! - [`Resolver`] - Import-aware name resolution
//! - [`TypeMapper`] - Type annotation to property type mapping
//! - [`PatchList`] - Ordered source edits, applied onto the original text
//!
//! # Example
//!
//! ```
//! use schemagen_transform::{TransformConfig, transform};
//!
//! let source = r#"import Realm from "realm";
//! class Dog extends Realm.Object {
//!   name!: string;
//! }
//! "#;
//! let output = transform(source, &TransformConfig::default()).unwrap();
//! assert_eq!(output.schemas[0].name, "Dog");
//! assert!(output.apply(source).unwrap().contains("static schema = {"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aliases;
pub mod class;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod emit;
pub mod mapper;
pub mod patch;
pub mod property;
pub mod statics;
pub mod symbols;

pub use aliases::Alias;
pub use class::{ClassTransform, is_model_class, transform_class};
pub use config::TransformConfig;
pub use diagnostics::Diagnostic;
pub use emit::{EmitConfig, render_schema, render_schema_with_config};
pub use mapper::TypeMapper;
pub use patch::{Patch, PatchList};
pub use property::{PropertyOutcome, PropertyVisitor};
pub use symbols::{Binding, Imported, Resolver, SymbolTable};

use schemagen_foundation::{ObjectSchema, Result};
use schemagen_syntax::{Module, parse_module};
use tracing::debug;

/// Everything a transform pass produced for one file.
#[derive(Debug, Default)]
pub struct TransformOutput {
    /// Schemas of the model classes, in source order.
    pub schemas: Vec<ObjectSchema>,
    /// Edits rewriting the file.
    pub patches: PatchList,
    /// Properties that were left out of their schema.
    pub warnings: Vec<Diagnostic>,
}

impl TransformOutput {
    /// Renders the transformed source.
    ///
    /// # Errors
    ///
    /// Returns an error if the patches do not fit `source`.
    pub fn apply(&self, source: &str) -> Result<String> {
        self.patches.apply(source)
    }

    /// Returns true if the file contained no model classes.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.patches.is_empty()
    }
}

/// Parses and transforms one source file.
///
/// # Errors
///
/// Returns an error if the source does not parse, or a model class is
/// invalid (malformed `LinkingObjects` type, existing `static schema`).
pub fn transform(source: &str, config: &TransformConfig) -> Result<TransformOutput> {
    let module = parse_module(source)?;
    transform_module(source, &module, config)
}

/// Transforms an already parsed module.
///
/// # Errors
///
/// Returns an error if a model class is invalid.
pub fn transform_module(
    source: &str,
    module: &Module,
    config: &TransformConfig,
) -> Result<TransformOutput> {
    let resolver = Resolver::for_module(module, config);
    let mut output = TransformOutput::default();
    for class in module.classes() {
        let Some(mut result) = transform_class(source, &resolver, class)? else {
            continue;
        };
        output.patches.append(&mut result.patches);
        output.warnings.append(&mut result.warnings);
        output.schemas.push(result.schema);
    }
    debug!(
        schemas = output.schemas.len(),
        warnings = output.warnings.len(),
        "transform complete"
    );
    Ok(output)
}

/// Transforms one source file and renders the result.
///
/// # Errors
///
/// Returns an error under the same conditions as [`transform`].
pub fn transform_source(source: &str, config: &TransformConfig) -> Result<String> {
    transform(source, config)?.apply(source)
}
