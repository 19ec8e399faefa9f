//! Instance property handling.
//!
//! Each instance property of a model class becomes one schema property:
//! its type comes from the annotation (or the initializer when there is
//! none), its default from the initializer, and `indexed` / `mapTo` from
//! decorators. Recognized decorators and non-literal initializers are
//! removed from the class body since the schema now carries them.

use schemagen_foundation::{Literal, Result, SchemaProperty, TypeDescriptor};
use schemagen_syntax::{Decorator, Expr, PropertyDecl, PropertyKey, Span};
use tracing::{debug, warn};

use crate::defaults::{default_value, infer_type, initializer_removal};
use crate::diagnostics::Diagnostic;
use crate::mapper::TypeMapper;
use crate::patch::PatchList;
use crate::symbols::Resolver;

/// What became of one property declaration.
#[derive(Debug)]
pub enum PropertyOutcome {
    /// The property belongs in the schema.
    Resolved {
        /// Schema key.
        name: String,
        /// Schema entry.
        property: SchemaProperty,
        /// Edits removing what moved into the schema.
        patches: PatchList,
    },
    /// The type could not be determined; the declaration is left as-is.
    Unresolved(Diagnostic),
    /// The property has no static name and is ignored.
    Skipped,
}

/// A decorator the transform understands.
#[derive(Debug, PartialEq, Eq)]
enum Marker<'d> {
    Indexed,
    MapTo(&'d str),
}

/// Converts the instance properties of one class.
pub struct PropertyVisitor<'r, 'a> {
    source: &'r str,
    resolver: &'r Resolver<'a>,
    class: &'r str,
}

impl<'r, 'a> PropertyVisitor<'r, 'a> {
    /// Creates a visitor for properties of `class`.
    #[must_use]
    pub fn new(source: &'r str, resolver: &'r Resolver<'a>, class: &'r str) -> Self {
        Self {
            source,
            resolver,
            class,
        }
    }

    /// Converts one instance property.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed `LinkingObjects` type.
    pub fn visit(&self, decl: &PropertyDecl) -> Result<PropertyOutcome> {
        let Some(name) = schema_key(&decl.key) else {
            debug!(class = %self.class, "skipping property without a static name");
            return Ok(PropertyOutcome::Skipped);
        };

        let Some(descriptor) = self.descriptor(name, decl)? else {
            let diagnostic = Diagnostic::unresolved_type(self.class, name, decl.key.span());
            warn!(
                class = %self.class,
                property = %name,
                line = diagnostic.line,
                "{}",
                diagnostic.message
            );
            return Ok(PropertyOutcome::Unresolved(diagnostic));
        };

        let optional = decl.optional || descriptor.optional;
        let mut property = SchemaProperty::new(descriptor.with_optional(optional));
        let mut patches = PatchList::new();

        for decorator in &decl.decorators {
            let Some(marker) = self.marker(decorator) else {
                continue;
            };
            match marker {
                Marker::Indexed => property.indexed = true,
                Marker::MapTo(column) => property.map_to = Some(column.to_string()),
            }
            patches.remove(self.decorator_removal(decorator));
        }

        if let Some(initializer) = &decl.initializer {
            let default = default_value(self.source, initializer);
            if default.is_producer() {
                if let Some(eq) = decl.eq_span {
                    patches.remove(initializer_removal(self.source, eq, initializer));
                }
            }
            property = property.with_default(default);
        }

        Ok(PropertyOutcome::Resolved {
            name: name.to_string(),
            property,
            patches,
        })
    }

    fn descriptor(&self, name: &str, decl: &PropertyDecl) -> Result<Option<TypeDescriptor>> {
        if let Some(ty) = &decl.type_annotation {
            return TypeMapper::new(self.resolver, self.class, name).map(ty, decl.optional);
        }
        Ok(decl
            .initializer
            .as_ref()
            .and_then(|initializer| infer_type(self.resolver, initializer)))
    }

    fn marker<'d>(&self, decorator: &'d Decorator) -> Option<Marker<'d>> {
        let config = self.resolver.config();
        match &decorator.expr {
            Expr::Ident(ident) if ident.name == config.index_decorator => Some(Marker::Indexed),
            Expr::Call { callee, args, .. } => {
                let callee = callee.as_ident()?;
                if callee.name != config.map_to_decorator {
                    return None;
                }
                match args.as_slice() {
                    [Expr::Literal(Literal::String { value, .. }, _)] => Some(Marker::MapTo(value)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    // The decorator and the whitespace separating it from what follows.
    fn decorator_removal(&self, decorator: &Decorator) -> Span {
        let rest = self.source.get(decorator.span.end..).unwrap_or("");
        let gap = rest.len() - rest.trim_start().len();
        Span {
            end: decorator.span.end + gap,
            ..decorator.span
        }
    }
}

/// The schema key of a property, if it has one.
///
/// Identifier and string keys qualify; numeric, private and computed keys
/// do not.
#[must_use]
pub fn schema_key(key: &PropertyKey) -> Option<&str> {
    match key {
        PropertyKey::Ident(ident) => Some(&ident.name),
        PropertyKey::String { value, .. } => Some(value),
        PropertyKey::Number { .. } | PropertyKey::Private(_) | PropertyKey::Computed(_) => None,
    }
}
