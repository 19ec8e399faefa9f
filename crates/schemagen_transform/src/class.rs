//! Model class detection and schema assembly.
//!
//! A model class directly extends the base entity class of a recognized
//! module. For each one the orchestrator runs the property and static
//! visitors, assembles an [`ObjectSchema`], and appends it to the class
//! body as `static schema = { ... };`.

use schemagen_foundation::{Error, ErrorContext, ObjectSchema, Result};
use schemagen_syntax::{ClassDecl, ClassMember, PropertyKey, Span};
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::emit::{EmitConfig, render_static};
use crate::patch::PatchList;
use crate::property::{PropertyOutcome, PropertyVisitor};
use crate::statics::apply_static;
use crate::symbols::Resolver;

/// Name of the generated static member.
pub const SCHEMA_STATIC: &str = "schema";

/// The result of transforming one model class.
#[derive(Debug)]
pub struct ClassTransform {
    /// The extracted schema.
    pub schema: ObjectSchema,
    /// Edits rewriting the class.
    pub patches: PatchList,
    /// Properties left out of the schema.
    pub warnings: Vec<Diagnostic>,
}

/// Returns true if `class` directly extends the base entity class.
#[must_use]
pub fn is_model_class(resolver: &Resolver<'_>, class: &ClassDecl) -> bool {
    class
        .super_class
        .as_ref()
        .is_some_and(|super_class| resolver.is_base_class(super_class))
}

/// Transforms one class declaration.
///
/// Returns `Ok(None)` for classes that are not models, and for anonymous
/// models that do not name themselves with a `static name`.
///
/// # Errors
///
/// Returns an error if the class already declares a static `schema`, or a
/// property has a malformed `LinkingObjects` type.
pub fn transform_class(
    source: &str,
    resolver: &Resolver<'_>,
    class: &ClassDecl,
) -> Result<Option<ClassTransform>> {
    if !is_model_class(resolver, class) {
        return Ok(None);
    }
    let class_name = class.name();
    debug!(class = %class_name, line = class.span.line, "found model class");

    if let Some(span) = existing_schema(class) {
        return Err(Error::duplicate_schema(class_name)
            .with_context(ErrorContext::new().with_position(span.line, span.column)));
    }

    let mut schema = ObjectSchema::new(class_name);
    let mut patches = PatchList::new();
    let mut warnings = Vec::new();
    let visitor = PropertyVisitor::new(source, resolver, class_name);

    for decl in class.properties() {
        if decl.is_static {
            if !apply_static(decl, &mut schema) {
                debug!(class = %class_name, "ignoring unrecognized static");
            }
            continue;
        }
        match visitor.visit(decl)? {
            PropertyOutcome::Resolved {
                name,
                property,
                patches: mut property_patches,
            } => {
                schema.properties.insert(name, property);
                patches.append(&mut property_patches);
            }
            PropertyOutcome::Unresolved(diagnostic) => warnings.push(diagnostic),
            PropertyOutcome::Skipped => {}
        }
    }

    if schema.name.is_empty() {
        debug!(line = class.span.line, "skipping anonymous model class");
        return Ok(None);
    }

    insert_schema(source, class, &schema, resolver, &mut patches);
    debug!(
        class = %class_name,
        properties = schema.properties.len(),
        warnings = warnings.len(),
        "extracted schema"
    );

    Ok(Some(ClassTransform {
        schema,
        patches,
        warnings,
    }))
}

/// The span of a static member already named `schema`, if any.
fn existing_schema(class: &ClassDecl) -> Option<Span> {
    class.members.iter().find_map(|member| {
        let (key, is_static, span) = match member {
            ClassMember::Property(prop) => (&prop.key, prop.is_static, prop.span),
            ClassMember::Method(method) => (&method.key, method.is_static, method.span),
            ClassMember::StaticBlock(_) | ClassMember::IndexSignature(_) => return None,
        };
        let named_schema = match key {
            PropertyKey::Ident(ident) => ident.name == SCHEMA_STATIC,
            PropertyKey::String { value, .. } => value == SCHEMA_STATIC,
            _ => false,
        };
        (is_static && named_schema).then_some(span)
    })
}

/// Appends the rendered schema as the last member of the class body.
fn insert_schema(
    source: &str,
    class: &ClassDecl,
    schema: &ObjectSchema,
    resolver: &Resolver<'_>,
    patches: &mut PatchList,
) {
    let config = resolver.config();
    let close = class.body.end.saturating_sub(1);
    let anchor = source
        .get(..close)
        .map_or(close, |before| before.trim_end().len());

    let class_indent = line_indent(source, class.span.start);
    let member_indent = class
        .members
        .first()
        .and_then(|member| own_line_indent(source, member.span().start))
        .unwrap_or_else(|| format!("{class_indent}{}", config.indent));

    let emit = EmitConfig {
        indent: config.indent.clone(),
        base_indent: member_indent.clone(),
        multi_line: config.multi_line,
    };

    let mut text = String::new();
    if needs_terminator(source, class, anchor) {
        text.push(';');
    }
    text.push('\n');
    text.push_str(&member_indent);
    text.push_str(&render_static(schema, &emit));

    let gap = source.get(anchor..close).unwrap_or("");
    if !gap.contains('\n') {
        patches.remove(Span {
            start: anchor,
            end: close,
            ..class.body
        });
        text.push('\n');
        text.push_str(&class_indent);
    }
    patches.insert(anchor, text);
}

/// True when the last member is a field without `;` ending right at `anchor`.
fn needs_terminator(source: &str, class: &ClassDecl, anchor: usize) -> bool {
    match class.members.last() {
        Some(ClassMember::Property(prop)) => {
            prop.span.end == anchor && !prop.span.text(source).ends_with(';')
        }
        _ => false,
    }
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = line_start(source, offset);
    source
        .get(line_start..)
        .unwrap_or("")
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// The text before `offset` on its line, if it is only whitespace.
fn own_line_indent(source: &str, offset: usize) -> Option<String> {
    let prefix = source.get(line_start(source, offset)..offset)?;
    prefix
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then(|| prefix.to_string())
}

fn line_start(source: &str, offset: usize) -> usize {
    source
        .get(..offset)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |newline| newline + 1)
}
