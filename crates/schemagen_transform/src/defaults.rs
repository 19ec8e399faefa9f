//! Initializer handling: type inference and default values.

use schemagen_foundation::{DefaultValue, Literal, PropertyType, TypeDescriptor};
use schemagen_syntax::{Expr, Span};

use crate::symbols::Resolver;

/// Infers a property type from its initializer.
///
/// Only used when the property has no type annotation. Recognizes boolean,
/// string and numeric literals, and `new` expressions of the BSON classes,
/// `Date`, and byte buffers with at most one argument.
#[must_use]
pub fn infer_type(resolver: &Resolver<'_>, initializer: &Expr) -> Option<TypeDescriptor> {
    let kind = match initializer {
        Expr::Literal(Literal::Bool(_), _) => PropertyType::Bool,
        Expr::Literal(Literal::String { .. }, _) => PropertyType::String,
        Expr::Literal(Literal::Number { .. }, _) => PropertyType::Double,
        Expr::New { callee, args, .. } if args.len() <= 1 => constructed_kind(resolver, callee)?,
        _ => return None,
    };
    Some(TypeDescriptor::scalar(kind))
}

fn constructed_kind(resolver: &Resolver<'_>, callee: &Expr) -> Option<PropertyType> {
    if let Some(alias) = resolver.alias_of_expr(callee) {
        return alias.is_constructible().then(|| alias.kind());
    }
    let path = callee.path()?;
    let segments: Vec<&str> = path.iter().map(|ident| ident.name.as_str()).collect();
    match resolver.global(&segments)? {
        "Date" => Some(PropertyType::Date),
        "ArrayBuffer" => Some(PropertyType::Data),
        _ => None,
    }
}

/// Computes the default value an initializer contributes.
///
/// Literals are embedded as written. Any other expression becomes a
/// producer re-evaluated for every new object.
#[must_use]
pub fn default_value(source: &str, initializer: &Expr) -> DefaultValue {
    match initializer {
        Expr::Literal(literal, _) => DefaultValue::Literal(literal.clone()),
        other => DefaultValue::Producer {
            source: other.span().text(source).to_string(),
        },
    }
}

/// The span to delete when an initializer moves into the schema.
///
/// Runs from the whitespace before `=` through the end of the expression,
/// so `createdAt: Date = new Date();` becomes `createdAt: Date;`.
#[must_use]
pub fn initializer_removal(source: &str, eq: Span, initializer: &Expr) -> Span {
    let start = source
        .get(..eq.start)
        .map_or(eq.start, |before| before.trim_end().len());
    Span {
        start,
        end: initializer.span().end,
        ..eq
    }
}
