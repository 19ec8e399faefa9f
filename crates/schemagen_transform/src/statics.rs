//! Class-level statics copied into the schema envelope.

use schemagen_foundation::{Literal, ObjectSchema};
use schemagen_syntax::{Expr, PropertyDecl, PropertyKey};

/// Copies a recognized static into `schema`.
///
/// `name` and `primaryKey` take string literals; `embedded` and
/// `asymmetric` take boolean literals. Any other static, or a recognized
/// one with a value of the wrong shape, is ignored and `false` returned.
pub fn apply_static(decl: &PropertyDecl, schema: &mut ObjectSchema) -> bool {
    let PropertyKey::Ident(key) = &decl.key else {
        return false;
    };
    let Some(value) = decl.initializer.as_ref().and_then(Expr::as_literal) else {
        return false;
    };
    match (key.name.as_str(), value) {
        ("name", Literal::String { value, .. }) => schema.name.clone_from(value),
        ("primaryKey", Literal::String { value, .. }) => schema.primary_key = Some(value.clone()),
        ("embedded", Literal::Bool(flag)) => schema.embedded = Some(*flag),
        ("asymmetric", Literal::Bool(flag)) => schema.asymmetric = Some(*flag),
        _ => return false,
    }
    true
}
