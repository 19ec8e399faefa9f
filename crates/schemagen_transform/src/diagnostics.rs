//! Non-fatal diagnostics collected during a transform.

use std::fmt;

use schemagen_syntax::Span;

/// A warning about one property of a model class.
///
/// The property is left out of the schema; the rest of the file is still
/// transformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The declaring class.
    pub class: String,
    /// The offending property.
    pub property: String,
    /// Human-readable message.
    pub message: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl Diagnostic {
    /// Warning for a property whose type could not be determined.
    #[must_use]
    pub fn unresolved_type(class: &str, property: &str, span: Span) -> Self {
        Self {
            class: class.to_string(),
            property: property.to_string(),
            message: format!("Unable to determine type of '{property}' property"),
            line: span.line,
            column: span.column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}
