//! Error types for the schemagen system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Usage hint appended to every back-reference diagnostic.
pub const LINKING_OBJECTS_USAGE: &str =
    "Correct syntax is: `fieldName: Realm.LinkingObjects<LinkedObjectType, \"invertedPropertyName\">`";

/// The main error type for schemagen operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a back-reference arity error.
    #[must_use]
    pub fn linking_objects_arity(
        class: impl Into<String>,
        property: impl Into<String>,
        found: usize,
    ) -> Self {
        Self::new(ErrorKind::LinkingObjectsArity {
            class: class.into(),
            property: property.into(),
            found,
        })
    }

    /// Creates a back-reference optionality error.
    #[must_use]
    pub fn linking_objects_optional(class: impl Into<String>, property: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkingObjectsOptional {
            class: class.into(),
            property: property.into(),
        })
    }

    /// Creates a back-reference argument error.
    #[must_use]
    pub fn linking_objects_argument(
        class: impl Into<String>,
        property: impl Into<String>,
        argument: LinkingObjectsArgument,
    ) -> Self {
        Self::new(ErrorKind::LinkingObjectsArgumentType {
            class: class.into(),
            property: property.into(),
            argument,
        })
    }

    /// Creates a duplicate `schema` static error.
    #[must_use]
    pub fn duplicate_schema(class: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateSchemaStatic {
            class: class.into(),
        })
    }

    /// Returns true if this error was raised by the transform itself
    /// rather than by parsing, I/O, or serialization.
    #[must_use]
    pub const fn is_transform_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::LinkingObjectsArity { .. }
                | ErrorKind::LinkingObjectsOptional { .. }
                | ErrorKind::LinkingObjectsArgumentType { .. }
                | ErrorKind::DuplicateSchemaStatic { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A back-reference type received the wrong number of type arguments.
    #[error(
        "Incorrect number of type arguments for LinkingObjects on '{class}.{property}' (expected 2, got {found}). {usage}",
        usage = LINKING_OBJECTS_USAGE
    )]
    LinkingObjectsArity {
        /// The declaring class.
        class: String,
        /// The offending property.
        property: String,
        /// Number of type arguments supplied.
        found: usize,
    },

    /// A back-reference property was declared optional.
    #[error(
        "Properties of type LinkingObjects cannot be optional ('{class}.{property}'). {usage}",
        usage = LINKING_OBJECTS_USAGE
    )]
    LinkingObjectsOptional {
        /// The declaring class.
        class: String,
        /// The offending property.
        property: String,
    },

    /// A back-reference type argument had the wrong shape.
    #[error("{argument} ('{class}.{property}'). {usage}", usage = LINKING_OBJECTS_USAGE)]
    LinkingObjectsArgumentType {
        /// The declaring class.
        class: String,
        /// The offending property.
        property: String,
        /// Which argument was malformed.
        argument: LinkingObjectsArgument,
    },

    /// The class already declares a `schema` static.
    #[error(
        "Class '{class}' already declares a static 'schema' member, which conflicts with the generated schema"
    )]
    DuplicateSchemaStatic {
        /// The offending class.
        class: String,
    },

    /// Parse error in the source file.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// File could not be read or written.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Schema could not be serialized.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The malformed argument of a back-reference type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkingObjectsArgument {
    /// The first argument is not a reference to a named object type.
    ObjectType,
    /// The second argument is not a string literal type.
    PropertyName,
}

impl fmt::Display for LinkingObjectsArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectType => write!(
                f,
                "First type argument for LinkingObjects should be a reference to the linked object's object type"
            ),
            Self::PropertyName => write!(
                f,
                "Second type argument for LinkingObjects should be the property name of the relationship it inverts"
            ),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}
