//! The schema model produced by the transform.
//!
//! An [`ObjectSchema`] is the declarative description of one persistent
//! entity. Its shape is the contract consumed by the storage engine's
//! schema registration, so field names and ordering are fixed here.

use std::fmt;

#[cfg(feature = "serde")]
use serde::ser::{SerializeMap, Serializer};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::types::{PropertyType, TypeDescriptor};

/// A literal value copied verbatim from source.
///
/// Keeps the original spelling (`raw`) so emitted code reproduces the
/// author's formatting exactly.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// `true` or `false`.
    Bool(bool),
    /// Numeric literal like `42`, `-1.5`, or `0x10`.
    Number {
        /// Parsed value.
        value: f64,
        /// Source spelling.
        raw: String,
    },
    /// String literal like `"abc"` or `'abc'`.
    String {
        /// Unescaped value.
        value: String,
        /// Source spelling, including quotes.
        raw: String,
    },
    /// `null`.
    Null,
    /// Template literal without substitutions, like `` `abc` ``.
    Template {
        /// Text between the backticks.
        value: String,
        /// Source spelling, including backticks.
        raw: String,
    },
}

impl Literal {
    /// Creates a number literal whose spelling is derived from the value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Creates a double-quoted string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = format!("{value:?}");
        Self::String { value, raw }
    }

    /// Returns the literal as it should appear in emitted source.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Bool(true) => "true",
            Self::Bool(false) => "false",
            Self::Null => "null",
            Self::Number { raw, .. } | Self::String { raw, .. } | Self::Template { raw, .. } => raw,
        }
    }

    /// Returns the integral value of a number literal, if it has one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number { value, .. }
                if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 =>
            {
                Some(*value as i64)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

/// The default value of a schema property.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    /// A literal embedded as-is.
    Literal(Literal),
    /// A non-literal expression, re-evaluated for every new object.
    Producer {
        /// Source text of the expression.
        source: String,
    },
}

impl DefaultValue {
    /// Returns true if this default is a deferred producer.
    #[must_use]
    pub const fn is_producer(&self) -> bool {
        matches!(self, Self::Producer { .. })
    }
}

/// One property of an [`ObjectSchema`].
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaProperty {
    /// Resolved type, including merged optionality.
    pub descriptor: TypeDescriptor,
    /// Default value, if the declaration has an initializer.
    pub default: Option<DefaultValue>,
    /// Whether the property is indexed.
    pub indexed: bool,
    /// Name of the underlying column, if renamed.
    pub map_to: Option<String>,
}

impl SchemaProperty {
    /// Creates a property with no default, index, or mapping.
    #[must_use]
    pub const fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            default: None,
            indexed: false,
            map_to: None,
        }
    }

    /// The storage kind.
    #[must_use]
    pub const fn kind(&self) -> PropertyType {
        self.descriptor.kind()
    }

    /// Whether the value may be absent.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.descriptor.optional
    }

    /// Builder method to set the default.
    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Builder method to mark the property as indexed.
    #[must_use]
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Builder method to set the mapped name.
    #[must_use]
    pub fn with_map_to(mut self, name: impl Into<String>) -> Self {
        self.map_to = Some(name.into());
        self
    }
}

/// Schema properties in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(Vec<(String, SchemaProperty)>);

impl Properties {
    /// Creates an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property, keeping declaration order.
    ///
    /// A later declaration with the same name replaces the earlier one in
    /// place, matching object-literal semantics.
    pub fn insert(&mut self, name: impl Into<String>, property: SchemaProperty) {
        let name = name.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = property;
        } else {
            self.0.push((name, property));
        }
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaProperty> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Returns true if a property with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, property)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaProperty)> {
        self.0.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The schema of one persistent entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ObjectSchema {
    /// Entity name.
    pub name: String,
    /// Properties in declaration order.
    pub properties: Properties,
    /// Name of the primary key property.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub primary_key: Option<String>,
    /// Whether the entity is embedded in its parent.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub embedded: Option<bool>,
    /// Whether the entity is write-only (asymmetric sync).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub asymmetric: Option<bool>,
}

impl ObjectSchema {
    /// Creates an empty schema for the named entity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
            primary_key: None,
            embedded: None,
            asymmetric: None,
        }
    }

    /// Whether the entity is embedded.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.embedded.unwrap_or(false)
    }

    /// Whether the entity is asymmetric.
    #[must_use]
    pub fn is_asymmetric(&self) -> bool {
        self.asymmetric.unwrap_or(false)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number { value, .. } => match self.as_integer() {
                Some(n) => serializer.serialize_i64(n),
                None => serializer.serialize_f64(*value),
            },
            Self::String { value, .. } | Self::Template { value, .. } => {
                serializer.serialize_str(value)
            }
            Self::Null => serializer.serialize_unit(),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(literal) => literal.serialize(serializer),
            Self::Producer { source } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("source", source)?;
                map.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for SchemaProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1
            + usize::from(self.descriptor.object_type().is_some())
            + usize::from(self.descriptor.property().is_some())
            + usize::from(self.descriptor.optional)
            + usize::from(self.default.is_some())
            + usize::from(self.indexed)
            + usize::from(self.map_to.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", &self.descriptor.kind())?;
        if let Some(object_type) = self.descriptor.object_type() {
            map.serialize_entry("objectType", object_type)?;
        }
        if let Some(property) = self.descriptor.property() {
            map.serialize_entry("property", property)?;
        }
        if self.descriptor.optional {
            map.serialize_entry("optional", &true)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if self.indexed {
            map.serialize_entry("indexed", &true)?;
        }
        if let Some(map_to) = &self.map_to {
            map.serialize_entry("mapTo", map_to)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, property) in &self.0 {
            map.serialize_entry(name, property)?;
        }
        map.end()
    }
}
