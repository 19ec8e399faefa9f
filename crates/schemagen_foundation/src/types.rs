//! Type descriptors for schema properties.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Storage kind of a schema property.
///
/// Closed set: every type expression the transform understands maps to
/// exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// 64-bit integer.
    Int,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// 128-bit decimal.
    Decimal128,
    /// BSON object id.
    ObjectId,
    /// UUID.
    Uuid,
    /// Timestamp.
    Date,
    /// Binary blob.
    Data,
    /// Ordered collection.
    List,
    /// Unordered unique collection.
    Set,
    /// String-keyed map.
    Dictionary,
    /// Any storable value.
    Mixed,
    /// Inverse relationship computed from another entity's link.
    LinkingObjects,
    /// Link to another entity.
    Link,
}

impl PropertyType {
    /// Returns the storage engine's name for this kind.
    ///
    /// Links use the engine's generic `"object"` name; the target entity
    /// lives in `objectType`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal128 => "decimal128",
            Self::ObjectId => "objectId",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::Data => "data",
            Self::List => "list",
            Self::Set => "set",
            Self::Dictionary => "dictionary",
            Self::Mixed => "mixed",
            Self::LinkingObjects => "linkingObjects",
            Self::Link => "object",
        }
    }

    /// Returns true for `list`, `set`, and `dictionary`.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Dictionary)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A resolved property type.
///
/// `property` is only ever set by [`TypeDescriptor::linking_objects`], so a
/// descriptor carries an inverted property name exactly when its kind is
/// [`PropertyType::LinkingObjects`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    kind: PropertyType,
    object_type: Option<String>,
    property: Option<String>,
    /// Whether the value may be absent.
    pub optional: bool,
}

impl TypeDescriptor {
    /// Creates a descriptor for a scalar kind.
    #[must_use]
    pub const fn scalar(kind: PropertyType) -> Self {
        Self {
            kind,
            object_type: None,
            property: None,
            optional: false,
        }
    }

    /// Creates a link to another entity.
    #[must_use]
    pub fn link(object_type: impl Into<String>) -> Self {
        Self {
            kind: PropertyType::Link,
            object_type: Some(object_type.into()),
            property: None,
            optional: false,
        }
    }

    /// Creates a collection whose elements are named by `object_type`.
    ///
    /// Returns `None` if `kind` is not a collection kind.
    #[must_use]
    pub fn collection(kind: PropertyType, object_type: impl Into<String>) -> Option<Self> {
        kind.is_collection().then(|| Self {
            kind,
            object_type: Some(object_type.into()),
            property: None,
            optional: false,
        })
    }

    /// Creates an inverse relationship over `object_type.property`.
    #[must_use]
    pub fn linking_objects(object_type: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            kind: PropertyType::LinkingObjects,
            object_type: Some(object_type.into()),
            property: Some(property.into()),
            optional: false,
        }
    }

    /// Builder method to set optionality.
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// The storage kind.
    #[must_use]
    pub const fn kind(&self) -> PropertyType {
        self.kind
    }

    /// Element type name for collections, target entity for links.
    #[must_use]
    pub fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    /// Inverted property name, only for linking objects.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// The name this descriptor contributes when used as a collection element.
    ///
    /// Links collapse to the target entity name, scalars to their kind name.
    #[must_use]
    pub fn element_name(&self) -> &str {
        match (self.kind, self.object_type.as_deref()) {
            (PropertyType::Link, Some(name)) => name,
            (kind, _) => kind.name(),
        }
    }
}

impl From<PropertyType> for TypeDescriptor {
    fn from(kind: PropertyType) -> Self {
        Self::scalar(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(PropertyType::ObjectId.name(), "objectId");
        assert_eq!(PropertyType::Uuid.name(), "uuid");
        assert_eq!(PropertyType::LinkingObjects.name(), "linkingObjects");
        assert_eq!(PropertyType::Link.to_string(), "object");
    }

    #[test]
    fn only_linking_objects_carry_property() {
        let lo = TypeDescriptor::linking_objects("Person", "friends");
        assert_eq!(lo.kind(), PropertyType::LinkingObjects);
        assert_eq!(lo.property(), Some("friends"));

        assert_eq!(TypeDescriptor::link("Person").property(), None);
        assert_eq!(TypeDescriptor::scalar(PropertyType::Int).property(), None);
    }

    #[test]
    fn collection_rejects_scalar_kind() {
        assert!(TypeDescriptor::collection(PropertyType::Int, "int").is_none());
        let list = TypeDescriptor::collection(PropertyType::List, "Person").unwrap();
        assert_eq!(list.object_type(), Some("Person"));
    }

    #[test]
    fn element_name_collapses_links() {
        assert_eq!(TypeDescriptor::link("Dog").element_name(), "Dog");
        assert_eq!(TypeDescriptor::scalar(PropertyType::Int).element_name(), "int");
    }

    #[test]
    fn with_optional() {
        let desc = TypeDescriptor::scalar(PropertyType::String).with_optional(true);
        assert!(desc.optional);
    }
}
