//! The fixed table of storage type aliases.
//!
//! An alias is an export of the storage engine package that names a
//! property kind, like `Types.Int` or `BSON.ObjectId`.

use schemagen_foundation::PropertyType;

/// Namespace export holding every alias.
pub const TYPES_NAMESPACE: &str = "Types";

/// Namespace export holding the BSON value classes.
pub const BSON_NAMESPACE: &str = "BSON";

/// A recognized storage type alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alias {
    /// `Types.Bool`
    Bool,
    /// `Types.String`
    String,
    /// `Types.Int`
    Int,
    /// `Types.Float`
    Float,
    /// `Types.Double`
    Double,
    /// `Types.Decimal128`, `BSON.Decimal128`
    Decimal128,
    /// `Types.ObjectId`, `BSON.ObjectId`
    ObjectId,
    /// `Types.UUID`, `BSON.UUID`
    Uuid,
    /// `Types.Date`
    Date,
    /// `Types.Data`
    Data,
    /// `Types.List<T>`
    List,
    /// `Types.Set<T>`
    Set,
    /// `Types.Dictionary<T>`
    Dictionary,
    /// `Types.Mixed`
    Mixed,
    /// `Types.LinkingObjects<T, "prop">`
    LinkingObjects,
}

impl Alias {
    /// Every alias, in table order.
    pub const ALL: [Self; 15] = [
        Self::Bool,
        Self::String,
        Self::Int,
        Self::Float,
        Self::Double,
        Self::Decimal128,
        Self::ObjectId,
        Self::Uuid,
        Self::Date,
        Self::Data,
        Self::List,
        Self::Set,
        Self::Dictionary,
        Self::Mixed,
        Self::LinkingObjects,
    ];

    /// The exported name of this alias.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Decimal128 => "Decimal128",
            Self::ObjectId => "ObjectId",
            Self::Uuid => "UUID",
            Self::Date => "Date",
            Self::Data => "Data",
            Self::List => "List",
            Self::Set => "Set",
            Self::Dictionary => "Dictionary",
            Self::Mixed => "Mixed",
            Self::LinkingObjects => "LinkingObjects",
        }
    }

    /// Looks up an alias by exported name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alias| alias.name() == name)
    }

    /// The property kind this alias denotes.
    #[must_use]
    pub const fn kind(self) -> PropertyType {
        match self {
            Self::Bool => PropertyType::Bool,
            Self::String => PropertyType::String,
            Self::Int => PropertyType::Int,
            Self::Float => PropertyType::Float,
            Self::Double => PropertyType::Double,
            Self::Decimal128 => PropertyType::Decimal128,
            Self::ObjectId => PropertyType::ObjectId,
            Self::Uuid => PropertyType::Uuid,
            Self::Date => PropertyType::Date,
            Self::Data => PropertyType::Data,
            Self::List => PropertyType::List,
            Self::Set => PropertyType::Set,
            Self::Dictionary => PropertyType::Dictionary,
            Self::Mixed => PropertyType::Mixed,
            Self::LinkingObjects => PropertyType::LinkingObjects,
        }
    }

    /// Returns true for aliases that are also exported under `BSON`.
    #[must_use]
    pub const fn is_bson(self) -> bool {
        matches!(self, Self::Decimal128 | Self::ObjectId | Self::Uuid)
    }

    /// Returns true for aliases usable as a `new` initializer.
    #[must_use]
    pub const fn is_constructible(self) -> bool {
        matches!(
            self,
            Self::Decimal128 | Self::ObjectId | Self::Uuid | Self::Date | Self::Data
        )
    }

    /// Returns true for aliases the package also exports on its root,
    /// like `Realm.List<T>`.
    #[must_use]
    pub const fn is_root_export(self) -> bool {
        matches!(
            self,
            Self::List | Self::Set | Self::Dictionary | Self::Mixed | Self::LinkingObjects
        )
    }

    /// Matches an export path inside the storage engine package.
    ///
    /// Accepts `["Types", Alias]` and, for BSON classes, `["BSON", Alias]`.
    /// A single-segment `[Alias]` matches every alias when it was imported
    /// by name (`import { Int } from "realm"`), but only root exports when
    /// reached through the package itself (`Realm.Mixed`).
    #[must_use]
    pub fn from_export_path(path: &[&str], imported_by_name: bool) -> Option<Self> {
        match path {
            [name] => {
                Self::from_name(name).filter(|alias| imported_by_name || alias.is_root_export())
            }
            [namespace, name] if *namespace == TYPES_NAMESPACE => Self::from_name(name),
            [namespace, name] if *namespace == BSON_NAMESPACE => {
                Self::from_name(name).filter(|alias| alias.is_bson())
            }
            _ => None,
        }
    }
}
