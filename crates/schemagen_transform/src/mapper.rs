//! Type annotation to property type mapping.
//!
//! The mapper converts one [`TypeExpr`] into a [`TypeDescriptor`]:
//!
//! - `boolean`, `string`, `number` map to `bool`, `string`, `double`
//! - storage aliases (`Types.Int`, `Realm.BSON.UUID`, ...) map to their kind
//! - `T | undefined` maps `T` and marks it optional
//! - `List<T>`, `Set<T>`, `Dictionary<T>` flatten their element to a name
//! - `LinkingObjects<T, "prop">` maps to an inverse relationship
//! - any other bare type name is a link to another model
//!
//! Everything else is unresolved (`Ok(None)`). Malformed `LinkingObjects`
//! types are hard errors.

use schemagen_foundation::{
    Error, ErrorContext, LinkingObjectsArgument, Literal, PropertyType, Result, TypeDescriptor,
};
use schemagen_syntax::{EntityName, Span, TypeExpr, TypeKeyword};

use crate::aliases::Alias;
use crate::symbols::Resolver;

/// Maps type annotations of one property.
pub struct TypeMapper<'r, 'a> {
    resolver: &'r Resolver<'a>,
    class: &'r str,
    property: &'r str,
}

impl<'r, 'a> TypeMapper<'r, 'a> {
    /// Creates a mapper for `class.property`; the names appear in errors.
    #[must_use]
    pub fn new(resolver: &'r Resolver<'a>, class: &'r str, property: &'r str) -> Self {
        Self {
            resolver,
            class,
            property,
        }
    }

    /// Maps a property's type annotation.
    ///
    /// `optional` is true when the property carries a `?` marker.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed or optional `LinkingObjects` type.
    pub fn map(&self, ty: &TypeExpr, optional: bool) -> Result<Option<TypeDescriptor>> {
        match ty {
            TypeExpr::Keyword(keyword, _) => Ok(keyword_kind(*keyword).map(TypeDescriptor::scalar)),
            TypeExpr::Reference { name, args, span } => self.map_reference(name, args, optional, *span),
            TypeExpr::Union(arms, _) => self.map_union(arms),
            TypeExpr::Literal(..) | TypeExpr::Array(..) | TypeExpr::Other(_) => Ok(None),
        }
    }

    fn map_union(&self, arms: &[TypeExpr]) -> Result<Option<TypeDescriptor>> {
        let [first, second] = arms else {
            return Ok(None);
        };
        let inner = match (first.is_undefined(), second.is_undefined()) {
            (true, false) => second,
            (false, true) => first,
            _ => return Ok(None),
        };
        Ok(self.map(inner, true)?.map(|desc| desc.with_optional(true)))
    }

    fn map_reference(
        &self,
        name: &EntityName,
        args: &[TypeExpr],
        optional: bool,
        span: Span,
    ) -> Result<Option<TypeDescriptor>> {
        let segments = name.names();
        if let Some(alias) = self.resolver.alias(&segments) {
            return self.map_alias(alias, args, optional, span);
        }
        if !name.is_simple() {
            return Ok(None);
        }
        Ok(Some(match self.resolver.global(&segments) {
            Some("Date") => TypeDescriptor::scalar(PropertyType::Date),
            Some("ArrayBuffer") => TypeDescriptor::scalar(PropertyType::Data),
            _ => TypeDescriptor::link(name.head()),
        }))
    }

    fn map_alias(
        &self,
        alias: Alias,
        args: &[TypeExpr],
        optional: bool,
        span: Span,
    ) -> Result<Option<TypeDescriptor>> {
        match alias {
            Alias::List | Alias::Set | Alias::Dictionary => self.map_collection(alias.kind(), args),
            Alias::LinkingObjects => self.map_linking_objects(args, optional, span).map(Some),
            scalar => Ok(Some(TypeDescriptor::scalar(scalar.kind()))),
        }
    }

    fn map_collection(
        &self,
        kind: PropertyType,
        args: &[TypeExpr],
    ) -> Result<Option<TypeDescriptor>> {
        let [element] = args else {
            return Ok(None);
        };
        let Some(element) = self.map(element, false)? else {
            return Ok(None);
        };
        if element.kind().is_collection() || element.kind() == PropertyType::LinkingObjects {
            return Ok(None);
        }
        Ok(TypeDescriptor::collection(kind, element.element_name())
            .map(|desc| desc.with_optional(element.optional)))
    }

    fn map_linking_objects(
        &self,
        args: &[TypeExpr],
        optional: bool,
        span: Span,
    ) -> Result<TypeDescriptor> {
        if optional {
            return Err(self.located(
                Error::linking_objects_optional(self.class, self.property),
                span,
            ));
        }
        let [object_type, property] = args else {
            return Err(self.located(
                Error::linking_objects_arity(self.class, self.property, args.len()),
                span,
            ));
        };
        let object_type = match object_type {
            TypeExpr::Reference { name, .. } if name.is_simple() => name.head(),
            other => {
                return Err(self.located(
                    Error::linking_objects_argument(
                        self.class,
                        self.property,
                        LinkingObjectsArgument::ObjectType,
                    ),
                    other.span(),
                ));
            }
        };
        let property = match property {
            TypeExpr::Literal(Literal::String { value, .. }, _) => value,
            other => {
                return Err(self.located(
                    Error::linking_objects_argument(
                        self.class,
                        self.property,
                        LinkingObjectsArgument::PropertyName,
                    ),
                    other.span(),
                ));
            }
        };
        Ok(TypeDescriptor::linking_objects(object_type, property.as_str()))
    }

    fn located(&self, error: Error, span: Span) -> Error {
        error.with_context(ErrorContext::new().with_position(span.line, span.column))
    }
}

/// The kind of a keyword type, if it has one.
#[must_use]
pub const fn keyword_kind(keyword: TypeKeyword) -> Option<PropertyType> {
    match keyword {
        TypeKeyword::Boolean => Some(PropertyType::Bool),
        TypeKeyword::String => Some(PropertyType::String),
        TypeKeyword::Number => Some(PropertyType::Double),
        _ => None,
    }
}
