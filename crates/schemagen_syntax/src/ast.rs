//! Syntax tree for the TypeScript subset.
//!
//! Only the shapes the schema transform inspects are modeled structurally:
//! imports, classes, class members, decorators, type annotations and simple
//! expressions. Everything else is kept as an opaque span so it can be left
//! untouched in the output.

use schemagen_foundation::Literal;

use crate::span::Span;

/// An identifier with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A parsed source module.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    /// Top-level items in source order.
    pub items: Vec<Item>,
    /// Span of the whole module.
    pub span: Span,
}

impl Module {
    /// Iterates over the import declarations.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Iterates over every class declaration in source order, including
    /// classes declared inside function bodies, namespaces and methods.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        let mut classes = Vec::new();
        for item in &self.items {
            match item {
                Item::Class(class) => class.collect_into(&mut classes),
                Item::Other { classes: nested, .. } => {
                    for class in nested {
                        class.collect_into(&mut classes);
                    }
                }
                Item::Import(_) => {}
            }
        }
        classes.into_iter()
    }
}

/// A top-level item.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// `import ... from "..."`
    Import(ImportDecl),
    /// A class declaration, possibly exported.
    Class(ClassDecl),
    /// Any other statement, left as-is.
    Other {
        /// Source location.
        span: Span,
        /// Class declarations found inside it, like a class declared in a
        /// function body or a namespace.
        classes: Vec<ClassDecl>,
    },
}

impl Item {
    /// Returns the source span of this item.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Import(import) => import.span,
            Self::Class(class) => class.span,
            Self::Other { span, .. } => *span,
        }
    }
}

/// An import declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    /// Imported bindings; empty for side-effect imports.
    pub specifiers: Vec<ImportSpecifier>,
    /// Module specifier, like `"realm"`.
    pub source: String,
    /// `import type ...`
    pub type_only: bool,
    /// Source location.
    pub span: Span,
}

/// One binding introduced by an import.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportSpecifier {
    /// `import Realm from "realm"`
    Default {
        /// Local name.
        local: Ident,
    },
    /// `import * as Realm from "realm"`
    Namespace {
        /// Local name.
        local: Ident,
    },
    /// `import { Types as T } from "realm"`
    Named {
        /// Exported name in the source module.
        imported: String,
        /// Local name.
        local: Ident,
        /// `import { type X }`
        type_only: bool,
    },
}

impl ImportSpecifier {
    /// The name this specifier binds in the importing module.
    #[must_use]
    pub const fn local(&self) -> &Ident {
        match self {
            Self::Default { local } | Self::Namespace { local } | Self::Named { local, .. } => {
                local
            }
        }
    }
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    /// Class name; absent for `export default class { }`.
    pub name: Option<Ident>,
    /// Decorators applied to the class itself.
    pub decorators: Vec<Decorator>,
    /// The `extends` expression.
    pub super_class: Option<Expr>,
    /// Type arguments on the superclass, like `<Person>`.
    pub super_type_args: Vec<TypeExpr>,
    /// Members in source order.
    pub members: Vec<ClassMember>,
    /// Span of the body, from `{` through `}`.
    pub body: Span,
    /// Span of the whole declaration.
    pub span: Span,
    /// Classes declared inside method bodies and static blocks.
    pub nested: Vec<ClassDecl>,
}

impl ClassDecl {
    /// The class name, or the empty string for anonymous classes.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_ref().map_or("", |ident| ident.name.as_str())
    }

    fn collect_into<'a>(&'a self, classes: &mut Vec<&'a ClassDecl>) {
        classes.push(self);
        for class in &self.nested {
            class.collect_into(classes);
        }
    }

    /// Iterates over property declarations.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Property(prop) => Some(prop),
            _ => None,
        })
    }
}

/// A class member.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    /// A field, static or instance.
    Property(PropertyDecl),
    /// A method, accessor, or constructor.
    Method(MethodDecl),
    /// `static { ... }`
    StaticBlock(Span),
    /// `[key: string]: T`
    IndexSignature(Span),
}

impl ClassMember {
    /// Returns the source span of this member.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Property(prop) => prop.span,
            Self::Method(method) => method.span,
            Self::StaticBlock(span) | Self::IndexSignature(span) => *span,
        }
    }
}

/// A property (field) declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    /// Property name.
    pub key: PropertyKey,
    /// Decorators like `@index`.
    pub decorators: Vec<Decorator>,
    /// `static`
    pub is_static: bool,
    /// `readonly`
    pub is_readonly: bool,
    /// `declare`
    pub is_declare: bool,
    /// `name?: T`
    pub optional: bool,
    /// `name!: T`
    pub definite: bool,
    /// Declared type.
    pub type_annotation: Option<TypeExpr>,
    /// Initializer expression.
    pub initializer: Option<Expr>,
    /// Span of the `=` preceding the initializer.
    pub eq_span: Option<Span>,
    /// Span of the declaration, including decorators and the trailing `;`.
    pub span: Span,
}

impl PropertyDecl {
    /// The property name, if it is statically known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.key.name()
    }
}

/// A method or accessor declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    /// Method name.
    pub key: PropertyKey,
    /// What kind of method this is.
    pub kind: MethodKind,
    /// `static`
    pub is_static: bool,
    /// Source location.
    pub span: Span,
}

/// Kinds of methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// Plain method.
    Method,
    /// `get name()`
    Getter,
    /// `set name(v)`
    Setter,
    /// `constructor()`
    Constructor,
}

/// The name of a class member.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKey {
    /// `name`
    Ident(Ident),
    /// `"name"`
    String {
        /// Unescaped value.
        value: String,
        /// Source location.
        span: Span,
    },
    /// `42`
    Number {
        /// Source spelling.
        raw: String,
        /// Source location.
        span: Span,
    },
    /// `#name`
    Private(Ident),
    /// `[expr]`
    Computed(Span),
}

impl PropertyKey {
    /// Returns the statically known name of this key.
    ///
    /// Private and computed keys have none.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Ident(ident) => Some(&ident.name),
            Self::String { value, .. } => Some(value),
            Self::Number { raw, .. } => Some(raw),
            Self::Private(_) | Self::Computed(_) => None,
        }
    }

    /// Returns the source span of this key.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Ident(ident) | Self::Private(ident) => ident.span,
            Self::String { span, .. } | Self::Number { span, .. } | Self::Computed(span) => *span,
        }
    }
}

/// A decorator like `@index` or `@mapTo("_id")`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    /// The expression after `@`.
    pub expr: Expr,
    /// Span from `@` through the end of the expression.
    pub span: Span,
}

impl Decorator {
    /// The decorator's name: the last segment of its callee path.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let target = match &self.expr {
            Expr::Call { callee, .. } => callee.as_ref(),
            expr => expr,
        };
        target.path().and_then(|path| path.last().map(|ident| ident.name.as_str()))
    }

    /// Arguments if this decorator is a call.
    #[must_use]
    pub fn arguments(&self) -> Option<&[Expr]> {
        match &self.expr {
            Expr::Call { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Returns true if this decorator is a call expression.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.expr, Expr::Call { .. })
    }
}

/// A dotted name like `Realm.Types.Int`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityName {
    /// Segments in order, never empty.
    pub segments: Vec<Ident>,
    /// Source location.
    pub span: Span,
}

impl EntityName {
    /// The first segment.
    #[must_use]
    pub fn head(&self) -> &str {
        self.segments.first().map_or("", |ident| ident.name.as_str())
    }

    /// The last segment.
    #[must_use]
    pub fn last(&self) -> &str {
        self.segments.last().map_or("", |ident| ident.name.as_str())
    }

    /// Returns true for a single-segment name.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// Segment names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.segments.iter().map(|ident| ident.name.as_str()).collect()
    }
}

/// TypeScript keyword types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKeyword {
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `number`
    Number,
    /// `bigint`
    BigInt,
    /// `symbol`
    Symbol,
    /// `object`
    Object,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `void`
    Void,
    /// `any`
    Any,
    /// `unknown`
    Unknown,
    /// `never`
    Never,
}

impl TypeKeyword {
    /// Looks up a keyword type by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "number" => Self::Number,
            "bigint" => Self::BigInt,
            "symbol" => Self::Symbol,
            "object" => Self::Object,
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            "void" => Self::Void,
            "any" => Self::Any,
            "unknown" => Self::Unknown,
            "never" => Self::Never,
            _ => return None,
        })
    }
}

/// A type annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// `string`, `undefined`, ...
    Keyword(TypeKeyword, Span),
    /// `Types.Int`, `Person`, `Types.List<string>`
    Reference {
        /// The referenced name.
        name: EntityName,
        /// Type arguments.
        args: Vec<TypeExpr>,
        /// Source location.
        span: Span,
    },
    /// `"a"`, `42`, `true`
    Literal(Literal, Span),
    /// `A | B`
    Union(Vec<TypeExpr>, Span),
    /// `T[]`
    Array(Box<TypeExpr>, Span),
    /// Any other type form.
    Other(Span),
}

impl TypeExpr {
    /// Returns the source span of this type.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Keyword(_, span)
            | Self::Literal(_, span)
            | Self::Union(_, span)
            | Self::Array(_, span)
            | Self::Other(span)
            | Self::Reference { span, .. } => *span,
        }
    }

    /// Returns true if this is the `undefined` keyword.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Keyword(TypeKeyword::Undefined, _))
    }

    /// Returns true if this is the `null` keyword.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Keyword(TypeKeyword::Null, _))
    }
}

/// An expression.
///
/// Expressions outside this small set are kept as [`Expr::Other`].
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A literal.
    Literal(Literal, Span),
    /// An identifier reference.
    Ident(Ident),
    /// `object.property`
    Member {
        /// The object.
        object: Box<Expr>,
        /// The property name.
        property: Ident,
        /// Source location.
        span: Span,
    },
    /// `callee(args)`
    Call {
        /// The callee.
        callee: Box<Expr>,
        /// Arguments.
        args: Vec<Expr>,
        /// Source location.
        span: Span,
    },
    /// `new Callee(args)`
    New {
        /// The constructor.
        callee: Box<Expr>,
        /// Arguments.
        args: Vec<Expr>,
        /// Source location.
        span: Span,
    },
    /// Anything else.
    Other(Span),
}

impl Expr {
    /// Returns the source span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal(_, span)
            | Self::Other(span)
            | Self::Member { span, .. }
            | Self::Call { span, .. }
            | Self::New { span, .. } => *span,
            Self::Ident(ident) => ident.span,
        }
    }

    /// Returns true if this is a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(..))
    }

    /// Returns the literal if this is one.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal, _) => Some(literal),
            _ => None,
        }
    }

    /// Returns the identifier if this is one.
    #[must_use]
    pub const fn as_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Returns the identifiers of a dotted path like `Realm.Object`.
    ///
    /// Returns `None` for anything other than an identifier or a chain of
    /// member accesses rooted at one.
    #[must_use]
    pub fn path(&self) -> Option<Vec<&Ident>> {
        match self {
            Self::Ident(ident) => Some(vec![ident]),
            Self::Member {
                object, property, ..
            } => {
                let mut path = object.path()?;
                path.push(property);
                Some(path)
            }
            _ => None,
        }
    }
}
