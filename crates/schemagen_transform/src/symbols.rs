//! Import bindings and name resolution.
//!
//! A [`SymbolTable`] is built once per module from its import declarations
//! and then consulted read-only. A [`Resolver`] pairs it with the transform
//! configuration to answer "does this name denote export X of the storage
//! engine package?".

use std::collections::HashMap;

use schemagen_syntax::{Expr, ImportSpecifier, Module};

use crate::aliases::Alias;
use crate::config::TransformConfig;

// =============================================================================
// Binding
// =============================================================================

/// What an import binding refers to inside its source module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Imported {
    /// `import X from "m"`
    Default,
    /// `import * as X from "m"`
    Namespace,
    /// `import { name as X } from "m"`
    Named(String),
}

/// A local name introduced by an import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// What was imported.
    pub imported: Imported,
    /// The module specifier it was imported from.
    pub source: String,
}

impl Binding {
    /// Creates a new binding.
    #[must_use]
    pub fn new(imported: Imported, source: impl Into<String>) -> Self {
        Self {
            imported,
            source: source.into(),
        }
    }
}

/// A qualified name traced to its source module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPath<'a> {
    /// Module the head of the name was imported from.
    pub module: &'a str,
    /// Member path inside that module.
    ///
    /// Empty when the name is the module's default or namespace import.
    pub path: Vec<&'a str>,
    /// True when the head of the name was a named import.
    pub named: bool,
}

// =============================================================================
// SymbolTable
// =============================================================================

/// Import bindings of one module, keyed by local name.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Binding>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every import binding of a module.
    ///
    /// Side-effect imports bind nothing. Type-only imports bind like
    /// ordinary ones since type annotations may refer to them.
    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        let mut table = Self::new();
        for import in module.imports() {
            for specifier in &import.specifiers {
                let imported = match specifier {
                    ImportSpecifier::Default { .. } => Imported::Default,
                    ImportSpecifier::Namespace { .. } => Imported::Namespace,
                    ImportSpecifier::Named { imported, .. } => Imported::Named(imported.clone()),
                };
                table.bind(
                    specifier.local().name.clone(),
                    Binding::new(imported, import.source.clone()),
                );
            }
        }
        table
    }

    /// Adds or replaces a binding.
    pub fn bind(&mut self, local: impl Into<String>, binding: Binding) {
        self.bindings.insert(local.into(), binding);
    }

    /// Looks up a local name.
    #[must_use]
    pub fn resolve(&self, local: &str) -> Option<&Binding> {
        self.bindings.get(local)
    }

    /// Returns true if `local` was introduced by an import.
    #[must_use]
    pub fn is_bound(&self, local: &str) -> bool {
        self.bindings.contains_key(local)
    }

    /// Returns the module a local name was imported from.
    #[must_use]
    pub fn module_of(&self, local: &str) -> Option<&str> {
        self.resolve(local).map(|binding| binding.source.as_str())
    }

    /// Traces a dotted name to its path inside the source module.
    ///
    /// `Realm.Types.Int` with `import Realm from "realm"` yields
    /// `["Types", "Int"]`; `T.Int` with `import { Types as T }` yields the
    /// same path.
    #[must_use]
    pub fn export_path<'a>(&'a self, segments: &[&'a str]) -> Option<ExportPath<'a>> {
        let (head, rest) = segments.split_first()?;
        let binding = self.resolve(head)?;
        let mut path = Vec::with_capacity(segments.len());
        let named = match &binding.imported {
            Imported::Named(name) => {
                path.push(name.as_str());
                true
            }
            Imported::Default | Imported::Namespace => false,
        };
        path.extend_from_slice(rest);
        Some(ExportPath {
            module: &binding.source,
            path,
            named,
        })
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Answers storage-engine questions about names in one module.
#[derive(Debug)]
pub struct Resolver<'a> {
    symbols: SymbolTable,
    config: &'a TransformConfig,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over an existing symbol table.
    #[must_use]
    pub fn new(symbols: SymbolTable, config: &'a TransformConfig) -> Self {
        Self { symbols, config }
    }

    /// Builds the symbol table of `module` and wraps it.
    #[must_use]
    pub fn for_module(module: &Module, config: &'a TransformConfig) -> Self {
        Self::new(SymbolTable::from_module(module), config)
    }

    /// The underlying symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The transform configuration.
    #[must_use]
    pub fn config(&self) -> &'a TransformConfig {
        self.config
    }

    /// Traces a dotted name into a recognized module.
    #[must_use]
    pub fn engine_export<'s>(&'s self, segments: &[&'s str]) -> Option<ExportPath<'s>> {
        self.symbols
            .export_path(segments)
            .filter(|export| self.config.is_recognized_module(export.module))
    }

    /// Returns the path of a dotted name inside a recognized module.
    #[must_use]
    pub fn engine_path<'s>(&'s self, segments: &[&'s str]) -> Option<Vec<&'s str>> {
        self.engine_export(segments).map(|export| export.path)
    }

    /// Resolves a dotted name to a storage type alias.
    #[must_use]
    pub fn alias(&self, segments: &[&str]) -> Option<Alias> {
        let export = self.engine_export(segments)?;
        Alias::from_export_path(&export.path, export.named)
    }

    /// Resolves a dotted expression like `Realm.BSON.UUID` to an alias.
    #[must_use]
    pub fn alias_of_expr(&self, expr: &Expr) -> Option<Alias> {
        let path = expr.path()?;
        let segments: Vec<&str> = path.iter().map(|ident| ident.name.as_str()).collect();
        self.alias(&segments)
    }

    /// Returns true if `expr` denotes the base entity class.
    #[must_use]
    pub fn is_base_class(&self, expr: &Expr) -> bool {
        let Some(path) = expr.path() else {
            return false;
        };
        let segments: Vec<&str> = path.iter().map(|ident| ident.name.as_str()).collect();
        self.engine_path(&segments)
            .is_some_and(|path| path == [self.config.base_class.as_str()])
    }

    /// Returns the ambient global a bare name refers to, if it is not
    /// shadowed by an import.
    #[must_use]
    pub fn global<'n>(&self, segments: &[&'n str]) -> Option<&'n str> {
        match segments {
            [name] if !self.symbols.is_bound(name) => Some(*name),
            _ => None,
        }
    }
}
