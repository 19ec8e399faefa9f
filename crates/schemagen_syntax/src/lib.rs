//! Lexer and parser for the TypeScript subset schemagen reads.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of TypeScript source
//! - [`Parser`] - Parsing tokens into a [`Module`] of imports and classes
//! - [`Span`] - Byte-accurate source locations for rewriting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
mod fuzz_tests;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{
    ClassDecl, ClassMember, Decorator, EntityName, Expr, Ident, ImportDecl, ImportSpecifier, Item,
    MethodDecl, MethodKind, Module, PropertyDecl, PropertyKey, TypeExpr, TypeKeyword,
};
pub use lexer::Lexer;
pub use parser::{Parser, parse_module, parse_type};
pub use span::Span;
pub use token::{Token, TokenKind};
