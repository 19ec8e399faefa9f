//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer and parser over realistic model files.

mod lexer;
mod parser;
