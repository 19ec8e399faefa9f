//! Integration tests for Layer 2: Transform
//!
//! Tests for type mapping, schema assembly, source rewriting, and the fatal
//! error cases, driven end to end through `transform`.

mod determinism;
mod errors;
mod mapping;
mod models;
