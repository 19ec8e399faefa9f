//! Integration tests for Layer 3: Runtime
//!
//! Tests for the file driver and schema serialization.

mod serialize;
mod session;
