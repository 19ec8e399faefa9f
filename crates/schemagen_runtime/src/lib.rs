//! CLI, file driver, and serialization for schemagen.
//!
//! This crate provides:
//! - [`Session`] - Per-run driver that reads, transforms, and renders files
//! - [`Format`] - JSON and `MessagePack` encodings of extracted schemas
//! - [`init_tracing`] - Subscriber setup for the command-line tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod serialize;
pub mod session;

pub use logging::{LOG_ENV, init_tracing};
pub use serialize::{Format, save_to_file, to_json, to_msgpack};
pub use session::{FileOutput, Session, SessionStats, read_source};
