//! Schema serialization to JSON and `MessagePack`.
//!
//! The serialized form is the same object shape the transform emits into
//! source, except that non-literal defaults appear as `{ "source": ... }`
//! markers instead of arrow functions.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use schemagen_foundation::{Error, ErrorKind, ObjectSchema, Result};

/// Output encodings for extracted schemas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// `MessagePack` with named fields.
    MessagePack,
}

impl Format {
    /// Encodes schemas in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(self, schemas: &[ObjectSchema]) -> Result<Vec<u8>> {
        match self {
            Self::Json => to_json(schemas).map(|mut json| {
                json.push('\n');
                json.into_bytes()
            }),
            Self::MessagePack => to_msgpack(schemas),
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }
}

/// Serializes schemas to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(schemas: &[ObjectSchema]) -> Result<String> {
    serde_json::to_string_pretty(schemas)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Serializes schemas to `MessagePack`.
///
/// Uses named serialization so keys survive the round trip.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_msgpack(schemas: &[ObjectSchema]) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(schemas)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Writes bytes to a file, creating or truncating it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save_to_file<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to write to file '{}': {e}",
            path.display()
        )))
    })?;

    writer.flush().map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to flush file '{}': {e}",
            path.display()
        )))
    })?;

    Ok(())
}
