//! Per-run driver for transforming source files.
//!
//! A [`Session`] processes one file at a time (read, parse, transform,
//! render) and keeps running counts. Nothing about one file influences the
//! next; the counts are the only state it carries.

use std::fs;
use std::path::Path;

use schemagen_foundation::{Error, ErrorKind, ObjectSchema, Result};
use schemagen_syntax::parse_module;
use schemagen_transform::{Diagnostic, TransformConfig, transform_module};
use tracing::{debug, info};

/// Running counts for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Files processed, successfully or not.
    pub files: usize,
    /// Files that contained at least one model class.
    pub transformed: usize,
    /// Schemas extracted.
    pub schemas: usize,
    /// Properties left out with a warning.
    pub warnings: usize,
    /// Files that failed.
    pub failures: usize,
}

/// The result of processing one file.
#[derive(Debug)]
pub struct FileOutput {
    /// Display name of the file.
    pub name: String,
    /// The rewritten source.
    pub rendered: String,
    /// Extracted schemas, in source order.
    pub schemas: Vec<ObjectSchema>,
    /// Properties left out of their schema.
    pub warnings: Vec<Diagnostic>,
}

impl FileOutput {
    /// Returns true if the file had no model classes.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Drives the transform over a sequence of files.
#[derive(Debug, Default)]
pub struct Session {
    config: TransformConfig,
    stats: SessionStats,
}

impl Session {
    /// Creates a session with the given configuration.
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            stats: SessionStats::default(),
        }
    }

    /// The transform configuration.
    #[must_use]
    pub const fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Counts so far.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Reads and processes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to transform.
    /// The error context names the file.
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutput> {
        let name = path.display().to_string();
        let source = match read_source(path) {
            Ok(source) => source,
            Err(err) => {
                self.stats.files += 1;
                self.stats.failures += 1;
                return Err(err);
            }
        };
        self.process_source(&name, &source)
    }

    /// Processes source text under a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to parse or transform. The
    /// error context names the file.
    pub fn process_source(&mut self, name: &str, source: &str) -> Result<FileOutput> {
        self.stats.files += 1;
        match self.run(name, source) {
            Ok(output) => {
                if !output.is_unchanged() {
                    self.stats.transformed += 1;
                }
                self.stats.schemas += output.schemas.len();
                self.stats.warnings += output.warnings.len();
                info!(
                    file = %name,
                    schemas = output.schemas.len(),
                    warnings = output.warnings.len(),
                    "processed file"
                );
                Ok(output)
            }
            Err(err) => {
                self.stats.failures += 1;
                Err(in_file(err, name))
            }
        }
    }

    fn run(&self, name: &str, source: &str) -> Result<FileOutput> {
        let module = parse_module(source)?;
        debug!(file = %name, items = module.items.len(), "parsed");
        let output = transform_module(source, &module, &self.config)?;
        let rendered = output.apply(source)?;
        Ok(FileOutput {
            name: name.to_string(),
            rendered,
            schemas: output.schemas,
            warnings: output.warnings,
        })
    }
}

/// Reads a source file as UTF-8.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })
}

/// Records the file name in an error's context, keeping any position.
fn in_file(mut err: Error, name: &str) -> Error {
    let context = err.context.take().unwrap_or_default().with_source(name);
    err.with_context(context)
}
