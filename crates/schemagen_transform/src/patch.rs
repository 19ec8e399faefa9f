//! Source edits produced by the transform.
//!
//! The parsed module is never mutated. Instead the transform records an
//! ordered list of byte-range edits and [`PatchList::apply`] renders them
//! onto the original text, leaving everything else byte-for-byte intact.

use schemagen_foundation::{Error, ErrorKind, Result};
use schemagen_syntax::Span;

/// One edit of the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    /// Delete the covered bytes.
    Remove {
        /// Byte range to delete.
        span: Span,
    },
    /// Insert text before the byte at `offset`.
    Insert {
        /// Byte offset to insert at.
        offset: usize,
        /// Text to insert.
        text: String,
    },
}

impl Patch {
    /// First byte affected.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Remove { span } => span.start,
            Self::Insert { offset, .. } => *offset,
        }
    }

    /// One past the last byte affected; equal to `start` for inserts.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Remove { span } => span.end,
            Self::Insert { offset, .. } => *offset,
        }
    }

    // Inserts sort before removals starting at the same offset.
    const fn rank(&self) -> u8 {
        match self {
            Self::Insert { .. } => 0,
            Self::Remove { .. } => 1,
        }
    }
}

/// An ordered collection of non-overlapping patches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchList {
    patches: Vec<Patch>,
}

impl PatchList {
    /// Creates an empty patch list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a patch.
    pub fn push(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Adds a removal of `span`. Empty spans are ignored.
    pub fn remove(&mut self, span: Span) {
        if !span.is_empty() {
            self.push(Patch::Remove { span });
        }
    }

    /// Adds an insertion at `offset`.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.push(Patch::Insert {
            offset,
            text: text.into(),
        });
    }

    /// Moves every patch of `other` into this list.
    pub fn append(&mut self, other: &mut Self) {
        self.patches.append(&mut other.patches);
    }

    /// Iterates over the patches in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    /// Number of patches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Returns true if there are no patches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Applies the patches to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if two removals overlap or a patch falls outside
    /// `source` or inside a UTF-8 sequence.
    pub fn apply(&self, source: &str) -> Result<String> {
        let mut ordered: Vec<&Patch> = self.patches.iter().collect();
        ordered.sort_by_key(|patch| (patch.start(), patch.rank()));

        let mut output = String::with_capacity(source.len() + self.inserted_len());
        let mut cursor = 0;
        for patch in ordered {
            if patch.start() < cursor {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "overlapping patches at byte {}",
                    patch.start()
                ))));
            }
            output.push_str(slice(source, cursor, patch.start())?);
            match patch {
                Patch::Remove { span } => {
                    slice(source, span.start, span.end)?;
                    cursor = span.end;
                }
                Patch::Insert { offset, text } => {
                    output.push_str(text);
                    cursor = *offset;
                }
            }
        }
        output.push_str(slice(source, cursor, source.len())?);
        Ok(output)
    }

    fn inserted_len(&self) -> usize {
        self.patches
            .iter()
            .map(|patch| match patch {
                Patch::Insert { text, .. } => text.len(),
                Patch::Remove { .. } => 0,
            })
            .sum()
    }
}

impl IntoIterator for PatchList {
    type Item = Patch;
    type IntoIter = std::vec::IntoIter<Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.into_iter()
    }
}

fn slice(source: &str, start: usize, end: usize) -> Result<&str> {
    source.get(start..end).ok_or_else(|| {
        Error::new(ErrorKind::Internal(format!(
            "patch range {start}..{end} is not valid for a source of {} bytes",
            source.len()
        )))
    })
}
