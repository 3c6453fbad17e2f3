//! Edit events.
//!
//! An [`EditEvent`] describes one atomic host edit (keystroke, paste, programmatic replace) in
//! **character offsets**. The same event value is delivered twice: once before the document
//! changes and once after.

use std::time::Instant;

/// A single atomic text edit.
///
/// Semantics:
/// - `offset` is a character offset in the document **before** the edit is applied.
/// - `removed_len` characters starting at `offset` are replaced by `inserted_text`.
/// - `timestamp` is captured when the host produced the edit; the debounce heuristics compare
///   timestamps of successive events and never read the clock themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    /// Start character offset of the edit.
    pub offset: usize,
    /// Number of characters removed at `offset` (may be zero).
    pub removed_len: usize,
    /// Inserted text (may be empty).
    pub inserted_text: String,
    /// When the edit happened.
    pub timestamp: Instant,
    /// Host document version the edit applies to, if the host tracks one.
    pub version: Option<u64>,
}

impl EditEvent {
    /// A replacement of `removed_len` characters at `offset` with `text`, stamped now.
    pub fn replace(offset: usize, removed_len: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            removed_len,
            inserted_text: text.into(),
            timestamp: Instant::now(),
            version: None,
        }
    }

    /// An insertion of `text` at `offset`, stamped now.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset, 0, text)
    }

    /// A deletion of `len` characters at `offset`, stamped now.
    pub fn delete(offset: usize, len: usize) -> Self {
        Self::replace(offset, len, String::new())
    }

    /// Override the timestamp.
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach the host document version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Returns `true` if nothing is inserted.
    pub fn is_deletion(&self) -> bool {
        self.inserted_text.is_empty()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end of the inserted text in the post-edit document.
    pub fn inserted_end(&self) -> usize {
        self.offset.saturating_add(self.inserted_len())
    }
}
