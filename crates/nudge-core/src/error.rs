//! Error types.
//!
//! Detectors never surface errors: buffer faults are absorbed at the detector boundary and
//! treated as "no pattern this event". Only host-facing calls on
//! [`SessionManager`](crate::SessionManager) and the configuration loader return `Result`.

use crate::manager::DocumentId;
use thiserror::Error;

/// A line/offset query referenced a position outside the current document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is outside the document (length {len})")]
    /// A character offset past the end of the document.
    OffsetOutOfRange {
        /// Requested character offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("line {line} is outside the document ({count} lines)")]
    /// A line number past the last line.
    LineOutOfRange {
        /// Requested line number (0-based).
        line: usize,
        /// Number of lines in the document.
        count: usize,
    },

    #[error("range {offset}+{length} is outside the document (length {len})")]
    /// A substring request that runs past the end of the document.
    RangeOutOfBounds {
        /// Range start (characters).
        offset: usize,
        /// Range length (characters).
        length: usize,
        /// Document length in characters.
        len: usize,
    },
}

/// A string that is not one of the stable pattern identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pattern id '{0}'")]
pub struct UnknownPattern(pub String);

/// Errors returned by the session manager to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("document '{0}' already has a session")]
    /// A session already exists for this uri.
    AlreadyOpen(String),

    #[error("document '{0}' is not tracked by the language profile")]
    /// The uri does not carry one of the profile's file extensions.
    UnsupportedDocument(String),

    #[error("no session for document {0:?}")]
    /// The document id has no live session (never opened, or already closed).
    DocumentNotFound(DocumentId),
}

/// Errors produced while loading a [`DetectorConfig`](crate::DetectorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    /// The configuration text is not valid TOML for the config schema.
    Toml(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {message}")]
    /// A field parsed but holds a value the detectors cannot use.
    Invalid {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Errors produced by a [`DeclarationParser`](crate::DeclarationParser).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parser language error: {0}")]
    /// The parser could not be configured for its language.
    Language(String),

    #[error("declaration query error: {0}")]
    /// The declaration query did not compile for the parser's language.
    Query(String),

    #[error("parser produced no syntax tree")]
    /// Parsing was aborted without a tree.
    NoTree,
}
