#![warn(missing_docs)]
//! Nudge Core - headless detection of manual edits an editor could have automated
//!
//! # Overview
//!
//! `nudge-core` watches the edit and diagnostics stream of open documents and decides, event by
//! event, whether the user just did by hand something an editor feature does in one step:
//! commenting out adjacent lines, re-indenting lines, stripping trailing whitespace, typing an
//! import, leaving an unused import behind at save time, or writing an accessor for an existing
//! field.
//!
//! It never edits the document and never shows anything. Hosts feed it events and receive
//! [`PatternId`]s back (and through [`SessionManager::subscribe`] callbacks).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  SessionManager (lifecycle, save, notify)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Session (fixed-order dispatch)             │  ← One per document
//! ├─────────────────────────────────────────────┤
//! │  Detectors (independent state machines)     │  ← Heuristics
//! ├─────────────────────────────────────────────┤
//! │  EditBuffer / DeclarationParser             │  ← Host-provided seams
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use nudge_core::{EditEvent, PatternId, SessionManager, TextBuffer};
//!
//! let mut manager = SessionManager::default();
//! let doc = manager.open_document("file:///src/Main.java").unwrap();
//! let mut buffer = TextBuffer::from_text("Line1\n Line2\n Line3\n");
//!
//! let mut edit = |buffer: &mut TextBuffer, event: EditEvent| {
//!     manager.before_edit(doc, &*buffer, &event).unwrap();
//!     buffer.apply(&event).unwrap();
//!     manager.after_edit(doc, &*buffer, &event).unwrap()
//! };
//!
//! assert!(edit(&mut buffer, EditEvent::insert(0, "//")).is_empty());
//! assert_eq!(
//!     edit(&mut buffer, EditEvent::insert(8, "//")),
//!     vec![PatternId::BlockComment]
//! );
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - document queries ([`EditBuffer`]) and a rope-backed [`TextBuffer`]
//! - [`event`] - edit events
//! - [`diagnostics`] - diagnostics snapshots
//! - [`detector`] - the [`Detector`] trait and the fixed detector set
//! - [`detectors`] - the six built-in detectors
//! - [`session`] - per-document dispatch
//! - [`manager`] - session lifecycle, save handling and notifications
//! - [`config`] - TOML-loadable thresholds
//!
//! # Logging
//!
//! The crate logs through `tracing` and never installs a subscriber. Detections are logged at
//! `debug`, session lifecycle at `info`.

pub mod buffer;
pub mod config;
pub mod declarations;
pub mod detector;
pub mod detectors;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod manager;
pub mod pattern;
pub mod session;

pub use buffer::{EditBuffer, LineRegion, TextBuffer};
pub use config::DetectorConfig;
pub use declarations::{DeclarationParser, DeclarationParserFactory};
pub use detector::{Detector, DetectorKind, EditContext};
pub use diagnostics::{Diagnostic, DiagnosticSnapshot};
pub use error::{BufferError, ConfigError, ParseError, SessionError, UnknownPattern};
pub use event::EditEvent;
pub use manager::{
    DocumentId, PatternCallback, PatternNotification, SessionManager, SubscriptionId,
};
pub use pattern::PatternId;
pub use session::Session;

pub use nudge_lang::{LanguageProfile, MessagePattern};
