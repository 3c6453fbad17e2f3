//! Diagnostics snapshots.
//!
//! The diagnostics provider recomputes on nearly every keystroke and always reports the
//! **complete** current set for a document. A [`DiagnosticSnapshot`] carries that set to the
//! detectors; it replaces whatever they saw before rather than patching it.

/// A single diagnostic for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic message as produced by the compiler.
    pub message: String,
    /// The provider has marked this diagnostic as deleted but not yet dropped it.
    pub deleted: bool,
}

impl Diagnostic {
    /// A live diagnostic.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            deleted: false,
        }
    }

    /// A diagnostic already marked deleted.
    pub fn deleted(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            deleted: true,
        }
    }
}

/// The complete, ordered set of diagnostics for one document at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticSnapshot {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSnapshot {
    /// Create a snapshot from the provider's list.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// An empty snapshot (the document currently has no diagnostics).
    pub fn empty() -> Self {
        Self::default()
    }

    /// All diagnostics, including deleted ones, in provider order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics not marked deleted.
    pub fn active(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.deleted)
    }

    /// Number of diagnostics, including deleted ones.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if the snapshot holds no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticSnapshot {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}

impl FromIterator<Diagnostic> for DiagnosticSnapshot {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
