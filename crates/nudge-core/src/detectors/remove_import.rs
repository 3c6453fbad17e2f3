use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::pattern::PatternId;
use nudge_lang::{LanguageProfile, MessagePattern};

/// Tracks whether the document currently has an unused import.
///
/// This detector never triggers on its own events. The session manager asks every open session
/// on workspace save and reports the pattern if one of them still carries an unused import.
#[derive(Debug, Clone)]
pub struct RemoveUnusedImportDetector {
    unused: MessagePattern,
    unused_import_exists: bool,
}

impl RemoveUnusedImportDetector {
    /// Create a detector for the profile's unused-import message.
    pub fn new(language: &LanguageProfile) -> Self {
        Self {
            unused: language.unused_import.clone(),
            unused_import_exists: false,
        }
    }

    /// Whether the latest diagnostics snapshot held a live unused-import diagnostic.
    pub fn has_active_unused_import(&self) -> bool {
        self.unused_import_exists
    }
}

impl Detector for RemoveUnusedImportDetector {
    fn pattern(&self) -> PatternId {
        PatternId::RemoveUnusedImportStatements
    }

    fn before_edit(&mut self, _cx: &EditContext<'_>) -> bool {
        false
    }

    fn after_edit(&mut self, _cx: &EditContext<'_>) -> bool {
        false
    }

    fn diagnostics_changed(&mut self, snapshot: &DiagnosticSnapshot) -> bool {
        self.unused_import_exists = snapshot.active().any(|d| self.unused.matches(&d.message));
        false
    }
}
