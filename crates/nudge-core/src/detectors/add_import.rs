use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::BufferError;
use crate::pattern::PatternId;
use nudge_lang::{LanguageProfile, MessagePattern};

/// Detects an import statement written by hand while a type is unresolved.
///
/// Only the transition matters: the edited line was not an import before the edit and is one
/// after it. Typing one character at a time, pasting, and fixing a typo all reach that
/// transition exactly once.
#[derive(Debug, Clone)]
pub struct AddImportDetector {
    import_keyword: String,
    unresolved: MessagePattern,
    unresolved_types_exist: bool,
    line_was_import: bool,
}

impl AddImportDetector {
    /// Create a detector for the profile's import keyword and unresolved-type message.
    pub fn new(language: &LanguageProfile) -> Self {
        Self {
            import_keyword: language.import_keyword.clone(),
            unresolved: language.unresolved_type.clone(),
            unresolved_types_exist: false,
            line_was_import: false,
        }
    }

    /// Whether the latest diagnostics snapshot reported an unresolved type.
    pub fn unresolved_types_exist(&self) -> bool {
        self.unresolved_types_exist
    }

    fn is_import(&self, line: &str) -> bool {
        !self.import_keyword.is_empty() && line.trim_start().starts_with(&self.import_keyword)
    }

    fn line_is_import(&self, cx: &EditContext<'_>) -> Result<bool, BufferError> {
        let line = cx.buffer.line_of_offset(cx.event.offset)?;
        Ok(self.is_import(&cx.buffer.line_text(line)?))
    }
}

impl Detector for AddImportDetector {
    fn pattern(&self) -> PatternId {
        PatternId::AddImportStatements
    }

    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool {
        // An unreadable line counts as an import so the after-edit check cannot fire on it.
        self.line_was_import = self.line_is_import(cx).unwrap_or(true);
        false
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        if !self.unresolved_types_exist || self.line_was_import {
            return false;
        }
        match self.line_is_import(cx) {
            Ok(is_import) => is_import,
            Err(err) => {
                tracing::trace!(%err, "import check outside document");
                false
            }
        }
    }

    fn diagnostics_changed(&mut self, snapshot: &DiagnosticSnapshot) -> bool {
        self.unresolved_types_exist = snapshot
            .active()
            .any(|d| self.unresolved.matches(&d.message));
        false
    }
}
