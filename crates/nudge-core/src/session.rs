//! Per-document dispatch.
//!
//! A [`Session`] owns one detector set and forwards every event to each detector in the fixed
//! dispatch order. It reports the patterns that completed on the event; it does not know who
//! listens.

use crate::buffer::EditBuffer;
use crate::config::DetectorConfig;
use crate::declarations::DeclarationParser;
use crate::detector::{Detector, DetectorKind, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::event::EditEvent;
use crate::pattern::PatternId;
use nudge_lang::LanguageProfile;

/// The detector state for one open document.
#[derive(Debug)]
pub struct Session {
    detectors: Vec<DetectorKind>,
    active: bool,
}

impl Session {
    /// Create a session with the standard detector set.
    pub fn new(
        config: &DetectorConfig,
        language: &LanguageProfile,
        parser: Option<Box<dyn DeclarationParser>>,
    ) -> Self {
        Self::with_detectors(DetectorKind::standard_set(config, language, parser))
    }

    /// Create a session dispatching to `detectors`, in the given order.
    pub fn with_detectors(detectors: Vec<DetectorKind>) -> Self {
        Self {
            detectors,
            active: true,
        }
    }

    /// Returns `true` until [`Session::stop`] is called.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Patterns handled by this session, in dispatch order.
    pub fn patterns(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.detectors.iter().map(|d| d.pattern())
    }

    /// Deliver an edit while `buffer` still holds the pre-edit text.
    pub fn before_edit(&mut self, buffer: &dyn EditBuffer, event: &EditEvent) -> Vec<PatternId> {
        let cx = EditContext::new(buffer, event);
        self.dispatch(|d| d.before_edit(&cx))
    }

    /// Deliver an edit after it has been applied to `buffer`.
    pub fn after_edit(&mut self, buffer: &dyn EditBuffer, event: &EditEvent) -> Vec<PatternId> {
        let cx = EditContext::new(buffer, event);
        self.dispatch(|d| d.after_edit(&cx))
    }

    /// Deliver the complete current diagnostics set.
    pub fn diagnostics_changed(&mut self, snapshot: &DiagnosticSnapshot) -> Vec<PatternId> {
        self.dispatch(|d| d.diagnostics_changed(snapshot))
    }

    /// Whether the document has an unused import outstanding.
    ///
    /// Always `false` once stopped, or when the unused-import detector is disabled.
    pub fn has_active_unused_import(&self) -> bool {
        self.active
            && self.detectors.iter().any(|d| match d {
                DetectorKind::RemoveUnusedImport(d) => d.has_active_unused_import(),
                _ => false,
            })
    }

    /// Stop delivering events. Later events are ignored and report nothing.
    ///
    /// Calling this more than once is a no-op.
    pub fn stop(&mut self) {
        self.active = false;
    }

    fn dispatch(&mut self, mut hook: impl FnMut(&mut DetectorKind) -> bool) -> Vec<PatternId> {
        if !self.active {
            return Vec::new();
        }
        let mut triggered = Vec::new();
        for detector in &mut self.detectors {
            if hook(detector) {
                let pattern = detector.pattern();
                tracing::debug!(%pattern, "pattern detected");
                triggered.push(pattern);
            }
        }
        triggered
    }
}
