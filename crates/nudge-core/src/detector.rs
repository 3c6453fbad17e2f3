//! The detector interface and the fixed detector set.
//!
//! A detector is a small state machine over edit and diagnostics events. It answers one
//! question per event: "did my pattern just complete?". Detectors own their state outright and
//! never observe each other, so adding or removing one cannot change another's behaviour.

use crate::buffer::EditBuffer;
use crate::config::DetectorConfig;
use crate::declarations::DeclarationParser;
use crate::detectors::{
    AddImportDetector, BlockCommentDetector, GetterSetterDetector, IndentationDetector,
    RemoveUnusedImportDetector, TrailingWhitespaceDetector,
};
use crate::diagnostics::DiagnosticSnapshot;
use crate::event::EditEvent;
use crate::pattern::PatternId;
use nudge_lang::LanguageProfile;

/// What a detector sees for one edit: the event and the document.
///
/// During [`Detector::before_edit`] the buffer still holds the pre-edit text; during
/// [`Detector::after_edit`] the edit has been applied.
#[derive(Clone, Copy)]
pub struct EditContext<'a> {
    /// Document text at this point of the edit.
    pub buffer: &'a dyn EditBuffer,
    /// The edit being delivered.
    pub event: &'a EditEvent,
}

impl<'a> EditContext<'a> {
    /// Create a context.
    pub fn new(buffer: &'a dyn EditBuffer, event: &'a EditEvent) -> Self {
        Self { buffer, event }
    }
}

/// A stateful pattern detector.
///
/// Every hook returns `true` when the pattern completed on this event. State updates happen on
/// every call regardless of the return value.
pub trait Detector {
    /// The pattern this detector reports.
    fn pattern(&self) -> PatternId;

    /// Called before the document changes.
    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool;

    /// Called after the document changed.
    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool;

    /// Called with the complete current diagnostics set.
    fn diagnostics_changed(&mut self, snapshot: &DiagnosticSnapshot) -> bool;
}

/// One member of a session's detector set.
#[derive(Debug)]
pub enum DetectorKind {
    /// See [`BlockCommentDetector`].
    BlockComment(BlockCommentDetector),
    /// See [`RemoveUnusedImportDetector`].
    RemoveUnusedImport(RemoveUnusedImportDetector),
    /// See [`AddImportDetector`].
    AddImport(AddImportDetector),
    /// See [`IndentationDetector`].
    Indentation(IndentationDetector),
    /// See [`GetterSetterDetector`].
    GetterSetter(GetterSetterDetector),
    /// See [`TrailingWhitespaceDetector`].
    TrailingWhitespace(TrailingWhitespaceDetector),
}

impl DetectorKind {
    /// Build the standard detector set in dispatch order, leaving out disabled patterns.
    ///
    /// `parser` feeds the getter/setter detector; without one it never learns any names.
    pub fn standard_set(
        config: &DetectorConfig,
        language: &LanguageProfile,
        parser: Option<Box<dyn DeclarationParser>>,
    ) -> Vec<DetectorKind> {
        let mut parser = parser;
        PatternId::ALL
            .into_iter()
            .filter(|pattern| config.is_enabled(*pattern))
            .map(|pattern| match pattern {
                PatternId::BlockComment => DetectorKind::BlockComment(BlockCommentDetector::new(
                    language,
                    config.comment_gap_tolerance,
                )),
                PatternId::RemoveUnusedImportStatements => DetectorKind::RemoveUnusedImport(
                    RemoveUnusedImportDetector::new(language),
                ),
                PatternId::AddImportStatements => {
                    DetectorKind::AddImport(AddImportDetector::new(language))
                }
                PatternId::CorrectIndentation => {
                    DetectorKind::Indentation(IndentationDetector::new(config.indent_debounce()))
                }
                PatternId::GetterSetter => DetectorKind::GetterSetter(GetterSetterDetector::new(
                    language,
                    parser.take(),
                    config.getter_setter_word_boundary,
                )),
                PatternId::TrailingWhiteSpace => {
                    DetectorKind::TrailingWhitespace(TrailingWhitespaceDetector::new())
                }
            })
            .collect()
    }

    fn inner(&self) -> &dyn Detector {
        match self {
            DetectorKind::BlockComment(d) => d,
            DetectorKind::RemoveUnusedImport(d) => d,
            DetectorKind::AddImport(d) => d,
            DetectorKind::Indentation(d) => d,
            DetectorKind::GetterSetter(d) => d,
            DetectorKind::TrailingWhitespace(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Detector {
        match self {
            DetectorKind::BlockComment(d) => d,
            DetectorKind::RemoveUnusedImport(d) => d,
            DetectorKind::AddImport(d) => d,
            DetectorKind::Indentation(d) => d,
            DetectorKind::GetterSetter(d) => d,
            DetectorKind::TrailingWhitespace(d) => d,
        }
    }
}

impl Detector for DetectorKind {
    fn pattern(&self) -> PatternId {
        self.inner().pattern()
    }

    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool {
        self.inner_mut().before_edit(cx)
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        self.inner_mut().after_edit(cx)
    }

    fn diagnostics_changed(&mut self, snapshot: &DiagnosticSnapshot) -> bool {
        self.inner_mut().diagnostics_changed(snapshot)
    }
}
