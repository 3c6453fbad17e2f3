use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::BufferError;
use crate::pattern::PatternId;

/// Detects trailing whitespace deleted by hand from a single line.
///
/// Fires on a deletion that leaves the line's non-blank content untouched and removes the last
/// trailing space/tab. Stateless across edits apart from the pre-edit line snapshot.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespaceDetector {
    line_before_change: Option<String>,
}

impl TrailingWhitespaceDetector {
    /// Create a detector.
    pub fn new() -> Self {
        Self::default()
    }

    fn current_line(cx: &EditContext<'_>) -> Result<String, BufferError> {
        let line = cx.buffer.line_of_offset(cx.event.offset)?;
        cx.buffer.line_content(line)
    }
}

fn ends_with_blank(line: &str) -> bool {
    line.ends_with([' ', '\t'])
}

impl Detector for TrailingWhitespaceDetector {
    fn pattern(&self) -> PatternId {
        PatternId::TrailingWhiteSpace
    }

    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool {
        self.line_before_change = Self::current_line(cx).ok();
        false
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        let Some(before) = self.line_before_change.take() else {
            return false;
        };
        if !cx.event.is_deletion() {
            return false;
        }
        let after = match Self::current_line(cx) {
            Ok(after) => after,
            Err(err) => {
                tracing::trace!(%err, "trailing whitespace check outside document");
                return false;
            }
        };

        before.trim() == after.trim() && ends_with_blank(&before) && !ends_with_blank(&after)
    }

    fn diagnostics_changed(&mut self, _snapshot: &DiagnosticSnapshot) -> bool {
        false
    }
}
