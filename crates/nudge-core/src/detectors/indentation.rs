use crate::buffer::EditBuffer;
use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::BufferError;
use crate::event::EditEvent;
use crate::pattern::PatternId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IndentChange {
    line: usize,
    at: Instant,
}

/// Detects leading whitespace adjusted by hand on adjacent lines.
///
/// Only edits whose inserted and removed text is pure whitespace are considered. Such an edit is
/// an indentation change when the line's content is otherwise unchanged and its first
/// non-blank column moved. Two indentation changes on adjacent lines trigger, as long as more
/// than the debounce window separates them. The direction of each change does not matter.
#[derive(Debug, Clone)]
pub struct IndentationDetector {
    debounce: Duration,
    line_before_change: Option<String>,
    last_change: Option<IndentChange>,
}

impl IndentationDetector {
    /// Create a detector with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            line_before_change: None,
            last_change: None,
        }
    }

    /// Line of the most recent indentation change, if one is remembered.
    pub fn last_changed_line(&self) -> Option<usize> {
        self.last_change.map(|change| change.line)
    }

    fn is_whitespace_edit(buffer: &dyn EditBuffer, event: &EditEvent) -> Result<bool, BufferError> {
        if !event.inserted_text.trim().is_empty() {
            return Ok(false);
        }
        Ok(buffer
            .text(event.offset, event.removed_len)?
            .trim()
            .is_empty())
    }

    fn snapshot(&mut self, cx: &EditContext<'_>) -> Result<(), BufferError> {
        let line = cx.buffer.line_of_offset(cx.event.offset)?;
        if Self::is_whitespace_edit(cx.buffer, cx.event)? {
            self.line_before_change = Some(cx.buffer.line_text(line)?);
        } else {
            self.line_before_change = None;
            if self.last_changed_line() != Some(line) {
                self.last_change = None;
            }
        }
        Ok(())
    }

    fn evaluate(&mut self, cx: &EditContext<'_>, before: &str) -> Result<bool, BufferError> {
        let line = cx.buffer.line_of_offset(cx.event.offset)?;
        let after = cx.buffer.line_text(line)?;
        if !indentation_changed(before, &after) {
            return Ok(false);
        }

        let now = cx.event.timestamp;
        let triggered = self.last_change.is_some_and(|last| {
            last.line.abs_diff(line) == 1 && now.saturating_duration_since(last.at) > self.debounce
        });
        self.last_change = Some(IndentChange { line, at: now });
        Ok(triggered)
    }
}

/// Content identical once trimmed, first non-blank column different.
fn indentation_changed(before: &str, after: &str) -> bool {
    before.trim().chars().count() == after.trim().chars().count()
        && first_non_blank(before) != first_non_blank(after)
}

fn first_non_blank(line: &str) -> Option<usize> {
    line.chars().position(|c| !c.is_whitespace())
}

impl Detector for IndentationDetector {
    fn pattern(&self) -> PatternId {
        PatternId::CorrectIndentation
    }

    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool {
        if let Err(err) = self.snapshot(cx) {
            tracing::trace!(%err, "indentation snapshot outside document");
            self.line_before_change = None;
        }
        false
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        let Some(before) = self.line_before_change.take() else {
            return false;
        };
        match self.evaluate(cx, &before) {
            Ok(triggered) => triggered,
            Err(err) => {
                tracing::trace!(%err, "indentation check outside document, forgetting last change");
                self.last_change = None;
                false
            }
        }
    }

    fn diagnostics_changed(&mut self, _snapshot: &DiagnosticSnapshot) -> bool {
        false
    }
}
