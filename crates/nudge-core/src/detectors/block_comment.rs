use crate::buffer::{LineRegion, line_start_after_edit};
use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::BufferError;
use crate::event::EditEvent;
use crate::pattern::PatternId;
use nudge_lang::LanguageProfile;

/// Detects line comments added by hand to adjacent lines.
///
/// A comment token counts when it is either inserted in one edit (`"//"`, which is also what a
/// "toggle comment" action on a single line produces) or completed by two consecutive
/// insertions (`"/"` then `"/"` right after it). The token must be the first non-blank content
/// of its line. The first such line is remembered by its start offset, which follows later edits
/// so that commenting the line above it still compares against where it now is. Its extent is
/// read back from the document when the next token arrives, so splitting or joining the line
/// in between is seen as it is. A later token on an adjacent line triggers.
///
/// After a trigger the triggering line becomes the remembered one, so commenting a third line
/// in the same direction triggers again.
#[derive(Debug, Clone)]
pub struct BlockCommentDetector {
    token: String,
    gap_tolerance: usize,
    first_mark: Option<usize>,
    prev_offset: Option<usize>,
    prev_insert: String,
}

impl BlockCommentDetector {
    /// Create a detector for the profile's line comment token.
    ///
    /// `gap_tolerance` is the largest number of characters allowed between the end of one
    /// commented line and the start of the other.
    pub fn new(language: &LanguageProfile, gap_tolerance: usize) -> Self {
        Self {
            token: language.line_comment.clone(),
            gap_tolerance,
            first_mark: None,
            prev_offset: None,
            prev_insert: String::new(),
        }
    }

    /// Start offset of the remembered commented line, if any.
    pub fn first_mark(&self) -> Option<usize> {
        self.first_mark
    }

    /// Start offset of the comment token if `event` completed one.
    fn completed_token_start(&self, event: &EditEvent) -> Option<usize> {
        if self.token.is_empty() || event.inserted_text.is_empty() {
            return None;
        }
        if event.inserted_text == self.token {
            return Some(event.offset);
        }

        let prev_offset = self.prev_offset?;
        if self.prev_insert.is_empty()
            || prev_offset + self.prev_insert.chars().count() != event.offset
        {
            return None;
        }
        let split = self.prev_insert.len();
        let joined = self.token.len() == split + event.inserted_text.len()
            && self.token.starts_with(self.prev_insert.as_str())
            && self.token[split..] == event.inserted_text;
        joined.then_some(prev_offset)
    }

    fn check_token(&mut self, cx: &EditContext<'_>, token_start: usize) -> Result<bool, BufferError> {
        let buffer = cx.buffer;
        let line = buffer.line_of_offset(cx.event.offset)?;
        let line_start = buffer.line_offset(line)?;
        let Some(leading_len) = token_start.checked_sub(line_start) else {
            return Ok(false);
        };
        if !buffer.text(line_start, leading_len)?.trim().is_empty() {
            return Ok(false);
        }

        let Some(previous) = self.first_mark.replace(line_start) else {
            return Ok(false);
        };
        let previous = buffer.line_region(buffer.line_of_offset(previous)?)?;
        let region = buffer.line_region(line)?;
        Ok(self.adjacent(&previous, &region))
    }

    fn adjacent(&self, a: &LineRegion, b: &LineRegion) -> bool {
        let within = |gap: Option<usize>| gap.is_some_and(|gap| gap <= self.gap_tolerance);
        within(a.gap_before(b)) || within(b.gap_before(a))
    }
}

impl Detector for BlockCommentDetector {
    fn pattern(&self) -> PatternId {
        PatternId::BlockComment
    }

    fn before_edit(&mut self, _cx: &EditContext<'_>) -> bool {
        false
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        self.first_mark = self
            .first_mark
            .and_then(|start| line_start_after_edit(start, cx.event));

        let triggered = match self.completed_token_start(cx.event) {
            Some(token_start) => match self.check_token(cx, token_start) {
                Ok(triggered) => triggered,
                Err(err) => {
                    tracing::trace!(%err, "comment token outside document, dropping mark");
                    self.first_mark = None;
                    false
                }
            },
            None => false,
        };

        self.prev_offset = Some(cx.event.offset);
        self.prev_insert.clone_from(&cx.event.inserted_text);
        triggered
    }

    fn diagnostics_changed(&mut self, _snapshot: &DiagnosticSnapshot) -> bool {
        false
    }
}
