//! Document access.
//!
//! The detectors never own document text. They read it through [`EditBuffer`], a narrow query
//! surface the host implements over whatever storage it uses. [`TextBuffer`] is a rope-backed
//! implementation for hosts without their own storage (and for tests).
//!
//! All offsets and lengths are in Unicode scalar values (`char`s).

use crate::error::BufferError;
use crate::event::EditEvent;
use ropey::Rope;

/// A line's extent in the document, excluding its line delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineRegion {
    /// Character offset of the first character on the line.
    pub start: usize,
    /// Number of characters on the line, without the delimiter.
    pub length: usize,
}

impl LineRegion {
    /// Create a new line region.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    /// Characters between the end of `self` and the start of `next`.
    ///
    /// Returns `None` when `next` starts before `self` ends.
    pub fn gap_before(&self, next: &LineRegion) -> Option<usize> {
        next.start.checked_sub(self.end())
    }
}

/// Where the line starting at `line_start` starts once `event` has been applied.
///
/// Edits after the line start leave it in place, even when they split the line or join it with
/// the next one. Returns `None` when the edit removes the line break in front of the line (or a
/// range spanning its start), since the line is merged into the previous one.
pub fn line_start_after_edit(line_start: usize, event: &EditEvent) -> Option<usize> {
    let removed_end = event.offset.saturating_add(event.removed_len);
    if event.offset < line_start {
        if event.removed_len > 0 && removed_end >= line_start {
            return None;
        }
        return Some((line_start - event.removed_len).saturating_add(event.inserted_len()));
    }
    if event.offset > line_start {
        return Some(line_start);
    }
    // Line breaks inserted at the start push the old content onto a later line.
    let pushed = event
        .inserted_text
        .char_indices()
        .filter(|(_, c)| matches!(c, '\n' | '\r'))
        .last()
        .map_or(0, |(i, c)| event.inserted_text[..i + c.len_utf8()].chars().count());
    Some(line_start + pushed)
}

/// Read-only line/offset queries over the current document text.
///
/// Every query is fallible: hosts deliver events while the document is changing, so a query can
/// legitimately reference a position that no longer exists.
pub trait EditBuffer {
    /// Document length in characters.
    fn len_chars(&self) -> usize;

    /// Number of lines. An empty document, and a document ending with a line break, both count
    /// the (empty) last line.
    fn line_count(&self) -> usize;

    /// Line containing `offset`. `offset == len_chars()` is valid and maps to the last line.
    fn line_of_offset(&self, offset: usize) -> Result<usize, BufferError>;

    /// Offset of the first character of `line`.
    fn line_offset(&self, line: usize) -> Result<usize, BufferError>;

    /// Length of `line` in characters, including its line delimiter.
    fn line_length(&self, line: usize) -> Result<usize, BufferError>;

    /// `length` characters starting at `offset`.
    fn text(&self, offset: usize, length: usize) -> Result<String, BufferError>;

    /// The complete document text.
    fn full_text(&self) -> String;

    /// Text of `line`, including its delimiter.
    fn line_text(&self, line: usize) -> Result<String, BufferError> {
        let start = self.line_offset(line)?;
        let length = self.line_length(line)?;
        self.text(start, length)
    }

    /// Text of `line`, without its delimiter.
    fn line_content(&self, line: usize) -> Result<String, BufferError> {
        let mut text = self.line_text(line)?;
        strip_line_delimiter(&mut text);
        Ok(text)
    }

    /// Extent of `line`, without its delimiter.
    fn line_region(&self, line: usize) -> Result<LineRegion, BufferError> {
        let start = self.line_offset(line)?;
        let length = self.line_content(line)?.chars().count();
        Ok(LineRegion::new(start, length))
    }
}

/// Remove one trailing `\n`, `\r\n` or `\r` from `text`.
pub(crate) fn strip_line_delimiter(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
    }
    if text.ends_with('\r') {
        text.pop();
    }
}

/// A rope-backed [`EditBuffer`].
///
/// Rope provides O(log N) line access, insertion and deletion, so mirroring every keystroke stays
/// cheap even for large files.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a buffer from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Apply `event` (remove `removed_len` characters at `offset`, then insert the text).
    pub fn apply(&mut self, event: &EditEvent) -> Result<(), BufferError> {
        let len = self.rope.len_chars();
        let end = event.offset.saturating_add(event.removed_len);
        if end > len {
            return Err(BufferError::RangeOutOfBounds {
                offset: event.offset,
                length: event.removed_len,
                len,
            });
        }

        if event.removed_len > 0 {
            self.rope.remove(event.offset..end);
        }
        if !event.inserted_text.is_empty() {
            self.rope.insert(event.offset, &event.inserted_text);
        }
        Ok(())
    }

    fn check_line(&self, line: usize) -> Result<(), BufferError> {
        let count = self.rope.len_lines();
        if line >= count {
            return Err(BufferError::LineOutOfRange { line, count });
        }
        Ok(())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl EditBuffer for TextBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_of_offset(&self, offset: usize) -> Result<usize, BufferError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(BufferError::OffsetOutOfRange { offset, len });
        }
        Ok(self.rope.char_to_line(offset))
    }

    fn line_offset(&self, line: usize) -> Result<usize, BufferError> {
        self.check_line(line)?;
        Ok(self.rope.line_to_char(line))
    }

    fn line_length(&self, line: usize) -> Result<usize, BufferError> {
        self.check_line(line)?;
        Ok(self.rope.line(line).len_chars())
    }

    fn text(&self, offset: usize, length: usize) -> Result<String, BufferError> {
        let len = self.rope.len_chars();
        let end = offset.saturating_add(length);
        if end > len {
            return Err(BufferError::RangeOutOfBounds {
                offset,
                length,
                len,
            });
        }
        Ok(self.rope.slice(offset..end).to_string())
    }

    fn full_text(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(buffer.len_chars(), 0);
        assert_eq!(buffer.line_of_offset(0), Ok(0));
    }

    #[test]
    fn test_line_queries() {
        let buffer = TextBuffer::from_text("Line1\n Line2\n Line3\n");

        assert_eq!(buffer.line_count(), 4);
        assert_eq!(buffer.line_offset(1), Ok(6));
        assert_eq!(buffer.line_length(1), Ok(7));
        assert_eq!(buffer.line_of_offset(6), Ok(1));
        assert_eq!(buffer.line_of_offset(5), Ok(0)); // the '\n' belongs to line 0
        assert_eq!(buffer.line_text(1).as_deref(), Ok(" Line2\n"));
        assert_eq!(buffer.line_content(1).as_deref(), Ok(" Line2"));
        assert_eq!(buffer.line_region(2), Ok(LineRegion::new(13, 6)));
    }

    #[test]
    fn test_crlf_delimiter_is_not_content() {
        let buffer = TextBuffer::from_text("ab\r\ncd");
        assert_eq!(buffer.line_length(0), Ok(4));
        assert_eq!(buffer.line_content(0).as_deref(), Ok("ab"));
        assert_eq!(buffer.line_region(1), Ok(LineRegion::new(4, 2)));
    }

    #[test]
    fn test_out_of_range_queries() {
        let buffer = TextBuffer::from_text("abc");
        assert_eq!(
            buffer.line_of_offset(4),
            Err(BufferError::OffsetOutOfRange { offset: 4, len: 3 })
        );
        assert_eq!(
            buffer.line_offset(1),
            Err(BufferError::LineOutOfRange { line: 1, count: 1 })
        );
        assert!(buffer.text(2, 5).is_err());
    }

    #[test]
    fn test_apply_insert_and_delete() {
        let mut buffer = TextBuffer::from_text("Hello World");

        buffer.apply(&EditEvent::insert(6, "Beautiful ")).unwrap();
        assert_eq!(buffer.full_text(), "Hello Beautiful World");

        buffer.apply(&EditEvent::delete(6, 10)).unwrap();
        assert_eq!(buffer.full_text(), "Hello World");

        assert!(buffer.apply(&EditEvent::delete(8, 10)).is_err());
        assert_eq!(buffer.full_text(), "Hello World");
    }

    #[test]
    fn test_utf8_cjk_offsets_are_chars() {
        let buffer = TextBuffer::from_text("你好\n世界");
        assert_eq!(buffer.len_chars(), 5);
        assert_eq!(buffer.line_offset(1), Ok(3));
        assert_eq!(buffer.text(3, 2).as_deref(), Ok("世界"));
    }

    #[test]
    fn test_region_gap() {
        let first = LineRegion::new(0, 5);
        let second = LineRegion::new(6, 6);
        assert_eq!(first.gap_before(&second), Some(1));
        assert_eq!(second.gap_before(&first), None);
    }

    #[test]
    fn test_line_start_follows_edits() {
        // "ab\ncd\nef\n", tracking line 1 at offset 3.
        assert_eq!(line_start_after_edit(3, &EditEvent::insert(0, "//")), Some(5));
        assert_eq!(line_start_after_edit(3, &EditEvent::insert(0, "x\ny\n")), Some(7));
        assert_eq!(line_start_after_edit(3, &EditEvent::delete(0, 1)), Some(2));
        assert_eq!(line_start_after_edit(3, &EditEvent::insert(3, "//")), Some(3));
        assert_eq!(line_start_after_edit(3, &EditEvent::insert(3, "x\r\ny")), Some(6));
        // Splitting the line or joining it with the next keeps its start.
        assert_eq!(line_start_after_edit(3, &EditEvent::insert(5, "\nfoo")), Some(3));
        assert_eq!(line_start_after_edit(3, &EditEvent::delete(5, 1)), Some(3));
        // Removing the line break in front merges it into line 0.
        assert_eq!(line_start_after_edit(3, &EditEvent::delete(2, 1)), None);
        assert_eq!(line_start_after_edit(3, &EditEvent::delete(1, 3)), None);
    }
}
