use crate::declarations::DeclarationParser;
use crate::detector::{Detector, EditContext};
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::BufferError;
use crate::pattern::PatternId;
use nudge_lang::LanguageProfile;
use std::collections::BTreeSet;
use std::fmt;

/// Detects a getter or setter typed by hand for a field that is already declared.
///
/// The edited line is trimmed and lower-cased. When it opens with an access modifier, the
/// document is re-parsed and the declared names refreshed, once per line being edited: further
/// keystrokes on the same line reuse those names until an edit lands anywhere else or crosses a
/// line break. The line then triggers when it ends with an accessor prefix followed by a
/// declared name, optionally joined by `_` (`getname`, `set_name`).
///
/// With `word_boundary` set, the prefix must not be glued to a preceding identifier character,
/// so a field `name` does not fire on `public String targetname`.
pub struct GetterSetterDetector {
    language: LanguageProfile,
    prefixes: Vec<String>,
    parser: Option<Box<dyn DeclarationParser>>,
    word_boundary: bool,
    declared: BTreeSet<String>,
    parsed_line: Option<usize>,
}

impl fmt::Debug for GetterSetterDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetterSetterDetector")
            .field("prefixes", &self.prefixes)
            .field("has_parser", &self.parser.is_some())
            .field("word_boundary", &self.word_boundary)
            .field("declared", &self.declared)
            .field("parsed_line", &self.parsed_line)
            .finish()
    }
}

impl GetterSetterDetector {
    /// Create a detector.
    ///
    /// Without a `parser` the declared-name set stays empty and the detector never triggers.
    pub fn new(
        language: &LanguageProfile,
        parser: Option<Box<dyn DeclarationParser>>,
        word_boundary: bool,
    ) -> Self {
        Self {
            language: language.clone(),
            prefixes: language
                .accessor_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| p.to_lowercase())
                .collect(),
            parser,
            word_boundary,
            declared: BTreeSet::new(),
            parsed_line: None,
        }
    }

    /// Lower-cased names from the most recent successful parse.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    fn refresh_names(&mut self, source: &str) {
        let Some(parser) = self.parser.as_mut() else {
            return;
        };
        match parser.declared_variables(source) {
            Ok(names) => {
                self.declared = names
                    .into_iter()
                    .filter(|name| !name.is_empty())
                    .map(|name| name.to_lowercase())
                    .collect();
            }
            Err(err) => {
                tracing::warn!(%err, "declaration parse failed, keeping previous names");
            }
        }
    }

    fn is_accessor(&self, line: &str) -> bool {
        self.prefixes
            .iter()
            .filter(|prefix| line.contains(prefix.as_str()))
            .any(|prefix| {
                self.declared.iter().any(|name| {
                    self.ends_with_accessor(line, &format!("{prefix}{name}"))
                        || self.ends_with_accessor(line, &format!("{prefix}_{name}"))
                })
            })
    }

    fn ends_with_accessor(&self, line: &str, accessor: &str) -> bool {
        let Some(head) = line.strip_suffix(accessor) else {
            return false;
        };
        !self.word_boundary
            || !head
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    /// Whether `event`, seen before it is applied, stays inside `line` without splitting it.
    fn stays_on_line(cx: &EditContext<'_>, line: usize) -> Result<bool, BufferError> {
        let event = cx.event;
        if event.inserted_text.contains(['\n', '\r']) {
            return Ok(false);
        }
        let removed_end = event.offset.saturating_add(event.removed_len);
        Ok(cx.buffer.line_of_offset(event.offset)? == line
            && cx.buffer.line_of_offset(removed_end)? == line)
    }

    fn edited_line(cx: &EditContext<'_>) -> Result<(usize, String), BufferError> {
        let line = cx.buffer.line_of_offset(cx.event.offset)?;
        Ok((line, cx.buffer.line_content(line)?.trim().to_lowercase()))
    }
}

impl Detector for GetterSetterDetector {
    fn pattern(&self) -> PatternId {
        PatternId::GetterSetter
    }

    fn before_edit(&mut self, cx: &EditContext<'_>) -> bool {
        let stays = self
            .parsed_line
            .is_some_and(|line| Self::stays_on_line(cx, line).unwrap_or(false));
        if !stays {
            self.parsed_line = None;
        }
        false
    }

    fn after_edit(&mut self, cx: &EditContext<'_>) -> bool {
        let (line_number, line) = match Self::edited_line(cx) {
            Ok(edited) => edited,
            Err(err) => {
                tracing::trace!(%err, "accessor check outside document");
                return false;
            }
        };
        if self.language.leading_access_modifier(&line).is_none() {
            return false;
        }

        if self.parsed_line != Some(line_number) {
            self.refresh_names(&cx.buffer.full_text());
            self.parsed_line = Some(line_number);
        }
        self.is_accessor(&line)
    }

    fn diagnostics_changed(&mut self, _snapshot: &DiagnosticSnapshot) -> bool {
        false
    }
}
