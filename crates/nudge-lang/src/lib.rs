#![warn(missing_docs)]
//! `nudge-lang` - data-driven language profiles for `nudge-core`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parser or
//! diagnostics provider. It provides small structs that hosts can use to tell the detectors
//! which tokens and compiler messages matter for a given language.

/// Shape of a compiler diagnostic message, matched by prefix and/or suffix.
///
/// An empty prefix or suffix matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePattern {
    /// Required message prefix (e.g. `"The import"`).
    pub prefix: String,
    /// Required message suffix (e.g. `"never used"`).
    pub suffix: String,
}

impl MessagePattern {
    /// A pattern that only constrains the start of the message.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    /// A pattern that only constrains the end of the message.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            suffix: suffix.into(),
        }
    }

    /// A pattern constraining both ends of the message.
    pub fn enclosed(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Returns `true` if `message` has the configured prefix and suffix.
    pub fn matches(&self, message: &str) -> bool {
        message.starts_with(&self.prefix) && message.ends_with(&self.suffix)
    }
}

/// Tokens and diagnostic shapes the detectors need for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    /// File extensions (without the dot) of documents that get a session.
    pub file_extensions: Vec<String>,
    /// Line comment token (e.g. `//`).
    pub line_comment: String,
    /// Keyword that opens an import statement, including its trailing space.
    pub import_keyword: String,
    /// Modifiers that may open an accessor declaration, including their trailing space.
    pub access_modifiers: Vec<String>,
    /// Accessor name prefixes, lower-case (e.g. `get`, `set`).
    pub accessor_prefixes: Vec<String>,
    /// Diagnostic reported for a type that has no import.
    pub unresolved_type: MessagePattern,
    /// Diagnostic reported for an import nothing refers to.
    pub unused_import: MessagePattern,
}

impl LanguageProfile {
    /// The built-in Java profile, matching the messages of the Eclipse Java compiler.
    pub fn java() -> Self {
        Self {
            file_extensions: vec!["java".to_string()],
            line_comment: "//".to_string(),
            import_keyword: "import ".to_string(),
            access_modifiers: vec!["public ".to_string(), "protected ".to_string()],
            accessor_prefixes: vec!["get".to_string(), "set".to_string()],
            unresolved_type: MessagePattern::suffix("cannot be resolved to a type"),
            unused_import: MessagePattern::enclosed("The import", "never used"),
        }
    }

    /// Returns `true` if a document at `uri` should be tracked with this profile.
    ///
    /// The comparison is case-insensitive on the extension.
    pub fn tracks_uri(&self, uri: &str) -> bool {
        let Some((_, ext)) = uri.rsplit_once('.') else {
            return false;
        };
        self.file_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    /// Returns the access modifier `line` starts with, if any. `line` is expected lower-case.
    pub fn leading_access_modifier(&self, line: &str) -> Option<&str> {
        self.access_modifiers
            .iter()
            .map(String::as_str)
            .find(|modifier| !modifier.is_empty() && line.starts_with(modifier))
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::java()
    }
}
