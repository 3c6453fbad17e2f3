//! Declared-name extraction interface.
//!
//! The getter/setter heuristic needs the names of variables declared in the document. Producing
//! them requires a real parser, which lives outside the core (see `nudge-treesitter`). The core
//! only defines the seam.

use crate::error::ParseError;

/// Extracts variable-declaration identifiers from a full document snapshot.
///
/// Implementations may keep state between calls (a reusable parser, a cached tree), which is why
/// the method takes `&mut self`. Names are returned exactly as written; callers normalise case.
pub trait DeclarationParser: Send {
    /// Parse `source` and return every declared variable name, in document order.
    fn declared_variables(&mut self, source: &str) -> Result<Vec<String>, ParseError>;
}

/// Builds one [`DeclarationParser`] per session.
pub type DeclarationParserFactory = Box<dyn Fn() -> Box<dyn DeclarationParser> + Send>;

impl<F> DeclarationParser for F
where
    F: FnMut(&str) -> Result<Vec<String>, ParseError> + Send,
{
    fn declared_variables(&mut self, source: &str) -> Result<Vec<String>, ParseError> {
        self(source)
    }
}
