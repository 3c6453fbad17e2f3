//! Stable pattern identifiers.

use crate::error::UnknownPattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A detectable manual-action class.
///
/// The string form (see [`PatternId::as_str`]) is the wire identifier shared with the
/// notification layer and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
    /// Consecutive lines commented out one at a time.
    BlockComment,
    /// Leading whitespace adjusted by hand on adjacent lines.
    CorrectIndentation,
    /// Trailing whitespace deleted by hand.
    TrailingWhiteSpace,
    /// An import typed while a type is unresolved.
    AddImportStatements,
    /// A save with an unused import still outstanding.
    RemoveUnusedImportStatements,
    /// An accessor hand-written for a declared field.
    GetterSetter,
}

impl PatternId {
    /// Every pattern, in detector dispatch order.
    pub const ALL: [PatternId; 6] = [
        PatternId::BlockComment,
        PatternId::RemoveUnusedImportStatements,
        PatternId::AddImportStatements,
        PatternId::CorrectIndentation,
        PatternId::GetterSetter,
        PatternId::TrailingWhiteSpace,
    ];

    /// The stable wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            PatternId::BlockComment => "block-comment",
            PatternId::CorrectIndentation => "correct-indentation",
            PatternId::TrailingWhiteSpace => "trailing-white-space",
            PatternId::AddImportStatements => "add-import-statements",
            PatternId::RemoveUnusedImportStatements => "remove-unused-import-statements",
            PatternId::GetterSetter => "getter-setter",
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternId {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPattern(s.to_string()))
    }
}
