//! Detector tuning.
//!
//! The heuristics carry a few thresholds that were tuned against manual typing speed rather than
//! derived from first principles. They are exposed here so hosts can adjust them from a TOML
//! file:
//!
//! ```toml
//! indent_debounce_ms = 150
//! comment_gap_tolerance = 2
//! disabled = ["trailing-white-space"]
//! ```

use crate::error::ConfigError;
use crate::pattern::PatternId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted `comment_gap_tolerance`.
///
/// Two lines are adjacent when only their delimiter separates them, which is at most two
/// characters (`\r\n`). Four allows one blank line in between and no more.
pub const MAX_COMMENT_GAP_TOLERANCE: usize = 4;

/// Thresholds and switches for the detector set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Minimum time (exclusive) between two adjacent indentation changes for them to count as
    /// separate manual edits.
    pub indent_debounce_ms: u64,
    /// Maximum number of characters between two commented lines for them to count as adjacent.
    pub comment_gap_tolerance: usize,
    /// Require a non-identifier character before `get`/`set` when matching accessor names.
    pub getter_setter_word_boundary: bool,
    /// Patterns whose detectors are left out of new sessions.
    pub disabled: Vec<PatternId>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            indent_debounce_ms: 100,
            comment_gap_tolerance: 2,
            getter_setter_word_boundary: true,
            disabled: Vec::new(),
        }
    }
}

impl DetectorConfig {
    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Debounce window as a [`Duration`].
    pub fn indent_debounce(&self) -> Duration {
        Duration::from_millis(self.indent_debounce_ms)
    }

    /// Returns `true` if the detector for `pattern` should run.
    pub fn is_enabled(&self, pattern: PatternId) -> bool {
        !self.disabled.contains(&pattern)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.comment_gap_tolerance > MAX_COMMENT_GAP_TOLERANCE {
            return Err(ConfigError::Invalid {
                field: "comment_gap_tolerance",
                message: format!(
                    "{} is above {MAX_COMMENT_GAP_TOLERANCE} and would treat non-adjacent lines \
                     as adjacent",
                    self.comment_gap_tolerance
                ),
            });
        }
        Ok(())
    }
}
