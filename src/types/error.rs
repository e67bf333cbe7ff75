//! Configuration error types.
//!
//! Errors raised while turning user input into a countdown duration. The
//! engine itself never fails on bad durations (it clamps); these errors are
//! surfaced by the picker and the terminal front-end.

use thiserror::Error;

/// Errors that can occur while building a countdown configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A picker field is outside its wheel range.
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field ("hours", "minutes", "seconds").
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },

    /// The duration text could not be parsed.
    #[error("invalid duration '{0}': expected HH:MM:SS, MM:SS or SS")]
    InvalidDuration(String),

    /// The alarm sound name is empty.
    #[error("alarm sound name cannot be empty")]
    EmptySoundName,

    /// A console line did not match any command.
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),
}

impl ConfigError {
    /// Returns true if the error comes from a picker field range check.
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
