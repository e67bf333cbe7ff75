//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Run state of the countdown
//! - The observable snapshot published to the presentation layer
//! - Duration selection (the hours/minutes/seconds picker) with validation
//! - Timer configuration

mod error;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sound::AlarmSound;

pub use error::ConfigError;

/// Largest value each picker wheel offers.
pub const PICKER_MAX: u32 = 59;

// ============================================================================
// RunState
// ============================================================================

/// Represents the current run state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Configured but never started
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Suspended; ticks are ignored
    Paused,
    /// Stopped by the user
    Stopped,
    /// Reached zero
    Finished,
}

impl RunState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
            RunState::Finished => "finished",
        }
    }

    /// Returns true if `start()` is accepted from this state.
    pub fn can_start(&self) -> bool {
        matches!(self, RunState::Idle | RunState::Stopped | RunState::Finished)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ClockTime
// ============================================================================

/// Remaining time split into clock components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    /// Splits a number of seconds into hours, minutes and seconds.
    pub fn from_seconds(total_seconds: u32) -> Self {
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

// ============================================================================
// CountdownSnapshot
// ============================================================================

/// Observable state of the countdown, published on every effective change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    /// Current run state
    pub state: RunState,
    /// Remaining seconds shown on the display
    pub remaining_seconds: u32,
    /// Configured duration in seconds
    pub duration_seconds: u32,
    /// Whether the countdown is paused
    pub is_paused: bool,
    /// One-shot flag raised when the countdown reaches zero
    pub just_finished: bool,
}

impl CountdownSnapshot {
    /// Returns the remaining time as clock components.
    pub fn clock(&self) -> ClockTime {
        ClockTime::from_seconds(self.remaining_seconds)
    }
}

// ============================================================================
// DurationSelection
// ============================================================================

/// A duration picked on the hours/minutes/seconds wheels.
///
/// Each wheel ranges over `0..=59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationSelection {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DurationSelection {
    /// Creates a validated selection.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if any field exceeds the wheel range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ConfigError> {
        let selection = Self {
            hours,
            minutes,
            seconds,
        };
        selection.validate()?;
        Ok(selection)
    }

    /// Validates every field against the wheel range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
        ] {
            if value > PICKER_MAX {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    max: PICKER_MAX,
                });
            }
        }
        Ok(())
    }

    /// Combines the wheels into a single duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl FromStr for DurationSelection {
    type Err = ConfigError;

    /// Parses `HH:MM:SS`, `MM:SS` or `SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidDuration(s.to_string());

        let parts = s
            .trim()
            .split(':')
            .map(|part| part.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let (hours, minutes, seconds) = match parts.as_slice() {
            [s] => (0, 0, *s),
            [m, s] => (0, *m, *s),
            [h, m, s] => (*h, *m, *s),
            _ => return Err(invalid()),
        };

        Self::new(hours, minutes, seconds)
    }
}

impl fmt::Display for DurationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for the countdown timer front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Initial countdown duration
    pub duration: DurationSelection,
    /// Name of the alarm sound asset (without extension)
    pub sound_name: String,
    /// Directories searched for the alarm sound, in order
    pub sound_dirs: Vec<PathBuf>,
    /// Whether the alarm sound is played
    pub sound_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration: DurationSelection::default(),
            sound_name: AlarmSound::DEFAULT_NAME.to_string(),
            sound_dirs: AlarmSound::default_search_dirs(),
            sound_enabled: true,
        }
    }
}

impl TimerConfig {
    /// Sets the initial duration.
    pub fn with_duration(mut self, duration: DurationSelection) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the alarm sound name.
    pub fn with_sound_name(mut self, name: impl Into<String>) -> Self {
        self.sound_name = name.into();
        self
    }

    /// Puts a directory in front of the sound search path.
    pub fn with_sound_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sound_dirs.insert(0, dir.into());
        self
    }

    /// Enables or disables the alarm sound.
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.duration.validate()?;
        if self.sound_name.trim().is_empty() {
            return Err(ConfigError::EmptySoundName);
        }
        Ok(())
    }

    /// Builds the alarm sound lookup from this configuration.
    pub fn alarm_sound(&self) -> AlarmSound {
        AlarmSound::new(self.sound_name.clone(), self.sound_dirs.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // RunState Tests
    // ------------------------------------------------------------------------

    mod run_state_tests {
        use super::*;

        #[test]
        fn test_default_is_idle() {
            assert_eq!(RunState::default(), RunState::Idle);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(RunState::Idle.as_str(), "idle");
            assert_eq!(RunState::Running.as_str(), "running");
            assert_eq!(RunState::Paused.as_str(), "paused");
            assert_eq!(RunState::Stopped.as_str(), "stopped");
            assert_eq!(RunState::Finished.as_str(), "finished");
        }

        #[test]
        fn test_can_start() {
            assert!(RunState::Idle.can_start());
            assert!(RunState::Stopped.can_start());
            assert!(RunState::Finished.can_start());
            assert!(!RunState::Running.can_start());
            assert!(!RunState::Paused.can_start());
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&RunState::Finished).unwrap();
            assert_eq!(json, "\"finished\"");
        }
    }

    // ------------------------------------------------------------------------
    // ClockTime Tests
    // ------------------------------------------------------------------------

    mod clock_time_tests {
        use super::*;

        #[test]
        fn test_zero() {
            assert_eq!(ClockTime::from_seconds(0).to_string(), "00:00:00");
        }

        #[test]
        fn test_components() {
            let clock = ClockTime::from_seconds(3 * 3600 + 25 * 60 + 7);
            assert_eq!(clock.hours, 3);
            assert_eq!(clock.minutes, 25);
            assert_eq!(clock.seconds, 7);
            assert_eq!(clock.to_string(), "03:25:07");
        }

        #[test]
        fn test_hours_do_not_wrap_at_a_day() {
            let clock = ClockTime::from_seconds(59 * 3600 + 59 * 60 + 59);
            assert_eq!(clock.to_string(), "59:59:59");
        }
    }

    // ------------------------------------------------------------------------
    // DurationSelection Tests
    // ------------------------------------------------------------------------

    mod duration_selection_tests {
        use super::*;

        #[test]
        fn test_total_seconds() {
            let selection = DurationSelection::new(1, 2, 3).unwrap();
            assert_eq!(selection.total_seconds(), 3723);
        }

        #[test]
        fn test_max_selection() {
            let selection = DurationSelection::new(59, 59, 59).unwrap();
            assert_eq!(selection.total_seconds(), 59 * 3600 + 59 * 60 + 59);
        }

        #[test]
        fn test_out_of_range() {
            let err = DurationSelection::new(0, 60, 0).unwrap_err();
            assert_eq!(
                err,
                ConfigError::OutOfRange {
                    field: "minutes",
                    value: 60,
                    max: 59
                }
            );
        }

        #[test]
        fn test_parse_seconds_only() {
            let selection: DurationSelection = "45".parse().unwrap();
            assert_eq!(selection.total_seconds(), 45);
        }

        #[test]
        fn test_parse_minutes_seconds() {
            let selection: DurationSelection = "5:30".parse().unwrap();
            assert_eq!(selection.minutes, 5);
            assert_eq!(selection.seconds, 30);
        }

        #[test]
        fn test_parse_full() {
            let selection: DurationSelection = " 01:00:05 ".parse().unwrap();
            assert_eq!(selection.total_seconds(), 3605);
            assert_eq!(selection.to_string(), "01:00:05");
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(matches!(
                "abc".parse::<DurationSelection>(),
                Err(ConfigError::InvalidDuration(_))
            ));
            assert!(matches!(
                "1:2:3:4".parse::<DurationSelection>(),
                Err(ConfigError::InvalidDuration(_))
            ));
            assert!(matches!(
                "-5".parse::<DurationSelection>(),
                Err(ConfigError::InvalidDuration(_))
            ));
        }

        #[test]
        fn test_parse_rejects_out_of_range() {
            let err = "90".parse::<DurationSelection>().unwrap_err();
            assert!(err.is_range_error());
        }
    }

    // ------------------------------------------------------------------------
    // CountdownSnapshot Tests
    // ------------------------------------------------------------------------

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_default_snapshot() {
            let snapshot = CountdownSnapshot::default();
            assert_eq!(snapshot.state, RunState::Idle);
            assert_eq!(snapshot.remaining_seconds, 0);
            assert!(!snapshot.is_paused);
            assert!(!snapshot.just_finished);
        }

        #[test]
        fn test_clock() {
            let snapshot = CountdownSnapshot {
                remaining_seconds: 61,
                ..Default::default()
            };
            assert_eq!(snapshot.clock().to_string(), "00:01:01");
        }

        #[test]
        fn test_serialize_field_names() {
            let snapshot = CountdownSnapshot {
                state: RunState::Running,
                remaining_seconds: 10,
                duration_seconds: 20,
                is_paused: false,
                just_finished: false,
            };
            let json = serde_json::to_value(snapshot).unwrap();
            assert_eq!(json["state"], "running");
            assert_eq!(json["remaining_seconds"], 10);
            assert_eq!(json["duration_seconds"], 20);
        }
    }

    // ------------------------------------------------------------------------
    // TimerConfig Tests
    // ------------------------------------------------------------------------

    mod timer_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = TimerConfig::default();
            assert_eq!(config.duration.total_seconds(), 0);
            assert_eq!(config.sound_name, "alarm");
            assert!(config.sound_enabled);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builder_pattern() {
            let config = TimerConfig::default()
                .with_duration(DurationSelection::new(0, 1, 30).unwrap())
                .with_sound_name("bell")
                .with_sound_dir("/tmp/sounds")
                .with_sound_enabled(false);

            assert_eq!(config.duration.total_seconds(), 90);
            assert_eq!(config.sound_name, "bell");
            assert_eq!(config.sound_dirs[0], PathBuf::from("/tmp/sounds"));
            assert!(!config.sound_enabled);
        }

        #[test]
        fn test_validate_empty_sound_name() {
            let config = TimerConfig::default().with_sound_name("  ");
            assert_eq!(config.validate(), Err(ConfigError::EmptySoundName));
        }

        #[test]
        fn test_validate_duration_out_of_range() {
            let config = TimerConfig {
                duration: DurationSelection {
                    hours: 61,
                    minutes: 0,
                    seconds: 0,
                },
                ..Default::default()
            };
            assert!(config.validate().unwrap_err().is_range_error());
        }

        #[test]
        fn test_alarm_sound_uses_config() {
            let config = TimerConfig::default()
                .with_sound_name("bell")
                .with_sound_dir("/opt/tempo");
            let alarm = config.alarm_sound();
            assert_eq!(alarm.name(), "bell");
            assert_eq!(alarm.search_dirs()[0], PathBuf::from("/opt/tempo"));
        }
    }
}
