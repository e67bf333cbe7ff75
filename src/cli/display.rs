//! Display utilities for the terminal front-end.
//!
//! Renders the countdown as a digital clock, the finished alert, and
//! error messages. Formatting lives in `format_*` functions so it can be
//! tested without capturing stdout.

use crate::sound::SoundSource;
use crate::types::{ClockTime, CountdownSnapshot, RunState};

/// Number of left/right offsets in the finished alert.
const SHAKE_FRAMES: usize = 12;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for console output.
pub struct Display;

impl Display {
    /// Prints the current state, as a clock line or a JSON line.
    pub fn show_snapshot(snapshot: &CountdownSnapshot, json: bool) {
        if !json {
            println!("{}", Self::format_snapshot(snapshot));
            return;
        }
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => Self::show_error(&format!("failed to serialize state: {}", e)),
        }
    }

    /// Prints the alert shown when the countdown reaches zero.
    pub fn show_finished(duration_seconds: u32) {
        println!("{}", Self::format_finished(duration_seconds));
    }

    /// Prints a warning when the alarm could not be played.
    pub fn show_alarm_failure(reason: &str) {
        eprintln!("warning: alarm not played: {}", reason);
    }

    /// Prints the console command list.
    pub fn show_help() {
        println!("Commands:");
        println!("  start  (s)          start from the full duration");
        println!("  pause  (p)          pause the countdown");
        println!("  resume (r)          resume a paused countdown");
        println!("  stop   (x)          stop and clear the countdown");
        println!("  set <duration>      set HH:MM:SS, MM:SS or SS");
        println!("  status (?)          show the current state");
        println!("  help   (h)          show this list");
        println!("  quit   (q)          leave");
    }

    /// Prints the sounds found in the search directories.
    pub fn show_sounds(sounds: &[SoundSource]) {
        if sounds.is_empty() {
            println!("No alarm sounds found");
            return;
        }
        for sound in sounds {
            println!("{:<16} {}", sound.name(), sound.path().display());
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Formats a snapshot as `HH:MM:SS  [state]`.
    pub fn format_snapshot(snapshot: &CountdownSnapshot) -> String {
        format!(
            "{}  [{}]",
            snapshot.clock(),
            Self::state_label(snapshot.state)
        )
    }

    /// Formats the finished alert: the configured time shaken side to side.
    pub fn format_finished(duration_seconds: u32) -> String {
        let clock = ClockTime::from_seconds(duration_seconds).to_string();
        let mut lines = vec!["*** TIME'S UP ***".to_string()];
        lines.extend(
            Self::shake_offsets(SHAKE_FRAMES)
                .into_iter()
                .map(|offset| format!("{}{}", " ".repeat(offset), clock)),
        );
        lines.join("\n")
    }

    fn state_label(state: RunState) -> &'static str {
        match state {
            RunState::Idle => "ready",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
            RunState::Finished => "finished",
        }
    }

    /// Alternating indentation, damped towards the end.
    fn shake_offsets(frames: usize) -> Vec<usize> {
        (0..frames)
            .map(|i| {
                let amplitude = 4usize.saturating_sub(i * 4 / frames.max(1));
                if i % 2 == 0 {
                    4 + amplitude
                } else {
                    4 - amplitude.min(4)
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
