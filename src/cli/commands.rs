//! Argument and console command definitions for the terminal front-end.
//!
//! Startup options use clap derive. While the countdown runs, single-word
//! commands are read from standard input.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::countdown::CountdownCommand;
use crate::types::{ConfigError, DurationSelection, TimerConfig, PICKER_MAX};

// ============================================================================
// CLI Structure
// ============================================================================

/// Tempo - a countdown timer with an audible alarm
#[derive(Parser, Debug)]
#[command(
    name = "tempo",
    version,
    about = "Countdown timer screen with an audible alarm",
    long_about = "Opens the countdown screen. The options pick the starting duration \
                  like the hour, minute and second wheels of a picker.\n\n\
                  While the screen is open, type start, pause, resume, stop, \
                  set <duration>, status, help or quit.",
    propagate_version = true
)]
pub struct Cli {
    /// Hours of the countdown (0-59)
    #[arg(
        short = 'H',
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=PICKER_MAX as i64)
    )]
    pub hours: u32,

    /// Minutes of the countdown (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=PICKER_MAX as i64)
    )]
    pub minutes: u32,

    /// Seconds of the countdown (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=PICKER_MAX as i64)
    )]
    pub seconds: u32,

    /// Duration as HH:MM:SS, MM:SS or SS (replaces the individual fields)
    #[arg(short, long, conflicts_with_all = ["hours", "minutes", "seconds"])]
    pub duration: Option<DurationSelection>,

    /// Start the countdown immediately
    #[arg(long)]
    pub start: bool,

    /// Name of the alarm sound file, without extension
    #[arg(long, default_value = "alarm")]
    pub sound: String,

    /// Directory searched first for the alarm sound
    #[arg(long, env = "TEMPO_SOUND_DIR")]
    pub sound_dir: Option<PathBuf>,

    /// Do not play the alarm sound
    #[arg(long)]
    pub no_sound: bool,

    /// List the alarm sounds found in the search directories and exit
    #[arg(long)]
    pub list_sounds: bool,

    /// Print state changes as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the duration picked on the command line.
    pub fn selection(&self) -> Result<DurationSelection, ConfigError> {
        match self.duration {
            Some(duration) => Ok(duration),
            None => DurationSelection::new(self.hours, self.minutes, self.seconds),
        }
    }

    /// Builds and validates the timer configuration.
    pub fn to_config(&self) -> Result<TimerConfig, ConfigError> {
        let mut config = TimerConfig::default()
            .with_duration(self.selection()?)
            .with_sound_name(self.sound.clone())
            .with_sound_enabled(!self.no_sound);
        if let Some(dir) = &self.sound_dir {
            config = config.with_sound_dir(dir.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Console Commands
// ============================================================================

/// A line typed on the console while the countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Forward to the countdown engine
    Control(CountdownCommand),
    /// Print the current state
    Status,
    /// Print the command list
    Help,
    /// Leave the program
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ConfigError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();
        let unknown = || ConfigError::UnknownCommand(line.trim().to_string());

        if words.next().is_some() {
            return Err(unknown());
        }

        let command = match (word.as_str(), argument) {
            ("start" | "s", None) => Self::Control(CountdownCommand::Start),
            ("pause" | "p", None) => Self::Control(CountdownCommand::Pause),
            ("resume" | "r", None) => Self::Control(CountdownCommand::Resume),
            ("stop" | "x", None) => Self::Control(CountdownCommand::Stop),
            ("set", Some(duration)) => {
                let selection: DurationSelection = duration.parse()?;
                Self::Control(CountdownCommand::Configure(i64::from(
                    selection.total_seconds(),
                )))
            }
            ("set", None) => return Err(ConfigError::InvalidDuration(String::new())),
            ("status" | "?", None) => Self::Status,
            ("help" | "h", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            _ => return Err(unknown()),
        };

        Ok(command)
    }
}

// ============================================================================
// Tests
// ============================================================================
