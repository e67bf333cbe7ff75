//! Tempo Countdown Timer Library
//!
//! This library provides the core functionality for the Tempo countdown timer.
//! It includes:
//! - Countdown engine with an injectable tick source and audio output
//! - Async tick driver built on `tokio::time::interval`
//! - Alarm sound resolution and playback
//! - Type definitions for run state, observable snapshots and configuration
//! - Terminal front-end argument parsing and display utilities

pub mod cli;
pub mod countdown;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ClockTime, ConfigError, CountdownSnapshot, DurationSelection, RunState, TimerConfig,
};

// Re-export countdown types
pub use countdown::{
    CountdownCommand, CountdownEngine, CountdownEvent, IntervalTicker, ManualTicker, TickSource,
};

// Re-export sound types
pub use sound::{AlarmSound, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
