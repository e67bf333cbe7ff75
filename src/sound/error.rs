//! Alarm sound errors.
//!
//! None of these stop the countdown: the engine logs the error, reports
//! it as an `AlarmFailed` event and finishes silently.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons the alarm could not be heard.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No search directory holds a file with the alarm name.
    #[error("alarm sound '{name}' not found in {searched} search location(s)")]
    NotResolved {
        /// Asset name without extension
        name: String,
        /// Number of directories searched
        searched: usize,
    },

    /// The resolved file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a supported audio format.
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// No default audio output.
    #[error("no audio output device: {0}")]
    NoDevice(String),

    /// The output exists but refused a new sink.
    #[error("cannot open audio sink: {0}")]
    Sink(String),
}

impl SoundError {
    /// Returns true when the asset itself is the problem, not the audio output.
    #[must_use]
    pub fn is_missing_asset(&self) -> bool {
        matches!(
            self,
            Self::NotResolved { .. } | Self::Open { .. } | Self::Decode { .. }
        )
    }

    /// Hint shown next to the warning.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotResolved { .. } | Self::Open { .. } => {
                "add the sound to a search directory or pass --sound-dir"
            }
            Self::Decode { .. } => "use an mp3, wav, aiff, m4a or flac file",
            Self::NoDevice(_) | Self::Sink(_) => "check the system audio output, or use --no-sound",
        }
    }
}
