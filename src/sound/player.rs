//! Sound player implementation using rodio.
//!
//! The output device is opened when the alarm starts and released when it is
//! stopped or has finished playing, so the device is only held while sound
//! is actually coming out.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use super::error::SoundError;
use super::source::SoundSource;

/// Stream and sink kept alive while a sound plays.
struct ActivePlayback {
    _stream: OutputStream,
    sink: Sink,
}

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking. The player is meant to be owned by a single
/// countdown and is not shared across threads.
pub struct RodioSoundPlayer {
    active: RefCell<Option<ActivePlayback>>,
    disabled: Cell<bool>,
}

impl RodioSoundPlayer {
    /// Creates a new sound player. No audio device is touched until `play`.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self {
            active: RefCell::new(None),
            disabled: Cell::new(disabled),
        }
    }

    /// Plays a sound file, replacing any sound already playing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sound file cannot be opened
    /// - The audio format cannot be decoded
    /// - No output device is available
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.get() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        self.stop();

        let path = source.path();
        let file = File::open(path).map_err(|source| SoundError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| SoundError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| SoundError::NoDevice(e.to_string()))?;
        let sink = Sink::try_new(&stream_handle).map_err(|e| SoundError::Sink(e.to_string()))?;

        sink.append(decoder);
        *self.active.borrow_mut() = Some(ActivePlayback {
            _stream: stream,
            sink,
        });

        debug!("Playing sound: {}", source.name());
        Ok(())
    }

    /// Stops playback and releases the output device.
    pub fn stop(&self) {
        if let Some(playback) = self.active.borrow_mut().take() {
            playback.sink.stop();
            debug!("Sound playback stopped, audio device released");
        }
    }

    /// Returns true while a sound is still playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.release_if_drained();
        self.active.borrow().is_some()
    }

    fn release_if_drained(&self) {
        let drained = self
            .active
            .borrow()
            .as_ref()
            .is_some_and(|playback| playback.sink.empty());
        if drained {
            self.active.borrow_mut().take();
            debug!("Sound finished, audio device released");
        }
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.set(false);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback and silences anything playing.
    pub fn disable(&self) {
        self.disabled.set(true);
        self.stop();
        debug!("Sound playback disabled");
    }
}

impl Default for RodioSoundPlayer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.get())
            .field("playing", &self.active.borrow().is_some())
            .finish()
    }
}
