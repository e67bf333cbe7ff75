//! Alarm sound playback.
//!
//! This module provides the audio capability used by the countdown engine:
//!
//! - Named alarm asset resolution against a list of directories
//! - Non-blocking playback that can be stopped
//! - Graceful degradation when the asset or the audio device is missing
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  resolve   ┌──────────────────┐
//! │   AlarmSound     │──────────▶│   SoundSource    │
//! │ (name + dirs)    │            │  (file on disk)  │
//! └──────────────────┘            └────────┬─────────┘
//!                                          │ play / stop
//!                                          ▼
//!                                 ┌──────────────────┐
//!                                 │   SoundPlayer    │
//!                                 └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use tempo::sound::{AlarmSound, RodioSoundPlayer};
//!
//! let player = RodioSoundPlayer::new(false);
//! if let Ok(source) = AlarmSound::default().resolve() {
//!     let _ = player.play(&source);
//! }
//! player.stop();
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::RodioSoundPlayer;
pub use source::{AlarmSound, SoundSource};

/// Audio output capability.
///
/// Implementations acquire the output device for the duration of playback
/// and release it on `stop` or when the sound ends.
pub trait SoundPlayer {
    /// Starts playing a sound. Must not block until the sound ends.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot start.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Stops any sound currently playing. Safe to call when idle.
    fn stop(&self);

    /// Returns true while a sound is playing.
    fn is_playing(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn stop(&self) {
        RodioSoundPlayer::stop(self)
    }

    fn is_playing(&self) -> bool {
        RodioSoundPlayer::is_playing(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Arc<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn stop(&self) {
        (**self).stop()
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    stop_calls: AtomicUsize,
    playing: AtomicBool,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Simulates the sound reaching its end.
    pub fn finish_playback(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
        self.stop_calls.store(0, Ordering::SeqCst);
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::NoDevice("mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}
