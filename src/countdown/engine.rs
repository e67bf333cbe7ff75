//! Countdown engine.
//!
//! A single-owner state machine:
//!
//! ```text
//! Idle ──start──▶ Running ──pause──▶ Paused
//!   ▲               │  ▲               │
//!   │ configure     │  └────resume─────┘
//!   │               ▼
//!   │            Finished (remaining hits 0)
//!   │
//! any ──stop──▶ Stopped;  Stopped/Finished/Idle ──start──▶ Running
//! ```
//!
//! Every operation is total: calls that make no sense in the current state
//! are ignored. Observers follow the engine through a `watch` channel of
//! [`CountdownSnapshot`]s and, optionally, an event stream.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::ticker::{IntervalTicker, TickSource};
use crate::sound::{AlarmSound, SoundPlayer};
use crate::types::{CountdownSnapshot, RunState};

// ============================================================================
// CountdownEvent
// ============================================================================

/// Discrete events emitted on effective transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A new duration was configured
    Configured {
        /// Configured duration in seconds
        duration_seconds: u32,
    },
    /// Countdown started from the full duration
    Started {
        /// Configured duration in seconds
        duration_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds at the time of the pause
        remaining_seconds: u32,
    },
    /// Countdown resumed
    Resumed {
        /// Remaining seconds at the time of the resume
        remaining_seconds: u32,
    },
    /// Countdown stopped
    Stopped,
    /// One second elapsed
    Tick {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Finished {
        /// Configured duration in seconds
        duration_seconds: u32,
    },
    /// The alarm could not be played
    AlarmFailed {
        /// Human-readable cause
        reason: String,
    },
}

// ============================================================================
// CountdownCommand
// ============================================================================

/// Control operations, as sent to a running driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownCommand {
    /// Configure a new duration in seconds (negative clamps to 0)
    Configure(i64),
    Start,
    Pause,
    Resume,
    Stop,
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown state machine driving alarm playback and state publication.
pub struct CountdownEngine<P, T = IntervalTicker> {
    duration_seconds: u32,
    remaining_seconds: u32,
    state: RunState,
    just_finished: bool,
    ticker: T,
    player: P,
    alarm: AlarmSound,
    snapshot_tx: watch::Sender<CountdownSnapshot>,
    event_tx: Option<mpsc::UnboundedSender<CountdownEvent>>,
}

impl<P: SoundPlayer, T: TickSource> CountdownEngine<P, T> {
    /// Creates an idle engine with a zero duration.
    pub fn new(player: P, ticker: T, alarm: AlarmSound) -> Self {
        let (snapshot_tx, _) = watch::channel(CountdownSnapshot::default());
        Self {
            duration_seconds: 0,
            remaining_seconds: 0,
            state: RunState::Idle,
            just_finished: false,
            ticker,
            player,
            alarm,
            snapshot_tx,
            event_tx: None,
        }
    }

    /// Attaches an event channel. A dropped receiver is tolerated.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the current observable state.
    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            state: self.state,
            remaining_seconds: self.remaining_seconds,
            duration_seconds: self.duration_seconds,
            is_paused: self.state == RunState::Paused,
            just_finished: self.just_finished,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn just_finished(&self) -> bool {
        self.just_finished
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub(crate) fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Dispatches a command to the matching operation.
    pub fn apply(&mut self, command: CountdownCommand) {
        match command {
            CountdownCommand::Configure(seconds) => self.configure(seconds),
            CountdownCommand::Start => self.start(),
            CountdownCommand::Pause => self.pause(),
            CountdownCommand::Resume => self.resume(),
            CountdownCommand::Stop => self.stop(),
        }
    }

    /// Ends any active run and sets a new duration.
    ///
    /// Negative input clamps to 0; input beyond `u32::MAX` clamps to it.
    /// The finished flag is left as is; only `start` and `resume` clear it.
    pub fn configure(&mut self, seconds: i64) {
        if seconds < 0 {
            debug!(seconds, "Negative duration clamped to 0");
        }
        let duration = u32::try_from(seconds.max(0)).unwrap_or(u32::MAX);

        self.halt();
        self.duration_seconds = duration;
        self.remaining_seconds = duration;
        self.state = RunState::Idle;

        info!(duration_seconds = duration, "Countdown configured");
        self.emit(CountdownEvent::Configured {
            duration_seconds: duration,
        });
        self.publish();
    }

    /// Starts counting down from the full duration.
    ///
    /// Accepted from Idle, Stopped and Finished.
    pub fn start(&mut self) {
        if !self.state.can_start() {
            debug!(state = %self.state, "Start ignored");
            return;
        }

        self.remaining_seconds = self.duration_seconds;
        self.state = RunState::Running;
        self.just_finished = false;
        self.ticker.start();

        info!(duration_seconds = self.duration_seconds, "Countdown started");
        self.emit(CountdownEvent::Started {
            duration_seconds: self.duration_seconds,
        });
        self.publish();
    }

    /// Suspends the countdown and silences the alarm.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            debug!(state = %self.state, "Pause ignored");
            return;
        }

        self.state = RunState::Paused;
        self.player.stop();

        info!(remaining_seconds = self.remaining_seconds, "Countdown paused");
        self.emit(CountdownEvent::Paused {
            remaining_seconds: self.remaining_seconds,
        });
        self.publish();
    }

    /// Continues a paused countdown.
    pub fn resume(&mut self) {
        if self.state != RunState::Paused {
            debug!(state = %self.state, "Resume ignored");
            return;
        }

        self.state = RunState::Running;
        self.just_finished = false;

        info!(remaining_seconds = self.remaining_seconds, "Countdown resumed");
        self.emit(CountdownEvent::Resumed {
            remaining_seconds: self.remaining_seconds,
        });
        self.publish();
    }

    /// Stops the countdown from any state. Idempotent.
    pub fn stop(&mut self) {
        let was_stopped = self.state == RunState::Stopped;

        self.halt();
        self.remaining_seconds = 0;
        self.state = RunState::Stopped;

        if !was_stopped {
            info!("Countdown stopped");
            self.emit(CountdownEvent::Stopped);
        }
        self.publish();
    }

    /// Applies one tick. Ignored unless running.
    pub fn on_tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        debug!(remaining_seconds = self.remaining_seconds, "Tick");
        self.emit(CountdownEvent::Tick {
            remaining_seconds: self.remaining_seconds,
        });

        if self.remaining_seconds == 0 {
            self.finish();
        }
        self.publish();
    }

    /// Zero-crossing: alarm, flag, and the display snaps back to the duration.
    fn finish(&mut self) {
        self.ticker.cancel();
        self.play_alarm();
        self.just_finished = true;
        self.state = RunState::Finished;
        self.remaining_seconds = self.duration_seconds;

        info!(duration_seconds = self.duration_seconds, "Countdown finished");
        self.emit(CountdownEvent::Finished {
            duration_seconds: self.duration_seconds,
        });
    }

    fn play_alarm(&mut self) {
        if self.player.is_disabled() {
            debug!("Alarm sound disabled, skipping");
            return;
        }

        let result = self
            .alarm
            .resolve()
            .and_then(|source| self.player.play(&source));

        if let Err(e) = result {
            warn!(
                error = %e,
                suggestion = e.suggestion(),
                "Alarm playback failed, continuing without sound"
            );
            self.emit(CountdownEvent::AlarmFailed {
                reason: e.to_string(),
            });
        }
    }

    /// Cancels ticks and releases the audio output.
    fn halt(&mut self) {
        self.ticker.cancel();
        self.player.stop();
    }

    fn emit(&self, event: CountdownEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

impl<P, T> std::fmt::Debug for CountdownEngine<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("state", &self.state)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("duration_seconds", &self.duration_seconds)
            .field("just_finished", &self.just_finished)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
