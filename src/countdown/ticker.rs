//! Tick sources for the countdown engine.
//!
//! The engine only needs to start and cancel its tick source; delivering the
//! ticks is the driver's job. `IntervalTicker` is the real one-second clock,
//! `ManualTicker` lets tests inject ticks by hand.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Period between two countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable, recurring tick source.
pub trait TickSource {
    /// Starts (or restarts) the periodic ticks.
    fn start(&mut self);

    /// Cancels the ticks. Cancelling an inactive source is a no-op.
    fn cancel(&mut self);

    /// Returns true while ticks are scheduled.
    fn is_active(&self) -> bool;
}

// ============================================================================
// IntervalTicker
// ============================================================================

/// Tick source backed by `tokio::time::interval`.
///
/// The first tick fires one full period after `start`, and ticks missed
/// while the runtime was busy are skipped rather than bursted.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick. Pends forever while cancelled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for IntervalTicker {
    /// Must be called from within a tokio runtime.
    fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}

// ============================================================================
// ManualTicker
// ============================================================================

/// Tick source that never fires on its own; tests call `on_tick` directly.
#[derive(Debug, Default)]
pub struct ManualTicker {
    active: bool,
    starts: usize,
    cancels: usize,
}

impl ManualTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the source was started.
    pub fn start_count(&self) -> usize {
        self.starts
    }

    /// Number of times the source was cancelled while active.
    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        self.active = true;
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.cancels += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
