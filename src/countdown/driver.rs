//! Async driver for the countdown engine.
//!
//! Owns the engine for the lifetime of the loop and serializes control
//! commands with interval ticks, so no two state changes ever overlap.

use tokio::sync::mpsc;
use tracing::debug;

use super::engine::{CountdownCommand, CountdownEngine};
use super::ticker::IntervalTicker;
use crate::sound::SoundPlayer;

impl<P: SoundPlayer> CountdownEngine<P, IntervalTicker> {
    /// Runs the countdown until the command channel closes.
    ///
    /// Commands take priority over a tick that becomes ready at the same
    /// instant.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<CountdownCommand>) {
        debug!("Countdown driver started");

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => {
                        debug!(?command, "Command received");
                        self.apply(command);
                    }
                    None => break,
                },
                () = self.next_tick() => {}
            }
        }

        debug!("Command channel closed, countdown driver exiting");
    }

    /// Waits for the next interval tick and applies it.
    ///
    /// Pends forever while the ticker is cancelled. Cancel safe, so it can
    /// sit in a `select!` next to other input sources.
    pub async fn next_tick(&mut self) {
        self.ticker_mut().tick().await;
        self.on_tick();
    }
}
