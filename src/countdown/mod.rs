//! Countdown engine and its tick driver.
//!
//! - `engine`: the state machine (configure/start/pause/resume/stop/tick)
//! - `ticker`: tick sources (tokio interval, manual)
//! - `driver`: async loop serializing commands and ticks

mod driver;
pub mod engine;
pub mod ticker;

pub use engine::{CountdownCommand, CountdownEngine, CountdownEvent};
pub use ticker::{IntervalTicker, ManualTicker, TickSource, TICK_PERIOD};
