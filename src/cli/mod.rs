//! Terminal front-end for the countdown timer.
//!
//! - `commands`: startup options (clap derive) and console commands
//! - `display`: clock rendering and messages

pub mod commands;
pub mod display;

pub use commands::{Cli, ConsoleCommand};
pub use display::Display;
