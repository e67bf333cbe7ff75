//! Tempo - a countdown timer with an audible alarm
//!
//! The terminal is the timer screen. Pick a duration with the options, then
//! drive the countdown from the console:
//! - start / pause / resume / stop
//! - set a new duration at any time
//! - an alarm plays and the clock shakes when time is up

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use tempo::cli::{Cli, ConsoleCommand, Display};
use tempo::countdown::{CountdownEngine, CountdownEvent, IntervalTicker};
use tempo::sound::RodioSoundPlayer;
use tempo::types::CountdownSnapshot;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the countdown until the console closes or Ctrl-C is pressed.
async fn execute(cli: Cli) -> Result<()> {
    let config = cli.to_config().context("invalid timer configuration")?;
    let alarm = config.alarm_sound();

    if cli.list_sounds {
        Display::show_sounds(&alarm.discover());
        return Ok(());
    }

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let player = RodioSoundPlayer::new(!config.sound_enabled);
    let mut engine =
        CountdownEngine::new(player, IntervalTicker::new(), alarm).with_events(event_tx);
    let mut snapshots = engine.subscribe();

    engine.configure(i64::from(config.duration.total_seconds()));
    if cli.start {
        engine.start();
    }
    Display::show_snapshot(&snapshots.borrow_and_update(), cli.json);
    drain_events(&mut events, cli.json);

    let mut console = spawn_console();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;

            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
            line = console.recv() => match line {
                Some(ConsoleCommand::Control(command)) => {
                    debug!(?command, "Console command");
                    engine.apply(command);
                }
                Some(ConsoleCommand::Status) => {
                    Display::show_snapshot(&engine.snapshot(), cli.json);
                }
                Some(ConsoleCommand::Help) => Display::show_help(),
                Some(ConsoleCommand::Quit) | None => {
                    info!("Console closed");
                    break;
                }
            },
            () = engine.next_tick() => {}
        }

        render(&mut snapshots, &mut events, cli.json);
    }

    engine.stop();
    render(&mut snapshots, &mut events, cli.json);
    Ok(())
}

/// Reads console lines on a dedicated thread.
///
/// The channel closes at end of input or after `quit`.
fn spawn_console() -> mpsc::UnboundedReceiver<ConsoleCommand> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ConsoleCommand>() {
                Ok(command) => {
                    let quit = command == ConsoleCommand::Quit;
                    if tx.send(command).is_err() || quit {
                        break;
                    }
                }
                Err(e) => Display::show_error(&e.to_string()),
            }
        }
    });

    rx
}

/// Prints the state change and alerts left by the last engine step.
fn render(
    snapshots: &mut watch::Receiver<CountdownSnapshot>,
    events: &mut mpsc::UnboundedReceiver<CountdownEvent>,
    json: bool,
) {
    if snapshots.has_changed().unwrap_or(false) {
        Display::show_snapshot(&snapshots.borrow_and_update(), json);
    }
    drain_events(events, json);
}

fn drain_events(events: &mut mpsc::UnboundedReceiver<CountdownEvent>, json: bool) {
    while let Ok(event) = events.try_recv() {
        match event {
            CountdownEvent::Finished { duration_seconds } if !json => {
                Display::show_finished(duration_seconds);
            }
            CountdownEvent::AlarmFailed { reason } => Display::show_alarm_failure(&reason),
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
