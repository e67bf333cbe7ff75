//! Integration tests for the countdown engine.
//!
//! These tests drive the engine through the public API only:
//! - Synthetic ticks through `ManualTicker`
//! - Real intervals on tokio's paused clock through the driver loop
//! - Alarm resolution against a temporary sound directory

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use tempo::countdown::{
    CountdownCommand, CountdownEngine, CountdownEvent, IntervalTicker, ManualTicker, TickSource,
};
use tempo::sound::{AlarmSound, MockSoundPlayer, SoundPlayer};
use tempo::types::{DurationSelection, RunState};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a sound directory holding `alarm.mp3`.
fn create_sound_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("alarm.mp3"), b"mp3").unwrap();
    dir
}

fn alarm_in(dir: &TempDir) -> AlarmSound {
    AlarmSound::new("alarm", vec![dir.path().to_path_buf()])
}

fn create_manual_engine(
    dir: &TempDir,
) -> (
    CountdownEngine<Arc<MockSoundPlayer>, ManualTicker>,
    Arc<MockSoundPlayer>,
) {
    let player = Arc::new(MockSoundPlayer::new());
    let engine = CountdownEngine::new(Arc::clone(&player), ManualTicker::new(), alarm_in(dir));
    (engine, player)
}

// ============================================================================
// Synthetic Ticks
// ============================================================================

#[test]
fn configure_then_read_yields_duration() {
    let dir = create_sound_dir();
    let (mut engine, _player) = create_manual_engine(&dir);

    for duration in [0_i64, 1, 2, 90, 3600, 215_999] {
        engine.configure(duration);
        assert_eq!(i64::from(engine.remaining_seconds()), duration);
        assert_eq!(engine.state(), RunState::Idle);
    }
}

#[test]
fn picker_selection_configures_engine() {
    let dir = create_sound_dir();
    let (mut engine, _player) = create_manual_engine(&dir);
    let selection = DurationSelection::new(0, 2, 5).unwrap();

    engine.configure(i64::from(selection.total_seconds()));

    assert_eq!(engine.remaining_seconds(), 125);
    assert_eq!(engine.snapshot().clock().to_string(), "00:02:05");
}

#[test]
fn pause_resume_round_trip_keeps_remaining_time() {
    let dir = create_sound_dir();
    let (mut engine, _player) = create_manual_engine(&dir);
    engine.configure(60);
    engine.start();

    for _ in 0..10 {
        engine.on_tick();
    }
    engine.pause();
    for _ in 0..25 {
        engine.on_tick();
    }
    engine.resume();

    assert_eq!(engine.remaining_seconds(), 50);
    assert_eq!(engine.state(), RunState::Running);
}

#[test]
fn zero_crossing_finishes_and_restarts() {
    let dir = create_sound_dir();
    let (mut engine, player) = create_manual_engine(&dir);
    engine.configure(2);
    engine.start();

    engine.on_tick();
    engine.on_tick();

    assert_eq!(engine.state(), RunState::Finished);
    assert!(engine.just_finished());
    assert_eq!(engine.remaining_seconds(), 2);
    assert_eq!(player.play_count(), 1);
    assert!(!engine.ticker().is_active());

    engine.start();

    assert_eq!(engine.state(), RunState::Running);
    assert_eq!(engine.remaining_seconds(), 2);
    assert!(!engine.just_finished());
}

#[test]
fn pause_and_resume_from_idle_do_nothing() {
    let dir = create_sound_dir();
    let (mut engine, _player) = create_manual_engine(&dir);

    engine.pause();
    engine.resume();

    assert_eq!(engine.state(), RunState::Idle);
    assert_eq!(engine.remaining_seconds(), 0);
}

#[test]
fn stop_twice_equals_stop_once() {
    let dir = create_sound_dir();
    let (mut engine, _player) = create_manual_engine(&dir);
    engine.configure(10);
    engine.start();
    engine.on_tick();

    engine.stop();
    let once = engine.snapshot();
    engine.stop();

    assert_eq!(engine.snapshot(), once);
    assert_eq!(once.state, RunState::Stopped);
    assert_eq!(once.remaining_seconds, 0);
    assert!(!engine.ticker().is_active());
}

#[test]
fn pause_after_finish_does_not_silence_alarm() {
    let dir = create_sound_dir();
    let (mut engine, player) = create_manual_engine(&dir);
    engine.configure(1);
    engine.start();
    engine.on_tick();

    engine.pause();

    assert_eq!(engine.state(), RunState::Finished);
    assert!(player.is_playing());
}

#[test]
fn missing_alarm_keeps_engine_usable() {
    let empty = tempfile::tempdir().unwrap();
    let (mut engine, player) = create_manual_engine(&empty);
    let (tx, mut rx) = mpsc::unbounded_channel();
    engine = engine.with_events(tx);

    engine.configure(1);
    engine.start();
    engine.on_tick();

    assert_eq!(engine.state(), RunState::Finished);
    assert_eq!(player.play_count(), 0);

    let mut failed = false;
    while let Ok(event) = rx.try_recv() {
        failed |= matches!(event, CountdownEvent::AlarmFailed { .. });
    }
    assert!(failed);

    engine.start();
    assert_eq!(engine.state(), RunState::Running);
}

// ============================================================================
// Driver Loop on the Paused Clock
// ============================================================================

#[tokio::test(start_paused = true)]
async fn driver_runs_full_session() {
    let dir = create_sound_dir();
    let player = Arc::new(MockSoundPlayer::new());
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let mut engine = CountdownEngine::new(Arc::clone(&player), IntervalTicker::new(), alarm_in(&dir))
        .with_events(event_tx);
    let snapshots = engine.subscribe();
    let (tx, rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        engine.run(rx).await;
        engine
    });

    tx.send(CountdownCommand::Configure(5)).unwrap();
    tx.send(CountdownCommand::Start).unwrap();

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(snapshots.borrow().remaining_seconds, 3);

    tx.send(CountdownCommand::Pause).unwrap();
    sleep(Duration::from_secs(30)).await;
    assert_eq!(snapshots.borrow().remaining_seconds, 3);

    tx.send(CountdownCommand::Resume).unwrap();
    sleep(Duration::from_secs(4)).await;

    let snapshot = *snapshots.borrow();
    assert_eq!(snapshot.state, RunState::Finished);
    assert!(snapshot.just_finished);
    assert_eq!(snapshot.remaining_seconds, 5);
    assert_eq!(player.play_count(), 1);

    drop(tx);
    let engine = task.await.unwrap();
    assert!(!engine.ticker().is_active());

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    let ticks = received
        .iter()
        .filter(|e| matches!(e, CountdownEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 5);
    assert_eq!(
        received.last(),
        Some(&CountdownEvent::Finished {
            duration_seconds: 5
        })
    );
}

#[tokio::test(start_paused = true)]
async fn driver_reconfigure_mid_run() {
    let dir = create_sound_dir();
    let player = Arc::new(MockSoundPlayer::new());
    let mut engine = CountdownEngine::new(Arc::clone(&player), IntervalTicker::new(), alarm_in(&dir));
    let snapshots = engine.subscribe();
    let (tx, rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        engine.run(rx).await;
        engine
    });

    tx.send(CountdownCommand::Configure(10)).unwrap();
    tx.send(CountdownCommand::Start).unwrap();
    sleep(Duration::from_millis(3500)).await;

    tx.send(CountdownCommand::Configure(-4)).unwrap();
    sleep(Duration::from_secs(5)).await;

    let snapshot = *snapshots.borrow();
    assert_eq!(snapshot.state, RunState::Idle);
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.duration_seconds, 0);
    assert_eq!(player.play_count(), 0);

    drop(tx);
    task.await.unwrap();
}
