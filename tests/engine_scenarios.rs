//! End-to-end scenarios for the countdown engine.
//!
//! These tests drive `TimerEngine` through its public API with a manual
//! tick source and a recording audio sink:
//! - Default display and the first tick
//! - Crossing from session into break, with and without the cue
//! - Undo during a break
//! - Length clamping, stop idempotence and reset
//! - The one-tick-handle invariant under arbitrary intent sequences

use std::sync::Arc;

use proptest::prelude::*;
use tokio::sync::mpsc;

use pomodoro_clock::engine::{ClockState, Intent, ManualScheduler, TimerEngine, TimerEvent};
use pomodoro_clock::prefs::{MemoryStore, Preferences, BREAK_LENGTH_KEY, SESSION_LENGTH_KEY};
use pomodoro_clock::sound::{AudioCommand, MockAudioSink};
use pomodoro_clock::types::{SessionAdjustPolicy, TimerConfig, TimerPhase};

// ============================================================================
// Test Helpers
// ============================================================================

type Engine = TimerEngine<ManualScheduler>;

struct Harness {
    engine: Engine,
    audio: Arc<MockAudioSink>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
}

fn harness_with(config: TimerConfig, preferences: Preferences) -> Harness {
    let (tx, events) = mpsc::unbounded_channel();
    let audio = Arc::new(MockAudioSink::new());
    let engine = TimerEngine::new(
        config,
        preferences,
        ManualScheduler::new(),
        Box::new(audio.clone()),
        tx,
    );
    Harness {
        engine,
        audio,
        events,
    }
}

fn harness() -> Harness {
    harness_with(TimerConfig::default(), Preferences::default())
}

/// Delivers `count` ticks from the active handle.
fn tick(engine: &mut Engine, count: usize) {
    for _ in 0..count {
        let handle = engine.active_tick().expect("clock should be running");
        engine.on_tick(handle);
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn assert_one_handle_iff_running(engine: &Engine) {
    let running = engine.state().running;
    assert_eq!(engine.has_active_tick(), running);
    assert_eq!(engine.scheduler().active_count(), usize::from(running));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn defaults_show_twenty_five_minutes() {
    let h = harness();

    assert_eq!(h.engine.snapshot().display, "25:00");
    assert_eq!(h.engine.snapshot().phase, TimerPhase::Session);
    assert!(!h.engine.snapshot().running);
}

#[test]
fn first_tick_counts_one_second() {
    let mut h = harness();
    h.engine.start();
    tick(&mut h.engine, 1);

    assert_eq!(h.engine.state().remaining_seconds, 1499);
    assert_eq!(h.engine.snapshot().display, "24:59");
}

#[test]
fn session_end_crosses_into_break_with_cue() {
    let mut h = harness();
    h.engine.adjust_session_length(-24);
    h.engine.start();

    tick(&mut h.engine, 60);
    assert_eq!(h.engine.snapshot().display, "00:00");
    assert_eq!(h.engine.state().phase, TimerPhase::Session);
    assert_eq!(h.audio.play_count(), 0);

    tick(&mut h.engine, 1);
    assert_eq!(h.engine.state().phase, TimerPhase::Break);
    assert_eq!(h.engine.state().remaining_seconds, 300);
    assert_eq!(h.audio.play_count(), 1);
    assert!(drain(&mut h.events).contains(&TimerEvent::PhaseChanged {
        phase: TimerPhase::Break,
        cue_played: true,
    }));
}

#[test]
fn muted_crossing_requests_no_cue() {
    let mut h = harness();
    h.engine.set_muted(true);
    h.engine.adjust_session_length(-24);
    h.engine.start();

    tick(&mut h.engine, 61);

    assert_eq!(h.engine.state().phase, TimerPhase::Break);
    assert_eq!(h.engine.state().remaining_seconds, 300);
    assert_eq!(h.audio.count(AudioCommand::Play), 0);
}

#[test]
fn break_end_crosses_back_into_session() {
    let mut h = harness_with(
        TimerConfig::default()
            .with_session_minutes(1)
            .with_break_minutes(1),
        Preferences::default(),
    );
    h.engine.start();

    tick(&mut h.engine, 61 + 61);

    assert_eq!(h.engine.state().phase, TimerPhase::Session);
    assert_eq!(h.engine.state().remaining_seconds, 60);
    assert_eq!(h.audio.play_count(), 2);
    assert!(h.engine.state().running);
}

#[test]
fn undo_during_break_reloads_session() {
    let mut h = harness_with(
        TimerConfig::default()
            .with_session_minutes(1)
            .with_break_minutes(3)
            .with_session_adjust(SessionAdjustPolicy::KeepBreak),
        Preferences::default(),
    );
    h.engine.start();
    tick(&mut h.engine, 61 + 60);
    h.engine.adjust_session_length(29);
    assert_eq!(h.engine.state().phase, TimerPhase::Break);
    assert_eq!(h.engine.state().remaining_seconds, 120);

    h.engine.undo();

    assert_eq!(h.engine.state().phase, TimerPhase::Session);
    assert_eq!(h.engine.state().remaining_seconds, 1800);
    assert!(h.engine.state().running);
    assert_one_handle_iff_running(&h.engine);
}

#[test]
fn undo_on_plain_state() {
    let config = TimerConfig::default();
    let mut state = ClockState::new(30, 5, false);
    state.phase = TimerPhase::Break;
    state.remaining_seconds = 120;

    let effects = state.apply(&config, Intent::Undo);

    assert!(effects.is_empty());
    assert_eq!(state.phase, TimerPhase::Session);
    assert_eq!(state.remaining_seconds, 1800);
}

#[test]
fn session_length_never_drops_below_one() {
    let mut h = harness_with(
        TimerConfig::default().with_session_minutes(1),
        Preferences::default(),
    );
    h.engine.adjust_session_length(-1);

    assert_eq!(h.engine.state().session_minutes, 1);
    assert_eq!(h.engine.snapshot().display, "01:00");
}

#[test]
fn reset_restores_defaults_and_keeps_mute() {
    let mut h = harness();
    h.engine.toggle_mute();
    h.engine.adjust_session_length(10);
    h.engine.adjust_break_length(10);
    h.engine.start();
    tick(&mut h.engine, 5);

    h.engine.reset();

    let snapshot = h.engine.snapshot();
    assert_eq!(snapshot.remaining_seconds, 1500);
    assert_eq!(snapshot.phase, TimerPhase::Session);
    assert_eq!(snapshot.session_minutes, 25);
    assert_eq!(snapshot.break_minutes, 5);
    assert!(!snapshot.running);
    assert!(snapshot.muted);
    assert_one_handle_iff_running(&h.engine);
    assert_eq!(
        h.audio.calls(),
        vec![AudioCommand::Pause, AudioCommand::SeekToStart]
    );
}

#[test]
fn stored_preferences_seed_lengths() {
    let store = MemoryStore::new()
        .with(SESSION_LENGTH_KEY, "50")
        .with(BREAK_LENGTH_KEY, "ten");
    let h = harness_with(TimerConfig::default(), Preferences::load(&store));

    assert_eq!(h.engine.state().session_minutes, 50);
    assert_eq!(h.engine.state().break_minutes, 5);
    assert_eq!(h.engine.snapshot().display, "50:00");
}

#[test]
fn stale_tick_after_restart_is_ignored() {
    let mut h = harness();
    h.engine.start();
    let first = h.engine.active_tick().unwrap();
    h.engine.stop();
    h.engine.start();

    h.engine.on_tick(first);
    h.engine.on_tick(first);

    assert_eq!(h.engine.state().remaining_seconds, 1500);
    assert_one_handle_iff_running(&h.engine);
}

// ============================================================================
// Properties
// ============================================================================

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Start),
        Just(Intent::Stop),
        Just(Intent::Toggle),
        Just(Intent::Tick),
        Just(Intent::Reset),
        Just(Intent::Undo),
        (-70i32..70).prop_map(Intent::AdjustSession),
        (-70i32..70).prop_map(Intent::AdjustBreak),
        any::<bool>().prop_map(Intent::SetMuted),
        Just(Intent::ToggleMute),
    ]
}

proptest! {
    #[test]
    fn lengths_stay_in_range(deltas in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut h = harness();
        for delta in deltas {
            h.engine.adjust_session_length(delta);
            h.engine.adjust_break_length(delta);
            let state = h.engine.state();
            prop_assert!((1..=60).contains(&state.session_minutes));
            prop_assert!((1..=60).contains(&state.break_minutes));
        }
    }

    #[test]
    fn tick_handle_matches_running(intents in prop::collection::vec(intent_strategy(), 0..60)) {
        let mut h = harness();
        for intent in intents {
            match intent {
                Intent::Tick => {
                    if let Some(handle) = h.engine.active_tick() {
                        h.engine.on_tick(handle);
                    }
                }
                other => h.engine.dispatch(other),
            }
            let running = h.engine.state().running;
            prop_assert_eq!(h.engine.has_active_tick(), running);
            prop_assert_eq!(h.engine.scheduler().active_count(), usize::from(running));
        }
    }

    #[test]
    fn stop_is_idempotent(intents in prop::collection::vec(intent_strategy(), 0..30)) {
        let mut h = harness();
        for intent in intents {
            h.engine.dispatch(intent);
        }
        h.engine.stop();
        let once = h.engine.snapshot();
        h.engine.stop();

        prop_assert_eq!(h.engine.snapshot(), once);
        prop_assert!(!h.engine.has_active_tick());
    }

    #[test]
    fn reset_returns_to_session_defaults(intents in prop::collection::vec(intent_strategy(), 0..30)) {
        let mut h = harness();
        for intent in intents {
            h.engine.dispatch(intent);
        }
        h.engine.reset();

        prop_assert_eq!(h.engine.state().remaining_seconds, 1500);
        prop_assert_eq!(h.engine.state().phase, TimerPhase::Session);
        prop_assert!(!h.engine.has_active_tick());
    }
}
