//! Timer engine for the clock.
//!
//! This module drives the pure state machine in `state`:
//! - Executes tick scheduling effects against a `TickScheduler`
//! - Forwards cue commands to an `AudioSink`
//! - Publishes `TimerEvent`s for the presentation layer
//! - Drops ticks from intervals it has already cancelled

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::prefs::Preferences;
use crate::sound::AudioSink;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot};

use super::scheduler::{TickHandle, TickScheduler};
use super::state::{ClockState, Effect, Intent};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events published after the engine handled an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// Phase the countdown runs in
        phase: TimerPhase,
    },
    /// Countdown stopped
    Stopped,
    /// One second counted down
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown crossed into the other phase
    PhaseChanged {
        /// Phase now active
        phase: TimerPhase,
        /// Whether the cue was requested
        cue_played: bool,
    },
    /// Clock restored to defaults
    Reset,
    /// Session time reloaded
    Undone,
    /// Session or break length changed
    LengthsChanged {
        /// Session length in minutes
        session_minutes: u32,
        /// Break length in minutes
        break_minutes: u32,
    },
    /// Cue suppression changed
    MuteChanged {
        /// New mute flag
        muted: bool,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the clock state and its single repeating tick.
pub struct TimerEngine<S: TickScheduler> {
    /// Construction-time configuration
    config: TimerConfig,
    /// Current clock state
    state: ClockState,
    /// Tick source
    scheduler: S,
    /// The one live tick handle, present exactly while running
    active_tick: Option<TickHandle>,
    /// Cue output
    audio: Box<dyn AudioSink>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl<S: TickScheduler> TimerEngine<S> {
    /// Creates an idle engine.
    ///
    /// Stored preferences override the configured lengths when present.
    pub fn new(
        config: TimerConfig,
        preferences: Preferences,
        scheduler: S,
        audio: Box<dyn AudioSink>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let config = config.normalized();
        let state = ClockState::new(
            preferences
                .session_minutes
                .unwrap_or(config.default_session_minutes),
            preferences
                .break_minutes
                .unwrap_or(config.default_break_minutes),
            config.muted,
        );

        debug!(
            session_minutes = state.session_minutes,
            break_minutes = state.break_minutes,
            tick_interval_ms = config.tick_interval_ms,
            "Timer engine created"
        );

        Self {
            config,
            state,
            scheduler,
            active_tick: None,
            audio,
            event_tx,
        }
    }

    /// Applies an intent, runs its effects and publishes events.
    pub fn dispatch(&mut self, intent: Intent) {
        let before = self.state.clone();
        let effects = self.state.apply(&self.config, intent);
        trace!(?intent, ?effects, "Intent applied");

        for effect in &effects {
            self.run_effect(*effect);
        }

        self.publish(intent, &before, &effects);
    }

    /// Handles a tick delivered by the scheduler.
    ///
    /// Ticks from any handle other than the active one are stale and ignored.
    pub fn on_tick(&mut self, handle: TickHandle) {
        if self.active_tick != Some(handle) {
            trace!(handle = handle.id(), "Ignoring stale tick");
            return;
        }
        self.dispatch(Intent::Tick);
    }

    /// Starts the countdown; a no-op while running.
    pub fn start(&mut self) {
        self.dispatch(Intent::Start);
    }

    /// Stops the countdown and releases the tick.
    pub fn stop(&mut self) {
        self.dispatch(Intent::Stop);
    }

    /// Starts when idle, stops when running.
    pub fn toggle(&mut self) {
        self.dispatch(Intent::Toggle);
    }

    /// Restores the configured defaults and rewinds the cue.
    pub fn reset(&mut self) {
        self.dispatch(Intent::Reset);
    }

    /// Reloads the session time without stopping.
    pub fn undo(&mut self) {
        self.dispatch(Intent::Undo);
    }

    /// Changes the session length by `delta` minutes, clamped to 1-60.
    pub fn adjust_session_length(&mut self, delta: i32) {
        self.dispatch(Intent::AdjustSession(delta));
    }

    /// Changes the break length by `delta` minutes, clamped to 1-60.
    pub fn adjust_break_length(&mut self, delta: i32) {
        self.dispatch(Intent::AdjustBreak(delta));
    }

    /// Sets cue suppression.
    pub fn set_muted(&mut self, muted: bool) {
        self.dispatch(Intent::SetMuted(muted));
    }

    /// Flips cue suppression.
    pub fn toggle_mute(&mut self) {
        self.dispatch(Intent::ToggleMute);
    }

    /// Returns a snapshot of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns a reference to the current state.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns true if a tick handle is registered.
    pub fn has_active_tick(&self) -> bool {
        self.active_tick.is_some()
    }

    /// Returns the active tick handle.
    pub fn active_tick(&self) -> Option<TickHandle> {
        self.active_tick
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns a mutable reference to the state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut ClockState {
        &mut self.state
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleTick => {
                self.cancel_tick();
                let handle = self.scheduler.schedule(self.config.tick_interval());
                self.active_tick = Some(handle);
            }
            Effect::CancelTick => self.cancel_tick(),
            Effect::PlayCue => {
                if let Err(e) = self.audio.play() {
                    warn!("Failed to play cue: {}", e);
                }
            }
            Effect::RewindCue => {
                if let Err(e) = self.audio.pause() {
                    warn!("Failed to pause cue: {}", e);
                }
                if let Err(e) = self.audio.seek_to_start() {
                    warn!("Failed to rewind cue: {}", e);
                }
            }
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.active_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn publish(&self, intent: Intent, before: &ClockState, effects: &[Effect]) {
        let state = &self.state;
        let mut events = Vec::new();

        match intent {
            Intent::Start | Intent::Toggle if state.running && !before.running => {
                info!(phase = state.phase.as_str(), "Countdown started");
                events.push(TimerEvent::Started { phase: state.phase });
            }
            Intent::Stop | Intent::Toggle if !state.running && before.running => {
                info!(remaining = state.remaining_seconds, "Countdown stopped");
                events.push(TimerEvent::Stopped);
            }
            Intent::Tick if state.phase != before.phase => {
                let cue_played = effects.contains(&Effect::PlayCue);
                info!(phase = state.phase.as_str(), cue_played, "Phase changed");
                events.push(TimerEvent::PhaseChanged {
                    phase: state.phase,
                    cue_played,
                });
            }
            Intent::Tick if state.remaining_seconds != before.remaining_seconds => {
                events.push(TimerEvent::Tick {
                    remaining_seconds: state.remaining_seconds,
                });
            }
            Intent::Reset => {
                info!("Clock reset to defaults");
                events.push(TimerEvent::Reset);
            }
            Intent::Undo => events.push(TimerEvent::Undone),
            Intent::AdjustSession(_) | Intent::AdjustBreak(_) => {
                events.push(TimerEvent::LengthsChanged {
                    session_minutes: state.session_minutes,
                    break_minutes: state.break_minutes,
                });
            }
            Intent::SetMuted(_) | Intent::ToggleMute if state.muted != before.muted => {
                events.push(TimerEvent::MuteChanged { muted: state.muted });
            }
            _ => {}
        }

        for event in events {
            if self.event_tx.send(event).is_err() {
                trace!("Event receiver closed");
            }
        }
    }
}

impl<S: TickScheduler> Drop for TimerEngine<S> {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}

// ============================================================================
// Tests
// ============================================================================
