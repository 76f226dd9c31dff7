//! Countdown state machine.
//!
//! `ClockState::apply` is a pure transition: it mutates the state for one
//! intent and returns the side effects the driver has to carry out. Nothing
//! in here touches a timer, a channel or an audio device.

use serde::{Deserialize, Serialize};

use crate::types::{
    adjust_minutes, format_clock, SessionAdjustPolicy, StartPhasePolicy, TimerConfig,
    TimerPhase, TimerSnapshot,
};

// ============================================================================
// Intent / Effect
// ============================================================================

/// A request from the presentation layer (or the tick source).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Begin counting down
    Start,
    /// Stop counting down
    Stop,
    /// Start when idle, stop when running
    Toggle,
    /// One polling period elapsed
    Tick,
    /// Back to configured defaults
    Reset,
    /// Reload the session time without stopping
    Undo,
    /// Change the session length by a signed amount
    AdjustSession(i32),
    /// Change the break length by a signed amount
    AdjustBreak(i32),
    /// Set cue suppression
    SetMuted(bool),
    /// Flip cue suppression
    ToggleMute,
}

/// A side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Register the repeating tick (replacing any existing one)
    ScheduleTick,
    /// Release the repeating tick
    CancelTick,
    /// Play the cue
    PlayCue,
    /// Pause the cue and rewind it to the start
    RewindCue,
}

// ============================================================================
// ClockState
// ============================================================================

/// Mutable runtime state of the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    /// Current session length in minutes (1-60)
    pub session_minutes: u32,
    /// Current break length in minutes (1-60)
    pub break_minutes: u32,
    /// Active phase
    pub phase: TimerPhase,
    /// Seconds left in the active phase
    pub remaining_seconds: u32,
    /// Whether the countdown is in progress
    pub running: bool,
    /// Whether the cue is suppressed
    pub muted: bool,
}

impl ClockState {
    /// Creates an idle state in the session phase.
    ///
    /// `session_minutes` and `break_minutes` are clamped into range.
    pub fn new(session_minutes: u32, break_minutes: u32, muted: bool) -> Self {
        let session_minutes = adjust_minutes(session_minutes, 0);
        Self {
            session_minutes,
            break_minutes: adjust_minutes(break_minutes, 0),
            phase: TimerPhase::Session,
            remaining_seconds: session_minutes * 60,
            running: false,
            muted,
        }
    }

    /// Creates an idle state from the configured defaults.
    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(
            config.default_session_minutes,
            config.default_break_minutes,
            config.muted,
        )
    }

    /// Returns the remaining time as `MM:SS`.
    pub fn display_text(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Returns the full length of `phase` in seconds.
    pub fn phase_seconds(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Session => self.session_minutes * 60,
            TimerPhase::Break => self.break_minutes * 60,
        }
    }

    /// Returns a snapshot for the presentation layer.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            display: self.display_text(),
            running: self.running,
            muted: self.muted,
            session_minutes: self.session_minutes,
            break_minutes: self.break_minutes,
        }
    }

    /// Applies one intent and returns the effects to execute, in order.
    pub fn apply(&mut self, config: &TimerConfig, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Start => self.start(config),
            Intent::Stop => self.stop(),
            Intent::Toggle => {
                if self.running {
                    self.stop()
                } else {
                    self.start(config)
                }
            }
            Intent::Tick => self.tick(),
            Intent::Reset => self.reset(config),
            Intent::Undo => {
                self.phase = TimerPhase::Session;
                self.remaining_seconds = self.phase_seconds(TimerPhase::Session);
                Vec::new()
            }
            Intent::AdjustSession(delta) => {
                self.session_minutes = adjust_minutes(self.session_minutes, delta);
                let keep_break = config.session_adjust == SessionAdjustPolicy::KeepBreak
                    && self.phase == TimerPhase::Break;
                if !keep_break {
                    self.remaining_seconds = self.phase_seconds(TimerPhase::Session);
                }
                Vec::new()
            }
            Intent::AdjustBreak(delta) => {
                self.break_minutes = adjust_minutes(self.break_minutes, delta);
                Vec::new()
            }
            Intent::SetMuted(muted) => {
                self.muted = muted;
                Vec::new()
            }
            Intent::ToggleMute => {
                self.muted = !self.muted;
                Vec::new()
            }
        }
    }

    fn start(&mut self, config: &TimerConfig) -> Vec<Effect> {
        if self.running {
            return Vec::new();
        }
        self.running = true;
        if config.start_phase == StartPhasePolicy::Session {
            self.phase = TimerPhase::Session;
        }
        vec![Effect::ScheduleTick]
    }

    fn stop(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        vec![Effect::CancelTick]
    }

    fn tick(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return Vec::new();
        }

        // The countdown ran past zero: cross into the other phase.
        self.phase = self.phase.opposite();
        self.remaining_seconds = self.phase_seconds(self.phase);
        if self.muted {
            Vec::new()
        } else {
            vec![Effect::PlayCue]
        }
    }

    fn reset(&mut self, config: &TimerConfig) -> Vec<Effect> {
        *self = Self::new(
            config.default_session_minutes,
            config.default_break_minutes,
            self.muted,
        );
        vec![Effect::CancelTick, Effect::RewindCue]
    }
}

// ============================================================================
// Tests
// ============================================================================
