//! Core data types for the clock.
//!
//! This module defines the data structures used for:
//! - Phase tracking (session / break)
//! - Timer configuration with per-field defaults
//! - Length clamping and `MM:SS` formatting
//! - State snapshots handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::sound::CueSource;

// ============================================================================
// Constants
// ============================================================================

/// Smallest allowed session or break length, in minutes.
pub const MIN_MINUTES: u32 = 1;

/// Largest allowed session or break length, in minutes.
pub const MAX_MINUTES: u32 = 60;

/// Default session length in minutes.
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Default break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Default polling interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

// ============================================================================
// TimerPhase
// ============================================================================

/// Which of the two countdowns is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Work session
    #[default]
    Session,
    /// Break between sessions
    Break,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Session => "session",
            TimerPhase::Break => "break",
        }
    }

    /// Returns the phase a countdown crosses into when it runs out.
    pub fn opposite(&self) -> Self {
        match self {
            TimerPhase::Session => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Session,
        }
    }
}

// ============================================================================
// Policies
// ============================================================================

/// What changing the session length does to a countdown in the break phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionAdjustPolicy {
    /// Always reload the remaining time with the new session length,
    /// even while a break is counting down.
    #[default]
    AlwaysReset,
    /// Leave a break's remaining time alone; the new length applies to the
    /// next session.
    KeepBreak,
}

/// Which phase `start` resumes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartPhasePolicy {
    /// Every start switches the phase back to session.
    #[default]
    Session,
    /// Resume in whatever phase the clock was stopped in.
    Keep,
}

// ============================================================================
// TimerConfig
// ============================================================================

fn default_session_minutes() -> u32 {
    DEFAULT_SESSION_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

/// Construction-time configuration of the clock.
///
/// Every field has a default, so a partial JSON document deserializes into
/// a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session length restored by reset (1-60)
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,
    /// Break length restored by reset (1-60)
    #[serde(default = "default_break_minutes")]
    pub default_break_minutes: u32,
    /// Polling period of the countdown
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Whether the cue starts muted
    #[serde(default)]
    pub muted: bool,
    /// Sound played when the countdown crosses into the other phase
    #[serde(default)]
    pub cue: CueSource,
    /// Behaviour of session adjustments during a break
    #[serde(default)]
    pub session_adjust: SessionAdjustPolicy,
    /// Phase selected by start
    #[serde(default)]
    pub start_phase: StartPhasePolicy,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_session_minutes: DEFAULT_SESSION_MINUTES,
            default_break_minutes: DEFAULT_BREAK_MINUTES,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            muted: false,
            cue: CueSource::default(),
            session_adjust: SessionAdjustPolicy::default(),
            start_phase: StartPhasePolicy::default(),
        }
    }
}

impl TimerConfig {
    /// Sets the default session length.
    pub fn with_session_minutes(mut self, minutes: u32) -> Self {
        self.default_session_minutes = minutes;
        self
    }

    /// Sets the default break length.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.default_break_minutes = minutes;
        self
    }

    /// Sets the tick interval.
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Sets the initial mute flag.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Sets the cue sound.
    pub fn with_cue(mut self, cue: CueSource) -> Self {
        self.cue = cue;
        self
    }

    /// Sets the session adjustment policy.
    pub fn with_session_adjust(mut self, policy: SessionAdjustPolicy) -> Self {
        self.session_adjust = policy;
        self
    }

    /// Sets the start phase policy.
    pub fn with_start_phase(mut self, policy: StartPhasePolicy) -> Self {
        self.start_phase = policy;
        self
    }

    /// Returns a copy with lengths clamped into range and a non-zero interval.
    ///
    /// Nothing in the configuration is rejected; bad values saturate.
    pub fn normalized(mut self) -> Self {
        self.default_session_minutes = clamp_minutes(i64::from(self.default_session_minutes));
        self.default_break_minutes = clamp_minutes(i64::from(self.default_break_minutes));
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self
    }

    /// Returns the tick interval as a `Duration`.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Saturates a length into `MIN_MINUTES..=MAX_MINUTES`.
pub fn clamp_minutes(minutes: i64) -> u32 {
    // The clamp bounds fit in u32, so the cast cannot truncate.
    minutes.clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES)) as u32
}

/// Applies a signed adjustment to a length and clamps the result.
pub fn adjust_minutes(current: u32, delta: i32) -> u32 {
    clamp_minutes(i64::from(current) + i64::from(delta))
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the clock for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Active phase
    pub phase: TimerPhase,
    /// Seconds left in the active phase
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// `MM:SS` rendering of `remaining_seconds`
    pub display: String,
    /// Whether a countdown is in progress
    pub running: bool,
    /// Whether the cue is suppressed
    pub muted: bool,
    /// Current session length
    #[serde(rename = "sessionMinutes")]
    pub session_minutes: u32,
    /// Current break length
    #[serde(rename = "breakMinutes")]
    pub break_minutes: u32,
}

// ============================================================================
// Tests
// ============================================================================
