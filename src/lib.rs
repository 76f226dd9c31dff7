//! 25 + 5 Clock Library
//!
//! This library provides the core functionality for the clock CLI.
//! It includes:
//! - Countdown state machine and its tick-driven engine
//! - Audio cue playback
//! - Stored session/break length preferences
//! - UI translations
//! - CLI command parsing, the interactive host and display utilities
//! - Type definitions for configuration and snapshots

pub mod cli;
pub mod engine;
pub mod i18n;
pub mod prefs;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{SessionAdjustPolicy, StartPhasePolicy, TimerConfig, TimerPhase, TimerSnapshot};

// Re-export engine types
pub use engine::{
    ClockState, Effect, IntervalScheduler, Intent, ManualScheduler, TickHandle, TickScheduler,
    TimerEngine, TimerEvent,
};

// Re-export sound types
pub use sound::{
    try_create_sink, AudioCommand, AudioSink, CueSource, MockAudioSink, NullAudioSink,
    RodioAudioSink, SoundError,
};

// Re-export preference types
pub use prefs::{JsonFileStore, MemoryStore, PreferenceStore, Preferences, PrefsError};

pub use i18n::{Label, Language};
