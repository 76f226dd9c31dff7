//! Audio cue playback for the clock.
//!
//! This module provides:
//!
//! - The `AudioSink` trait the timer engine issues commands to
//! - A rodio-backed sink with a synthesized fallback beep
//! - Null and mock sinks for headless use and tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   TimerEngine    │  play / pause / seek_to_start
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │    AudioSink     │────▶│  CueSource::File │
//! │ (RodioAudioSink) │     ├──────────────────┤
//! │                  │────▶│  CueSource::Beep │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! Every command is fire-and-forget from the engine's point of view: errors
//! are logged by the caller and never stop the countdown.

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::trace;

pub use error::SoundError;
pub use player::{try_create_sink, RodioAudioSink};
pub use source::{CueSource, DEFAULT_BEEP_DURATION_MS, DEFAULT_BEEP_FREQUENCY_HZ};

/// Commands the engine can send to an audio sink.
pub trait AudioSink {
    /// Starts (or resumes) the cue.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self) -> Result<(), SoundError>;

    /// Pauses the cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the command.
    fn pause(&self) -> Result<(), SoundError>;

    /// Rewinds the cue to position zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the command.
    fn seek_to_start(&self) -> Result<(), SoundError>;
}

impl<T: AudioSink + ?Sized> AudioSink for Arc<T> {
    fn play(&self) -> Result<(), SoundError> {
        (**self).play()
    }

    fn pause(&self) -> Result<(), SoundError> {
        (**self).pause()
    }

    fn seek_to_start(&self) -> Result<(), SoundError> {
        (**self).seek_to_start()
    }
}

/// Sink used when sound is disabled or no device is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play(&self) -> Result<(), SoundError> {
        trace!("Null sink: play");
        Ok(())
    }

    fn pause(&self) -> Result<(), SoundError> {
        Ok(())
    }

    fn seek_to_start(&self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// A command recorded by `MockAudioSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
    SeekToStart,
}

/// Mock audio sink for testing.
#[derive(Debug, Default)]
pub struct MockAudioSink {
    calls: Mutex<Vec<AudioCommand>>,
    should_fail: AtomicBool,
}

impl MockAudioSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent command fail (commands are still recorded).
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.count(AudioCommand::Play)
    }

    #[must_use]
    pub fn count(&self, command: AudioCommand) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|c| **c == command).count())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn calls(&self) -> Vec<AudioCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, command: AudioCommand) -> Result<(), SoundError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl AudioSink for MockAudioSink {
    fn play(&self) -> Result<(), SoundError> {
        self.record(AudioCommand::Play)
    }

    fn pause(&self) -> Result<(), SoundError> {
        self.record(AudioCommand::Pause)
    }

    fn seek_to_start(&self) -> Result<(), SoundError> {
        self.record(AudioCommand::SeekToStart)
    }
}
