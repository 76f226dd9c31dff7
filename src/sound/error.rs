//! Sound system error types.

use thiserror::Error;

/// Errors that can occur while driving the audio sink.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Cue file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the cue.
    #[error("failed to decode sound: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream or sink.
    #[error("failed to open audio stream: {0}")]
    StreamError(String),

    /// Generic playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the cue file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if playback should fall back to the bundled beep.
    #[must_use]
    pub fn should_fallback_to_beep(&self) -> bool {
        self.is_file_error()
    }
}
