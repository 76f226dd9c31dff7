//! Cue source selection.
//!
//! The cue is either the bundled beep, synthesized on the fly, or an audio
//! file on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::SoundError;

/// Frequency of the bundled beep.
pub const DEFAULT_BEEP_FREQUENCY_HZ: u32 = 880;

/// Length of the bundled beep.
pub const DEFAULT_BEEP_DURATION_MS: u64 = 600;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aiff"];

/// Represents the sound played when a phase runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueSource {
    /// A sine beep compiled into the binary.
    Beep {
        /// Tone frequency in hertz.
        frequency_hz: u32,
        /// Tone length in milliseconds.
        duration_ms: u64,
    },
    /// An audio file decoded at play time.
    File {
        /// Path to the sound file.
        path: PathBuf,
    },
}

impl Default for CueSource {
    fn default() -> Self {
        Self::Beep {
            frequency_hz: DEFAULT_BEEP_FREQUENCY_HZ,
            duration_ms: DEFAULT_BEEP_DURATION_MS,
        }
    }
}

impl CueSource {
    /// Creates a file cue without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a file cue after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` for a missing file and
    /// `SoundError::DecodeError` for an unsupported extension.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        if !has_supported_extension(&path) {
            return Err(SoundError::DecodeError(format!(
                "unsupported format: {}",
                path.display()
            )));
        }
        Ok(Self::File { path })
    }

    /// Returns a short name for log output.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Beep { frequency_hz, .. } => format!("beep {frequency_hz}Hz"),
            Self::File { path } => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
