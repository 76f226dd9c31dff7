//! Error types for the preference store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Preference store error type.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Home directory not found.
    #[error("Failed to get home directory")]
    HomeDirectoryNotFound,

    /// Failed to read the preferences file.
    #[error("Failed to read preferences file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The preferences file is not a JSON object.
    #[error("Failed to parse preferences file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create the preferences directory.
    #[error("Failed to create directory: {0}")]
    DirectoryCreation(#[source] io::Error),

    /// Failed to write the preferences file.
    #[error("Failed to write preferences file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize preferences.
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;
