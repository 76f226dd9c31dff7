//! JSON file preference store.
//!
//! Values are kept in a flat JSON object. The store writes strings, the way
//! a browser's local storage keeps them, but hand-edited numbers are read
//! too. Any other JSON value under a key reads as absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::error::{PrefsError, Result};
use super::PreferenceStore;

/// Directory under the home directory holding the preferences file.
const PREFS_DIR: &str = ".pomodoro-clock";

/// File name of the preferences file.
const PREFS_FILE: &str = "preferences.json";

/// Returns `~/.pomodoro-clock/preferences.json`.
///
/// # Errors
///
/// Returns `PrefsError::HomeDirectoryNotFound` if the home directory cannot
/// be determined.
pub fn default_prefs_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(PrefsError::HomeDirectoryNotFound)?;
    Ok(home_dir.join(PREFS_DIR).join(PREFS_FILE))
}

/// Preference store persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| PrefsError::Read {
                path: path.clone(),
                source,
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|source| PrefsError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            debug!("No preferences file at {}", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Opens the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the file is unreadable.
    pub fn open_default() -> Result<Self> {
        Self::open(default_prefs_path()?)
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all stored entries as text; non-string values are shown as JSON.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    /// Sets a value in memory. Call `save` to persist.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Value::String(value.into()));
    }

    /// Removes a value in memory. Call `save` to persist.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Writes the store to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(PrefsError::DirectoryCreation)?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(PrefsError::Serialize)?;
        fs::write(&self.path, json).map_err(PrefsError::Write)?;

        debug!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                warn!(key, value = %other, "Ignoring non-text stored preference");
                None
            }
        }
    }
}
