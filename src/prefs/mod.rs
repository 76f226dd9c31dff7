//! Stored session and break lengths.
//!
//! The clock reads two keys once at start-up. Values are stored as text;
//! anything that does not start with an integer is treated as absent and
//! integers outside 1-60 are clamped.

pub mod error;
pub mod file;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::types::clamp_minutes;

pub use error::PrefsError;
pub use file::{default_prefs_path, JsonFileStore};

/// Key of the stored session length.
pub const SESSION_LENGTH_KEY: &str = "clock.sessionLength";

/// Key of the stored break length.
pub const BREAK_LENGTH_KEY: &str = "clock.breakLength";

/// Read access to a durable key-value store.
pub trait PreferenceStore {
    /// Returns the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Length overrides read from a store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Stored session length, already clamped
    pub session_minutes: Option<u32>,
    /// Stored break length, already clamped
    pub break_minutes: Option<u32>,
}

impl Preferences {
    /// Reads both lengths from `store`.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let prefs = Self {
            session_minutes: stored_minutes(store, SESSION_LENGTH_KEY),
            break_minutes: stored_minutes(store, BREAK_LENGTH_KEY),
        };
        debug!(?prefs, "Preferences loaded");
        prefs
    }

    /// Drops the stored values for lengths that were set explicitly.
    ///
    /// An explicitly configured length always wins over a stored one.
    #[must_use]
    pub fn overridden_by(self, session_explicit: bool, break_explicit: bool) -> Self {
        Self {
            session_minutes: self.session_minutes.filter(|_| !session_explicit),
            break_minutes: self.break_minutes.filter(|_| !break_explicit),
        }
    }
}

/// Reads `key` as a length in minutes.
pub fn stored_minutes(store: &dyn PreferenceStore, key: &str) -> Option<u32> {
    let raw = store.get(key)?;
    match parse_leading_integer(&raw) {
        Some(value) => Some(clamp_minutes(value)),
        None => {
            warn!(key, value = %raw, "Ignoring unparsable stored preference");
            None
        }
    }
}

/// Parses an optionally signed integer prefix, ignoring trailing text.
///
/// `"30"`, `" 30 "` and `"30min"` give 30; `"abc"` and `""` give `None`.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long numbers; they clamp to 60 anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}
