//! UI strings in the supported languages.
//!
//! English is complete; other languages may leave labels out, in which case
//! the English text is shown.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Polish
    Pl,
}

impl Language {
    /// All languages, in switching order.
    pub const ALL: [Language; 2] = [Language::En, Language::Pl];

    /// Returns the language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    /// Parses a language code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Returns the next language in switching order.
    pub fn next(&self) -> Self {
        match self {
            Language::En => Language::Pl,
            Language::Pl => Language::En,
        }
    }

    /// Returns the text for `label`, falling back to English.
    pub fn translate(&self, label: Label) -> &'static str {
        lookup(*self, label).unwrap_or_else(|| english(label))
    }
}

/// Translatable UI labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Title,
    BreakLength,
    SessionTime,
    Session,
    Break,
    PlayStop,
    Reset,
    Undo,
    SoundOnOff,
    Language,
}

fn lookup(language: Language, label: Label) -> Option<&'static str> {
    match language {
        Language::En => Some(english(label)),
        Language::Pl => polish(label),
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::Title => "25 + 5 Clock",
        Label::BreakLength => "Break length",
        Label::SessionTime => "Session time",
        Label::Session => "Session",
        Label::Break => "BREAK",
        Label::PlayStop => "Play/Stop",
        Label::Reset => "Reset to defaults",
        Label::Undo => "Reset time",
        Label::SoundOnOff => "Sound On/Off",
        Label::Language => "Language",
    }
}

fn polish(label: Label) -> Option<&'static str> {
    let text = match label {
        Label::Title => "Zegar 25 + 5",
        Label::BreakLength => "Czas przerwy",
        Label::SessionTime => "Czas sesji",
        Label::Session => "Sesja",
        Label::Break => "PRZERWA",
        Label::PlayStop => "Start/Stop",
        Label::Reset => "Przywróć domyślne",
        Label::Undo => "Resetuj czas",
        Label::SoundOnOff => "Dźwięk wł/wył",
        Label::Language => return None,
    };
    Some(text)
}
