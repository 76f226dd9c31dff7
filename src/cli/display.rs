//! Display utilities for the clock CLI.
//!
//! This module provides formatted output for:
//! - The clock line (phase, time, lengths, sound)
//! - Phase change notices
//! - Help text
//! - Stored preferences
//! - Error messages

use std::collections::BTreeMap;

use crate::i18n::{Label, Language};
use crate::types::{TimerPhase, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Returns the translated title line.
    pub fn title(lang: Language) -> String {
        format!(
            "{}  ({}: {})",
            lang.translate(Label::Title),
            lang.translate(Label::Language),
            lang.code()
        )
    }

    /// Renders the clock as a single line.
    pub fn render_line(snapshot: &TimerSnapshot, lang: Language) -> String {
        let marker = if snapshot.running { ">" } else { "||" };
        let sound = if snapshot.muted { "off" } else { "on" };

        format!(
            "{} {} {} | {}: {} | {}: {} | {}: {}",
            Self::phase_label(snapshot.phase, lang),
            snapshot.display,
            marker,
            lang.translate(Label::SessionTime),
            snapshot.session_minutes,
            lang.translate(Label::BreakLength),
            snapshot.break_minutes,
            lang.translate(Label::SoundOnOff),
            sound,
        )
    }

    /// Renders the clock as one JSON line.
    pub fn render_json(snapshot: &TimerSnapshot) -> String {
        // A snapshot only holds plain fields; serialization cannot fail.
        serde_json::to_string(snapshot).unwrap_or_default()
    }

    /// Returns the notice printed when the countdown crosses phases.
    pub fn phase_notice(phase: TimerPhase, lang: Language) -> String {
        format!("* {}", Self::phase_label(phase, lang))
    }

    /// Returns the translated phase label.
    pub fn phase_label(phase: TimerPhase, lang: Language) -> &'static str {
        match phase {
            TimerPhase::Session => lang.translate(Label::Session),
            TimerPhase::Break => lang.translate(Label::Break),
        }
    }

    /// Returns the interactive command help.
    pub fn help(lang: Language) -> Vec<String> {
        vec![
            format!("  t, toggle          {}", lang.translate(Label::PlayStop)),
            "  start / stop".to_string(),
            format!("  r, reset           {}", lang.translate(Label::Reset)),
            format!("  u, undo            {}", lang.translate(Label::Undo)),
            format!("  +, -, session <n>  {}", lang.translate(Label::SessionTime)),
            format!("  b+, b-, break <n>  {}", lang.translate(Label::BreakLength)),
            format!("  m, mute [on|off]   {}", lang.translate(Label::SoundOnOff)),
            format!("  l, lang [en|pl]    {}", lang.translate(Label::Language)),
            "  s, status".to_string(),
            "  q, quit".to_string(),
        ]
    }

    /// Prints the stored preferences.
    pub fn show_prefs(path: &std::path::Path, entries: &BTreeMap<String, String>) {
        println!("{}", path.display());
        if entries.is_empty() {
            println!("  (no stored preferences)");
        }
        for (key, value) in entries {
            println!("  {} = {}", key, value);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
