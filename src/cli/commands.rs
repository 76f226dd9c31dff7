//! Command definitions for the clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::i18n::Language;
use crate::prefs::{BREAK_LENGTH_KEY, SESSION_LENGTH_KEY};

// ============================================================================
// CLI Structure
// ============================================================================

/// 25 + 5 Clock - a session/break countdown for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "clock",
    version,
    about = "25 + 5 session/break countdown clock",
    long_about = "A session/break countdown clock for the terminal.\n\
                  Run `clock run` and type commands (toggle, reset, undo, +, -, b+, b-, mute, lang, quit).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preferences file (default: ~/.pomodoro-clock/preferences.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive clock
    Run(RunArgs),

    /// Show or change the stored session and break lengths
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Session length in minutes (1-60); wins over the stored preference
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub session: Option<u32>,

    /// Break length in minutes (1-60); wins over the stored preference
    #[arg(
        short = 'b',
        long = "break",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub break_length: Option<u32>,

    /// Tick interval in milliseconds
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: Option<u64>,

    /// Start with the cue muted
    #[arg(short, long)]
    pub muted: bool,

    /// Never open the audio device
    #[arg(long)]
    pub no_sound: bool,

    /// Sound file to play instead of the bundled beep
    #[arg(long, value_name = "FILE")]
    pub sound: Option<PathBuf>,

    /// UI language
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    /// Print JSON snapshots instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Ignore stored preferences
    #[arg(long)]
    pub no_prefs: bool,

    /// JSON configuration file; command-line flags override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep a running break's time when the session length changes
    #[arg(long)]
    pub keep_break: bool,

    /// Resume in the stopped phase instead of switching back to the session
    #[arg(long)]
    pub keep_phase: bool,
}

// ============================================================================
// Prefs Command
// ============================================================================

/// Preference subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsAction {
    /// Print the stored preferences
    Show,

    /// Store a length
    Set {
        /// Which length to store
        #[arg(value_enum)]
        key: PrefKey,

        /// Length in minutes (1-60)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=60))]
        minutes: u32,
    },

    /// Remove both stored lengths
    Clear,
}

/// Stored length names
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrefKey {
    Session,
    Break,
}

impl PrefKey {
    /// Returns the store key for this length.
    pub fn store_key(&self) -> &'static str {
        match self {
            PrefKey::Session => SESSION_LENGTH_KEY,
            PrefKey::Break => BREAK_LENGTH_KEY,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
