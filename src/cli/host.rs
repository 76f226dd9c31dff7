//! Interactive terminal host for the clock.
//!
//! Reads line commands from stdin, forwards them to the timer engine and
//! prints the clock after every change.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{IntervalScheduler, TickHandle, TickScheduler, TimerEngine, TimerEvent};
use crate::i18n::Language;
use crate::prefs::{JsonFileStore, Preferences};
use crate::sound::{try_create_sink, CueSource};
use crate::types::{SessionAdjustPolicy, StartPhasePolicy, TimerConfig};

use super::commands::RunArgs;
use super::display::Display;
use super::input::{parse_command, HostCommand};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration resolved from the config file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Engine configuration
    pub config: TimerConfig,
    /// Session length was set by a flag or the config file
    pub session_explicit: bool,
    /// Break length was set by a flag or the config file
    pub break_explicit: bool,
}

/// Builds the engine configuration: defaults, then the JSON config file,
/// then command-line flags.
///
/// # Errors
///
/// Returns an error if the config file or the sound file is unusable.
pub fn build_config(args: &RunArgs) -> Result<ResolvedConfig> {
    let (mut config, mut session_explicit, mut break_explicit) = match &args.config {
        Some(path) => load_config_file(path)?,
        None => (TimerConfig::default(), false, false),
    };

    if let Some(minutes) = args.session {
        config = config.with_session_minutes(minutes);
        session_explicit = true;
    }
    if let Some(minutes) = args.break_length {
        config = config.with_break_minutes(minutes);
        break_explicit = true;
    }
    if let Some(interval_ms) = args.interval_ms {
        config = config.with_tick_interval_ms(interval_ms);
    }
    if args.muted {
        config = config.with_muted(true);
    }
    if let Some(path) = &args.sound {
        let cue = CueSource::file_validated(path)
            .with_context(|| format!("Invalid sound file {}", path.display()))?;
        config = config.with_cue(cue);
    }
    if args.keep_break {
        config = config.with_session_adjust(SessionAdjustPolicy::KeepBreak);
    }
    if args.keep_phase {
        config = config.with_start_phase(StartPhasePolicy::Keep);
    }

    Ok(ResolvedConfig {
        config: config.normalized(),
        session_explicit,
        break_explicit,
    })
}

fn load_config_file(path: &Path) -> Result<(TimerConfig, bool, bool)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    let session_explicit = value.get("default_session_minutes").is_some();
    let break_explicit = value.get("default_break_minutes").is_some();
    let config: TimerConfig = serde_json::from_value(value)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    debug!("Loaded config from {}", path.display());
    Ok((config, session_explicit, break_explicit))
}

/// Reads stored preferences, treating an unreadable store as empty.
fn load_preferences(prefs_path: Option<PathBuf>) -> Preferences {
    let store = match prefs_path {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default(),
    };

    match store {
        Ok(store) => Preferences::load(&store),
        Err(e) => {
            warn!("Ignoring stored preferences: {}", e);
            Preferences::default()
        }
    }
}

// ============================================================================
// ClockHost
// ============================================================================

/// Couples the engine with its event stream and turns both into output lines.
pub struct ClockHost<S: TickScheduler> {
    engine: TimerEngine<S>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    language: Language,
    json: bool,
}

impl<S: TickScheduler> ClockHost<S> {
    /// Creates a host around an engine and the receiving end of its events.
    pub fn new(
        engine: TimerEngine<S>,
        events: mpsc::UnboundedReceiver<TimerEvent>,
        language: Language,
        json: bool,
    ) -> Self {
        Self {
            engine,
            events,
            language,
            json,
        }
    }

    /// Lines printed once at start-up.
    pub fn banner(&self) -> Vec<String> {
        if self.json {
            return vec![self.render()];
        }

        let mut lines = vec![Display::title(self.language)];
        lines.extend(Display::help(self.language));
        lines.push(self.render());
        lines
    }

    /// Parses and handles one input line.
    ///
    /// Returns `None` when the line asks the host to quit.
    pub fn handle_line(&mut self, line: &str) -> Option<Vec<String>> {
        match parse_command(line) {
            Ok(HostCommand::Quit) => {
                self.handle(HostCommand::Quit);
                None
            }
            Ok(command) => Some(self.handle(command)),
            Err(e) => {
                debug!(line, "Rejected input");
                Some(vec![format!("error: {}", e)])
            }
        }
    }

    /// Handles a parsed command and returns the lines to print.
    pub fn handle(&mut self, command: HostCommand) -> Vec<String> {
        match command {
            HostCommand::Intent(intent) => {
                self.engine.dispatch(intent);
                let mut lines = self.drain_notices();
                lines.push(self.render());
                lines
            }
            HostCommand::Status => {
                self.drain_notices();
                vec![self.render()]
            }
            HostCommand::Language(language) => {
                self.language = language.unwrap_or_else(|| self.language.next());
                info!(language = self.language.code(), "Language changed");
                if self.json {
                    Vec::new()
                } else {
                    vec![Display::title(self.language), self.render()]
                }
            }
            HostCommand::Help => Display::help(self.language),
            HostCommand::Quit => {
                self.engine.stop();
                self.drain_notices();
                Vec::new()
            }
        }
    }

    /// Delivers a tick and returns the lines to print.
    ///
    /// Stale ticks produce no output.
    pub fn on_tick(&mut self, handle: TickHandle) -> Vec<String> {
        self.engine.on_tick(handle);

        let mut changed = false;
        let mut lines = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            if let Some(notice) = self.notice(&event) {
                lines.push(notice);
            }
        }
        if changed {
            lines.push(self.render());
        }
        lines
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TimerEngine<S> {
        &self.engine
    }

    /// Returns the active language.
    pub fn language(&self) -> Language {
        self.language
    }

    fn render(&self) -> String {
        let snapshot = self.engine.snapshot();
        if self.json {
            Display::render_json(&snapshot)
        } else {
            Display::render_line(&snapshot, self.language)
        }
    }

    fn drain_notices(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let Some(notice) = self.notice(&event) {
                lines.push(notice);
            }
        }
        lines
    }

    fn notice(&self, event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::PhaseChanged { phase, .. } if !self.json => {
                Some(Display::phase_notice(*phase, self.language))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Run loop
// ============================================================================

/// Runs the interactive clock until quit, end of input or Ctrl-C.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or stdin fails.
pub async fn run(args: RunArgs, prefs_path: Option<PathBuf>) -> Result<()> {
    let resolved = build_config(&args)?;

    let preferences = if args.no_prefs {
        Preferences::default()
    } else {
        load_preferences(prefs_path)
            .overridden_by(resolved.session_explicit, resolved.break_explicit)
    };

    let audio = try_create_sink(resolved.config.cue.clone(), args.no_sound);
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(
        resolved.config,
        preferences,
        IntervalScheduler::new(tick_tx),
        audio,
        event_tx,
    );
    let mut host = ClockHost::new(engine, event_rx, args.lang.unwrap_or_default(), args.json);

    print_lines(&host.banner());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(handle) = tick_rx.recv() => {
                print_lines(&host.on_tick(handle));
            }
            line = lines.next_line() => {
                let line = line.context("Failed to read from stdin")?;
                let Some(line) = line else {
                    debug!("End of input");
                    break;
                };
                match host.handle_line(&line) {
                    Some(output) => print_lines(&output),
                    None => break,
                }
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
        }
    }

    host.handle(HostCommand::Quit);
    info!("Clock stopped");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
