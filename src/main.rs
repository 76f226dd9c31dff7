//! 25 + 5 Clock CLI - a session/break countdown for the terminal
//!
//! The clock alternates between two phases:
//! - a work session (25 minutes by default)
//! - a break (5 minutes by default)
//!
//! A cue sounds each time the countdown crosses into the other phase.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro_clock::cli::{host, Cli, Commands, Display, PrefsAction};
use pomodoro_clock::prefs::{JsonFileStore, BREAK_LENGTH_KEY, SESSION_LENGTH_KEY};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only carries clock output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            host::run(args, cli.prefs).await?;
        }
        Some(Commands::Prefs { action }) => {
            manage_prefs(action, cli.prefs)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Shows or edits the stored preferences.
fn manage_prefs(action: PrefsAction, path: Option<PathBuf>) -> Result<()> {
    let mut store = match path {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default(),
    }
    .context("Failed to open preferences")?;

    match action {
        PrefsAction::Show => {
            Display::show_prefs(store.path(), &store.entries());
        }
        PrefsAction::Set { key, minutes } => {
            store.set(key.store_key(), minutes.to_string());
            store.save().context("Failed to save preferences")?;
            println!("{} = {}", key.store_key(), minutes);
        }
        PrefsAction::Clear => {
            store.remove(SESSION_LENGTH_KEY);
            store.remove(BREAK_LENGTH_KEY);
            store.save().context("Failed to save preferences")?;
            println!("Preferences cleared");
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
