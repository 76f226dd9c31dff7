//! CLI module for the clock.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive line command parsing
//! - `host`: The interactive run loop
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod host;
pub mod input;

pub use commands::{Cli, Commands, PrefKey, PrefsAction, RunArgs};
pub use display::Display;
pub use host::{build_config, run, ClockHost, ResolvedConfig};
pub use input::{parse_command, HostCommand, InputError};
