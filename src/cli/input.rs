//! Line commands accepted by the interactive clock.

use thiserror::Error;

use crate::engine::Intent;
use crate::i18n::Language;

/// Errors produced while parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The command word is not known.
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    /// The command needs a signed integer argument.
    #[error("'{command}' expects a whole number, got '{value}'")]
    InvalidNumber { command: String, value: String },

    /// The command got an argument it does not understand.
    #[error("'{command}' does not accept '{value}'")]
    InvalidArgument { command: String, value: String },

    /// The language code is not supported.
    #[error("unsupported language '{0}' (use en or pl)")]
    UnknownLanguage(String),
}

/// A parsed interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Forward an intent to the engine
    Intent(Intent),
    /// Print the current state
    Status,
    /// Switch language; `None` cycles to the next one
    Language(Option<Language>),
    /// Print the command list
    Help,
    /// Stop the clock and exit
    Quit,
}

/// Parses one input line.
///
/// # Errors
///
/// Returns an `InputError` for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> Result<HostCommand, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(HostCommand::Status);
    };
    let argument = words.next();
    let lowered = command.to_lowercase();

    let parsed = match (lowered.as_str(), argument) {
        ("t" | "toggle" | "p" | "play", None) => HostCommand::Intent(Intent::Toggle),
        ("start", None) => HostCommand::Intent(Intent::Start),
        ("stop", None) => HostCommand::Intent(Intent::Stop),
        ("r" | "reset", None) => HostCommand::Intent(Intent::Reset),
        ("u" | "undo", None) => HostCommand::Intent(Intent::Undo),
        ("+" | "s+", None) => HostCommand::Intent(Intent::AdjustSession(1)),
        ("-" | "s-", None) => HostCommand::Intent(Intent::AdjustSession(-1)),
        ("b+", None) => HostCommand::Intent(Intent::AdjustBreak(1)),
        ("b-", None) => HostCommand::Intent(Intent::AdjustBreak(-1)),
        ("session", Some(value)) => {
            HostCommand::Intent(Intent::AdjustSession(parse_delta(command, value)?))
        }
        ("break", Some(value)) => {
            HostCommand::Intent(Intent::AdjustBreak(parse_delta(command, value)?))
        }
        ("session" | "break", None) => {
            return Err(InputError::InvalidNumber {
                command: command.to_string(),
                value: String::new(),
            })
        }
        ("m" | "mute", None) => HostCommand::Intent(Intent::ToggleMute),
        ("m" | "mute", Some(value)) => match value.to_lowercase().as_str() {
            "on" => HostCommand::Intent(Intent::SetMuted(true)),
            "off" => HostCommand::Intent(Intent::SetMuted(false)),
            _ => {
                return Err(InputError::InvalidArgument {
                    command: command.to_string(),
                    value: value.to_string(),
                })
            }
        },
        ("l" | "lang", None) => HostCommand::Language(None),
        ("l" | "lang", Some(code)) => HostCommand::Language(Some(
            Language::from_code(code).ok_or_else(|| InputError::UnknownLanguage(code.to_string()))?,
        )),
        ("s" | "status", None) => HostCommand::Status,
        ("h" | "help" | "?", None) => HostCommand::Help,
        ("q" | "quit" | "exit", None) => HostCommand::Quit,
        (_, Some(value)) if is_known(&lowered) => {
            return Err(InputError::InvalidArgument {
                command: command.to_string(),
                value: value.to_string(),
            })
        }
        _ => return Err(InputError::UnknownCommand(command.to_string())),
    };

    Ok(parsed)
}

fn parse_delta(command: &str, value: &str) -> Result<i32, InputError> {
    value
        .trim_start_matches('+')
        .parse::<i32>()
        .map_err(|_| InputError::InvalidNumber {
            command: command.to_string(),
            value: value.to_string(),
        })
}

fn is_known(command: &str) -> bool {
    matches!(
        command,
        "t" | "toggle"
            | "p"
            | "play"
            | "start"
            | "stop"
            | "r"
            | "reset"
            | "u"
            | "undo"
            | "+"
            | "s+"
            | "-"
            | "s-"
            | "b+"
            | "b-"
            | "s"
            | "status"
            | "h"
            | "help"
            | "?"
            | "q"
            | "quit"
            | "exit"
    )
}
