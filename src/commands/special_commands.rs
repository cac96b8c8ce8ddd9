//! Special commands parser for interactive chat
//!
//! Lines starting with `/` control the session instead of being sent as
//! utterances. Commands are case-insensitive; `exit` and `quit` work
//! without the slash. A line the crisis filter flags is never treated as
//! a command, so a mistyped slash cannot keep it from the session.

use crate::safety;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command does not take arguments
    #[error("{command} does not take arguments (got '{arg}')")]
    UnexpectedArgument { command: String, arg: String },
}

/// Commands handled by the chat loop itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new conversation
    Reset,
    /// Reprint the whole conversation
    History,
    /// Display help information
    Help,
    /// Leave the chat
    Exit,
    /// Not a command; submit the line as an utterance
    None,
}

/// Parse a line of input
///
/// # Examples
///
/// ```
/// use solace::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/reset").unwrap(), SpecialCommand::Reset);
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/nope").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    // Crisis text always reaches the session, whatever it starts with
    if safety::classify(trimmed).is_crisis() {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let parsed = match command {
        "/reset" | "/new" | "/clear" => SpecialCommand::Reset,
        "/history" => SpecialCommand::History,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" | "exit" | "quit" => SpecialCommand::Exit,
        _ => return Err(CommandError::UnknownCommand(trimmed.to_string())),
    };

    if !arg.is_empty() {
        return Err(CommandError::UnexpectedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }

    Ok(parsed)
}

/// Help text for the chat loop
pub fn help_text() -> &'static str {
    r#"
Chat Commands
=============

  /reset    - Start a new conversation (also /new, /clear)
  /history  - Show the whole conversation
  /help     - Show this help
  /exit     - Leave the chat (also /quit, exit, quit, Ctrl-D)

Press Enter to send a message. If you are in crisis, call or text 988
(US) or your local emergency number right away.
"#
}

/// Print help for the chat loop
pub fn print_help() {
    println!("{}", help_text());
}
