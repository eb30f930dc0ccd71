//! Special commands parser for the interactive session
//!
//! This module parses special commands that can be entered during an
//! interactive session. Special commands allow users to:
//! - Start and finalize sessions
//! - Switch modes, submodes, and panel personas
//! - Edit the setup form (resume, company, projects, experience)
//! - Inspect or save results
//!
//! Commands are prefixed with `/`. Command names are case-insensitive;
//! arguments keep their case.

use crate::mode::{InterviewMode, KNOWN_PERSONAS};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during an interactive session
///
/// These commands act on the session or the setup form rather than being
/// sent to the panel as chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new session with the current setup
    Start,

    /// Finalize the active session into a mock interview
    Finalize,

    /// Switch between board and interview modes
    SwitchMode(InterviewMode),

    /// Set the interview submode; empty clears it
    SetSubmode(String),

    /// Choose a panel persona and apply it to the active session
    SelectPersona(String),

    /// Load a `.txt`/`.md` resume into the setup
    LoadResume(PathBuf),

    /// Replace the company context; empty clears it
    SetCompany(String),

    /// Replace the projects description; empty clears it
    SetProjects(String),

    /// Set the coding experience level; empty clears it
    SetExperience(String),

    /// Set the software-years bucket; empty clears it
    SetYears(String),

    /// Ask the backend for the session summary
    ShowResult,

    /// Write the last final output to a file
    SaveResult(PathBuf),

    /// Display current mode, persona, and session status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent as a chat message.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use chartroom::commands::special_commands::{parse_special_command, SpecialCommand};
/// use chartroom::mode::InterviewMode;
///
/// let cmd = parse_special_command("/mode interview").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchMode(InterviewMode::InterviewOneOnOne));
///
/// let cmd = parse_special_command("/boss boss_2").unwrap();
/// assert_eq!(cmd, SpecialCommand::SelectPersona("boss_2".to_string()));
///
/// let cmd = parse_special_command("Our churn is 2% monthly").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower, ""),
    };

    match name.as_str() {
        "/start" | "/new" => Ok(SpecialCommand::Start),
        "/finalize" | "/done" => Ok(SpecialCommand::Finalize),

        "/mode" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/mode".to_string(),
                    usage: "/mode <board|interview>".to_string(),
                });
            }
            InterviewMode::parse_str(arg)
                .map(SpecialCommand::SwitchMode)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/mode".to_string(),
                    arg: arg.to_string(),
                })
        }
        "/board" => Ok(SpecialCommand::SwitchMode(InterviewMode::BoardInvestors)),
        "/interview" => Ok(SpecialCommand::SwitchMode(InterviewMode::InterviewOneOnOne)),

        "/submode" => Ok(SpecialCommand::SetSubmode(arg.to_string())),

        "/boss" | "/persona" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: name.clone(),
                    usage: format!("{} <{}>", name, KNOWN_PERSONAS.join("|")),
                });
            }
            let persona = arg.to_lowercase();
            if KNOWN_PERSONAS.contains(&persona.as_str()) {
                Ok(SpecialCommand::SelectPersona(persona))
            } else {
                Err(CommandError::UnsupportedArgument {
                    command: name.clone(),
                    arg: arg.to_string(),
                })
            }
        }

        "/resume" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/resume".to_string(),
                    usage: "/resume <path.txt|path.md>".to_string(),
                })
            } else {
                Ok(SpecialCommand::LoadResume(PathBuf::from(arg)))
            }
        }

        "/company" => Ok(SpecialCommand::SetCompany(arg.to_string())),
        "/projects" => Ok(SpecialCommand::SetProjects(arg.to_string())),
        "/experience" => Ok(SpecialCommand::SetExperience(arg.to_string())),
        "/years" => Ok(SpecialCommand::SetYears(arg.to_string())),

        "/result" => Ok(SpecialCommand::ShowResult),
        "/save" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/save".to_string(),
                    usage: "/save <path>".to_string(),
                })
            } else {
                Ok(SpecialCommand::SaveResult(PathBuf::from(arg)))
            }
        }

        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(name.clone())),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Sessions
=========================================

SESSION:
  /start              - Start a new session with the current setup
  /finalize           - Finalize the session into a mock interview
  /result             - Show the backend's summary of the session
  /save <path>        - Write the last final output to a file

MODE AND PANEL:
  /mode <board|interview> - Switch mode (takes effect on the next /start)
  /board              - Shorthand for /mode board
  /interview          - Shorthand for /mode interview
  /submode [name]     - Set the interview submode; no name clears it
  /boss <boss_1|boss_2|boss_3> - Choose a board path and apply it

SETUP:
  /resume <path>      - Load a .txt or .md resume
  /company [text]     - Set the company context
  /projects [text]    - Set the projects description
  /experience [level] - Set the coding experience level
  /years [bucket]     - Set years of experience for software engineers

SESSION INFORMATION:
  /status             - Show current mode, persona, and setup
  /help               - Show this help message
  /?                  - Same as /help

SESSION CONTROL:
  exit                - Exit interactive mode
  quit                - Same as exit

NOTES:
  - Command names are case-insensitive
  - Regular text (not starting with /) is sent to the panel or coach
  - Setup changes apply to the next message or /start
"#
    );
}
