//! Frontend command surface
//!
//! The terminal frontend parses each input line into a [`UiCommand`] and
//! feeds it to the event loop. A desktop frontend would produce the same
//! commands from menu actions and hot-keys (the admin override combination
//! maps to [`UiCommand::AdminOverride`]).

use std::path::PathBuf;

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Execute the buffer, with optional pre-gathered stdin
    Run { stdin: Option<String> },
    /// Kill the live run
    Stop,
    /// Activate an exercise from the pool
    Load(String),
    /// Show the visible pool
    List,
    /// Show phase, countdown, and pool state
    Status,
    /// Replace the buffer with an empty file
    New,
    /// Replace the buffer with a file's contents
    Open(PathBuf),
    /// Save the buffer, optionally to a new path
    Save(Option<PathBuf>),
    /// Clear the output log
    ClearOutput,
    /// Print the buffer
    Show,
    /// The admin override hot-key
    AdminOverride,
    /// Ask to close the window
    Close,
    /// Show command help
    Help,
}

impl UiCommand {
    /// Parse a frontend input line. Returns `None` for blank or unknown
    /// input.
    pub fn parse(line: &str) -> Option<UiCommand> {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "run" => Some(UiCommand::Run { stdin: None }),
            "stop" => Some(UiCommand::Stop),
            "load" if !rest.is_empty() => Some(UiCommand::Load(rest.to_string())),
            "list" => Some(UiCommand::List),
            "status" => Some(UiCommand::Status),
            "new" => Some(UiCommand::New),
            "open" if !rest.is_empty() => Some(UiCommand::Open(PathBuf::from(rest))),
            "save" => Some(UiCommand::Save(if rest.is_empty() {
                None
            } else {
                Some(PathBuf::from(rest))
            })),
            "clear" => Some(UiCommand::ClearOutput),
            "show" => Some(UiCommand::Show),
            "unlock" => Some(UiCommand::AdminOverride),
            "quit" | "exit" | "close" => Some(UiCommand::Close),
            "help" => Some(UiCommand::Help),
            _ => None,
        }
    }
}

/// Help text for the terminal frontend.
pub const HELP_TEXT: &str = "\
Commands:
  run            execute the buffer
  stop           kill the live run
  load <id>      activate an exercise from the pool
  list           show the visible pool
  status         show phase, countdown, and pool state
  edit           replace the buffer (end with a single '.' line)
  show           print the buffer
  new            start an empty file
  open <path>    load a file into the buffer
  save [path]    save the buffer
  clear          clear the output log
  unlock         admin override (Ctrl+F12 on a desktop frontend)
  about          version line
  quit           close the shell
  help           this text";
