// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console command parsing

use thiserror::Error;

/// Command words offered for completion
pub const COMMANDS: &[&str] = &[
    "list", "add", "rename", "delete", "save", "save!", "check", "restart", "reload", "quit",
    "help",
];

pub const HELP: &str = "\
commands:
  list                     show clients
  add <name>               add a client
  rename <row|id> <name>   rename a client
  delete <row|id>          delete a client (asks first)
  save                     write the roster and the server config
  save!                    save, then restart the server
  check                    validate the server config on disk
  restart                  restart the server container
  reload                   re-read both files, dropping unsaved edits
  quit                     leave (asks about unsaved edits)
  help                     this text

<row> is the number shown by `list`; <id> may be a unique prefix.";

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Add { name: String },
    Rename { target: String, name: String },
    Delete { target: String },
    Save { restart: bool },
    Check,
    Restart,
    Reload,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => ConsoleCommand::List,
        "add" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("add <name>"));
            }
            ConsoleCommand::Add {
                name: rest.to_string(),
            }
        }
        "rename" | "mv" => match rest.split_once(char::is_whitespace) {
            Some((target, name)) if !name.trim().is_empty() => ConsoleCommand::Rename {
                target: target.to_string(),
                name: name.trim().to_string(),
            },
            _ => return Err(ParseError::Usage("rename <row|id> <name>")),
        },
        "delete" | "del" | "rm" => {
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                return Err(ParseError::Usage("delete <row|id>"));
            }
            ConsoleCommand::Delete {
                target: rest.to_string(),
            }
        }
        "save" => ConsoleCommand::Save { restart: false },
        "save!" => ConsoleCommand::Save { restart: true },
        "check" => ConsoleCommand::Check,
        "restart" => ConsoleCommand::Restart,
        "reload" => ConsoleCommand::Reload,
        "quit" | "q" | "exit" => ConsoleCommand::Quit,
        "help" | "?" => ConsoleCommand::Help,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
