//! Line commands for the interactive binary.

use crate::types::TodoId;
use thiserror::Error;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click the toggle control of a row
    Toggle(TodoId),
    /// Click the delete control of a row
    Delete(TodoId),
    /// Add a todo with the rest of the line as text
    Add(String),
    /// Re-render the page
    Show,
    /// Print the state as JSON
    Json,
    /// Print the command list
    Help,
    /// Leave the loop
    Quit,
}

/// Why an input line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,

    /// First word is not a command
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    /// Command needs an argument
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    /// Argument is not a todo id
    #[error("`{0}` is not a todo id")]
    InvalidId(String),
}

/// Command summary printed by `help`
pub const HELP: &str = "\
commands:
  toggle <id>   toggle a todo
  delete <id>   delete a todo
  add <text>    add a todo
  show          render the list
  json          print the state as JSON
  help          this message
  quit          exit";

impl Command {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "toggle" | "t" => Ok(Self::Toggle(parse_id("toggle", rest)?)),
            "delete" | "d" => Ok(Self::Delete(parse_id("delete", rest)?)),
            "add" | "a" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("add"))
                } else {
                    Ok(Self::Add(rest.to_string()))
                }
            },
            "show" | "s" => Ok(Self::Show),
            "json" => Ok(Self::Json),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    arg.parse::<u64>()
        .map(TodoId::new)
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}
