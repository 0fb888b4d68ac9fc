//! Commands typed at the terminal.

use debate_core::{DeckColor, GameAction, UnknownColor};
use std::str::FromStr;
use thiserror::Error;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a group: `add <color> <name...>`
    Add { color: DeckColor, name: String },

    /// Roll for order: `roll` (next group) or `roll <n>` (1-based)
    Roll { group: Option<usize> },

    /// Spin the wheel
    Spin,

    /// Confirm the starting group
    Start,

    /// Answer the current card
    Answer { agree: bool },

    /// Dismiss the current card
    Close,

    /// Print the board
    Status,

    /// Print the snapshot as JSON
    Json,

    Help,

    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Type a command, or `help`")]
    Empty,

    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Color(#[from] UnknownColor),

    #[error("`{0}` is not a group number")]
    BadGroup(String),
}

impl Command {
    /// The engine request behind this command, if it changes the game
    pub fn action(&self) -> Option<GameAction> {
        match self {
            Command::Add { color, name } => Some(GameAction::CreateGroup {
                name: name.clone(),
                color: *color,
            }),
            Command::Roll { group: Some(group) } => {
                Some(GameAction::RollForOrder { group: *group })
            }
            Command::Roll { group: None } | Command::Spin => Some(GameAction::Spin),
            Command::Start => Some(GameAction::StartGame),
            Command::Answer { agree } => Some(GameAction::Respond { agree: *agree }),
            Command::Close => Some(GameAction::CloseCard),
            Command::Status | Command::Json | Command::Help | Command::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_lowercase().as_str() {
            "add" => {
                let color: DeckColor = words
                    .next()
                    .ok_or(CommandError::Usage("add <color> <name>"))?
                    .parse()?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(CommandError::Usage("add <color> <name>"));
                }
                Command::Add { color, name }
            }
            "roll" => match words.next() {
                None => Command::Roll { group: None },
                Some(word) => {
                    let number: usize = word
                        .parse()
                        .map_err(|_| CommandError::BadGroup(word.to_string()))?;
                    let group = number
                        .checked_sub(1)
                        .ok_or_else(|| CommandError::BadGroup(word.to_string()))?;
                    Command::Roll { group: Some(group) }
                }
            },
            "spin" | "s" => Command::Spin,
            "start" => Command::Start,
            "agree" | "a" | "si" => Command::Answer { agree: true },
            "disagree" | "d" | "no" => Command::Answer { agree: false },
            "close" | "c" => Command::Close,
            "status" | "board" => Command::Status,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  add <color> <name>   register a group (red, green, purple, blue)
  roll [n]             roll for order (next group, or group n)
  start                confirm the starting group
  spin | s             spin the wheel
  agree | a            agree with the card
  disagree | d         disagree with the card
  close | c            close the card without answering
  status               show the board
  json                 print the game state as JSON
  help                 show this text
  quit                 leave";
