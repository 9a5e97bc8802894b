use std::fmt;

use quiz_core::model::{OPTION_COUNT, ParseLevelError, SelfLevel};

/// One line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Choose(usize),
    Next,
    Level(SelfLevel),
    Reset,
    History,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    OptionOutOfRange(usize),
    Level(ParseLevelError),
    Unknown(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "type a command, or `help`"),
            InputError::OptionOutOfRange(n) => {
                write!(f, "option {n} does not exist, pick 1-{OPTION_COUNT}")
            }
            InputError::Level(err) => write!(f, "{err}"),
            InputError::Unknown(raw) => write!(f, "unknown command: {raw}"),
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(InputError::Empty);
    };

    match head.to_ascii_lowercase().as_str() {
        "n" | "next" => Ok(Command::Next),
        "reset" => Ok(Command::Reset),
        "history" => Ok(Command::History),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "level" => {
            let raw = words.next().unwrap_or_default();
            raw.parse().map(Command::Level).map_err(InputError::Level)
        }
        other => match other.parse::<usize>() {
            Ok(n) if (1..=OPTION_COUNT).contains(&n) => Ok(Command::Choose(n - 1)),
            Ok(n) => Err(InputError::OptionOutOfRange(n)),
            Err(_) => Err(InputError::Unknown(line.to_owned())),
        },
    }
}
