//! Player commands and their text form.
//!
//! The wire accepts two commands, one per line:
//! - `PS` passes the turn
//! - two column letters `A`-`F` attack: the first names the attacker's own
//!   slot, the second the opponent's slot
//!
//! Both are case-insensitive. Anything else is a syntax error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::HAND_SLOTS;

/// Text of the pass command.
pub const PASS_COMMAND: &str = "PS";

/// A parsed player command.
///
/// ## Example
///
/// ```
/// use coexistence::core::Command;
///
/// assert_eq!(Command::parse("ps").unwrap(), Command::Pass);
/// assert_eq!(Command::parse("ab").unwrap(), Command::Move { from: 0, to: 1 });
/// assert!(Command::parse("ZZ").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Attack the opponent's slot `to` with the own slot `from`.
    Move {
        /// Attacking slot index in the mover's hand.
        from: usize,
        /// Defending slot index in the opponent's hand.
        to: usize,
    },
    /// Pass the turn.
    Pass,
}

/// Reasons a command line fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Not two characters long and not `PS`.
    #[error("expected 2 characters, got {0}")]
    WrongLength(usize),

    /// Two characters, but at least one is not a column letter.
    #[error("'{0}' is not a column letter A-F")]
    NotAColumn(char),
}

impl Command {
    /// Parse one command line.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let text = line.trim().to_ascii_uppercase();

        if text == PASS_COMMAND {
            return Ok(Command::Pass);
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 2 {
            return Err(CommandError::WrongLength(chars.len()));
        }

        let from = column_to_index(chars[0]).ok_or(CommandError::NotAColumn(chars[0]))?;
        let to = column_to_index(chars[1]).ok_or(CommandError::NotAColumn(chars[1]))?;

        Ok(Command::Move { from, to })
    }

    /// Render the command in its wire form.
    #[must_use]
    pub fn to_wire(self) -> String {
        match self {
            Command::Pass => PASS_COMMAND.to_string(),
            Command::Move { from, to } => {
                let mut text = String::with_capacity(2);
                text.push(index_to_column(from).unwrap_or('?'));
                text.push(index_to_column(to).unwrap_or('?'));
                text
            }
        }
    }
}

/// Map a column letter (either case) to its slot index.
#[must_use]
pub fn column_to_index(column: char) -> Option<usize> {
    let upper = column.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    let index = (upper as u8 - b'A') as usize;
    (index < HAND_SLOTS).then_some(index)
}

/// Map a slot index to its column letter.
#[must_use]
pub fn index_to_column(index: usize) -> Option<char> {
    (index < HAND_SLOTS).then(|| (b'A' + index as u8) as char)
}
