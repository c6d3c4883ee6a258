//! Interactive Input Parsing
//!
//! Every prompt accepts a number, `?` to show the probability matrix, or
//! `x` / `exit` / `quit`. Parse failures are [`InputError`]s: the session
//! prints them and asks again.

use thiserror::Error;

/// A parsed prompt answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<T> {
    /// A valid value.
    Value(T),
    /// Show the probability matrix, then ask again.
    ShowMatrix,
    /// Leave the game.
    Quit,
}

/// Recoverable input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing entered.
    #[error("please enter a value")]
    Empty,

    /// Not a non-negative integer.
    #[error("{0:?} is not a number")]
    NotANumber(String),

    /// Number outside the accepted range.
    #[error("{value} is not between 0 and {max}")]
    OutOfRange {
        /// Entered number.
        value: usize,
        /// Largest accepted number.
        max: usize,
    },

    /// Die already taken by the other party.
    #[error("die {0} is taken by the computer, please choose another")]
    ForbiddenDie(usize),
}

/// Parse an index in `[0, bound)`, or a command.
pub fn parse_index(line: &str, bound: usize) -> Result<Command<usize>, InputError> {
    let text = line.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if text == "?" {
        return Ok(Command::ShowMatrix);
    }
    if ["x", "exit", "quit"].iter().any(|q| text.eq_ignore_ascii_case(q)) {
        return Ok(Command::Quit);
    }

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber(text.to_string()));
    }
    // All digits: only overflow can fail, and that is out of range too.
    let value = text.parse::<usize>().unwrap_or(usize::MAX);
    if value >= bound {
        return Err(InputError::OutOfRange {
            value,
            max: bound.saturating_sub(1),
        });
    }
    Ok(Command::Value(value))
}

/// Parse a die choice, rejecting the die the other party holds.
pub fn parse_die_choice(
    line: &str,
    catalog_len: usize,
    forbidden: Option<usize>,
) -> Result<Command<usize>, InputError> {
    match parse_index(line, catalog_len)? {
        Command::Value(index) if Some(index) == forbidden => Err(InputError::ForbiddenDie(index)),
        command => Ok(command),
    }
}
