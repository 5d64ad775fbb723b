//! Errors surfaced to the player.
//!
//! Every variant is a recoverable validation failure; the Renderer shows the
//! `Display` text and the game carries on.

use std::fmt;

use super::storage::StorageError;

/// Hangman errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangmanError {
    /// Word is empty after trimming.
    EmptyWord,
    /// Word is already in the bank.
    DuplicateWord(String),
    /// Word contains something other than A-Z.
    InvalidCharacters(String),
    /// No word at this position.
    IndexOutOfRange { index: usize, len: usize },
    /// Word bank has no words to play.
    EmptyWordBank,
    /// Player names rejected by the name policy.
    InvalidPlayerNames(&'static str),
    /// A round command arrived before any match was started.
    NoActiveMatch,
    /// The word bank could not be persisted.
    Storage(StorageError),
}

impl fmt::Display for HangmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "Cannot add empty word!"),
            Self::DuplicateWord(word) => write!(f, "Word already exists: {}", word),
            Self::InvalidCharacters(word) => {
                write!(f, "Word can only contain letters A-Z: {}", word)
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "No word at position {} (bank has {})", index, len)
            }
            Self::EmptyWordBank => {
                write!(f, "No words in the word bank! Add some words first.")
            }
            Self::InvalidPlayerNames(reason) => write!(f, "Invalid player names: {}", reason),
            Self::NoActiveMatch => write!(f, "No match in progress"),
            Self::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HangmanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for HangmanError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}
