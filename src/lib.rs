//! Hangman State Library
//!
//! This crate provides state management for a two-player hangman game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Word Bank** - An ordered, duplicate-free list of uppercase words,
//!   validated on every edit and persisted through a key/value store.
//!
//! - **Round State Machine** - One word, six lives, `InProgress` until the word
//!   is solved (`Won`) or the gallows is complete (`Lost`).
//!
//! - **Match Management** - Two players, alternating turns, word selection
//!   without repeats and scoring.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Guesses that cannot apply are
//!    reported and change nothing.
//!
//! 2. **Storage is injected** - Anything implementing [`KeyValueStore`] can
//!    hold the word bank.
//!
//! 3. **No rendering** - This crate is pure state. A Renderer sends
//!    [`Command`]s and draws the [`GameEvent`]s it gets back.
//!
//! 4. **Serialization-ready** - Commands, events and snapshots are JSON.
//!
//! # Example
//!
//! ```rust
//! use hangman_state::{Command, GameConfig, HangmanApp, MemoryStore};
//!
//! let mut app = HangmanApp::new(MemoryStore::new(), GameConfig::default().with_seed(1));
//!
//! // The default word bank is loaded and persisted
//! assert_eq!(app.words().len(), 20);
//!
//! app.handle(Command::AddWord { text: "terraform".to_string() }).unwrap();
//!
//! app.handle(Command::StartMatch {
//!     name1: "Alice".to_string(),
//!     name2: "Bob".to_string(),
//! })
//! .unwrap();
//!
//! let events = app.handle(Command::GuessLetter { letter: 'E' }).unwrap();
//! assert!(!events.is_empty());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
