//! State management module for hangman.
//!
//! This module provides the core state types:
//!
//! - `storage` - Key/value persistence behind a trait
//! - `words` - Word validation and the persisted word bank
//! - `round` - Round state machine (one word, six lives)
//! - `player` - Players and turn slots
//! - `game` - Matches: word selection, turns, scoring
//! - `events` - Commands from and events for the Renderer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HangmanApp                            │
//! │                                                              │
//! │  ┌──────────────────┐          ┌──────────────────────────┐  │
//! │  │    WordStore     │  word    │          Match           │  │
//! │  │                  │─────────▶│                          │  │
//! │  │ Vec<Word>        │          │ player1, player2, turn   │  │
//! │  │ KeyValueStore ───┼─▶ JSON   │ WordPicker, history      │  │
//! │  └──────────────────┘          │  ┌────────────────────┐  │  │
//! │                                │  │       Round        │  │  │
//! │                                │  │ InProgress ─▶ Won  │  │  │
//! │                                │  │            └▶ Lost │  │  │
//! │                                │  └────────────────────┘  │  │
//! │                                └──────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!        ▲ Command                              │ GameEvent
//!        │                                      ▼
//!                          Renderer
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod player;
pub mod round;
pub mod storage;
pub mod words;

// Re-export commonly used types
pub use config::{GameConfig, NamePolicy, RepeatPolicy, ScoringPolicy, DEFAULT_STORAGE_KEY};
pub use error::HangmanError;
pub use events::{Command, GameEvent};
pub use game::{Match, RoundEnd, RoundRecord, TurnReport, WordPicker};
pub use player::{Player, PlayerSlot};
pub use round::{GuessOutcome, HangmanStage, Round, RoundStatus, MAX_WRONG};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use words::{Word, WordStore, DEFAULT_WORDS};

use tracing::debug;

/// Word bank plus the match being played.
///
/// Each command runs to completion and returns the events the Renderer
/// should apply, in order.
#[derive(Debug)]
pub struct HangmanApp<S> {
    words: WordStore<S>,
    game: Option<Match>,
    config: GameConfig,
}

impl<S: KeyValueStore> HangmanApp<S> {
    /// Load the word bank from `store`.
    pub fn new(store: S, config: GameConfig) -> Self {
        let words = WordStore::load(store, &config.storage_key);
        Self {
            words,
            game: None,
            config,
        }
    }

    /// Dispatch a Renderer command.
    pub fn handle(&mut self, command: Command) -> Result<Vec<GameEvent>, HangmanError> {
        debug!(?command, "handling command");
        match command {
            Command::AddWord { text } => self.add_word(&text),
            Command::EditWord { index, text } => self.edit_word(index, &text),
            Command::DeleteWord { index } => self.delete_word(index),
            Command::StartMatch { name1, name2 } => self.start_match(&name1, &name2),
            Command::GuessLetter { letter } => self.guess_letter(letter),
            Command::AdvanceRound => self.advance_round(),
        }
    }

    pub fn add_word(&mut self, text: &str) -> Result<Vec<GameEvent>, HangmanError> {
        self.words.add(text)?;
        Ok(vec![GameEvent::word_bank(self.words.words())])
    }

    pub fn edit_word(&mut self, index: usize, text: &str) -> Result<Vec<GameEvent>, HangmanError> {
        self.words.edit(index, text)?;
        Ok(vec![GameEvent::word_bank(self.words.words())])
    }

    /// Delete a word. The Renderer asks for confirmation before sending this.
    pub fn delete_word(&mut self, index: usize) -> Result<Vec<GameEvent>, HangmanError> {
        self.words.delete(index)?;
        Ok(vec![GameEvent::word_bank(self.words.words())])
    }

    /// Start a new match, replacing any match in progress.
    pub fn start_match(&mut self, name1: &str, name2: &str) -> Result<Vec<GameEvent>, HangmanError> {
        let game = Match::start(name1, name2, self.config.clone(), &self.words)?;
        let events = vec![
            GameEvent::match_state(&game),
            GameEvent::round_state(game.round()),
        ];
        self.game = Some(game);
        Ok(events)
    }

    /// Guess a letter. Ignored guesses produce no events.
    pub fn guess_letter(&mut self, letter: char) -> Result<Vec<GameEvent>, HangmanError> {
        let game = self.game.as_mut().ok_or(HangmanError::NoActiveMatch)?;
        let report = game.guess(letter);

        let mut events = Vec::new();
        if let GuessOutcome::Miss { stage } = report.outcome {
            events.push(GameEvent::HangmanStageRevealed { stage });
        }
        if report.outcome.is_applied() {
            events.push(GameEvent::round_state(game.round()));
        }
        if let Some(end) = &report.ended {
            events.push(GameEvent::match_state(game));
            events.push(GameEvent::round_ended(end));
        }
        Ok(events)
    }

    /// Move on to the next round.
    pub fn advance_round(&mut self) -> Result<Vec<GameEvent>, HangmanError> {
        let game = self.game.as_mut().ok_or(HangmanError::NoActiveMatch)?;
        game.next_round(&self.words)?;
        Ok(vec![
            GameEvent::round_state(game.round()),
            GameEvent::match_state(game),
        ])
    }
}

impl<S> HangmanApp<S> {
    pub fn words(&self) -> &WordStore<S> {
        &self.words
    }

    pub fn game(&self) -> Option<&Match> {
        self.game.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot of everything the Renderer shows.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "word_bank": self.words.to_json(),
            "match": self.game.as_ref().map(Match::to_json)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app_with(words: &[&str]) -> HangmanApp<MemoryStore> {
        let json = serde_json::to_string(words).unwrap();
        let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, &json);
        HangmanApp::new(store, GameConfig::default().with_seed(5))
    }

    #[test]
    fn test_app_loads_defaults() {
        let app = HangmanApp::new(MemoryStore::new(), GameConfig::default());
        assert_eq!(app.words().len(), DEFAULT_WORDS.len());
        assert!(app.game().is_none());
    }

    #[test]
    fn test_word_commands_emit_bank() {
        let mut app = app_with(&["RUST"]);

        let events = app
            .handle(Command::AddWord {
                text: "docker".into(),
            })
            .unwrap();
        assert_eq!(
            events,
            vec![GameEvent::WordBankChanged {
                words: vec![Word::parse("RUST").unwrap(), Word::parse("DOCKER").unwrap()]
            }]
        );

        assert_eq!(
            app.handle(Command::DeleteWord { index: 9 }),
            Err(HangmanError::IndexOutOfRange { index: 9, len: 2 })
        );
    }

    #[test]
    fn test_guess_without_match() {
        let mut app = app_with(&["CAT"]);
        assert_eq!(
            app.handle(Command::GuessLetter { letter: 'C' }),
            Err(HangmanError::NoActiveMatch)
        );
        assert_eq!(
            app.handle(Command::AdvanceRound),
            Err(HangmanError::NoActiveMatch)
        );
    }

    #[test]
    fn test_match_flow_events() {
        let mut app = app_with(&["CAT"]);

        let events = app
            .handle(Command::StartMatch {
                name1: "Ada".into(),
                name2: "Grace".into(),
            })
            .unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::MatchStateChanged {
                    scores: (0, 0),
                    current_player: PlayerSlot::Two
                },
                GameEvent::RoundStateChanged {
                    mask: "_ _ _".into(),
                    wrong_letters: vec![],
                    lives_remaining: 6
                },
            ]
        );

        let events = app.handle(Command::GuessLetter { letter: 'x' }).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::HangmanStageRevealed {
                    stage: HangmanStage::Head
                },
                GameEvent::RoundStateChanged {
                    mask: "_ _ _".into(),
                    wrong_letters: vec!['X'],
                    lives_remaining: 5
                },
            ]
        );

        // Repeat guess is ignored
        assert!(app.handle(Command::GuessLetter { letter: 'X' }).unwrap().is_empty());

        app.handle(Command::GuessLetter { letter: 'C' }).unwrap();
        app.handle(Command::GuessLetter { letter: 'A' }).unwrap();
        let events = app.handle(Command::GuessLetter { letter: 'T' }).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::RoundStateChanged {
                    mask: "C A T".into(),
                    wrong_letters: vec!['X'],
                    lives_remaining: 5
                },
                GameEvent::MatchStateChanged {
                    scores: (10, 0),
                    current_player: PlayerSlot::One
                },
                GameEvent::RoundEnded {
                    outcome: RoundStatus::Won,
                    word: Word::parse("CAT").unwrap(),
                    player_name: "Ada".into()
                },
            ]
        );

        let events = app.handle(Command::AdvanceRound).unwrap();
        assert_eq!(
            events[1],
            GameEvent::MatchStateChanged {
                scores: (10, 0),
                current_player: PlayerSlot::One
            }
        );
    }

    #[test]
    fn test_to_json() {
        let mut app = app_with(&["CAT", "DOG"]);
        assert!(app.to_json()["match"].is_null());

        app.start_match("Ada", "Grace").unwrap();
        let json = app.to_json();
        assert_eq!(json["word_bank"]["count"], 2);
        assert_eq!(json["match"]["players"][1]["name"], "Grace");
    }
}
