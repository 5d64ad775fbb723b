//! Renderer contract.
//!
//! The Renderer sends [`Command`]s in and draws the [`GameEvent`]s that come
//! back. Both are serde types so a front end can exchange them as JSON.

use serde::{Deserialize, Serialize};

use super::game::{Match, RoundEnd};
use super::player::PlayerSlot;
use super::round::{HangmanStage, Round, RoundStatus};
use super::words::Word;

/// Commands issued by the Renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddWord { text: String },
    EditWord { index: usize, text: String },
    DeleteWord { index: usize },
    StartMatch { name1: String, name2: String },
    GuessLetter { letter: char },
    AdvanceRound,
}

/// State changes for the Renderer to reflect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    WordBankChanged {
        words: Vec<Word>,
    },
    RoundStateChanged {
        mask: String,
        wrong_letters: Vec<char>,
        lives_remaining: u8,
    },
    HangmanStageRevealed {
        stage: HangmanStage,
    },
    MatchStateChanged {
        scores: (u32, u32),
        current_player: PlayerSlot,
    },
    RoundEnded {
        outcome: RoundStatus,
        word: Word,
        player_name: String,
    },
}

impl GameEvent {
    pub fn word_bank(words: &[Word]) -> Self {
        Self::WordBankChanged {
            words: words.to_vec(),
        }
    }

    pub fn round_state(round: &Round) -> Self {
        Self::RoundStateChanged {
            mask: round.masked_word(),
            wrong_letters: round.wrong_letters(),
            lives_remaining: round.lives_remaining(),
        }
    }

    pub fn match_state(game: &Match) -> Self {
        Self::MatchStateChanged {
            scores: game.scores(),
            current_player: game.current_slot(),
        }
    }

    pub fn round_ended(end: &RoundEnd) -> Self {
        Self::RoundEnded {
            outcome: end.outcome,
            word: end.word.clone(),
            player_name: end.player_name.clone(),
        }
    }
}
