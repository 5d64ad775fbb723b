//! Match state management.
//!
//! A match is a sequence of rounds between two players. It picks each word,
//! tracks whose turn it is and applies scores when a round ends.
//!
//! Turn order: the guesser alternates exactly once per round transition. A
//! finished round flips the turn as its outcome is applied; starting the next
//! round then keeps it. Starting a round without finishing the previous one
//! (including the very first round) flips it there instead. The first
//! round's guesser is player 2.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::config::{GameConfig, RepeatPolicy, ScoringPolicy};
use super::error::HangmanError;
use super::player::{players_from_names, Player, PlayerSlot};
use super::round::{GuessOutcome, Round, RoundStatus};
use super::words::{Word, WordStore};

/// Chooses the word for each round under a [`RepeatPolicy`].
#[derive(Debug, Clone)]
pub struct WordPicker {
    policy: RepeatPolicy,
    /// Words played since the last reset, oldest first
    recent: Vec<Word>,
    rng: ChaCha8Rng,
}

impl WordPicker {
    pub fn new(policy: RepeatPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            policy,
            recent: Vec::new(),
            rng,
        }
    }

    /// Pick a word from `bank`, `None` only if the bank is empty.
    pub fn pick(&mut self, bank: &[Word]) -> Option<Word> {
        if bank.is_empty() {
            return None;
        }

        let candidates: Vec<&Word> = match self.policy {
            RepeatPolicy::NoImmediateRepeat => {
                let last = self.recent.last();
                if bank.len() > 1 {
                    bank.iter().filter(|w| Some(*w) != last).collect()
                } else {
                    bank.iter().collect()
                }
            }
            RepeatPolicy::ExhaustBank => {
                let unused: Vec<&Word> =
                    bank.iter().filter(|w| !self.recent.contains(*w)).collect();
                if unused.is_empty() {
                    // Bank was edited since the last reset
                    self.recent.clear();
                    bank.iter().collect()
                } else {
                    unused
                }
            }
        };

        let word = candidates.choose(&mut self.rng).map(|w| (*w).clone())?;
        self.record(word.clone(), bank);
        Some(word)
    }

    fn record(&mut self, word: Word, bank: &[Word]) {
        match self.policy {
            RepeatPolicy::NoImmediateRepeat => {
                self.recent.clear();
                self.recent.push(word);
            }
            RepeatPolicy::ExhaustBank => {
                self.recent.push(word);
                if bank.iter().all(|w| self.recent.contains(w)) {
                    debug!(count = bank.len(), "every word used, resetting history");
                    self.recent.clear();
                }
            }
        }
    }

    pub fn recent(&self) -> &[Word] {
        &self.recent
    }

    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }
}

/// How a finished round was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundEnd {
    pub outcome: RoundStatus,
    pub word: Word,
    /// Who was guessing
    pub guesser: PlayerSlot,
    /// Who scored, if anyone
    pub scorer: Option<PlayerSlot>,
    pub points: u32,
    /// Winner's name on a win, the guesser's name on a loss
    pub player_name: String,
}

/// Result of a guess made through the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: GuessOutcome,
    pub status: RoundStatus,
    /// Set on the guess that finished the round
    pub ended: Option<RoundEnd>,
}

/// A finished round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    /// 1-indexed
    pub number: u32,
    pub word: Word,
    pub outcome: RoundStatus,
    pub guesser: PlayerSlot,
    pub scorer: Option<PlayerSlot>,
    pub points: u32,
    pub wrong_guesses: u8,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Two-player match.
#[derive(Debug, Clone)]
pub struct Match {
    player1: Player,
    player2: Player,

    /// Guesser while a round is in progress, next guesser once it ended
    current: PlayerSlot,

    round: Round,

    /// Rounds started, including the current one
    round_number: u32,

    /// The finished round already flipped the turn
    turn_flipped: bool,

    picker: WordPicker,

    history: Vec<RoundRecord>,

    config: GameConfig,

    /// When the match was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    /// Validate names and start the first round.
    pub fn start<S>(
        name1: &str,
        name2: &str,
        config: GameConfig,
        bank: &WordStore<S>,
    ) -> Result<Self, HangmanError> {
        let (player1, player2) = players_from_names(name1, name2, config.name_policy)?;

        let mut picker = WordPicker::new(config.repeat_policy, config.seed);
        let round = Round::start(picker.pick(bank.words()))?;

        let mut game = Self {
            player1,
            player2,
            current: PlayerSlot::One,
            round,
            round_number: 1,
            turn_flipped: false,
            picker,
            history: Vec::new(),
            config,
            created_at: chrono::Utc::now(),
        };
        game.advance_turn();

        info!(
            player1 = %game.player1.name,
            player2 = %game.player2.name,
            guesser = game.current.number(),
            "match started"
        );
        Ok(game)
    }

    /// Start the next round with a fresh word.
    ///
    /// Fails on an empty bank, leaving the current round in place.
    pub fn next_round<S>(&mut self, bank: &WordStore<S>) -> Result<&Round, HangmanError> {
        self.round = Round::start(self.picker.pick(bank.words()))?;
        self.round_number += 1;
        self.advance_turn();

        info!(
            round = self.round_number,
            guesser = self.current.number(),
            letters = self.round.word().len(),
            "round started"
        );
        Ok(&self.round)
    }

    fn advance_turn(&mut self) {
        if !self.turn_flipped {
            self.current = self.current.other();
        }
        self.turn_flipped = false;
    }

    /// Guess a letter in the current round.
    ///
    /// The guess that ends the round also settles it.
    pub fn guess(&mut self, letter: char) -> TurnReport {
        let outcome = self.round.guess(letter);
        let status = self.round.status();

        let ended = if outcome.is_applied() {
            match status {
                RoundStatus::Won => Some(self.on_round_won()),
                RoundStatus::Lost => Some(self.on_round_lost()),
                RoundStatus::InProgress => None,
            }
        } else {
            None
        };

        TurnReport {
            outcome,
            status,
            ended,
        }
    }

    fn on_round_won(&mut self) -> RoundEnd {
        let guesser = self.current;
        let scorer = match self.config.scoring_policy {
            ScoringPolicy::Opponent => guesser.other(),
            ScoringPolicy::Guesser => guesser,
        };
        let points = self.config.points_per_win;
        self.player_mut(scorer).award(points);

        let end = RoundEnd {
            outcome: RoundStatus::Won,
            word: self.round.word().clone(),
            guesser,
            scorer: Some(scorer),
            points,
            player_name: self.player(scorer).name.clone(),
        };
        info!(word = %end.word, winner = %end.player_name, points, "round won");
        self.finish_round(end)
    }

    fn on_round_lost(&mut self) -> RoundEnd {
        let guesser = self.current;
        let end = RoundEnd {
            outcome: RoundStatus::Lost,
            word: self.round.word().clone(),
            guesser,
            scorer: None,
            points: 0,
            player_name: self.player(guesser).name.clone(),
        };
        info!(word = %end.word, guesser = %end.player_name, "round lost");
        self.finish_round(end)
    }

    fn finish_round(&mut self, end: RoundEnd) -> RoundEnd {
        self.history.push(RoundRecord {
            number: self.round_number,
            word: end.word.clone(),
            outcome: end.outcome,
            guesser: end.guesser,
            scorer: end.scorer,
            points: end.points,
            wrong_guesses: self.round.wrong_guesses(),
            started_at: self.round.started_at,
            ended_at: self.round.ended_at,
        });

        self.current = self.current.other();
        self.turn_flipped = true;
        end
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        match slot {
            PlayerSlot::One => &self.player1,
            PlayerSlot::Two => &self.player2,
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        match slot {
            PlayerSlot::One => &mut self.player1,
            PlayerSlot::Two => &mut self.player2,
        }
    }

    /// Current slot. See the module docs for when this changes.
    pub fn current_slot(&self) -> PlayerSlot {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Scores as (player 1, player 2).
    pub fn scores(&self) -> (u32, u32) {
        (self.player1.score, self.player2.score)
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    pub fn recent_words(&self) -> &[Word] {
        self.picker.recent()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Convert full match state to JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "players": [self.player1.to_json(), self.player2.to_json()],
            "current_player": self.current.number(),
            "round_number": self.round_number,
            "round": self.round.to_json(),
            "history": self.history
        })
    }
}
