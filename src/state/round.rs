//! Round state machine.
//!
//! One round of hangman against a single word.
//!
//! # State Diagram
//!
//! ```text
//!                 guess (hit, word complete)
//!            ┌───────────────────────────────────▶ ┌─────┐
//!            │                                      │ Won │
//! ┌──────────┴─┐                                    └─────┘
//! │ InProgress │◀─┐ guess (hit, or miss with lives left)
//! └──────────┬─┘  │
//!            │    └──┘
//!            │    guess (miss, 6th wrong guess)
//!            └───────────────────────────────────▶ ┌──────┐
//!                                                   │ Lost │
//!                                                   └──────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::HangmanError;
use super::words::Word;

/// Wrong guesses allowed before the round is lost.
pub const MAX_WRONG: u8 = 6;

/// Placeholder shown for letters not yet guessed.
pub const MASK_CHAR: char = '_';

/// Round states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Check if the round still accepts guesses.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gallows drawing stages, revealed one per wrong guess in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HangmanStage {
    Head,
    LeftArm,
    RightArm,
    Body,
    LeftLeg,
    RightLeg,
}

impl HangmanStage {
    pub const ALL: [HangmanStage; MAX_WRONG as usize] = [
        Self::Head,
        Self::LeftArm,
        Self::RightArm,
        Self::Body,
        Self::LeftLeg,
        Self::RightLeg,
    ];

    /// Stage revealed by the `n`th wrong guess (1-indexed).
    pub fn for_wrong_guess(n: u8) -> Option<Self> {
        let index = usize::from(n).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
            Self::Body => "body",
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
        }
    }
}

/// What a single guess did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter is in the word.
    Hit,
    /// Letter is not in the word; the next stage is drawn.
    Miss { stage: HangmanStage },
    /// Letter was guessed before. Nothing changed.
    AlreadyGuessed,
    /// Not a letter A-Z. Nothing changed.
    NotALetter,
    /// Round is over. Nothing changed.
    RoundOver,
}

impl GuessOutcome {
    /// Check if the guess changed the round.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Hit | Self::Miss { .. })
    }
}

/// A single round.
#[derive(Debug, Clone)]
pub struct Round {
    word: Word,

    /// Guessed letters in guess order, no repeats
    guessed: Vec<char>,

    wrong_guesses: u8,

    status: RoundStatus,

    /// When the round started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// When the round was won or lost
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Round {
    /// Start a round against `word`.
    pub fn new(word: Word) -> Self {
        Self {
            word,
            guessed: Vec::new(),
            wrong_guesses: 0,
            status: RoundStatus::InProgress,
            started_at: chrono::Utc::now(),
            ended_at: None,
        }
    }

    /// Start a round, failing when the caller had no word to give.
    pub fn start(word: Option<Word>) -> Result<Self, HangmanError> {
        word.map(Self::new).ok_or(HangmanError::EmptyWordBank)
    }

    /// Guess a letter.
    ///
    /// Lowercase input is accepted. Guesses after the round ended, repeated
    /// letters and non-letters leave the round unchanged.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status.is_terminal() {
            return GuessOutcome::RoundOver;
        }

        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return GuessOutcome::NotALetter;
        }
        if self.guessed.contains(&letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        self.guessed.push(letter);

        let outcome = if self.word.contains(letter) {
            GuessOutcome::Hit
        } else {
            self.wrong_guesses += 1;
            // In range: the round is lost once wrong_guesses reaches MAX_WRONG
            let stage = HangmanStage::ALL[usize::from(self.wrong_guesses) - 1];
            GuessOutcome::Miss { stage }
        };

        self.update_status();
        debug!(
            %letter,
            wrong = self.wrong_guesses,
            status = self.status.as_str(),
            "guess applied"
        );
        outcome
    }

    /// Win is checked first; a miss can never complete the word.
    fn update_status(&mut self) {
        let next = if self.is_word_complete() {
            RoundStatus::Won
        } else if self.wrong_guesses >= MAX_WRONG {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        };

        if next.is_terminal() {
            self.ended_at = Some(chrono::Utc::now());
        }
        self.status = next;
    }

    fn is_word_complete(&self) -> bool {
        self.word.letters().all(|c| self.guessed.contains(&c))
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    pub fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    pub fn lives_remaining(&self) -> u8 {
        MAX_WRONG - self.wrong_guesses
    }

    /// Word with unguessed letters masked, space separated.
    pub fn masked_word(&self) -> String {
        let letters: Vec<String> = self
            .word
            .letters()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c.to_string()
                } else {
                    MASK_CHAR.to_string()
                }
            })
            .collect();
        letters.join(" ")
    }

    /// Wrong letters in guess order.
    pub fn wrong_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.word.contains(*c))
            .collect()
    }

    /// Stages drawn so far.
    pub fn revealed_stages(&self) -> &'static [HangmanStage] {
        let all: &'static [HangmanStage] = &HangmanStage::ALL;
        &all[..usize::from(self.wrong_guesses)]
    }

    /// Snapshot for the Renderer. The word is only included once the round
    /// has ended.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "mask": self.masked_word(),
            "wrong_letters": self.wrong_letters().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            "lives_remaining": self.lives_remaining(),
            "stages": self.revealed_stages().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "status": self.status.as_str()
        });
        if self.status.is_terminal() {
            obj["word"] = serde_json::json!(self.word.as_str());
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round(word: &str) -> Round {
        Round::new(Word::parse(word).unwrap())
    }

    #[test]
    fn test_start() {
        let r = round("CAT");
        assert_eq!(r.status(), RoundStatus::InProgress);
        assert!(r.guessed_letters().is_empty());
        assert_eq!(r.wrong_guesses(), 0);
        assert_eq!(r.lives_remaining(), 6);
        assert_eq!(r.masked_word(), "_ _ _");
        assert!(r.ended_at.is_none());
    }

    #[test]
    fn test_start_without_word() {
        assert_eq!(Round::start(None).unwrap_err(), HangmanError::EmptyWordBank);
        assert!(Round::start(Some(Word::parse("CAT").unwrap())).is_ok());
    }

    #[test]
    fn test_win() {
        let mut r = round("CAT");

        assert_eq!(r.guess('C'), GuessOutcome::Hit);
        assert_eq!(r.masked_word(), "C _ _");
        assert_eq!(r.guess('A'), GuessOutcome::Hit);
        assert_eq!(r.status(), RoundStatus::InProgress);
        assert_eq!(r.guess('T'), GuessOutcome::Hit);

        assert_eq!(r.status(), RoundStatus::Won);
        assert_eq!(r.masked_word(), "C A T");
        assert!(r.ended_at.is_some());
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut r = round("MERGE");
        r.guess('E');
        assert_eq!(r.masked_word(), "_ E _ _ E");
        r.guess('M');
        r.guess('R');
        r.guess('G');
        assert_eq!(r.status(), RoundStatus::Won);
    }

    #[test]
    fn test_loss_reveals_stages_in_order() {
        let mut r = round("CAT");
        let mut stages = Vec::new();

        for letter in ['X', 'Y', 'Z', 'Q', 'W', 'R'] {
            match r.guess(letter) {
                GuessOutcome::Miss { stage } => stages.push(stage),
                other => panic!("expected miss, got {:?}", other),
            }
        }

        assert_eq!(r.status(), RoundStatus::Lost);
        assert_eq!(r.lives_remaining(), 0);
        assert_eq!(stages, HangmanStage::ALL.to_vec());
        assert_eq!(r.revealed_stages(), &HangmanStage::ALL[..]);
        assert_eq!(r.wrong_letters(), vec!['X', 'Y', 'Z', 'Q', 'W', 'R']);
    }

    #[test]
    fn test_losing_guess_is_reported_as_miss() {
        let mut r = round("CAT");
        for letter in ['X', 'Y', 'Z', 'Q', 'W'] {
            assert!(r.guess(letter).is_applied());
        }

        let last = r.guess('R');
        assert_eq!(
            last,
            GuessOutcome::Miss {
                stage: HangmanStage::RightLeg
            }
        );
        assert!(last.is_applied());
        assert_eq!(r.status(), RoundStatus::Lost);
        assert_eq!(r.guess('B'), GuessOutcome::RoundOver);
        assert_eq!(r.wrong_guesses(), MAX_WRONG);
    }

    #[test]
    fn test_not_lost_before_sixth_miss() {
        let mut r = round("CAT");
        for letter in ['X', 'Y', 'Z', 'Q', 'W'] {
            r.guess(letter);
        }
        assert_eq!(r.status(), RoundStatus::InProgress);
        assert_eq!(r.lives_remaining(), 1);

        // Win on the last life
        r.guess('C');
        r.guess('A');
        r.guess('T');
        assert_eq!(r.status(), RoundStatus::Won);
        assert_eq!(r.lives_remaining(), 1);
    }

    #[test]
    fn test_repeat_guess_is_noop() {
        let mut r = round("CAT");
        r.guess('X');
        r.guess('C');

        let guessed = r.guessed_letters().to_vec();
        let wrong = r.wrong_guesses();

        assert_eq!(r.guess('X'), GuessOutcome::AlreadyGuessed);
        assert_eq!(r.guess('c'), GuessOutcome::AlreadyGuessed);
        assert_eq!(r.guessed_letters(), guessed.as_slice());
        assert_eq!(r.wrong_guesses(), wrong);
    }

    #[test]
    fn test_non_letter_is_noop() {
        let mut r = round("CAT");
        assert_eq!(r.guess('1'), GuessOutcome::NotALetter);
        assert_eq!(r.guess('é'), GuessOutcome::NotALetter);
        assert!(r.guessed_letters().is_empty());
        assert!(!GuessOutcome::NotALetter.is_applied());
    }

    #[test]
    fn test_lowercase_guess() {
        let mut r = round("CAT");
        assert_eq!(r.guess('c'), GuessOutcome::Hit);
        assert_eq!(r.guessed_letters(), &['C']);
    }

    #[test]
    fn test_guess_after_end_is_noop() {
        let mut r = round("A");
        r.guess('A');
        assert_eq!(r.status(), RoundStatus::Won);

        assert_eq!(r.guess('B'), GuessOutcome::RoundOver);
        assert_eq!(r.wrong_guesses(), 0);
        assert_eq!(r.guessed_letters(), &['A']);
    }

    #[test]
    fn test_stage_for_wrong_guess() {
        assert_eq!(HangmanStage::for_wrong_guess(0), None);
        assert_eq!(HangmanStage::for_wrong_guess(1), Some(HangmanStage::Head));
        assert_eq!(HangmanStage::for_wrong_guess(4), Some(HangmanStage::Body));
        assert_eq!(HangmanStage::for_wrong_guess(6), Some(HangmanStage::RightLeg));
        assert_eq!(HangmanStage::for_wrong_guess(7), None);
    }

    #[test]
    fn test_to_json_hides_word_until_end() {
        let mut r = round("CAT");
        r.guess('Q');

        let json = r.to_json();
        assert_eq!(json["mask"], "_ _ _");
        assert_eq!(json["wrong_letters"], serde_json::json!(["Q"]));
        assert_eq!(json["lives_remaining"], 5);
        assert_eq!(json["stages"], serde_json::json!(["head"]));
        assert!(json.get("word").is_none());

        for letter in ['C', 'A', 'T'] {
            r.guess(letter);
        }
        assert_eq!(r.to_json()["word"], "CAT");
        assert_eq!(r.to_json()["status"], "won");
    }
}
