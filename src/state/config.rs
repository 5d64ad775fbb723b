//! Match configuration.
//!
//! Name validation, word repetition and scoring each come in two variants,
//! selected by a policy enum.

use serde::{Deserialize, Serialize};

/// Storage key the word bank lives under.
pub const DEFAULT_STORAGE_KEY: &str = "devopsWords";

/// Points awarded for a solved word.
pub const DEFAULT_POINTS_PER_WIN: u32 = 10;

/// How player names are validated at match start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Reject empty names and identical names.
    #[default]
    Strict,
    /// Replace empty names with "Player 1"/"Player 2", allow identical names.
    Lenient,
}

/// Which words may be picked for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Never pick the previous word twice in a row, unless it is the only word.
    #[default]
    NoImmediateRepeat,
    /// Use every word once before any word repeats.
    ExhaustBank,
}

/// Who is credited when a word is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// The player who was not guessing.
    #[default]
    Opponent,
    /// The player who was guessing.
    Guesser,
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub storage_key: String,
    pub points_per_win: u32,
    pub name_policy: NamePolicy,
    pub repeat_policy: RepeatPolicy,
    pub scoring_policy: ScoringPolicy,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            points_per_win: DEFAULT_POINTS_PER_WIN,
            name_policy: NamePolicy::default(),
            repeat_policy: RepeatPolicy::default(),
            scoring_policy: ScoringPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a configuration, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    pub fn with_scoring_policy(mut self, policy: ScoringPolicy) -> Self {
        self.scoring_policy = policy;
        self
    }

    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.storage_key, "devopsWords");
        assert_eq!(config.points_per_win, 10);
        assert_eq!(config.name_policy, NamePolicy::Strict);
        assert_eq!(config.repeat_policy, RepeatPolicy::NoImmediateRepeat);
        assert_eq!(config.scoring_policy, ScoringPolicy::Opponent);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            GameConfig::from_json(r#"{"repeat_policy": "exhaust_bank", "seed": 7}"#).unwrap();
        assert_eq!(config.repeat_policy, RepeatPolicy::ExhaustBank);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.points_per_win, DEFAULT_POINTS_PER_WIN);
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        assert!(GameConfig::from_json(r#"{"scoring_policy": "everyone"}"#).is_err());
    }
}
