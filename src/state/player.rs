//! Players and turn slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::NamePolicy;
use super::error::HangmanError;

/// Which of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

impl PlayerSlot {
    /// The other player.
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// 1 or 2, as shown to players.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    fn default_name(self) -> &'static str {
        match self {
            Self::One => "Player 1",
            Self::Two => "Player 2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// A named player with a running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "score": self.score
        })
    }
}

/// Build both players from raw names under `policy`.
///
/// Names are trimmed before any check.
pub fn players_from_names(
    name1: &str,
    name2: &str,
    policy: NamePolicy,
) -> Result<(Player, Player), HangmanError> {
    let name1 = name1.trim();
    let name2 = name2.trim();

    match policy {
        NamePolicy::Strict => {
            if name1.is_empty() || name2.is_empty() {
                return Err(HangmanError::InvalidPlayerNames("both players need a name"));
            }
            if name1 == name2 {
                return Err(HangmanError::InvalidPlayerNames("names must be different"));
            }
            Ok((Player::new(name1), Player::new(name2)))
        }
        NamePolicy::Lenient => {
            let pick = |name: &str, slot: PlayerSlot| {
                if name.is_empty() {
                    slot.default_name().to_string()
                } else {
                    name.to_string()
                }
            };
            Ok((
                Player::new(pick(name1, PlayerSlot::One)),
                Player::new(pick(name2, PlayerSlot::Two)),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slot_other() {
        assert_eq!(PlayerSlot::One.other(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::Two.other(), PlayerSlot::One);
        assert_eq!(PlayerSlot::One.other().other(), PlayerSlot::One);
        assert_eq!(format!("{}", PlayerSlot::Two), "player 2");
    }

    #[test]
    fn test_award() {
        let mut p = Player::new("Ada");
        assert_eq!(p.score, 0);
        p.award(10);
        p.award(10);
        assert_eq!(p.score, 20);
    }

    #[test]
    fn test_strict_names() {
        let (p1, p2) = players_from_names(" Ada ", "Grace", NamePolicy::Strict).unwrap();
        assert_eq!(p1.name, "Ada");
        assert_eq!(p2.name, "Grace");

        assert!(matches!(
            players_from_names("", "Grace", NamePolicy::Strict),
            Err(HangmanError::InvalidPlayerNames(_))
        ));
        assert!(matches!(
            players_from_names("Ada", "   ", NamePolicy::Strict),
            Err(HangmanError::InvalidPlayerNames(_))
        ));
        assert!(matches!(
            players_from_names("Ada", " Ada", NamePolicy::Strict),
            Err(HangmanError::InvalidPlayerNames(_))
        ));
    }

    #[test]
    fn test_lenient_names() {
        let (p1, p2) = players_from_names("", " ", NamePolicy::Lenient).unwrap();
        assert_eq!(p1.name, "Player 1");
        assert_eq!(p2.name, "Player 2");

        let (p1, p2) = players_from_names("Ada", "Ada", NamePolicy::Lenient).unwrap();
        assert_eq!(p1.name, p2.name);
    }
}
