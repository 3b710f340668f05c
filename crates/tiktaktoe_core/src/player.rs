//! Session participants.

use derive_getters::Getters;
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::{Difficulty, Mark, PlayerRecord};

/// Who decides a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Moves come from the keyboard.
    Human,
    /// Moves come from a [`Strategy`](crate::Strategy).
    Computer(Difficulty),
}

/// A named participant with a mark and a record for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Player {
    username: String,
    mark: Mark,
    kind: PlayerKind,
    record: PlayerRecord,
}

impl Player {
    /// Creates a human player.
    pub fn human(username: impl Into<String>, mark: Mark) -> Self {
        Self {
            username: username.into(),
            mark,
            kind: PlayerKind::Human,
            record: PlayerRecord::default(),
        }
    }

    /// Creates a computer player named after its difficulty.
    pub fn computer(difficulty: Difficulty, mark: Mark) -> Self {
        Self {
            username: difficulty.default_username().to_string(),
            mark,
            kind: PlayerKind::Computer(difficulty),
            record: PlayerRecord::default(),
        }
    }

    /// True for keyboard-driven players.
    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// Mutable access to this session's record.
    pub fn record_mut(&mut self) -> &mut PlayerRecord {
        &mut self.record
    }
}

/// True for names owned by the computer players.
pub fn is_reserved_username(name: &str) -> bool {
    let name = name.trim();
    Difficulty::iter().any(|d| d.default_username() == name)
}

/// A username is valid when it is non-empty after trimming and not
/// taken by a computer player.
#[instrument]
pub fn validate_username(name: &str) -> bool {
    !name.trim().is_empty() && !is_reserved_username(name)
}

/// A second human's name must be valid and differ from player one's.
#[instrument(skip(player_one), fields(player_one = %player_one.username))]
pub fn validate_opponent_username(name: &str, player_one: &Player) -> bool {
    validate_username(name) && name.trim() != player_one.username
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_names() {
        let easy = Player::computer(Difficulty::Easy, Mark::O);
        assert_eq!(easy.username(), "EasyAi");
        assert!(!easy.is_human());
        assert_eq!(*easy.kind(), PlayerKind::Computer(Difficulty::Easy));
    }

    #[test]
    fn test_username_validation() {
        assert!(validate_username("ann"));
        assert!(!validate_username(""));
        assert!(!validate_username("   "));
    }

    #[test]
    fn test_computer_names_reserved() {
        assert!(is_reserved_username("EasyAi"));
        assert!(is_reserved_username(" MediumAi "));
        assert!(!is_reserved_username("mediumai"));
        assert!(!validate_username("MediumAi"));
        assert!(!validate_opponent_username("EasyAi", &Player::human("ann", Mark::X)));
    }

    #[test]
    fn test_opponent_must_differ() {
        let ann = Player::human("ann", Mark::X);
        assert!(validate_opponent_username("bea", &ann));
        assert!(!validate_opponent_username("ann", &ann));
        assert!(!validate_opponent_username(" ann ", &ann));
        assert!(!validate_opponent_username("", &ann));
    }
}
