//! Win/loss/tie tallies.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A player's wins, losses and ties.
///
/// Field names on the wire match the leaderboard file: `wins`, `loss`, `tie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    wins: u32,
    #[serde(rename = "loss", default)]
    losses: u32,
    #[serde(rename = "tie", default)]
    ties: u32,
}

impl PlayerRecord {
    /// Creates a record with the given counts.
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    /// Adds one win.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Adds one loss.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Adds one tie.
    pub fn add_tie(&mut self) {
        self.ties += 1;
    }

    /// Adds every counter of `other` to this record.
    pub fn absorb(&mut self, other: &PlayerRecord) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total games counted.
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}
