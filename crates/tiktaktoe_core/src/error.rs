//! Error types for moves and sessions.

use crate::{Mark, Position};

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside the 3x3 grid.
    #[display("Position ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square is already taken.
    #[display("Square {} is already occupied", _0)]
    Occupied(Position),

    /// The current game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// A human tried to move while the computer is to play.
    #[display("It is not a human player's turn")]
    NotHumanTurn,

    /// The computer was asked to move on a human's turn.
    #[display("It is not the computer's turn")]
    NotComputerTurn,

    /// The strategy found no empty square.
    #[display("No valid moves available")]
    NoMovesAvailable,
}

impl std::error::Error for MoveError {}

/// Error raised when a session is set up with incompatible players.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// Both players were given the same mark.
    #[display("Both players use mark {}", _0)]
    SameMark(Mark),

    /// Both players were given the same username.
    #[display("Both players are named '{}'", _0)]
    SameUsername(String),

    /// Player one must be a human.
    #[display("Player one must be human")]
    ComputerPlayerOne,
}

impl std::error::Error for SessionError {}
