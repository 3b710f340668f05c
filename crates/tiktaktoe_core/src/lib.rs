//! Pure tic-tac-toe game logic.
//!
//! This crate has no I/O. It models the board and its move history,
//! per-player records, the computer opponents and the session state
//! machine that alternates turns between two players.
//!
//! # Example
//!
//! ```
//! use tiktaktoe_core::{GameSession, Mark, Player, Position, TurnOutcome};
//!
//! let alice = Player::human("alice", Mark::X);
//! let bob = Player::human("bob", Mark::O);
//! let mut session = GameSession::new(alice, bob).unwrap();
//!
//! assert_eq!(session.place(Position::Center).unwrap(), TurnOutcome::Continue);
//! assert_eq!(session.current_player().username(), "bob");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod player;
mod position;
mod record;
mod session;
mod strategy;
mod types;

pub use board::{Board, Move};
pub use error::{MoveError, SessionError};
pub use player::{
    Player, PlayerKind, is_reserved_username, validate_opponent_username, validate_username,
};
pub use position::Position;
pub use record::PlayerRecord;
pub use session::{GameSession, TurnOutcome};
pub use strategy::{
    Difficulty, EasyComputer, MediumComputer, Strategy, find_block_move, find_winning_move,
};
pub use types::{Cell, Mark};
