//! Marks and cells.

use serde::{Deserialize, Serialize};

/// The symbol a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Mark {
    /// Cross.
    #[display("X")]
    X,
    /// Nought.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark as the character drawn on the board.
    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A single square of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the character drawn for this cell, a space when empty.
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(mark) => mark.as_char(),
        }
    }

    /// Parses the board character back into a cell.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Cell::Occupied(Mark::X)),
            'O' => Some(Cell::Occupied(Mark::O)),
            ' ' => Some(Cell::Empty),
            _ => None,
        }
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}
