//! The 3x3 grid and its move history.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Cell, Mark, MoveError, Position};

/// The eight winning lines: rows, columns, then diagonals.
const LINES: [[Position; 3]; 8] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target square.
    pub position: Position,
    /// Mark being placed.
    pub mark: Mark,
}

impl Move {
    /// Creates a move at a known position.
    pub fn new(position: Position, mark: Mark) -> Self {
        Self { position, mark }
    }

    /// Creates a move from zero-based row and column.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if either coordinate is 3 or more.
    pub fn at(row: usize, col: usize, mark: Mark) -> Result<Self, MoveError> {
        Position::from_row_col(row, col)
            .map(|position| Self::new(position, mark))
            .ok_or(MoveError::OutOfBounds { row, col })
    }

    /// Row of the target square.
    pub fn row(&self) -> usize {
        self.position.row()
    }

    /// Column of the target square.
    pub fn col(&self) -> usize {
        self.position.col()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// Tic-tac-toe grid with the stack of moves that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
    history: Vec<Move>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every cell and the move history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting board");
        self.cells = [Cell::Empty; 9];
        self.history.clear();
    }

    /// Returns the cell at a position.
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.to_index()]
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the moves played so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True if the target square of `mv` is empty.
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        self.cell(mv.position) == Cell::Empty
    }

    /// Places a mark and records the move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Occupied`] if the square is already taken.
    #[instrument(skip(self), fields(position = %mv.position, mark = %mv.mark))]
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.is_valid_move(&mv) {
            return Err(MoveError::Occupied(mv.position));
        }
        self.cells[mv.position.to_index()] = Cell::Occupied(mv.mark);
        self.history.push(mv);
        Ok(())
    }

    /// True when no empty square remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// True if `mark` holds any complete line.
    pub fn has_won(&self, mark: Mark) -> bool {
        let target = Cell::Occupied(mark);
        LINES
            .iter()
            .any(|line| line.iter().all(|&p| self.cell(p) == target))
    }

    /// Returns the mark holding a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        [Mark::X, Mark::O].into_iter().find(|&m| self.has_won(m))
    }

    /// Full board with no winner.
    pub fn is_tie(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Every empty square as a move for `mark`, row-major.
    pub fn valid_moves(&self, mark: Mark) -> Vec<Move> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&p| self.cell(p) == Cell::Empty)
            .map(|p| Move::new(p, mark))
            .collect()
    }

    /// Empty corner squares as moves for `mark`.
    pub fn valid_corner_moves(&self, mark: Mark) -> Vec<Move> {
        self.valid_moves(mark)
            .into_iter()
            .filter(|mv| mv.position.is_corner())
            .collect()
    }

    /// Cells of row `i` (0-2), left to right.
    pub fn row(&self, i: usize) -> [Cell; 3] {
        let i = i.min(2);
        [
            self.cells[i * 3],
            self.cells[i * 3 + 1],
            self.cells[i * 3 + 2],
        ]
    }

    /// Cells of column `j` (0-2), top to bottom.
    pub fn column(&self, j: usize) -> [Cell; 3] {
        let j = j.min(2);
        [self.cells[j], self.cells[3 + j], self.cells[6 + j]]
    }

    /// Cells (0,0), (1,1), (2,2).
    pub fn main_diagonal(&self) -> [Cell; 3] {
        [self.cells[0], self.cells[4], self.cells[8]]
    }

    /// Cells (0,2), (1,1), (2,0).
    pub fn anti_diagonal(&self) -> [Cell; 3] {
        [self.cells[2], self.cells[4], self.cells[6]]
    }

    /// Renders the grid as text, one row per line.
    pub fn render(&self) -> String {
        (0..3)
            .map(|i| {
                self.row(i)
                    .iter()
                    .map(|c| c.as_char().to_string())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}
