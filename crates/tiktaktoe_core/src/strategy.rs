//! Computer opponents.
//!
//! Both strategies only look one move ahead. [`MediumComputer`] takes a
//! winning square, otherwise blocks, otherwise prefers the centre and then
//! the corners. [`EasyComputer`] plays any empty square at random.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use crate::{Board, Cell, Mark, Move, Position};

/// Lines in the order they are scanned for two-in-a-row threats:
/// columns, rows, main diagonal, anti-diagonal.
const SCAN_ORDER: [[Position; 3]; 8] = [
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Computer skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, derive_more::Display)]
pub enum Difficulty {
    /// Random play.
    Easy,
    /// Win, block, then positional preference.
    Medium,
}

impl Difficulty {
    /// Username given to a computer of this difficulty.
    pub fn default_username(self) -> &'static str {
        match self {
            Difficulty::Easy => "EasyAi",
            Difficulty::Medium => "MediumAi",
        }
    }

    /// Builds a strategy seeded from the operating system.
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Difficulty::Easy => Box::new(EasyComputer::new()),
            Difficulty::Medium => Box::new(MediumComputer::new()),
        }
    }

    /// Builds a deterministic strategy.
    pub fn seeded_strategy(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            Difficulty::Easy => Box::new(EasyComputer::with_seed(seed)),
            Difficulty::Medium => Box::new(MediumComputer::with_seed(seed)),
        }
    }
}

/// Chooses moves for a computer player.
pub trait Strategy: Send + std::fmt::Debug {
    /// Picks a move for `mark`, or `None` if the board has no empty square.
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<Move>;

    /// Skill level of this strategy.
    fn difficulty(&self) -> Difficulty;
}

/// Finds the empty square of the first line holding exactly two of `owner`.
fn complete_line(board: &Board, owner: Mark) -> Option<Position> {
    SCAN_ORDER.iter().find_map(|line| {
        let owned = line
            .iter()
            .filter(|&&p| board.cell(p) == Cell::Occupied(owner))
            .count();
        let mut empty = line.iter().filter(|&&p| board.cell(p) == Cell::Empty);
        match (owned, empty.next(), empty.next()) {
            (2, Some(&p), None) => Some(p),
            _ => None,
        }
    })
}

/// Returns a move that completes a line for `mark`, if one exists.
#[instrument(skip(board))]
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<Move> {
    complete_line(board, mark).map(|p| Move::new(p, mark))
}

/// Returns a move for `mark` that stops the opponent completing a line.
#[instrument(skip(board))]
pub fn find_block_move(board: &Board, mark: Mark) -> Option<Move> {
    complete_line(board, mark.opponent()).map(|p| Move::new(p, mark))
}

/// Plays a uniformly random empty square.
#[derive(Debug)]
pub struct EasyComputer<R = StdRng> {
    rng: R,
}

impl EasyComputer {
    /// Creates an easy computer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an easy computer with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EasyComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng + Send + std::fmt::Debug> Strategy for EasyComputer<R> {
    #[instrument(skip(self, board))]
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<Move> {
        let choice = board.valid_moves(mark).choose(&mut self.rng).copied();
        debug!(choice = ?choice, "Easy computer chose");
        choice
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

/// Wins if it can, blocks if it must, else centre, corner, anything.
#[derive(Debug)]
pub struct MediumComputer<R = StdRng> {
    rng: R,
}

impl MediumComputer {
    /// Creates a medium computer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a medium computer with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MediumComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng + Send + std::fmt::Debug> Strategy for MediumComputer<R> {
    #[instrument(skip(self, board))]
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<Move> {
        if let Some(mv) = find_winning_move(board, mark) {
            debug!(position = %mv.position, "Taking winning square");
            return Some(mv);
        }
        if let Some(mv) = find_block_move(board, mark) {
            debug!(position = %mv.position, "Blocking opponent");
            return Some(mv);
        }
        if board.cell(Position::Center) == Cell::Empty {
            return Some(Move::new(Position::Center, mark));
        }
        let corners = board.valid_corner_moves(mark);
        if let Some(mv) = corners.choose(&mut self.rng) {
            return Some(*mv);
        }
        board.valid_moves(mark).choose(&mut self.rng).copied()
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(layout: &str) -> Board {
        let mut board = Board::new();
        for (i, c) in layout.chars().enumerate() {
            if let Some(mark) = Cell::from_char(c).and_then(Cell::mark) {
                let position = Position::from_index(i).unwrap();
                board.make_move(Move::new(position, mark)).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_winning_move_in_column() {
        let board = board_from("X  X     ");
        assert_eq!(
            find_winning_move(&board, Mark::X),
            Some(Move::new(Position::BottomLeft, Mark::X))
        );
    }

    #[test]
    fn test_winning_move_on_anti_diagonal() {
        let board = board_from("  O O    ");
        assert_eq!(
            find_winning_move(&board, Mark::O),
            Some(Move::new(Position::BottomLeft, Mark::O))
        );
    }

    #[test]
    fn test_columns_scanned_before_rows() {
        // X can finish row 0 at TopRight or column 0 at BottomLeft.
        let board = board_from("XX X     ");
        assert_eq!(
            find_winning_move(&board, Mark::X),
            Some(Move::new(Position::BottomLeft, Mark::X))
        );
    }

    #[test]
    fn test_block_move_uses_own_mark() {
        let board = board_from("OO       ");
        assert_eq!(
            find_block_move(&board, Mark::X),
            Some(Move::new(Position::TopRight, Mark::X))
        );
    }

    #[test]
    fn test_no_threat_on_blocked_line() {
        let board = board_from("XXO      ");
        assert_eq!(find_winning_move(&board, Mark::X), None);
        assert_eq!(find_block_move(&board, Mark::O), None);
    }

    #[test]
    fn test_medium_prefers_win_over_block() {
        // O threatens row 1, X can win on row 0.
        let board = board_from("XX OO    ");
        let mut ai = MediumComputer::with_seed(7);
        assert_eq!(
            ai.choose_move(&board, Mark::X),
            Some(Move::new(Position::TopRight, Mark::X))
        );
    }

    #[test]
    fn test_medium_takes_center_then_corner() {
        let mut ai = MediumComputer::with_seed(1);
        let empty = Board::new();
        assert_eq!(
            ai.choose_move(&empty, Mark::O).map(|m| m.position),
            Some(Position::Center)
        );

        let center_taken = board_from("    X    ");
        let mv = ai.choose_move(&center_taken, Mark::O).unwrap();
        assert!(mv.position.is_corner());
    }

    #[test]
    fn test_easy_only_picks_empty_squares() {
        let board = board_from("XOXOXOXO ");
        let mut ai = EasyComputer::with_seed(3);
        assert_eq!(
            ai.choose_move(&board, Mark::O),
            Some(Move::new(Position::BottomRight, Mark::O))
        );
    }

    #[test]
    fn test_full_board_yields_none() {
        let board = board_from("XOXXOOOXX");
        assert_eq!(EasyComputer::with_seed(0).choose_move(&board, Mark::X), None);
        assert_eq!(MediumComputer::with_seed(0).choose_move(&board, Mark::X), None);
    }

    #[test]
    fn test_default_usernames() {
        assert_eq!(Difficulty::Easy.default_username(), "EasyAi");
        assert_eq!(Difficulty::Medium.default_username(), "MediumAi");
        assert_eq!(Difficulty::Medium.seeded_strategy(1).difficulty(), Difficulty::Medium);
    }
}
