//! Named board coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A square on the 3x3 board, row-major index 0-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Position {
    /// All nine positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The four corners, row-major.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts to the row-major board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a row-major board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a position from zero-based row and column.
    #[instrument]
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row >= 3 || col >= 3 {
            return None;
        }
        Self::from_index(row * 3 + col)
    }

    /// Zero-based row.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Zero-based column.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// True for the four corner squares.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Moves one square in the given direction, staying put at the edge.
    pub fn step(self, d_row: isize, d_col: isize) -> Self {
        let row = self.row().saturating_add_signed(d_row).min(2);
        let col = self.col().saturating_add_signed(d_col).min(2);
        Self::from_row_col(row, col).unwrap_or(self)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_round_trip_for_corners() {
        assert_eq!(Position::from_row_col(0, 0), Some(Position::TopLeft));
        assert_eq!(Position::from_row_col(2, 0), Some(Position::BottomLeft));
        assert_eq!(Position::BottomLeft.row(), 2);
        assert_eq!(Position::BottomLeft.col(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(Position::from_row_col(3, 0), None);
        assert_eq!(Position::from_row_col(0, 3), None);
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_corners() {
        assert!(Position::TopRight.is_corner());
        assert!(!Position::Center.is_corner());
        assert!(!Position::TopCenter.is_corner());
    }

    #[test]
    fn test_step_clamps_at_edges() {
        assert_eq!(Position::TopLeft.step(-1, 0), Position::TopLeft);
        assert_eq!(Position::TopLeft.step(0, -1), Position::TopLeft);
        assert_eq!(Position::TopLeft.step(1, 1), Position::Center);
        assert_eq!(Position::BottomRight.step(1, 1), Position::BottomRight);
    }
}
