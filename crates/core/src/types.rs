//! Domain types with enforced invariants.
//!
//! The board is a 4x4 grid. Cells are addressed by a single 0-based
//! row-major index: `a1` is 0, `d1` is 3, `a4` is 12, `d4` is 15.
//! A pass is never a cell; it is the distinguished [`Action::Pass`] variant.

use std::fmt;

/// Width of the board in cells.
pub(crate) const BOARD_SIZE: u8 = 4;

/// One of the two disk colors. Black always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 0 for black, 1 for white. Useful for indexing per-color arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Outcome of a finished game.
///
/// The winner is the color with strictly more disks; equal counts are a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    /// The winning color, or `None` for a draw.
    pub const fn color(self) -> Option<Color> {
        match self {
            Winner::Black => Some(Color::Black),
            Winner::White => Some(Color::White),
            Winner::Draw => None,
        }
    }
}

impl From<Color> for Winner {
    fn from(color: Color) -> Winner {
        match color {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

/// A cell on the 4x4 board, held as a 0-based row-major index.
///
/// Invariant: the index is always below 16. The checked constructors
/// enforce this; the public field exists for cheap in-crate plumbing and
/// must only ever hold validated values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    /// Number of cells on the board.
    pub const COUNT: usize = 16;

    /// Creates a square from a 0-based cell index.
    pub const fn new(index: u8) -> Option<Square> {
        if index < Self::COUNT as u8 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from file (0 = a) and rank (0 = 1) coordinates.
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Square(rank * BOARD_SIZE + file))
        } else {
            None
        }
    }

    /// The 0-based cell index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File coordinate, 0 = a.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Rank coordinate, 0 = rank 1.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / BOARD_SIZE
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

/// A move: either a disk placement or a pass.
///
/// A pass is only legal when the mover has no legal placement and the game
/// is not over; the board enforces this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Place(Square),
    Pass,
}

impl Action {
    /// The placed square, or `None` for a pass.
    pub const fn square(self) -> Option<Square> {
        match self {
            Action::Place(sq) => Some(sq),
            Action::Pass => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(sq) => write!(f, "{sq}"),
            Action::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_square_new_bounds() {
        assert!(Square::new(0).is_some());
        assert!(Square::new(15).is_some());
        assert!(Square::new(16).is_none());
    }

    #[test]
    fn test_square_coords_roundtrip() {
        for rank in 0..4 {
            for file in 0..4 {
                let sq = Square::from_coords(file, rank).unwrap();
                assert_eq!(sq.file(), file);
                assert_eq!(sq.rank(), rank);
            }
        }
        assert!(Square::from_coords(4, 0).is_none());
        assert!(Square::from_coords(0, 4).is_none());
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square(0).to_string(), "a1");
        assert_eq!(Square(3).to_string(), "d1");
        assert_eq!(Square(12).to_string(), "a4");
        assert_eq!(Square(15).to_string(), "d4");
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Place(Square(5)).to_string(), "b2");
        assert_eq!(Action::Pass.to_string(), "pass");
    }

    #[test]
    fn test_winner_color() {
        assert_eq!(Winner::Black.color(), Some(Color::Black));
        assert_eq!(Winner::Draw.color(), None);
        assert_eq!(Winner::from(Color::White), Winner::White);
    }
}
