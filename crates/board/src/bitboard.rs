use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use reversi_core::Square;

/// A 16-bit integer representing a set of cells on the 4x4 board.
///
/// Bit 15 is `a1` and bit 0 is `d4`, so a cell with index `i` occupies bit
/// `15 - i`. The set-cell iterator walks cells in ascending index order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u16);

impl Bitboard {
    /// Empty bitboard (no cells set)
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all 16 cells set)
    pub const ALL: Bitboard = Bitboard(0xFFFF);

    /// Inner 2x2 cells; wraparound guard for the two oblique axes.
    pub const MASK_DIAG: Bitboard = Bitboard(0x0660);

    /// Files b and c; wraparound guard for the horizontal axis.
    pub const MASK_FILE: Bitboard = Bitboard(0x6666);

    /// Ranks 2 and 3; wraparound guard for the vertical axis.
    pub const MASK_RANK: Bitboard = Bitboard(0x0FF0);

    /// Black's two disks in the standard opening (c2 and b3).
    pub const BLACK_START: Bitboard = Bitboard(0x0240);

    /// White's two disks in the standard opening (b2 and c3).
    pub const WHITE_START: Bitboard = Bitboard(0x0420);

    /// Creates a bitboard from a raw u16
    #[inline]
    pub const fn new(bits: u16) -> Self {
        Bitboard(bits)
    }

    /// The single-cell bitboard for a square
    #[inline]
    pub const fn square(sq: Square) -> Self {
        Bitboard(0x8000 >> sq.0)
    }

    /// Returns true if no cells are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if any cells are set
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns true if the given cell is set
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & Bitboard::square(sq).0 != 0
    }

    /// Returns the number of set cells (population count)
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if exactly one cell is set
    #[inline]
    pub const fn is_single(self) -> bool {
        self.0 != 0 && (self.0 & (self.0 - 1)) == 0
    }

    /// Smears the set cells one step both ways along an axis.
    ///
    /// `shift` selects the axis: 1 horizontal, 4 vertical, 3 and 5 the two
    /// obliques. The caller masks the result per axis to stop edge wrap.
    #[inline]
    pub const fn spread(self, shift: u32) -> Bitboard {
        Bitboard((self.0 << shift) | (self.0 >> shift))
    }

    /// Mirrors the position across the horizontal center line (rank 1 <-> 4).
    #[inline]
    pub const fn flip_ranks(self) -> Bitboard {
        let mut p = self.0;
        p = ((p >> 4) & 0x0F0F) | ((p << 4) & 0xF0F0);
        p = ((p >> 8) & 0x00FF) | ((p << 8) & 0xFF00);
        Bitboard(p)
    }

    /// Mirrors the position across the vertical center line (file a <-> d).
    #[inline]
    pub const fn flip_files(self) -> Bitboard {
        let mut p = self.0;
        p = ((p >> 1) & 0x5555) | ((p << 1) & 0xAAAA);
        p = ((p >> 2) & 0x3333) | ((p << 2) & 0xCCCC);
        Bitboard(p)
    }

    /// Rotates the position a quarter turn: cell (x, y) moves to (y, 3 - x).
    #[inline]
    pub const fn rotate90(self) -> Bitboard {
        let mut p = self.0;
        p = ((p >> 4) & 0x0A0A) | ((p >> 1) & 0x0505) | ((p << 1) & 0xA0A0) | ((p << 4) & 0x5050);
        p = ((p >> 8) & 0x00CC) | ((p >> 2) & 0x0033) | ((p << 2) & 0xCC00) | ((p << 8) & 0x3300);
        Bitboard(p)
    }

    /// Returns an iterator over all set cells, ascending by cell index
    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over the set cells in a bitboard, in ascending index order
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 .0 == 0 {
            return None;
        }
        let index = self.0 .0.leading_zeros() as u8;
        self.0 .0 &= !(0x8000 >> index);
        Square::new(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.popcount() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:04X})", self.0)?;
        for rank in 0..4 {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..4 {
                let sq = Square::from_coords(file, rank).expect("in-range coords");
                if self.contains(sq) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d")
    }
}
