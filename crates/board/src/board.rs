//! Mutable 4x4 reversi board with exact move reversal.
//!
//! Legality and flips are computed bit-parallel, one axis at a time. Each
//! axis pairs a shift amount with a wraparound mask that removes opponent
//! disks on the cells where a shifted bit would cross a board edge:
//!
//! - obliques (shift 5 and 3): only the inner 2x2 can sit between disks
//! - horizontal (shift 1): only files b and c
//! - vertical (shift 4): only ranks 2 and 3
//!
//! The fill extends a frontier of opponent disks at most `BOARD_SIZE - 2`
//! times, which is the longest run of flippable disks on a 4-wide board.

use reversi_core::{Action, Color, ReversiError, Result, Square, Winner};

use crate::Bitboard;

/// Upper bound on plies in one game: 16 placements plus forced passes.
pub const MAX_PLIES: usize = 32;

const BOARD_SIZE: u32 = 4;

/// The four flip axes as (shift, wraparound mask) pairs.
const AXES: [(u32, Bitboard); 4] = [
    (5, Bitboard::MASK_DIAG), // left oblique
    (3, Bitboard::MASK_DIAG), // right oblique
    (1, Bitboard::MASK_FILE), // horizontal
    (4, Bitboard::MASK_RANK), // vertical
];

/// Snapshot taken before each ply, enabling exact reversal.
#[derive(Clone, Copy, Debug)]
struct HistoryEntry {
    black: Bitboard,
    white: Bitboard,
    mover: Color,
    legal: Bitboard,
    played: Action,
}

/// A 4x4 reversi position plus everything needed to play and unplay moves:
/// current mover, cached legal-move mask, ply counter and history stack.
///
/// Invariant: the two color masks are always disjoint, and the legal mask
/// is recomputed after every mutation.
#[derive(Clone, Debug)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    mover: Color,
    legal: Bitboard,
    ply: u8,
    history: Vec<HistoryEntry>,
}

impl Board {
    /// Creates a board in the standard 4x4 opening with black to move.
    pub fn new() -> Self {
        let mut board = Board {
            black: Bitboard::BLACK_START,
            white: Bitboard::WHITE_START,
            mover: Color::Black,
            legal: Bitboard::EMPTY,
            ply: 0,
            history: Vec::with_capacity(MAX_PLIES),
        };
        board.legal = board.legal_for(board.mover);
        board
    }

    /// Creates a board from externally supplied masks.
    ///
    /// # Errors
    /// Returns [`ReversiError::InvalidPosition`] if the masks overlap.
    pub fn from_position(black: Bitboard, white: Bitboard, mover: Color) -> Result<Self> {
        if (black & white).is_not_empty() {
            return Err(ReversiError::InvalidPosition);
        }
        let mut board = Board {
            black,
            white,
            mover,
            legal: Bitboard::EMPTY,
            ply: 0,
            history: Vec::with_capacity(MAX_PLIES),
        };
        board.legal = board.legal_for(mover);
        Ok(board)
    }

    /// The side to move.
    #[inline]
    pub fn mover(&self) -> Color {
        self.mover
    }

    /// Plies played since this board was constructed.
    #[inline]
    pub fn ply(&self) -> u8 {
        self.ply
    }

    /// The disks of the given color.
    #[inline]
    pub fn discs(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Disk count for the given color.
    #[inline]
    pub fn count(&self, color: Color) -> u32 {
        self.discs(color).popcount()
    }

    /// The cached legal-move mask for the side to move.
    #[inline]
    pub fn legal_mask(&self) -> Bitboard {
        self.legal
    }

    /// Currently legal placements, in ascending cell order (empty if none).
    pub fn legal_moves(&self) -> Vec<Square> {
        self.legal.iter().collect()
    }

    /// True once every cell holds a disk.
    #[inline]
    pub fn is_full(&self) -> bool {
        (self.black | self.white) == Bitboard::ALL
    }

    /// True iff neither color has a legal move.
    pub fn is_game_over(&self) -> bool {
        self.legal.is_empty() && self.legal_for(self.mover.opponent()).is_empty()
    }

    /// The game outcome, or `None` while the game is still running.
    pub fn winner(&self) -> Option<Winner> {
        if !self.is_game_over() {
            return None;
        }
        let black = self.count(Color::Black);
        let white = self.count(Color::White);
        Some(if black > white {
            Winner::Black
        } else if white > black {
            Winner::White
        } else {
            Winner::Draw
        })
    }

    /// Places a disk for the side to move.
    ///
    /// Flips are computed independently along the four axes, both colors are
    /// updated, the legal mask is recomputed for the next mover, and a
    /// history entry is pushed.
    ///
    /// # Errors
    /// Returns [`ReversiError::IllegalMove`] (no mutation) if the square is
    /// not in the current legal-move mask.
    pub fn place(&mut self, sq: Square) -> Result<()> {
        let mv = Bitboard::square(sq);
        if (self.legal & mv).is_empty() {
            return Err(ReversiError::IllegalMove(sq));
        }

        let own = self.discs(self.mover);
        let opp = self.discs(self.mover.opponent());
        let mut flipped = Bitboard::EMPTY;
        for (shift, mask) in AXES {
            flipped |= axis_flips(own, opp & mask, mv, shift);
        }

        self.push_history(Action::Place(sq));
        match self.mover {
            Color::Black => {
                self.black |= mv | flipped;
                self.white ^= flipped;
            }
            Color::White => {
                self.white |= mv | flipped;
                self.black ^= flipped;
            }
        }
        self.mover = self.mover.opponent();
        self.legal = self.legal_for(self.mover);
        self.ply += 1;
        Ok(())
    }

    /// Records a forced pass: flips the mover and recomputes legality.
    ///
    /// # Errors
    /// Returns [`ReversiError::SkipNotAllowed`] if the mover has a legal
    /// move, or if the game is already over.
    pub fn skip(&mut self) -> Result<()> {
        if self.legal.is_not_empty() || self.is_game_over() {
            return Err(ReversiError::SkipNotAllowed);
        }
        self.push_history(Action::Pass);
        self.mover = self.mover.opponent();
        self.legal = self.legal_for(self.mover);
        self.ply += 1;
        Ok(())
    }

    /// Applies an action, dispatching to [`Board::place`] or [`Board::skip`].
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Place(sq) => self.place(sq),
            Action::Pass => self.skip(),
        }
    }

    /// Reverts the last ply, restoring position, mover and legal mask.
    ///
    /// # Errors
    /// Returns [`ReversiError::UndoUnderflow`] at the initial state.
    pub fn undo(&mut self) -> Result<()> {
        let entry = self.history.pop().ok_or(ReversiError::UndoUnderflow)?;
        self.black = entry.black;
        self.white = entry.white;
        self.mover = entry.mover;
        self.legal = entry.legal;
        self.ply -= 1;
        Ok(())
    }

    /// The action that led to the current position, if any.
    pub fn last_action(&self) -> Option<Action> {
        self.history.last().map(|entry| entry.played)
    }

    /// Raw packed encoding of the position: black mask in the high half,
    /// white mask in the low half. Unique per pair of masks, so distinct
    /// orientations of symmetric positions stay distinct; this is the
    /// transposition-table key.
    #[inline]
    pub fn position_hash(&self) -> u32 {
        pack(self.black, self.white)
    }

    /// The lexicographically smallest packed encoding over the position's
    /// 8 dihedral transforms, merging all symmetric states of a position
    /// under one value.
    pub fn canonical_hash(&self) -> u32 {
        // Chain of transforms whose running composition walks all 8
        // elements of the dihedral group.
        const CHAIN: [fn(Bitboard) -> Bitboard; 7] = [
            Bitboard::flip_ranks,
            Bitboard::flip_files,
            Bitboard::flip_ranks,
            Bitboard::rotate90,
            Bitboard::flip_ranks,
            Bitboard::flip_files,
            Bitboard::flip_ranks,
        ];

        let mut black = self.black;
        let mut white = self.white;
        let mut min_key = pack(black, white);
        for transform in CHAIN {
            black = transform(black);
            white = transform(white);
            min_key = min_key.min(pack(black, white));
        }
        min_key
    }

    /// Legal-move mask for the given color on the current position.
    fn legal_for(&self, color: Color) -> Bitboard {
        let own = self.discs(color);
        let opp = self.discs(color.opponent());
        let empty = !(own | opp);

        let mut candidates = Bitboard::EMPTY;
        for (shift, mask) in AXES {
            candidates |= axis_legal(own, opp & mask, shift);
        }
        empty & candidates
    }

    fn push_history(&mut self, played: Action) {
        self.history.push(HistoryEntry {
            black: self.black,
            white: self.white,
            mover: self.mover,
            legal: self.legal,
            played,
        });
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn pack(black: Bitboard, white: Bitboard) -> u32 {
    ((black.0 as u32) << 16) | white.0 as u32
}

/// Destinations reachable along one axis: extend a frontier of flippable
/// opponent disks away from the mover's disks, then step once more.
fn axis_legal(own: Bitboard, masked_opp: Bitboard, shift: u32) -> Bitboard {
    let mut frontier = own.spread(shift) & masked_opp;
    for _ in 0..BOARD_SIZE - 2 {
        frontier |= frontier.spread(shift) & masked_opp;
    }
    frontier.spread(shift)
}

/// Opponent disks flipped by playing `mv`, along one axis in both
/// directions: the contiguous run between the placed disk and a
/// terminating own disk.
fn axis_flips(own: Bitboard, masked_opp: Bitboard, mv: Bitboard, shift: u32) -> Bitboard {
    let up_opp = Bitboard(mv.0 << shift) & masked_opp;
    let down_opp = Bitboard(mv.0 >> shift) & masked_opp;
    let up_own = Bitboard(own.0 << shift) & masked_opp;
    let down_own = Bitboard(own.0 >> shift) & masked_opp;

    (up_opp & (down_own | Bitboard(down_own.0 >> shift)))
        | (Bitboard(up_opp.0 << shift) & down_own)
        | (down_opp & (up_own | Bitboard(up_own.0 << shift)))
        | (Bitboard(down_opp.0 >> shift) & up_own)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        let bytes = name.as_bytes();
        Square::from_coords(bytes[0] - b'a', bytes[1] - b'1').expect("valid square name")
    }

    #[test]
    fn test_opening_legal_moves() {
        let board = Board::new();
        assert_eq!(board.mover(), Color::Black);
        // Black holds c2/b3, white b2/c3: exactly four openings.
        let legal = board.legal_moves();
        assert_eq!(legal, vec![sq("b1"), sq("a2"), sq("d3"), sq("c4")]);
    }

    #[test]
    fn test_opening_reply_count() {
        let mut board = Board::new();
        board.place(sq("a2")).unwrap();
        // a2 flips b2; white's only disk is c3, giving three replies.
        assert_eq!(board.mover(), Color::White);
        assert_eq!(board.legal_moves(), vec![sq("a1"), sq("c1"), sq("a3")]);
    }

    #[test]
    fn test_place_flips_disks() {
        let mut board = Board::new();
        board.place(sq("a2")).unwrap();
        assert_eq!(board.count(Color::Black), 4);
        assert_eq!(board.count(Color::White), 1);
        assert!(board.discs(Color::Black).contains(sq("b2")));
    }

    #[test]
    fn test_illegal_move_rejected_without_mutation() {
        let mut board = Board::new();
        let before = (board.discs(Color::Black), board.discs(Color::White));
        let err = board.place(sq("a1")).unwrap_err();
        assert_eq!(err, ReversiError::IllegalMove(sq("a1")));
        assert_eq!(
            (board.discs(Color::Black), board.discs(Color::White)),
            before
        );
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_move_then_undo_restores_exactly() {
        let mut board = Board::new();
        let black = board.discs(Color::Black);
        let white = board.discs(Color::White);
        let legal = board.legal_mask();

        board.place(sq("b1")).unwrap();
        board.undo().unwrap();

        assert_eq!(board.discs(Color::Black), black);
        assert_eq!(board.discs(Color::White), white);
        assert_eq!(board.legal_mask(), legal);
        assert_eq!(board.mover(), Color::Black);
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_undo_underflow() {
        let mut board = Board::new();
        assert_eq!(board.undo(), Err(ReversiError::UndoUnderflow));
    }

    #[test]
    fn test_skip_rejected_when_moves_exist() {
        let mut board = Board::new();
        assert_eq!(board.skip(), Err(ReversiError::SkipNotAllowed));
    }

    #[test]
    fn test_stuck_mover_must_skip_exactly_once() {
        // White to move with no reply, while black can still flank c4
        // from d4 along rank 4.
        let black = Bitboard::square(sq("a4")) | Bitboard::square(sq("b4"));
        let white = Bitboard::square(sq("c4"));
        let mut board = Board::from_position(black, white, Color::White).unwrap();
        assert!(board.legal_moves().is_empty());
        assert!(!board.is_game_over());

        let err = board.place(sq("d4")).unwrap_err();
        assert_eq!(err, ReversiError::IllegalMove(sq("d4")));

        board.skip().unwrap();
        assert_eq!(board.mover(), Color::Black);
        assert!(!board.legal_moves().is_empty());
        // A second skip is illegal: the mover now has a move.
        assert_eq!(board.skip(), Err(ReversiError::SkipNotAllowed));
    }

    #[test]
    fn test_game_over_and_winner() {
        // Full board: black 9, white 7.
        let black = Bitboard::new(0xFF80);
        let white = Bitboard::new(0x007F);
        let board = Board::from_position(black, white, Color::Black).unwrap();
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(Winner::Black));
    }

    #[test]
    fn test_winner_none_while_running() {
        let board = Board::new();
        assert!(!board.is_game_over());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_from_position_rejects_overlap() {
        let overlap = Bitboard::new(0x0001);
        let err = Board::from_position(overlap, overlap, Color::Black).unwrap_err();
        assert_eq!(err, ReversiError::InvalidPosition);
    }

    #[test]
    fn test_canonical_hash_dihedral_invariance() {
        let board = Board::new();
        let base = board.canonical_hash();

        let transforms: [fn(Bitboard) -> Bitboard; 3] = [
            Bitboard::flip_ranks,
            Bitboard::flip_files,
            Bitboard::rotate90,
        ];
        // Apply a handful of transform words; every variant must agree.
        for &outer in &transforms {
            for &inner in &transforms {
                let black = outer(inner(board.discs(Color::Black)));
                let white = outer(inner(board.discs(Color::White)));
                let variant = Board::from_position(black, white, Color::Black).unwrap();
                assert_eq!(variant.canonical_hash(), base);
            }
        }
    }

    #[test]
    fn test_position_hash_distinguishes_orientations() {
        let board = Board::new();
        let black = board.discs(Color::Black).flip_ranks();
        let white = board.discs(Color::White).flip_ranks();
        let variant = Board::from_position(black, white, Color::Black).unwrap();

        // Same dihedral orbit, different concrete orientation.
        assert_eq!(variant.canonical_hash(), board.canonical_hash());
        assert_ne!(variant.position_hash(), board.position_hash());
    }

    #[test]
    fn test_disjoint_masks_through_a_game() {
        let mut board = Board::new();
        // Deterministic playout: always the first legal move.
        while !board.is_game_over() {
            let legal = board.legal_moves();
            match legal.first() {
                Some(&sq) => board.place(sq).unwrap(),
                None => board.skip().unwrap(),
            }
            assert!((board.discs(Color::Black) & board.discs(Color::White)).is_empty());
            assert!(board.count(Color::Black) + board.count(Color::White) <= 16);
        }
        assert!(board.winner().is_some());
    }
}
