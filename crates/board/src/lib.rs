//! Reversi Board - 4x4 board representation with bit-parallel rules
//!
//! This crate implements the game rules on top of a pair of 16-bit masks,
//! one per color. Legality and flip computation run bit-parallel along the
//! four board axes, moves are exactly reversible through a history stack,
//! and positions hash canonically under the board's 8 dihedral symmetries.

mod bitboard;
mod board;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, MAX_PLIES};
