//! Evaluation abstraction shared by the search strategies.
//!
//! The [`Evaluator`] trait is the only seam through which learned models
//! plug into the engine; the shipped implementation is a plain disk-count
//! heuristic.

use reversi_board::Board;
use reversi_core::{Color, Square};

/// Evaluation result: value estimate plus an optional prior distribution.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Value in [-1, 1] from the perspective of the side to move,
    /// where +1 means the mover is winning.
    pub value: f32,

    /// Optional prior move probabilities indexed by cell (length 16).
    /// Consumers restrict and renormalize these over legal moves only.
    pub priors: Option<Vec<f32>>,
}

impl Evaluation {
    /// An evaluation carrying only a value estimate.
    pub fn value_only(value: f32) -> Self {
        Evaluation {
            value,
            priors: None,
        }
    }

    /// Prior for one cell, treating a missing distribution as zero mass.
    pub fn prior(&self, sq: Square) -> f32 {
        self.priors
            .as_ref()
            .and_then(|p| p.get(sq.index()).copied())
            .unwrap_or(0.0)
    }
}

/// Trait for scoring positions.
///
/// The value must be from the perspective of the player to move, in
/// [-1, 1]. Implementations that also predict move probabilities return
/// them through [`Evaluation::priors`]; the UCT search renormalizes them
/// over the legal moves of the position being expanded.
pub trait Evaluator {
    /// Evaluate a position.
    fn evaluate(&self, board: &Board) -> Evaluation;
}

/// Disk-count-difference heuristic.
///
/// Scores `(own - opponent) / 16`, which on a finished board is exact up
/// to scale: strictly more disks means a strictly higher value.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskCountEvaluator;

impl Evaluator for DiskCountEvaluator {
    fn evaluate(&self, board: &Board) -> Evaluation {
        let own = board.count(board.mover()) as f32;
        let opp = board.count(board.mover().opponent()) as f32;
        Evaluation::value_only((own - opp) / Square::COUNT as f32)
    }
}

/// Returns the count difference winner check used by rollout scoring.
pub(crate) fn leads(board: &Board, color: Color) -> bool {
    board.count(color) > board.count(color.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_board::Bitboard;

    #[test]
    fn test_disk_count_even_opening() {
        let eval = DiskCountEvaluator.evaluate(&Board::new());
        assert_eq!(eval.value, 0.0);
        assert!(eval.priors.is_none());
    }

    #[test]
    fn test_disk_count_mover_perspective() {
        let black = Bitboard::new(0xFF80); // 9 disks
        let white = Bitboard::new(0x007F); // 7 disks
        let as_black = Board::from_position(black, white, Color::Black).unwrap();
        let as_white = Board::from_position(black, white, Color::White).unwrap();

        let vb = DiskCountEvaluator.evaluate(&as_black).value;
        let vw = DiskCountEvaluator.evaluate(&as_white).value;
        assert!(vb > 0.0);
        assert_eq!(vb, -vw);
    }

    #[test]
    fn test_missing_priors_read_as_zero() {
        let eval = Evaluation::value_only(0.25);
        assert_eq!(eval.prior(Square(0)), 0.0);
    }
}
