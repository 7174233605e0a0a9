use reversi_board::Board;
use reversi_core::Action;

use crate::evaluator::Evaluator;

/// Score bounds wide enough to dominate every evaluator value.
const MAX_SCORE: f32 = 1e6;
const MIN_SCORE: f32 = -1e6;

/// Bounded-depth alpha-beta negamax.
///
/// Explores continuations through move/undo on the caller's board and
/// scores leaves with the injected [`Evaluator`]. A forced pass is searched
/// without consuming depth.
pub struct NegaMaxSearch<E: Evaluator> {
    evaluator: E,
    max_depth: usize,
}

impl<E: Evaluator> NegaMaxSearch<E> {
    /// Default depth limit; deep enough to solve the 4x4 game outright.
    pub const DEFAULT_DEPTH: usize = 15;

    pub fn new(evaluator: E, max_depth: usize) -> Self {
        Self {
            evaluator,
            max_depth,
        }
    }

    /// Picks the move with the greatest negamax score, first-seen winning
    /// ties over ascending cell order. Returns a pass if there is no legal
    /// move. The board is returned exactly as it was handed in.
    pub fn act(&self, board: &mut Board) -> Action {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Action::Pass;
        }
        if legal.len() == 1 {
            return Action::Place(legal[0]);
        }

        let mut best = legal[0];
        let mut best_score = MIN_SCORE;
        for sq in legal {
            board.place(sq).expect("BUG: legal move rejected by board");
            let score = -self.search(board, MIN_SCORE, MAX_SCORE, 0);
            board.undo().expect("BUG: undo failed after place");

            if score > best_score {
                best_score = score;
                best = sq;
            }
        }
        Action::Place(best)
    }

    fn search(&self, board: &mut Board, alpha: f32, beta: f32, depth: usize) -> f32 {
        if depth >= self.max_depth || board.is_full() {
            return self.evaluator.evaluate(board).value;
        }

        let legal = board.legal_moves();
        if legal.is_empty() {
            if board.is_game_over() {
                return self.evaluator.evaluate(board).value;
            }
            // Forced pass: recurse with swapped bounds, same depth.
            board.skip().expect("BUG: skip rejected for stuck mover");
            let score = -self.search(board, -beta, -alpha, depth);
            board.undo().expect("BUG: undo failed after skip");
            return score;
        }

        let mut alpha = alpha;
        for sq in legal {
            board.place(sq).expect("BUG: legal move rejected by board");
            let score = -self.search(board, -beta, -alpha, depth + 1);
            board.undo().expect("BUG: undo failed after place");

            if score >= beta {
                return score; // Beta cutoff
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::DiskCountEvaluator;
    use reversi_core::Color;

    #[test]
    fn test_act_returns_legal_move() {
        let search = NegaMaxSearch::new(DiskCountEvaluator, 4);
        let mut board = Board::new();
        let legal = board.legal_moves();

        match search.act(&mut board) {
            Action::Place(sq) => assert!(legal.contains(&sq)),
            Action::Pass => panic!("opening position has legal moves"),
        }
        // Board restored.
        assert_eq!(board.ply(), 0);
        assert_eq!(board.legal_moves(), legal);
    }

    #[test]
    fn test_act_passes_without_moves() {
        use reversi_board::Bitboard;
        use reversi_core::Square;

        // White to move with nothing to flip.
        let black = Bitboard::square(Square(12)) | Bitboard::square(Square(13));
        let white = Bitboard::square(Square(14));
        let mut board = Board::from_position(black, white, Color::White).unwrap();
        let search = NegaMaxSearch::new(DiskCountEvaluator, 4);
        assert_eq!(search.act(&mut board), Action::Pass);
    }

    #[test]
    fn test_full_depth_is_deterministic() {
        let search = NegaMaxSearch::new(DiskCountEvaluator, NegaMaxSearch::<DiskCountEvaluator>::DEFAULT_DEPTH);
        let mut board = Board::new();
        let first = search.act(&mut board);
        let second = search.act(&mut board);
        assert_eq!(first, second);
    }
}
