use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use reversi_board::Board;
use reversi_core::Action;

use crate::evaluator::leads;

/// Flat Monte Carlo search.
///
/// For each root legal move, runs `try_num` independent uniform-random
/// playouts to a terminal state on disposable board copies and keeps the
/// move with the greatest observed win fraction (draws are non-wins,
/// first-seen order breaks ties).
///
/// Rollouts run in parallel; every rollout owns its board copy and an RNG
/// seeded from a per-batch base seed, so results are deterministic for a
/// seeded outer RNG and are combined by simple summation after the join.
pub struct MonteCarloSearch<R: Rng> {
    try_num: usize,
    rng: R,
}

impl<R: Rng> MonteCarloSearch<R> {
    pub fn new(try_num: usize, rng: R) -> Self {
        Self { try_num, rng }
    }

    /// Picks the root move with the best playout win fraction, or a pass
    /// if there is no legal move.
    pub fn act(&mut self, board: &mut Board) -> Action {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Action::Pass;
        }
        if legal.len() == 1 {
            return Action::Place(legal[0]);
        }

        let mut best = legal[0];
        let mut best_score = -1.0f32;
        for sq in legal {
            board.place(sq).expect("BUG: legal move rejected by board");
            let wins = self.playout_batch(board);
            board.undo().expect("BUG: undo failed after place");

            let score = wins as f32 / self.try_num as f32;
            if score > best_score {
                best_score = score;
                best = sq;
            }
        }
        Action::Place(best)
    }

    /// Runs the playout batch below an already-applied root move and
    /// counts wins for the player who made that move (the opponent of the
    /// mover on `board`).
    fn playout_batch(&mut self, board: &Board) -> usize {
        let decider = board.mover().opponent();
        let batch_seed: u64 = self.rng.gen();

        (0..self.try_num)
            .into_par_iter()
            .map(|trial| {
                let mut rng = ChaCha8Rng::seed_from_u64(batch_seed.wrapping_add(trial as u64));
                let mut playout = board.clone();
                while !playout.is_game_over() {
                    let legal = playout.legal_moves();
                    if legal.is_empty() {
                        playout.skip().expect("BUG: skip rejected for stuck mover");
                    } else {
                        let sq = legal[rng.gen_range(0..legal.len())];
                        playout.place(sq).expect("BUG: legal move rejected by board");
                    }
                }
                usize::from(leads(&playout, decider))
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use reversi_core::Color;

    #[test]
    fn test_act_returns_legal_move_and_restores_board() {
        let mut search = MonteCarloSearch::new(20, ChaCha8Rng::seed_from_u64(7));
        let mut board = Board::new();
        let legal = board.legal_moves();

        match search.act(&mut board) {
            Action::Place(sq) => assert!(legal.contains(&sq)),
            Action::Pass => panic!("opening position has legal moves"),
        }
        assert_eq!(board.ply(), 0);
        assert_eq!(board.mover(), Color::Black);
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let pick = |seed: u64| {
            let mut search = MonteCarloSearch::new(50, ChaCha8Rng::seed_from_u64(seed));
            search.act(&mut Board::new())
        };
        assert_eq!(pick(123), pick(123));
    }
}
