use rand::Rng;
use reversi_board::Board;
use reversi_core::Action;

/// Uniform-random move selection.
///
/// Used as a baseline opponent and as the playout policy model for the
/// flat Monte Carlo search.
pub struct RandomSearch<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSearch<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a legal move uniformly at random, or a pass if there is none.
    pub fn act(&mut self, board: &Board) -> Action {
        let legal = board.legal_moves();
        if legal.is_empty() {
            Action::Pass
        } else {
            Action::Place(legal[self.rng.gen_range(0..legal.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_act_is_legal() {
        let mut search = RandomSearch::new(ChaCha8Rng::seed_from_u64(42));
        let board = Board::new();
        for _ in 0..32 {
            match search.act(&board) {
                Action::Place(sq) => assert!(board.legal_moves().contains(&sq)),
                Action::Pass => panic!("opening position has legal moves"),
            }
        }
    }
}
