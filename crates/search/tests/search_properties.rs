//! Property-based tests for the search strategies.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reversi_board::Board;
use reversi_core::{Action, Color};
use reversi_search::{
    DiskCountEvaluator, MonteCarloSearch, NegaMaxSearch, NodeKey, UctConfig, UctSearch,
};

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a position by playing up to `plies` random legal plies.
fn arb_played_board() -> impl Strategy<Value = Board> {
    (0usize..24, any::<u64>()).prop_map(|(plies, seed)| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::new();
        for _ in 0..plies {
            if board.is_game_over() {
                break;
            }
            let legal = board.legal_moves();
            if legal.is_empty() {
                board.skip().unwrap();
            } else {
                board.place(legal[rng.gen_range(0..legal.len())]).unwrap();
            }
        }
        board
    })
}

fn root_key(board: &Board) -> NodeKey {
    NodeKey {
        hash: board.position_hash(),
        mover: board.mover(),
        ply: board.ply(),
    }
}

// =============================================================================
// Legality and board restoration
// =============================================================================

proptest! {
    /// Every strategy returns a legal action and hands the board back
    /// exactly as it received it.
    #[test]
    fn prop_strategies_act_legally(board in arb_played_board(), seed in arb_seed()) {
        let mut board = board;
        let legal = board.legal_moves();
        let black = board.discs(Color::Black);
        let white = board.discs(Color::White);
        let ply = board.ply();

        let negamax = NegaMaxSearch::new(DiskCountEvaluator, 6);
        let mut montecarlo = MonteCarloSearch::new(10, ChaCha8Rng::seed_from_u64(seed));
        let mut uct = UctSearch::new(
            DiskCountEvaluator,
            UctConfig::with_playouts(20),
            ChaCha8Rng::seed_from_u64(seed),
        );

        let actions = [
            negamax.act(&mut board),
            montecarlo.act(&mut board),
            uct.act(&mut board),
        ];
        for action in actions {
            match action {
                Action::Place(sq) => prop_assert!(legal.contains(&sq)),
                Action::Pass => prop_assert!(legal.is_empty()),
            }
        }
        prop_assert_eq!(board.discs(Color::Black), black);
        prop_assert_eq!(board.discs(Color::White), white);
        prop_assert_eq!(board.ply(), ply);
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    /// Same seed, same position, same decision.
    #[test]
    fn prop_seeded_decisions_repeat(board in arb_played_board(), seed in arb_seed()) {
        let negamax = NegaMaxSearch::new(DiskCountEvaluator, 6);
        prop_assert_eq!(
            negamax.act(&mut board.clone()),
            negamax.act(&mut board.clone())
        );

        let monte = |seed| {
            MonteCarloSearch::new(15, ChaCha8Rng::seed_from_u64(seed)).act(&mut board.clone())
        };
        prop_assert_eq!(monte(seed), monte(seed));

        let uct = |seed| {
            UctSearch::new(
                DiskCountEvaluator,
                UctConfig::with_playouts(25),
                ChaCha8Rng::seed_from_u64(seed),
            )
            .act(&mut board.clone())
        };
        prop_assert_eq!(uct(seed), uct(seed));
    }
}

// =============================================================================
// UCT node statistics
// =============================================================================

proptest! {
    /// After a search the root's statistics are internally consistent:
    /// visits equal the child visit sum, win fractions stay in [0, 1] and
    /// the priors over the children form a distribution.
    #[test]
    fn prop_uct_root_statistics(board in arb_played_board(), seed in arb_seed()) {
        let mut board = board;
        if board.legal_moves().len() < 2 {
            return Ok(());
        }

        let mut uct = UctSearch::new(
            DiskCountEvaluator,
            UctConfig::with_playouts(40),
            ChaCha8Rng::seed_from_u64(seed),
        );
        uct.act(&mut board);

        let root = uct.table().find(root_key(&board)).unwrap();
        let node = uct.table().node(root);

        let child_sum: u32 = node.child_visits.iter().sum();
        prop_assert_eq!(node.visits, child_sum);
        prop_assert!(node.visits > 0);
        prop_assert!(node.win_sum >= 0.0 && node.win_sum <= node.visits as f32);

        let prior_sum: f32 = node.priors.iter().sum();
        prop_assert!((prior_sum - 1.0).abs() < 1e-5);
        for (wins, visits) in node.child_wins.iter().zip(&node.child_visits) {
            prop_assert!(*wins >= 0.0 && *wins <= *visits as f32);
        }
    }
}
