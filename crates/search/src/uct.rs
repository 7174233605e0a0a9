use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use reversi_board::Board;
use reversi_core::{Action, Square};

use crate::config::UctConfig;
use crate::evaluator::Evaluator;
use crate::node::{SearchNode, UNEXPANDED};
use crate::table::{NodeKey, NodeTable};

/// UCT tree search with PUCT child selection.
///
/// Nodes live in a shared [`NodeTable`] keyed by the raw packed position,
/// mover and ply, so the subtree built below the played move is found again
/// as the next decision's root. The key must stay orientation-exact: a
/// node's move list is only legal in the orientation it was expanded from.
/// Simulations descend through move/undo on the caller's board, score new
/// leaves with the [`Evaluator`], and back the result up in win units with
/// a `1 - w` complement per ply.
pub struct UctSearch<E: Evaluator, R: Rng> {
    evaluator: E,
    config: UctConfig,
    rng: R,
    table: NodeTable,
}

impl<E: Evaluator, R: Rng> UctSearch<E, R> {
    pub fn new(evaluator: E, config: UctConfig, rng: R) -> Self {
        let table = NodeTable::new(config.table_capacity);
        UctSearch {
            evaluator,
            config,
            rng,
            table,
        }
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// Runs the playout budget and picks a root move: sampled in proportion
    /// to visit counts in the opening, most-visited afterwards. Returns a
    /// pass if there is no legal move.
    pub fn act(&mut self, board: &mut Board) -> Action {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Action::Pass;
        }
        if legal.len() == 1 {
            return Action::Place(legal[0]);
        }

        // The root has advanced since the last decision: drop everything it
        // left behind, keeping exactly the subtree still reachable from it.
        match self.table.find(key_for(board)) {
            Some(root) => {
                self.table.evict_unreachable(root);
            }
            None => self.table.clear(),
        }
        let root = match self.expand(board) {
            Some(root) => root,
            // The reachable tree alone breaches the cap; start over.
            None => {
                self.table.clear();
                self.expand(board)
                    .expect("BUG: claim refused on an empty table")
            }
        };

        let playouts = self.config.playouts;
        for done in 0..playouts {
            if self.table.at_capacity() {
                break;
            }
            self.simulate(board, root);

            // Stop once the lead exceeds the remaining budget.
            let (first, second) = top_two(&self.table.node(root).child_visits);
            if first - second > playouts - done - 1 {
                break;
            }
        }

        let node = self.table.node(root);
        let choice = if board.ply() < self.config.sample_opening_plies {
            match WeightedIndex::new(node.child_visits.iter().copied()) {
                Ok(dist) => dist.sample(&mut self.rng),
                // All-zero visit counts; fall back to first-seen.
                Err(_) => 0,
            }
        } else {
            node.best_child()
                .expect("BUG: root node lost its children")
        };
        Action::Place(node.moves[choice])
    }

    /// One simulation below `idx`: descend by PUCT, expand the first
    /// untried edge, back the leaf value up. Returns the result in win
    /// units for the mover at `idx`.
    fn simulate(&mut self, board: &mut Board, idx: usize) -> f32 {
        if self.table.node(idx).moves.is_empty() {
            return 1.0;
        }

        let child = self.select_child(idx);
        let (sq, slot) = {
            let node = self.table.node(idx);
            (node.moves[child], node.child_slot[child])
        };

        let result = {
            let mut scope = MoveScope::place(board, sq);
            if slot == UNEXPANDED {
                match self.expand(scope.board()) {
                    Some(cidx) => {
                        self.table.node_mut(idx).child_slot[child] = cidx;
                        1.0 - self.table.node(cidx).value
                    }
                    // Claim refused; score the leaf without caching it.
                    None => {
                        if scope.board().legal_moves().is_empty() {
                            1.0
                        } else {
                            1.0 - win_units(self.evaluator.evaluate(scope.board()).value)
                        }
                    }
                }
            } else {
                1.0 - self.simulate(scope.board(), slot)
            }
        };

        let node = self.table.node_mut(idx);
        node.visits += 1;
        node.win_sum += result;
        node.child_visits[child] += 1;
        node.child_wins[child] += result;
        result
    }

    /// PUCT: `q + c_puct * prior * sqrt(N) / (1 + n)`, with `q = 0.5` for
    /// an unvisited edge. First-seen wins ties.
    fn select_child(&self, idx: usize) -> usize {
        let node = self.table.node(idx);
        let sqrt_total = (node.visits as f32).sqrt();

        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for i in 0..node.moves.len() {
            let q = if node.child_visits[i] == 0 {
                0.5
            } else {
                node.child_wins[i] / node.child_visits[i] as f32
            };
            let u = sqrt_total / (1.0 + node.child_visits[i] as f32);
            let score = q + self.config.c_puct * node.priors[i] * u;
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }

    /// Finds the node for the current position, evaluating and claiming a
    /// slot if it is new. `None` when the table refuses the claim.
    fn expand(&mut self, board: &Board) -> Option<usize> {
        let evaluator = &self.evaluator;
        self.table.find_or_claim(key_for(board), || {
            let moves = board.legal_moves();
            if moves.is_empty() {
                // Stuck mover; fixed value, no edges.
                return SearchNode::new(Vec::new(), Vec::new(), 0.0);
            }

            let eval = evaluator.evaluate(board);
            let value = win_units(eval.value);
            let mut priors: Vec<f32> = moves.iter().map(|&sq| eval.prior(sq)).collect();
            let mass: f32 = priors.iter().sum();
            if mass > 0.0 {
                for p in &mut priors {
                    *p /= mass;
                }
            } else {
                priors.fill(1.0 / moves.len() as f32);
            }
            SearchNode::new(moves, priors, value)
        })
    }
}

/// Applies a move on construction and undoes it on drop, so the descent
/// releases the shared board on every exit path.
struct MoveScope<'a> {
    board: &'a mut Board,
}

impl<'a> MoveScope<'a> {
    fn place(board: &'a mut Board, sq: Square) -> Self {
        board.place(sq).expect("BUG: tree move rejected by board");
        MoveScope { board }
    }

    fn board(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveScope<'_> {
    fn drop(&mut self) {
        self.board.undo().expect("BUG: undo failed after tree move");
    }
}

/// Maps an evaluator value in [-1, 1] to win units in [0, 1].
fn win_units(value: f32) -> f32 {
    (value + 1.0) / 2.0
}

fn key_for(board: &Board) -> NodeKey {
    NodeKey {
        hash: board.position_hash(),
        mover: board.mover(),
        ply: board.ply(),
    }
}

/// Largest and second-largest entries.
fn top_two(visits: &[u32]) -> (u32, u32) {
    let mut first = 0;
    let mut second = 0;
    for &v in visits {
        if v > first {
            second = first;
            first = v;
        } else if v > second {
            second = v;
        }
    }
    (first, second)
}
