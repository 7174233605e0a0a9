use reversi_core::Square;

/// Sentinel for a child edge whose node has not been allocated yet.
pub const UNEXPANDED: usize = usize::MAX;

/// Per-position statistics stored in the [`NodeTable`](crate::NodeTable).
///
/// All win sums are in win units in [0, 1] from the perspective of the
/// player to move at this node. Child edges are parallel arrays indexed by
/// position in `moves`; `child_slot` holds table slot indices and is the
/// only cross-node reference, so eviction remaps it in place.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Legal moves of the position, in ascending cell order.
    pub moves: Vec<Square>,

    /// Prior probabilities over `moves`, renormalized to sum to one.
    pub priors: Vec<f32>,

    pub child_visits: Vec<u32>,
    pub child_wins: Vec<f32>,
    pub child_slot: Vec<usize>,

    /// Total visits; equals the sum of `child_visits`.
    pub visits: u32,
    pub win_sum: f32,

    /// Evaluator estimate for the position, in win units.
    pub value: f32,
}

impl SearchNode {
    pub fn new(moves: Vec<Square>, priors: Vec<f32>, value: f32) -> Self {
        let n = moves.len();
        debug_assert_eq!(priors.len(), n);
        SearchNode {
            moves,
            priors,
            child_visits: vec![0; n],
            child_wins: vec![0.0; n],
            child_slot: vec![UNEXPANDED; n],
            visits: 0,
            win_sum: 0.0,
            value,
        }
    }

    /// Index of the most-visited child, first-seen on ties. `None` for a
    /// childless node.
    pub fn best_child(&self) -> Option<usize> {
        if self.moves.is_empty() {
            return None;
        }
        let mut best = 0;
        for (i, &visits) in self.child_visits.iter().enumerate() {
            if visits > self.child_visits[best] {
                best = i;
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_edges_start_unexpanded() {
        let node = SearchNode::new(vec![Square(1), Square(4)], vec![0.5, 0.5], 0.5);
        assert_eq!(node.visits, 0);
        assert_eq!(node.child_slot, vec![UNEXPANDED, UNEXPANDED]);
    }

    #[test]
    fn test_best_child_first_seen_tie() {
        let mut node = SearchNode::new(vec![Square(1), Square(4)], vec![0.5, 0.5], 0.5);
        assert_eq!(node.best_child(), Some(0));
        node.child_visits[1] = 3;
        assert_eq!(node.best_child(), Some(1));
        node.child_visits[0] = 3;
        assert_eq!(node.best_child(), Some(0));
    }
}
