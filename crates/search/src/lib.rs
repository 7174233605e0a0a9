//! Reversi Search - move-selection strategies for the 4x4 engine
//!
//! Three interchangeable strategies built on one board abstraction:
//!
//! - **NegaMax**: bounded-depth alpha-beta negamax over move/undo
//! - **Monte Carlo**: flat uniform-random rollout scoring on board copies
//! - **UCT**: transposition-hashed tree search with PUCT selection, driven
//!   by a pluggable [`Evaluator`] and backed by a fixed-capacity
//!   open-addressed [`NodeTable`] with generational eviction
//!
//! Every strategy exposes `act(&mut Board) -> Action` and leaves the board
//! exactly as it found it. The [`Evaluator`] trait is the single injection
//! point for learned position evaluators.

pub mod config;
pub mod evaluator;
mod montecarlo;
mod negamax;
mod node;
mod random;
mod table;
mod uct;

pub use config::UctConfig;
pub use evaluator::{DiskCountEvaluator, Evaluation, Evaluator};
pub use montecarlo::MonteCarloSearch;
pub use negamax::NegaMaxSearch;
pub use node::{SearchNode, UNEXPANDED};
pub use random::RandomSearch;
pub use table::{NodeKey, NodeTable};
pub use uct::UctSearch;
