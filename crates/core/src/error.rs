use thiserror::Error;

use crate::Square;

/// Errors that can occur while mutating a board.
///
/// All of these are non-fatal failure signals: a driver treats an
/// [`ReversiError::IllegalMove`] as a forfeiting missed move, never as an
/// invariant violation, and the search hot loops signal failures through
/// `Result` values rather than panics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversiError {
    #[error("move {0} is not in the current legal-move mask")]
    IllegalMove(Square),

    #[error("skip requested but the mover has a legal move or the game is over")]
    SkipNotAllowed,

    #[error("undo requested at the initial position")]
    UndoUnderflow,

    #[error("position masks overlap or exceed the board")]
    InvalidPosition,
}

/// Convenience Result type for board operations
pub type Result<T> = std::result::Result<T, ReversiError>;
