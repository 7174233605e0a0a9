//! Reversi Core - shared domain types for the 4x4 reversi engine
//!
//! This crate provides the types every other crate agrees on:
//!
//! - [`Color`] - the two disk colors
//! - [`Winner`] - outcome of a finished game
//! - [`Square`] - a 0-based cell index on the 4x4 grid
//! - [`Action`] - a placement or a pass, with pass as a distinguished variant
//! - [`ReversiError`] - failure signals for board mutation

mod error;
mod types;

pub use error::{ReversiError, Result};
pub use types::{Action, Color, Square, Winner};
