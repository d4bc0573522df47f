#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the minimax algorithm for two-player, zero-sum, perfect-information
//! games. You describe your game by implementing [GameBoard] (or [SuccessorBoard] if your game
//! hands out successor positions instead of moves), with an evaluation that returns anything
//! implementing [GameScore].
//!
//! There are two ways to search:
//!
//! - [AlphaBeta] is stateless. Every query searches the given position from scratch with
//!   alpha-beta pruning.
//! - [CachedEngine] builds a tree of positions once and keeps it for the rest of the game.
//!   Playing a move keeps the subtree below it, and the horizon can be pushed further with
//!   [CachedEngine::update].
//!
//! Both engines break ties in favour of the earliest move in generation order.

mod alpha_beta;
pub use alpha_beta::{AlphaBeta, Window};

mod board;
pub use board::{assert_game_board, GameBoard, SuccessorBoard, Successors};

mod error;
pub use error::{MinimaxError, RuleError};

mod score;
pub use score::{GameScore, WrappedScore};

pub mod tree;
pub use tree::{CachedEngine, SearchNode};

#[cfg(test)]
mod test_support;
