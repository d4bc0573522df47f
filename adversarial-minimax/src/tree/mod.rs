//! The cached search tree and the engine that walks it through a game
//!
//! A [SearchNode] mirrors the positions reachable from its board, expanded lazily and never
//! regenerated. The [CachedEngine] keeps one such tree across a sequence of moves, so a move that
//! was already looked at does not have to be searched again after it is played.

mod node;
pub use node::SearchNode;

mod engine;
pub use engine::CachedEngine;
