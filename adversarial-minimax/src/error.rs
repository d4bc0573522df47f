use thiserror::Error;

/// Errors raised by a game's own rules while building or advancing a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The board was built in a configuration that cannot be reached by alternating turns
    #[error("illegal board state: {0}")]
    IllegalState(String),
    /// The requested move targets an occupied or out-of-range location
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Errors surfaced by the search engines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimaxError {
    /// A one-shot search was asked for a move with a zero depth bound or from a terminal position
    #[error("no moves found")]
    NoMovesFound,
    /// The cached engine was asked for a move from a position without children
    #[error("no moves available")]
    NoMovesAvailable,
    /// None of the cached children equals the position produced by the applied move
    ///
    /// This means the board's move list and `make` disagree, which is a bug in the board and not
    /// something a caller should retry.
    #[error("the search tree has no child matching the applied move")]
    CacheDesync,
    /// A child position did not report the move that produced it
    #[error("a child position is missing its last move")]
    MissingLastMove,
    /// The board rejected a move or a configuration
    #[error(transparent)]
    Rules(#[from] RuleError),
}

impl MinimaxError {
    /// Whether a caller may recover by asking for a different move
    ///
    /// Only illegal moves qualify, everything else is a broken invariant.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MinimaxError::Rules(RuleError::IllegalMove(_)))
    }
}
