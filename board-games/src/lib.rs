#![deny(missing_debug_implementations, missing_docs)]
//! Example games for the `adversarial_minimax` engines
//!
//! - [TicTacToe] and [ConnectFour] implement the move-list shape, [adversarial_minimax::GameBoard]
//! - [TakeAway] implements the direct-successor shape, [adversarial_minimax::SuccessorBoard], and
//!   is searched through [adversarial_minimax::Successors]
//!
//! In every game the first player is the maximizing one.

use std::fmt;

use adversarial_minimax::RuleError;

pub mod connect_four;
pub use connect_four::ConnectFour;

pub mod take_away;
pub use take_away::TakeAway;

pub mod tic_tac_toe;
pub use tic_tac_toe::TicTacToe;

/// The contents of one cell of a grid game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[allow(missing_docs)]
    Empty,
    /// A stone of the first, maximizing, player
    X,
    /// A stone of the second, minimizing, player
    O,
}

impl Cell {
    /// The other player, `Empty` stays `Empty`
    pub fn opponent(self) -> Self {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::Empty => Cell::Empty,
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = RuleError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '-' | '.' => Ok(Cell::Empty),
            'X' | 'x' => Ok(Cell::X),
            'O' | 'o' => Ok(Cell::O),
            other => Err(RuleError::IllegalState(format!(
                "'{}' is not a cell, expected X, O or -",
                other
            ))),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        };

        write!(f, "{}", c)
    }
}
