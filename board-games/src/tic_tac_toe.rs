//! Tic-tac-toe on a 3x3 grid

use std::{fmt, str::FromStr};

use adversarial_minimax::{assert_game_board, GameBoard, RuleError};
use itertools::Itertools;

use crate::Cell;

const LINES: [[usize; 3]; 8] = [
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
];

/// A 3x3 tic-tac-toe position. X moves first and is the maximizing player.
///
/// Cells are numbered 0 to 8, left to right and top to bottom. A win for X scores
/// `i32::MAX - stones_on_board` and a win for O `i32::MIN + stones_on_board`, so quicker wins
/// are preferred and neither ever reaches the score limits.
#[derive(Debug, Clone, Copy, Eq)]
pub struct TicTacToe {
    cells: [Cell; 9],
    last_move: Option<usize>,
}

const _: () = assert_game_board::<TicTacToe>();

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    /// The empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
            last_move: None,
        }
    }

    /// Build a position from its cells
    ///
    /// Fails if the stone counts could not have come from alternating turns with X first, or if
    /// play went on after someone completed a line.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self, RuleError> {
        let x_count = cells.iter().filter(|c| **c == Cell::X).count();
        let o_count = cells.iter().filter(|c| **c == Cell::O).count();

        if o_count > x_count || x_count > o_count + 1 {
            return Err(RuleError::IllegalState(format!(
                "{} X and {} O cannot come from alternating turns",
                x_count, o_count
            )));
        }

        let board = Self {
            cells,
            last_move: None,
        };

        if board.has_line(Cell::X) && board.has_line(Cell::O) {
            return Err(RuleError::IllegalState(
                "both players have three in a row".to_owned(),
            ));
        }
        if let Some(winner) = board.winner() {
            if board.current_player() == winner {
                return Err(RuleError::IllegalState(format!(
                    "{} kept playing after {} won",
                    winner.opponent(),
                    winner
                )));
            }
        }

        Ok(board)
    }

    /// The contents of every cell
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// The side to move
    pub fn current_player(&self) -> Cell {
        if self.stone_count(Cell::X) <= self.stone_count(Cell::O) {
            Cell::X
        } else {
            Cell::O
        }
    }

    /// The side with three in a row, if any
    pub fn winner(&self) -> Option<Cell> {
        [Cell::X, Cell::O]
            .into_iter()
            .find(|player| self.has_line(*player))
    }

    fn has_line(&self, player: Cell) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|index| self.cells[*index] == player))
    }

    fn stone_count(&self, player: Cell) -> usize {
        self.cells.iter().filter(|c| **c == player).count()
    }

    fn depth(&self) -> i32 {
        (self.stone_count(Cell::X) + self.stone_count(Cell::O)) as i32
    }
}

impl PartialEq for TicTacToe {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl GameBoard for TicTacToe {
    type Move = usize;
    type Score = i32;

    fn evaluate(&self) -> i32 {
        match self.winner() {
            Some(Cell::X) => i32::MAX - self.depth(),
            Some(Cell::O) => i32::MIN + self.depth(),
            _ => 0,
        }
    }

    fn moves(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return vec![];
        }

        self.cells
            .iter()
            .positions(|c| *c == Cell::Empty)
            .collect()
    }

    fn make(&self, game_move: &usize) -> Result<Self, RuleError> {
        let index = *game_move;

        if index >= self.cells.len() {
            return Err(RuleError::IllegalMove(format!(
                "cell {} is off the board",
                index
            )));
        }
        if self.cells[index] != Cell::Empty {
            return Err(RuleError::IllegalMove(format!(
                "cell {} is already taken",
                index
            )));
        }
        if self.winner().is_some() {
            return Err(RuleError::IllegalMove("the game is over".to_owned()));
        }

        let mut cells = self.cells;
        cells[index] = self.current_player();

        Ok(Self {
            cells,
            last_move: Some(index),
        })
    }

    fn is_maximizing(&self) -> bool {
        self.current_player() == Cell::X
    }

    fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}

impl FromStr for TicTacToe {
    type Err = RuleError;

    /// Parses nine cells written as `X`, `O` or `-`, whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<Cell> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Cell::try_from)
            .collect::<Result<_, _>>()?;

        let cells: [Cell; 9] = cells.try_into().map_err(|cells: Vec<Cell>| {
            RuleError::IllegalState(format!("expected 9 cells, found {}", cells.len()))
        })?;

        Self::from_cells(cells)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+---+---+---+")?;
        for row in self.cells.chunks(3) {
            writeln!(f, "| {} |", row.iter().join(" | "))?;
            writeln!(f, "+---+---+---+")?;
        }

        Ok(())
    }
}
