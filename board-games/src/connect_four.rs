//! Connect-four on 6 columns and 5 rows

use std::{cmp::Reverse, fmt, str::FromStr};

use adversarial_minimax::{assert_game_board, GameBoard, RuleError, WrappedScore};
use itertools::{iproduct, Itertools};

use crate::Cell;

/// Number of columns on the board
pub const COLUMNS: usize = 6;
/// Number of rows on the board
pub const ROWS: usize = 5;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Scores are wrapped so a connected four always outranks any heuristic value
pub type Score = WrappedScore<i32>;

/// A connect-four position on a 6 column, 5 row board. X moves first and is the maximizing
/// player.
///
/// Moves are column indexes. Rows are counted from the bottom, a stone always lands on top of the
/// stones already in its column.
#[derive(Debug, Clone, Copy, Eq)]
pub struct ConnectFour {
    slots: [Cell; COLUMNS * ROWS],
    heights: [usize; COLUMNS],
    last_move: Option<usize>,
}

const _: () = assert_game_board::<ConnectFour>();

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectFour {
    /// The empty board
    pub fn new() -> Self {
        Self {
            slots: [Cell::Empty; COLUMNS * ROWS],
            heights: [0; COLUMNS],
            last_move: None,
        }
    }

    /// Build a position from its slots, bottom row first
    ///
    /// Fails if a stone floats above an empty slot, if the stone counts could not have come from
    /// alternating turns with X first, or if play went on after someone connected four.
    pub fn from_slots(slots: [Cell; COLUMNS * ROWS]) -> Result<Self, RuleError> {
        let mut heights = [0; COLUMNS];

        for (col, height) in heights.iter_mut().enumerate() {
            let column = (0..ROWS).map(|row| slots[row * COLUMNS + col]).collect_vec();
            *height = column.iter().take_while(|c| **c != Cell::Empty).count();

            if column[*height..].iter().any(|c| *c != Cell::Empty) {
                return Err(RuleError::IllegalState(format!(
                    "column {} has a stone above an empty slot",
                    col
                )));
            }
        }

        let x_count = slots.iter().filter(|c| **c == Cell::X).count();
        let o_count = slots.iter().filter(|c| **c == Cell::O).count();
        if o_count > x_count || x_count > o_count + 1 {
            return Err(RuleError::IllegalState(format!(
                "{} X and {} O cannot come from alternating turns",
                x_count, o_count
            )));
        }

        let board = Self {
            slots,
            heights,
            last_move: None,
        };

        if board.has_line(Cell::X) && board.has_line(Cell::O) {
            return Err(RuleError::IllegalState(
                "both players have four in a row".to_owned(),
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

    /// The contents of the slot at `row` (counted from the bottom) and `col`
    pub fn slot(&self, row: usize, col: usize) -> Cell {
        self.slots[row * COLUMNS + col]
    }

    /// How many stones are stacked in `col`
    pub fn height(&self, col: usize) -> usize {
        self.heights[col]
    }

    /// The side to move
    pub fn current_player(&self) -> Cell {
        let x_count = self.slots.iter().filter(|c| **c == Cell::X).count();
        let o_count = self.slots.iter().filter(|c| **c == Cell::O).count();

        if x_count <= o_count {
            Cell::X
        } else {
            Cell::O
        }
    }

    /// The side with four in a row, if any
    pub fn winner(&self) -> Option<Cell> {
        [Cell::X, Cell::O]
            .into_iter()
            .find(|player| self.has_line(*player))
    }

    fn has_line(&self, player: Cell) -> bool {
        iproduct!(0..ROWS, 0..COLUMNS, DIRECTIONS.iter()).any(|(row, col, (dr, dc))| {
            (0..4).all(|step| {
                let r = row as isize + dr * step;
                let c = col as isize + dc * step;

                (0..ROWS as isize).contains(&r)
                    && (0..COLUMNS as isize).contains(&c)
                    && self.slot(r as usize, c as usize) == player
            })
        })
    }

    /// True once every slot holds a stone
    pub fn is_full(&self) -> bool {
        self.stones() == COLUMNS * ROWS
    }

    fn stones(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Rewards stones on top of their column for the room they have around them
    fn heuristic(&self) -> i32 {
        let mut score = 0;

        for col in (0..COLUMNS).filter(|col| self.heights[*col] > 0) {
            let row = self.heights[col] - 1;
            let sign = match self.slot(row, col) {
                Cell::X => 1,
                Cell::O => -1,
                Cell::Empty => 0,
            };

            let open_sides = [col.checked_sub(1), Some(col + 1)]
                .iter()
                .flatten()
                .filter(|c| **c < COLUMNS && self.slot(row, **c) == Cell::Empty)
                .count();
            let open_above = usize::from(row + 1 < ROWS);

            score += sign * (open_sides + open_above) as i32;
        }

        score
    }
}

impl PartialEq for ConnectFour {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl GameBoard for ConnectFour {
    type Move = usize;
    type Score = Score;

    fn evaluate(&self) -> Score {
        let depth = self.stones() as i64;

        match self.winner() {
            Some(Cell::X) => WrappedScore::Win(Reverse(depth)),
            Some(Cell::O) => WrappedScore::Lose(depth),
            _ if self.is_full() => WrappedScore::Scored(0),
            _ => WrappedScore::Scored(self.heuristic()),
        }
    }

    fn moves(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return vec![];
        }

        (0..COLUMNS).filter(|col| self.heights[*col] < ROWS).collect()
    }

    fn make(&self, game_move: &usize) -> Result<Self, RuleError> {
        let col = *game_move;

        if col >= COLUMNS {
            return Err(RuleError::IllegalMove(format!(
                "column {} is off the board",
                col
            )));
        }
        if self.heights[col] >= ROWS {
            return Err(RuleError::IllegalMove(format!("column {} is full", col)));
        }
        if self.winner().is_some() {
            return Err(RuleError::IllegalMove("the game is over".to_owned()));
        }

        let mut next = *self;
        next.slots[self.heights[col] * COLUMNS + col] = self.current_player();
        next.heights[col] += 1;
        next.last_move = Some(col);

        Ok(next)
    }

    fn is_maximizing(&self) -> bool {
        self.current_player() == Cell::X
    }

    fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}

impl FromStr for ConnectFour {
    type Err = RuleError;

    /// Parses the rows from the top down as `X`, `O` or `-`, whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<Cell> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Cell::try_from)
            .collect::<Result<_, _>>()?;

        if cells.len() != COLUMNS * ROWS {
            return Err(RuleError::IllegalState(format!(
                "expected {} slots, found {}",
                COLUMNS * ROWS,
                cells.len()
            )));
        }

        let mut slots = [Cell::Empty; COLUMNS * ROWS];
        for (top_down_row, row) in cells.chunks(COLUMNS).enumerate() {
            let start = (ROWS - 1 - top_down_row) * COLUMNS;
            slots[start..start + COLUMNS].copy_from_slice(row);
        }

        Self::from_slots(slots)
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let cells = (0..COLUMNS).map(|col| self.slot(row, col)).join(" | ");
            writeln!(f, "| {} |", cells)?;
        }
        writeln!(f, "  {}", (0..COLUMNS).join("   "))
    }
}
