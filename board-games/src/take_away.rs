//! A subtraction game written in the direct-successor shape

use std::fmt;

use adversarial_minimax::{assert_game_board, RuleError, SuccessorBoard, Successors};

/// A pile of stones. Players alternately take between 1 and `max_take` stones and whoever takes
/// the last stone wins.
///
/// The first player is the maximizing one: a win for them scores `1`, a loss `-1`. Positions
/// with stones left score `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakeAway {
    stones: u32,
    max_take: u32,
    first_player_to_move: bool,
}

const _: () = assert_game_board::<Successors<TakeAway>>();

impl TakeAway {
    /// A fresh pile with the first player to move
    pub fn new(stones: u32, max_take: u32) -> Result<Self, RuleError> {
        if max_take == 0 {
            return Err(RuleError::IllegalState(
                "players must be allowed to take at least one stone".to_owned(),
            ));
        }

        Ok(Self {
            stones,
            max_take,
            first_player_to_move: true,
        })
    }

    /// Stones left on the pile
    pub fn stones(&self) -> u32 {
        self.stones
    }

    /// The most stones a single turn may take
    pub fn max_take(&self) -> u32 {
        self.max_take
    }

    /// The pile after the player to move takes `count` stones
    pub fn take(&self, count: u32) -> Result<Self, RuleError> {
        if count == 0 || count > self.max_take || count > self.stones {
            return Err(RuleError::IllegalMove(format!(
                "cannot take {} of {} stones, at most {} per turn",
                count, self.stones, self.max_take
            )));
        }

        Ok(Self {
            stones: self.stones - count,
            max_take: self.max_take,
            first_player_to_move: !self.first_player_to_move,
        })
    }
}

impl SuccessorBoard for TakeAway {
    type Score = i8;

    fn evaluate(&self) -> i8 {
        match (self.stones, self.first_player_to_move) {
            (0, true) => -1,
            (0, false) => 1,
            _ => 0,
        }
    }

    /// Taking one stone first, then two, and so on
    fn children(&self) -> Vec<Self> {
        (1..=self.max_take.min(self.stones))
            .map(|count| Self {
                stones: self.stones - count,
                max_take: self.max_take,
                first_player_to_move: !self.first_player_to_move,
            })
            .collect()
    }

    fn current_player_is_maximizing(&self) -> bool {
        self.first_player_to_move
    }
}

impl fmt::Display for TakeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = if self.first_player_to_move {
            "first"
        } else {
            "second"
        };

        write!(
            f,
            "{} stones left ({}), take 1 to {}, {} player to move",
            self.stones,
            "o".repeat(self.stones as usize),
            self.max_take,
            player
        )
    }
}
