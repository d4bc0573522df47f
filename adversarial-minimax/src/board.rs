use std::fmt::{self, Debug, Display};

use crate::{GameScore, RuleError};

/// The capabilities a game must expose to be searched
///
/// Boards are immutable values: `make` returns a new board and never changes `self`. The list
/// returned by `moves` is empty exactly when the position is terminal.
///
/// Games that naturally hand out successor positions rather than moves can implement
/// [SuccessorBoard] instead and be searched through the [Successors] adapter.
pub trait GameBoard: Sized {
    /// Identifies a transition from one board to the next
    type Move: Clone + Debug + PartialEq;
    /// The result of statically evaluating a board
    type Score: GameScore;

    /// Static evaluation, from the maximizer's point of view
    ///
    /// Must lie strictly between [GameScore::inf_limit] and [GameScore::sup_limit]
    fn evaluate(&self) -> Self::Score;

    /// All legal moves from this position, in a stable order
    fn moves(&self) -> Vec<Self::Move>;

    /// The board reached by playing `game_move`
    fn make(&self, game_move: &Self::Move) -> Result<Self, RuleError>;

    /// Whether the player to move is the maximizing one
    fn is_maximizing(&self) -> bool;

    /// The move that produced this board, `None` for a starting position
    fn last_move(&self) -> Option<Self::Move>;

    /// True when there are no legal moves left
    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    /// Every successor position, in the same order as [GameBoard::moves]
    fn children(&self) -> Result<Vec<Self>, RuleError> {
        self.moves().iter().map(|m| self.make(m)).collect()
    }
}

/// Compile time check that `B` satisfies the board contract
///
/// ```rust
/// use adversarial_minimax::{assert_game_board, Successors, SuccessorBoard};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Countdown(u8);
///
/// impl SuccessorBoard for Countdown {
///     type Score = i8;
///
///     fn evaluate(&self) -> i8 { 0 }
///     fn children(&self) -> Vec<Self> {
///         (0..self.0).map(Countdown).collect()
///     }
///     fn current_player_is_maximizing(&self) -> bool { self.0 % 2 == 0 }
/// }
///
/// const _: () = assert_game_board::<Successors<Countdown>>();
/// ```
pub const fn assert_game_board<B: GameBoard>() {}

/// The direct-successor shape of the board contract
///
/// Instead of moves, boards hand out the positions they lead to. `children` returns an empty
/// list exactly when the position is terminal.
pub trait SuccessorBoard: Sized {
    /// The result of statically evaluating a board
    type Score: GameScore;

    /// Static evaluation, from the maximizer's point of view
    fn evaluate(&self) -> Self::Score;

    /// Every position reachable in one ply
    fn children(&self) -> Vec<Self>;

    /// Whether the player to move is the maximizing one
    fn current_player_is_maximizing(&self) -> bool;
}

/// Adapts a [SuccessorBoard] to the [GameBoard] contract
///
/// Moves are indexes into the successor list, so the board must generate its children in a
/// stable order. Equality only looks at the wrapped board.
#[derive(Debug, Clone)]
pub struct Successors<B> {
    board: B,
    last_move: Option<usize>,
}

impl<B> Successors<B> {
    /// Wrap a starting position
    pub fn new(board: B) -> Self {
        Self {
            board,
            last_move: None,
        }
    }

    /// The wrapped board
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Unwrap the board
    pub fn into_inner(self) -> B {
        self.board
    }
}

impl<B: PartialEq> PartialEq for Successors<B> {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl<B: Eq> Eq for Successors<B> {}

impl<B: Display> Display for Successors<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.fmt(f)
    }
}

impl<B: SuccessorBoard> GameBoard for Successors<B> {
    type Move = usize;
    type Score = B::Score;

    fn evaluate(&self) -> Self::Score {
        self.board.evaluate()
    }

    fn moves(&self) -> Vec<usize> {
        (0..self.board.children().len()).collect()
    }

    fn make(&self, game_move: &usize) -> Result<Self, RuleError> {
        let mut children = self.board.children();
        let count = children.len();

        if *game_move >= count {
            return Err(RuleError::IllegalMove(format!(
                "successor {} is out of range, there are {} successors",
                game_move, count
            )));
        }

        Ok(Self {
            board: children.swap_remove(*game_move),
            last_move: Some(*game_move),
        })
    }

    fn is_maximizing(&self) -> bool {
        self.board.current_player_is_maximizing()
    }

    fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    fn is_terminal(&self) -> bool {
        self.board.children().is_empty()
    }

    fn children(&self) -> Result<Vec<Self>, RuleError> {
        Ok(self
            .board
            .children()
            .into_iter()
            .enumerate()
            .map(|(index, board)| Self {
                board,
                last_move: Some(index),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Players alternately add 1 or 2 to a running total, the game stops at 5
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Total(u8);

    impl SuccessorBoard for Total {
        type Score = i8;

        fn evaluate(&self) -> i8 {
            self.0 as i8
        }

        fn children(&self) -> Vec<Self> {
            [1, 2]
                .iter()
                .map(|step| self.0 + step)
                .filter(|total| *total <= 5)
                .map(Total)
                .collect()
        }

        fn current_player_is_maximizing(&self) -> bool {
            true
        }
    }

    const _: () = assert_game_board::<Successors<Total>>();

    #[test]
    fn test_moves_are_successor_indexes() {
        let board = Successors::new(Total(0));

        assert_eq!(board.moves(), vec![0, 1]);
        assert_eq!(board.make(&1).unwrap().board(), &Total(2));
    }

    #[test]
    fn test_make_round_trips_last_move() {
        let board = Successors::new(Total(0));

        assert_eq!(board.last_move(), None);
        assert_eq!(board.make(&0).unwrap().last_move(), Some(0));
        assert_eq!(board.make(&1).unwrap().last_move(), Some(1));
    }

    #[test]
    fn test_out_of_range_move_is_illegal() {
        let board = Successors::new(Total(4));

        assert!(matches!(board.make(&1), Err(RuleError::IllegalMove(_))));
    }

    #[test]
    fn test_children_match_make() {
        let board = Successors::new(Total(1));
        let children = board.children().unwrap();

        assert_eq!(children.len(), 2);
        for (index, child) in children.iter().enumerate() {
            assert_eq!(child, &board.make(&index).unwrap());
            assert_eq!(child.last_move(), Some(index));
        }
    }

    #[test]
    fn test_terminal_position() {
        let board = Successors::new(Total(5));

        assert!(board.is_terminal());
        assert!(board.children().unwrap().is_empty());
        assert_eq!(board.evaluate(), 5);
    }

    #[test]
    fn test_equality_ignores_last_move() {
        let via_two_ones = Successors::new(Total(0))
            .make(&0)
            .unwrap()
            .make(&0)
            .unwrap();
        let via_a_two = Successors::new(Total(0)).make(&1).unwrap();

        assert_eq!(via_two_ones, via_a_two);
    }

    #[test]
    fn test_into_inner_unwraps_the_board() {
        let board = Successors::new(Total(0)).make(&1).unwrap();

        assert_eq!(board.into_inner(), Total(2));
    }
}
