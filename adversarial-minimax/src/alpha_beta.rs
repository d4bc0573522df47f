use std::cmp::{max, min};

use tracing::{info_span, trace};

use crate::{GameBoard, GameScore, MinimaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The alpha-beta window
///
/// It is passed by value, so narrowing it only affects the branch currently being searched.
pub struct Window<ScoreType> {
    /// The best score the maximizer is already guaranteed along this path (alpha)
    pub global_maximum: ScoreType,
    /// The best score the minimizer is already guaranteed along this path (beta)
    pub global_minimum: ScoreType,
}

impl<ScoreType: GameScore> Window<ScoreType> {
    /// A window that prunes nothing
    pub fn full() -> Self {
        Self {
            global_maximum: ScoreType::inf_limit(),
            global_minimum: ScoreType::sup_limit(),
        }
    }

    /// Once crossed, no remaining sibling can change the parent's choice
    pub fn is_crossed(&self) -> bool {
        self.global_minimum <= self.global_maximum
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Stateless depth-bounded minimax search with alpha-beta pruning
///
/// Nothing is kept between calls, every query searches the position from scratch. Use
/// [crate::CachedEngine] to reuse work across a sequence of moves.
///
/// ```rust
/// use adversarial_minimax::{AlphaBeta, GameBoard, Successors, SuccessorBoard};
///
/// /// Take one or two stones, taking the last stone wins
/// #[derive(Debug, Clone, PartialEq)]
/// struct Pile { stones: u8, first_to_move: bool }
///
/// impl SuccessorBoard for Pile {
///     type Score = i8;
///
///     fn evaluate(&self) -> i8 {
///         match (self.stones, self.first_to_move) {
///             (0, true) => -1,
///             (0, false) => 1,
///             _ => 0,
///         }
///     }
///
///     fn children(&self) -> Vec<Self> {
///         (1..=2)
///             .filter(|take| *take <= self.stones)
///             .map(|take| Pile { stones: self.stones - take, first_to_move: !self.first_to_move })
///             .collect()
///     }
///
///     fn current_player_is_maximizing(&self) -> bool { self.first_to_move }
/// }
///
/// let start = Successors::new(Pile { stones: 4, first_to_move: true });
/// let next = AlphaBeta::new().find_best_move(4, &start).unwrap();
///
/// // Leaving a multiple of three wins
/// assert_eq!(next.board().stones, 3);
/// ```
pub struct AlphaBeta;

impl AlphaBeta {
    /// Construct a new `AlphaBeta`
    pub fn new() -> Self {
        Self
    }

    /// Search `depth_bound` plies below `position` and return the child position it should move to
    ///
    /// Children are tried in generation order and a later child only replaces the current choice
    /// if it is strictly better for the player to move, so ties go to the earliest move.
    pub fn find_best_move<BoardType: GameBoard>(
        &self,
        depth_bound: usize,
        position: &BoardType,
    ) -> Result<BoardType, MinimaxError> {
        if depth_bound == 0 {
            return Err(MinimaxError::NoMovesFound);
        }

        let children = position.children()?;
        let is_maximizing = position.is_maximizing();

        let span = info_span!(
            "find_best_move",
            depth_bound,
            is_maximizing,
            options = children.len(),
            chosen_score = tracing::field::Empty,
        );
        let _enter = span.enter();

        let mut window = Window::<BoardType::Score>::full();
        let mut best: Option<(BoardType, BoardType::Score)> = None;

        for child in children {
            let score = if is_maximizing {
                self.minimizing_score(&child, depth_bound - 1, window)?
            } else {
                self.maximizing_score(&child, depth_bound - 1, window)?
            };

            let improved = match &best {
                None => true,
                Some((_, best_score)) if is_maximizing => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };

            if improved {
                if is_maximizing {
                    window.global_maximum = max(window.global_maximum, score);
                } else {
                    window.global_minimum = min(window.global_minimum, score);
                }
                best = Some((child, score));
            }
        }

        let (chosen, score) = best.ok_or(MinimaxError::NoMovesFound)?;
        span.record("chosen_score", format!("{:?}", score).as_str());

        Ok(chosen)
    }

    /// The minimax value of `position` searched `depth_bound` plies deep, oriented by whoever is
    /// to move there
    pub fn score_position<BoardType: GameBoard>(
        &self,
        depth_bound: usize,
        position: &BoardType,
    ) -> Result<BoardType::Score, MinimaxError> {
        let window = Window::full();

        if position.is_maximizing() {
            self.maximizing_score(position, depth_bound, window)
        } else {
            self.minimizing_score(position, depth_bound, window)
        }
    }

    /// Score a position where the maximizer is to move
    pub fn maximizing_score<BoardType: GameBoard>(
        &self,
        position: &BoardType,
        depth: usize,
        mut window: Window<BoardType::Score>,
    ) -> Result<BoardType::Score, MinimaxError> {
        if depth == 0 {
            return Ok(position.evaluate());
        }

        let children = position.children()?;
        if children.is_empty() {
            return Ok(position.evaluate());
        }

        let mut local_maximum = BoardType::Score::inf_limit();
        for child in &children {
            local_maximum = max(
                local_maximum,
                self.minimizing_score(child, depth - 1, window)?,
            );
            window.global_maximum = max(local_maximum, window.global_maximum);

            if window.is_crossed() {
                trace!(depth, "beta cutoff");
                break;
            }
        }

        Ok(local_maximum)
    }

    /// Score a position where the minimizer is to move
    pub fn minimizing_score<BoardType: GameBoard>(
        &self,
        position: &BoardType,
        depth: usize,
        mut window: Window<BoardType::Score>,
    ) -> Result<BoardType::Score, MinimaxError> {
        if depth == 0 {
            return Ok(position.evaluate());
        }

        let children = position.children()?;
        if children.is_empty() {
            return Ok(position.evaluate());
        }

        let mut local_minimum = BoardType::Score::sup_limit();
        for child in &children {
            local_minimum = min(
                local_minimum,
                self.maximizing_score(child, depth - 1, window)?,
            );
            window.global_minimum = min(local_minimum, window.global_minimum);

            if window.is_crossed() {
                trace!(depth, "alpha cutoff");
                break;
            }
        }

        Ok(local_minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ExplicitTree, Leaf};

    #[test]
    fn test_window_starts_open() {
        let window = Window::<i32>::full();

        assert!(!window.is_crossed());
        assert_eq!(window.global_maximum, i32::MIN);
        assert_eq!(window.global_minimum, i32::MAX);
    }

    #[test]
    fn test_zero_depth_finds_nothing() {
        let tree = ExplicitTree::textbook();

        assert_eq!(
            AlphaBeta::new().find_best_move(0, &tree.root()),
            Err(MinimaxError::NoMovesFound)
        );
    }

    #[test]
    fn test_terminal_position_finds_nothing() {
        let tree = ExplicitTree::new(vec![]);

        assert_eq!(
            AlphaBeta::new().find_best_move(4, &tree.root()),
            Err(MinimaxError::NoMovesFound)
        );
    }

    #[test]
    fn test_picks_best_child_of_textbook_tree() {
        let tree = ExplicitTree::textbook();
        let chosen = AlphaBeta::new().find_best_move(3, &tree.root()).unwrap();

        assert_eq!(chosen.last_move(), Some(0));
        assert_eq!(AlphaBeta::new().score_position(3, &tree.root()), Ok(3));
    }

    #[test]
    fn test_minimizer_picks_lowest_child() {
        let tree = ExplicitTree::new(vec![
            Leaf::Node(vec![Leaf::Score(5)]),
            Leaf::Node(vec![Leaf::Score(-2)]),
            Leaf::Node(vec![Leaf::Score(1)]),
        ])
        .minimizer_first();
        let chosen = AlphaBeta::new().find_best_move(2, &tree.root()).unwrap();

        assert_eq!(chosen.last_move(), Some(1));
    }

    #[test]
    fn test_ties_go_to_the_first_child() {
        let tree = ExplicitTree::new(vec![
            Leaf::Score(1),
            Leaf::Score(7),
            Leaf::Score(7),
            Leaf::Score(7),
        ]);

        for _ in 0..3 {
            let chosen = AlphaBeta::new().find_best_move(1, &tree.root()).unwrap();
            assert_eq!(chosen.last_move(), Some(1));
        }

        let tree = tree.minimizer_first();
        let chosen = AlphaBeta::new().find_best_move(1, &tree.root()).unwrap();
        assert_eq!(chosen.last_move(), Some(0));
    }

    #[test]
    fn test_depth_bound_falls_back_to_evaluation() {
        // The interior node evaluates to 100 but its only child is a loss
        let tree = ExplicitTree::new(vec![
            Leaf::Evaluated(100, vec![Leaf::Score(-50)]),
            Leaf::Score(10),
        ]);

        let shallow = AlphaBeta::new().find_best_move(1, &tree.root()).unwrap();
        assert_eq!(shallow.last_move(), Some(0));

        let deep = AlphaBeta::new().find_best_move(2, &tree.root()).unwrap();
        assert_eq!(deep.last_move(), Some(1));
    }

    #[test]
    fn test_pruning_skips_refuted_branches() {
        let tree = ExplicitTree::textbook();
        AlphaBeta::new().score_position(3, &tree.root()).unwrap();

        // An unpruned search would evaluate all nine leaves
        assert!(tree.evaluations() < 9);
    }
}
