use std::fmt::Debug;

use derivative::Derivative;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info_span};

use crate::{GameBoard, MinimaxError};

use super::SearchNode;

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "BoardType: Debug"))]
/// Keeps a search tree alive across a whole game
///
/// The tree is expanded once up front. Committing a move keeps the matching child's subtree and
/// drops its siblings, so later queries reuse everything already built below the new root.
///
/// ```rust
/// use adversarial_minimax::{CachedEngine, Successors, SuccessorBoard};
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
/// let start = Successors::new(Pile { stones: 5, first_to_move: true });
/// let mut engine = CachedEngine::new(start, 5).unwrap();
///
/// // Taking two stones leaves a multiple of three
/// assert_eq!(engine.do_best_move().unwrap(), 1);
/// assert_eq!(engine.board().board().stones, 3);
/// assert!(!engine.maximizing_player());
/// ```
pub struct CachedEngine<BoardType: GameBoard> {
    root: SearchNode<BoardType>,
    maximizing_player: bool,
    best_move: Option<BoardType::Move>,
}

impl<BoardType> CachedEngine<BoardType>
where
    BoardType: GameBoard + PartialEq,
{
    /// Build the tree `depth_bound` plies below `board`
    pub fn new(board: BoardType, depth_bound: usize) -> Result<Self, MinimaxError> {
        let maximizing_player = board.is_maximizing();
        let mut root = SearchNode::new(board);
        root.expand_to(depth_bound)?;

        debug!(
            depth_bound,
            nodes = root.node_count(),
            "built cached search tree"
        );

        Ok(Self {
            root,
            maximizing_player,
            best_move: None,
        })
    }

    /// The current root of the tree
    pub fn root(&self) -> &SearchNode<BoardType> {
        &self.root
    }

    /// The current position
    pub fn board(&self) -> &BoardType {
        self.root.board()
    }

    /// Whether the player to move at the root is the maximizing one
    pub fn maximizing_player(&self) -> bool {
        self.maximizing_player
    }

    /// The best move from the root according to the cached tree
    ///
    /// Each child is scored with an unpruned minimax over its cached subtree. A later child only
    /// wins if it is strictly better for the player to move, so ties go to the earliest move. The
    /// answer is remembered until the root or the tree changes.
    pub fn peek_best_move(&mut self) -> Result<BoardType::Move, MinimaxError> {
        if let Some(best_move) = &self.best_move {
            return Ok(best_move.clone());
        }

        let children = self.root.children();
        let span = info_span!(
            "peek_best_move",
            maximizing_player = self.maximizing_player,
            options = children.len(),
            chosen_score = tracing::field::Empty,
            chosen_move = tracing::field::Empty,
        );
        let _enter = span.enter();

        let mut best: Option<(&SearchNode<BoardType>, BoardType::Score)> = None;
        for child in children {
            let score = child.full_minimax_score(!self.maximizing_player);

            let improved = match &best {
                None => true,
                Some((_, best_score)) if self.maximizing_player => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };

            if improved {
                best = Some((child, score));
            }
        }

        let (chosen, score) = best.ok_or(MinimaxError::NoMovesAvailable)?;
        let best_move = chosen
            .board()
            .last_move()
            .ok_or(MinimaxError::MissingLastMove)?;

        span.record("chosen_score", format!("{:?}", score).as_str());
        span.record("chosen_move", format!("{:?}", best_move).as_str());

        self.best_move = Some(best_move.clone());
        Ok(best_move)
    }

    /// Push the horizon of the cached tree `depth_bound` plies further
    ///
    /// See [SearchNode::extend_horizon] for how the depth is applied.
    pub fn update(&mut self, depth_bound: usize) -> Result<(), MinimaxError> {
        self.root.extend_horizon(depth_bound)?;
        self.best_move = None;

        debug!(
            depth_bound,
            nodes = self.root.node_count(),
            "extended cached search tree"
        );

        Ok(())
    }

    /// Commit `game_move`, making the matching cached child the new root
    ///
    /// Fails with [MinimaxError::CacheDesync] if no cached child equals the board the move leads
    /// to. That only happens when the tree was never expanded below the root or when the board's
    /// move list and `make` disagree.
    pub fn do_move(&mut self, game_move: BoardType::Move) -> Result<BoardType::Move, MinimaxError> {
        let moved_board = self.root.board().make(&game_move)?;

        let index = self
            .root
            .children()
            .iter()
            .position(|child| child.board() == &moved_board)
            .ok_or(MinimaxError::CacheDesync)?;

        let old_root = std::mem::replace(&mut self.root, SearchNode::new(moved_board));
        self.root = old_root
            .into_child(index)
            .ok_or(MinimaxError::CacheDesync)?;
        self.maximizing_player = !self.maximizing_player;
        self.best_move = None;

        debug!(
            ?game_move,
            nodes = self.root.node_count(),
            "committed move"
        );

        Ok(game_move)
    }

    /// Commit the move [CachedEngine::peek_best_move] picks
    pub fn do_best_move(&mut self) -> Result<BoardType::Move, MinimaxError> {
        let best_move = self.peek_best_move()?;

        self.do_move(best_move)
    }

    /// Commit a uniformly random legal move
    pub fn do_random_move(&mut self) -> Result<BoardType::Move, MinimaxError> {
        self.do_random_move_with(&mut rand::thread_rng())
    }

    /// Commit a uniformly random legal move drawn from `rng`
    pub fn do_random_move_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<BoardType::Move, MinimaxError> {
        let random_move = self
            .root
            .board()
            .moves()
            .choose(rng)
            .cloned()
            .ok_or(MinimaxError::NoMovesAvailable)?;

        self.do_move(random_move)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        test_support::{ExplicitTree, Leaf},
        AlphaBeta, RuleError,
    };

    #[test]
    fn test_new_expands_to_the_depth_bound() {
        let tree = ExplicitTree::textbook();

        let shallow = CachedEngine::new(tree.root(), 1).unwrap();
        assert_eq!(shallow.root().node_count(), 4);

        let deep = CachedEngine::new(tree.root(), 2).unwrap();
        assert_eq!(deep.root().node_count(), 13);
        assert!(deep.maximizing_player());
    }

    #[test]
    fn test_peek_best_move_of_textbook_tree() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 2).unwrap();

        assert_eq!(engine.peek_best_move(), Ok(0));
    }

    #[test]
    fn test_peek_best_move_is_memoized() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 2).unwrap();

        engine.peek_best_move().unwrap();
        let evaluations = tree.evaluations();

        assert_eq!(engine.peek_best_move(), Ok(0));
        assert_eq!(tree.evaluations(), evaluations);
    }

    #[test]
    fn test_peek_without_children_fails() {
        let terminal = ExplicitTree::new(vec![]);
        let mut engine = CachedEngine::new(terminal.root(), 3).unwrap();
        assert_eq!(engine.peek_best_move(), Err(MinimaxError::NoMovesAvailable));

        let unexpanded = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(unexpanded.root(), 0).unwrap();
        assert_eq!(engine.peek_best_move(), Err(MinimaxError::NoMovesAvailable));
    }

    #[test]
    fn test_ties_go_to_the_first_child() {
        let tree = ExplicitTree::new(vec![
            Leaf::Score(4),
            Leaf::Score(-1),
            Leaf::Score(4),
            Leaf::Score(-1),
        ]);

        let mut maximizer = CachedEngine::new(tree.root(), 1).unwrap();
        assert_eq!(maximizer.peek_best_move(), Ok(0));

        let tree = tree.minimizer_first();
        let mut minimizer = CachedEngine::new(tree.root(), 1).unwrap();
        assert_eq!(minimizer.peek_best_move(), Ok(1));
    }

    #[test]
    fn test_do_move_advances_the_root() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 2).unwrap();
        let expected = tree.root().make(&2).unwrap();

        assert_eq!(engine.do_move(2), Ok(2));

        assert_eq!(engine.board(), &expected);
        assert!(!engine.maximizing_player());
        assert_eq!(engine.root().node_count(), 4);
    }

    #[test]
    fn test_do_move_clears_the_memo() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 2).unwrap();

        assert_eq!(engine.peek_best_move(), Ok(0));
        engine.do_move(1).unwrap();

        // The minimizer now picks the lowest of 2, 4 and 6
        assert_eq!(engine.peek_best_move(), Ok(0));
        engine.do_move(0).unwrap();
        assert_eq!(engine.peek_best_move(), Err(MinimaxError::NoMovesAvailable));
    }

    #[test]
    fn test_do_move_rejects_illegal_moves() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 2).unwrap();

        let err = engine.do_move(7).unwrap_err();

        assert!(matches!(err, MinimaxError::Rules(RuleError::IllegalMove(_))));
        assert!(engine.maximizing_player());
        assert_eq!(engine.root().node_count(), 13);
    }

    #[test]
    fn test_do_move_without_cached_children_is_a_desync() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 0).unwrap();

        assert_eq!(engine.do_move(0), Err(MinimaxError::CacheDesync));
    }

    #[test]
    fn test_turns_alternate_with_every_move() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = ExplicitTree::random(&mut rng, 6);
        let mut engine = CachedEngine::new(tree.root(), 6).unwrap();

        while !engine.board().is_terminal() {
            let before = engine.maximizing_player();
            engine.do_best_move().unwrap();

            assert_eq!(engine.maximizing_player(), !before);
            assert_eq!(engine.maximizing_player(), engine.board().is_maximizing());
        }
    }

    #[test]
    fn test_update_deepens_the_tree() {
        let tree = ExplicitTree::new(vec![
            Leaf::Evaluated(100, vec![Leaf::Score(-50)]),
            Leaf::Score(10),
        ]);
        let mut engine = CachedEngine::new(tree.root(), 1).unwrap();
        assert_eq!(engine.peek_best_move(), Ok(0));

        engine.update(2).unwrap();

        assert_eq!(engine.root().node_count(), 4);
        assert_eq!(engine.peek_best_move(), Ok(1));
    }

    #[test]
    fn test_update_after_a_move_restores_the_horizon() {
        let tree = ExplicitTree::textbook();
        let mut engine = CachedEngine::new(tree.root(), 1).unwrap();

        engine.do_move(0).unwrap();
        assert_eq!(engine.root().node_count(), 1);

        engine.update(1).unwrap();
        assert_eq!(engine.root().node_count(), 4);
    }

    #[test]
    fn test_random_moves_are_legal() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let tree = ExplicitTree::random(&mut rng, 5);
            let mut engine = CachedEngine::new(tree.root(), 5).unwrap();

            while !engine.board().is_terminal() {
                let before = engine.board().clone();
                let chosen = engine.do_random_move_with(&mut rng).unwrap();

                assert!(before.moves().contains(&chosen));
                assert_eq!(engine.board(), &before.make(&chosen).unwrap());
            }

            assert_eq!(
                engine.do_random_move_with(&mut rng),
                Err(MinimaxError::NoMovesAvailable)
            );
        }
    }

    #[test]
    fn test_cached_choice_matches_alpha_beta() {
        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..200 {
            let tree = ExplicitTree::random(&mut rng, 6);
            let root = tree.root();

            for depth in 1..=6 {
                let mut engine = CachedEngine::new(root.clone(), depth).unwrap();
                let pruned = AlphaBeta::new().find_best_move(depth, &root).unwrap();

                assert_eq!(engine.peek_best_move().ok(), pruned.last_move());
            }
        }
    }
}
