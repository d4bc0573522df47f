use itertools::Itertools;
use text_trees::StringTreeNode;

use crate::{GameBoard, MinimaxError};

#[derive(Debug, Clone)]
/// One position in the cached search tree
///
/// A node owns its board and its children, in move generation order. A node without children is
/// either terminal or has not been expanded yet, only the board can tell the two apart.
pub struct SearchNode<BoardType> {
    board: BoardType,
    children: Vec<SearchNode<BoardType>>,
}

impl<BoardType> SearchNode<BoardType> {
    /// Wrap a board in an unexpanded node
    pub fn new(board: BoardType) -> Self {
        Self {
            board,
            children: vec![],
        }
    }

    /// The position this node stands for
    pub fn board(&self) -> &BoardType {
        &self.board
    }

    /// The children generated so far
    pub fn children(&self) -> &[SearchNode<BoardType>] {
        &self.children
    }

    /// Take the child at `index` out of this node, dropping every sibling subtree
    pub fn into_child(self, index: usize) -> Option<Self> {
        self.children.into_iter().nth(index)
    }

    /// Unwrap the board, dropping the subtree
    pub fn into_board(self) -> BoardType {
        self.board
    }

    /// How many nodes are materialized in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

impl<BoardType: GameBoard> SearchNode<BoardType> {
    fn generate_children(&mut self) -> Result<(), MinimaxError> {
        if !self.children.is_empty() {
            return Ok(());
        }

        self.children = self
            .board
            .children()?
            .into_iter()
            .map(SearchNode::new)
            .collect_vec();

        Ok(())
    }

    /// Make sure the tree below this node reaches `depth` plies
    ///
    /// Children are only generated where none exist yet. Existing children are still visited so
    /// an already expanded tree gets deepened rather than rebuilt.
    pub fn expand_to(&mut self, depth: usize) -> Result<(), MinimaxError> {
        if depth == 0 {
            return Ok(());
        }

        self.generate_children()?;
        for child in &mut self.children {
            child.expand_to(depth - 1)?;
        }

        Ok(())
    }

    /// Push the frontier of an already built tree deeper
    ///
    /// With a depth of 1 this node generates its own children and stops there. With a larger
    /// depth this node's children are left as they are and each existing child is expanded to
    /// `depth - 1` instead.
    pub fn extend_horizon(&mut self, depth: usize) -> Result<(), MinimaxError> {
        match depth {
            0 => Ok(()),
            1 => self.generate_children(),
            _ => {
                for child in &mut self.children {
                    child.expand_to(depth - 1)?;
                }

                Ok(())
            }
        }
    }

    /// Unpruned minimax over the materialized subtree
    ///
    /// `for_maximizer` says whether this node is a maximizing ply. Nodes without children are
    /// scored with the board's own evaluation.
    pub fn full_minimax_score(&self, for_maximizer: bool) -> BoardType::Score {
        let scores = self
            .children
            .iter()
            .map(|child| child.full_minimax_score(!for_maximizer));

        let chosen = if for_maximizer {
            scores.max()
        } else {
            scores.min()
        };

        chosen.unwrap_or_else(|| self.board.evaluate())
    }

    /// This returns a visual representation of the materialized tree
    /// It shows the move leading to each node and the minimax score of that node
    pub fn to_text_tree(&self, for_maximizer: bool) -> String {
        format!("{}", self.to_text_tree_node(for_maximizer))
    }

    fn to_text_tree_node(&self, for_maximizer: bool) -> StringTreeNode {
        let label = match self.board.last_move() {
            Some(m) => format!("{:?} {:?}", m, self.full_minimax_score(for_maximizer)),
            None => format!("root {:?}", self.full_minimax_score(for_maximizer)),
        };

        let mut node = StringTreeNode::new(label);
        for child in &self.children {
            node.push_node(child.to_text_tree_node(!for_maximizer));
        }

        node
    }
}
