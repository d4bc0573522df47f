//! Boards over hand-written or randomly generated trees, for exercising the engines without a
//! real game

use std::{cell::Cell, rc::Rc};

use rand::{rngs::StdRng, Rng};

use crate::{GameBoard, RuleError};

#[derive(Debug, Clone)]
pub(crate) enum Leaf {
    /// A terminal position
    Score(i32),
    /// An interior position that evaluates to 0
    Node(Vec<Leaf>),
    /// An interior position with its own static evaluation
    Evaluated(i32, Vec<Leaf>),
}

impl Leaf {
    fn children(&self) -> &[Leaf] {
        match self {
            Leaf::Score(_) => &[],
            Leaf::Node(children) | Leaf::Evaluated(_, children) => children,
        }
    }

    fn random(rng: &mut StdRng, depth: usize) -> Self {
        let value = rng.gen_range(-20..=20);

        if depth == 0 || rng.gen_bool(0.15) {
            return Leaf::Score(value);
        }

        let width = rng.gen_range(1..=4);
        let children = (0..width).map(|_| Leaf::random(rng, depth - 1)).collect();

        Leaf::Evaluated(value, children)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ExplicitTree {
    root: Rc<Leaf>,
    maximizer_first: bool,
    evaluations: Rc<Cell<usize>>,
}

impl ExplicitTree {
    pub(crate) fn new(children: Vec<Leaf>) -> Self {
        Self {
            root: Rc::new(Leaf::Node(children)),
            maximizer_first: true,
            evaluations: Rc::new(Cell::new(0)),
        }
    }

    /// The usual lecture example, worth 3 to the maximizer through its first child
    pub(crate) fn textbook() -> Self {
        let min_node = |scores: [i32; 3]| Leaf::Node(scores.iter().map(|s| Leaf::Score(*s)).collect());

        Self::new(vec![
            min_node([3, 12, 8]),
            min_node([2, 4, 6]),
            min_node([14, 5, 2]),
        ])
    }

    pub(crate) fn random(rng: &mut StdRng, depth: usize) -> Self {
        let width = rng.gen_range(2..=4);
        let children = (0..width).map(|_| Leaf::random(rng, depth - 1)).collect();

        Self {
            maximizer_first: rng.gen_bool(0.5),
            ..Self::new(children)
        }
    }

    pub(crate) fn minimizer_first(self) -> Self {
        Self {
            maximizer_first: false,
            ..self
        }
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations.get()
    }

    pub(crate) fn root(&self) -> TreeBoard {
        TreeBoard {
            tree: self.root.clone(),
            path: vec![],
            maximizing: self.maximizer_first,
            evaluations: self.evaluations.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TreeBoard {
    tree: Rc<Leaf>,
    path: Vec<usize>,
    maximizing: bool,
    evaluations: Rc<Cell<usize>>,
}

impl TreeBoard {
    fn leaf(&self) -> &Leaf {
        self.path
            .iter()
            .fold(self.tree.as_ref(), |leaf, index| &leaf.children()[*index])
    }
}

impl PartialEq for TreeBoard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.path == other.path
    }
}

impl GameBoard for TreeBoard {
    type Move = usize;
    type Score = i32;

    fn evaluate(&self) -> i32 {
        self.evaluations.set(self.evaluations.get() + 1);

        match self.leaf() {
            Leaf::Score(score) | Leaf::Evaluated(score, _) => *score,
            Leaf::Node(_) => 0,
        }
    }

    fn moves(&self) -> Vec<usize> {
        (0..self.leaf().children().len()).collect()
    }

    fn make(&self, game_move: &usize) -> Result<Self, RuleError> {
        if *game_move >= self.leaf().children().len() {
            return Err(RuleError::IllegalMove(format!("no branch {}", game_move)));
        }

        let mut path = self.path.clone();
        path.push(*game_move);

        Ok(Self {
            tree: self.tree.clone(),
            path,
            maximizing: !self.maximizing,
            evaluations: self.evaluations.clone(),
        })
    }

    fn is_maximizing(&self) -> bool {
        self.maximizing
    }

    fn last_move(&self) -> Option<usize> {
        self.path.last().copied()
    }
}
