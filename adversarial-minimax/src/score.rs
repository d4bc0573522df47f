use std::{cmp::Reverse, fmt::Debug};

use decorum::{Infinite, N32, N64};

/// Anything the search can compare and propagate up the tree
///
/// The two limits are functions of the type alone since they seed the alpha-beta window before
/// any board exists. No board may ever evaluate to either of them.
pub trait GameScore: Ord + Copy + Debug {
    /// A value strictly greater than any evaluation, a certain win for the maximizer
    fn sup_limit() -> Self;

    /// A value strictly less than any evaluation, a certain win for the minimizer
    fn inf_limit() -> Self;
}

macro_rules! impl_game_score_for_integers {
    ($($t:ty),*) => {
        $(
            impl GameScore for $t {
                fn sup_limit() -> Self {
                    <$t>::MAX
                }

                fn inf_limit() -> Self {
                    <$t>::MIN
                }
            }
        )*
    };
}

impl_game_score_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl GameScore for N64 {
    fn sup_limit() -> Self {
        N64::INFINITY
    }

    fn inf_limit() -> Self {
        N64::NEG_INFINITY
    }
}

impl GameScore for N32 {
    fn sup_limit() -> Self {
        N32::INFINITY
    }

    fn inf_limit() -> Self {
        N32::NEG_INFINITY
    }
}

/// An evaluation that knows about finished games
///
/// A game that ended is ranked by who won, and how many plies into the game that happened,
/// before any heuristic value is consulted. Seen from the maximizer:
/// `Lose(_) < Scored(_) < Win(_)`.
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Copy)]
pub enum WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// The minimizer won after this many plies, a later loss ranks higher
    Lose(i64),
    /// The game is still open, ranked by the board's heuristic
    Scored(ScoreType),
    /// The maximizer won after this many plies, a sooner win ranks higher
    Win(Reverse<i64>),
}

impl<ScoreType> WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// A win at ply `i64::MIN`, which no real game reaches since ply counts are never negative
    pub fn best_possible_score() -> Self {
        WrappedScore::Win(Reverse(i64::MIN))
    }

    /// A loss at ply `i64::MIN`, ranked below every loss a real game can produce
    pub fn worst_possible_score() -> Self {
        WrappedScore::Lose(i64::MIN)
    }

    /// The ply the game ended at, `None` while it is still open
    pub fn terminal_depth(&self) -> Option<i64> {
        match *self {
            Self::Win(Reverse(plies)) | Self::Lose(plies) => Some(plies),
            Self::Scored(_) => None,
        }
    }
}

impl<ScoreType> GameScore for WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    fn sup_limit() -> Self {
        Self::best_possible_score()
    }

    fn inf_limit() -> Self {
        Self::worst_possible_score()
    }
}
