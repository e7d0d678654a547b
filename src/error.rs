use crate::board::Move;
use thiserror::Error;

/// Error type for board construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 9 cells, found {0}")]
    CellCount(usize),
    #[error("invalid character {0:?} in board")]
    InvalidChar(char),
    #[error("tile {0} is out of range 0..=8")]
    TileOutOfRange(u8),
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

/// A move that would push the blank off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move blank {direction} from {blank:?}")]
pub struct IllegalMove {
    pub direction: Move,
    pub blank: (usize, usize),
}

/// Why a search gave up without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// Every reachable node was explored.
    SpaceExhausted,
    /// A* expanded `limit` nodes without popping the goal.
    ExpansionCap { limit: usize },
    /// Every depth up to `max_depth` was cut off.
    DepthLimit { max_depth: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("puzzle is not solvable")]
    Unsolvable,
    #[error("no solution found ({0:?})")]
    Exhausted(Exhaustion),
    #[error("out of memory while growing search state")]
    OutOfMemory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max expansions must be at least 1")]
    ZeroExpansions,
    #[error("max depth {0} exceeds the supported bound of {1}")]
    DepthTooLarge(usize, usize),
}
