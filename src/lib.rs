//! Solver for the 8-puzzle: a 3x3 sliding-tile board is brought to
//! `1 2 3 / 4 5 6 / 7 8 _` by moving the blank.
//!
//! Two searches are provided: iterative-deepening depth-limited search and A*
//! with the Manhattan-distance heuristic. Both return a shortest sequence of
//! blank moves.

pub mod astar;
pub mod board;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod iddfs;
pub mod node;
pub mod pqueue;
pub mod solvability;
pub mod solver;
pub mod stats;

pub use board::{ALL_MOVES, Board, GOAL, Move};
pub use config::Config;
pub use error::{BoardError, ConfigError, Exhaustion, IllegalMove, SearchError};
pub use heuristic::{Heuristic, ManhattanHeuristic, NullHeuristic};
pub use solver::{Algorithm, Solver};
pub use stats::Stats;

/// Blank moves from a start board to the goal, in order.
pub type MoveSequence = Vec<Move>;

/// Whether `board` can reach the goal at all.
pub fn solvability(board: &Board) -> bool {
    solvability::is_solvable(board)
}

/// Shortest solution by iterative deepening over depth bounds `0..=max_depth`.
///
/// Does not check solvability first; an unsolvable board is reported as
/// exhausted once every bound is cut off.
pub fn search_iddfs(board: &Board, max_depth: usize) -> Result<MoveSequence, SearchError> {
    iddfs::iterative_deepening(
        board,
        max_depth,
        &ManhattanHeuristic::new(),
        &mut Stats::default(),
    )
}

/// Shortest solution by A* with the default expansion cap.
pub fn search_astar(board: &Board) -> Result<MoveSequence, SearchError> {
    astar::a_star_search(
        board,
        config::DEFAULT_MAX_EXPANSIONS,
        &ManhattanHeuristic::new(),
        &mut Stats::default(),
    )
}

pub fn apply_move(board: &Board, direction: Move) -> Result<Board, IllegalMove> {
    board.apply_move(direction)
}
