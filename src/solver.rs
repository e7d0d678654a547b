use crate::astar::a_star_search;
use crate::board::{Board, Move};
use crate::config::Config;
use crate::error::{ConfigError, SearchError};
use crate::heuristic::Heuristic;
use crate::iddfs::iterative_deepening;
use crate::solvability::is_solvable;
use crate::stats::Stats;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Iterative-deepening depth-limited search.
    Iddfs,
    AStar,
}

/// Checks solvability, then runs one of the search algorithms and keeps the
/// statistics of the last run.
pub struct Solver<H: Heuristic> {
    config: Config,
    heuristic: H,
    stats: Stats,
}

impl<H: Heuristic> Solver<H> {
    pub fn new(config: Config, heuristic: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Solver {
            config,
            heuristic,
            stats: Stats::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Statistics of the most recent [`Solver::solve`] call.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Solve `board` with `algorithm`. Unsolvable boards are rejected before
    /// any node is expanded.
    pub fn solve(&mut self, board: &Board, algorithm: Algorithm) -> Result<Vec<Move>, SearchError> {
        self.stats = Stats::default();

        if !is_solvable(board) {
            warn!("board fails the parity check, not searching");
            return Err(SearchError::Unsolvable);
        }

        let start = Instant::now();
        let result = match algorithm {
            Algorithm::Iddfs => iterative_deepening(
                board,
                self.config.max_depth,
                &self.heuristic,
                &mut self.stats,
            ),
            Algorithm::AStar => a_star_search(
                board,
                self.config.max_expansions,
                &self.heuristic,
                &mut self.stats,
            ),
        };
        self.stats.elapsed = start.elapsed();

        match &result {
            Ok(moves) => info!(?algorithm, steps = moves.len(), "solved"),
            Err(err) => info!(?algorithm, %err, "not solved"),
        }
        self.stats.log();
        result
    }
}
