use std::time::Duration;
use tracing::info;

/// Counters collected during one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    /// Largest open-set size seen by A*.
    pub max_frontier: usize,
    /// Open-set entries moved to a cheaper path by A*.
    pub relaxations: usize,
    /// Depth bounds tried by iterative deepening.
    pub iterations: usize,
    /// Highest `f` of any node A* expanded.
    pub max_f_expanded: u32,
    pub elapsed: Duration,
}

impl Stats {
    pub fn log(&self) {
        info!(
            nodes_expanded = self.nodes_expanded,
            nodes_generated = self.nodes_generated,
            max_frontier = self.max_frontier,
            relaxations = self.relaxations,
            iterations = self.iterations,
            elapsed_us = self.elapsed.as_micros() as u64,
            "search stats"
        );
    }
}
