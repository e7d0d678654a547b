use crate::board::{Board, Move};
use crate::error::{Exhaustion, SearchError};
use crate::heuristic::Heuristic;
use crate::node::{NodeArena, NodeId};
use crate::stats::Stats;
use tracing::{debug, instrument, trace};

/// Outcome of one depth-limited search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(NodeId),
    /// Some branch ran out of depth budget.
    Cutoff,
    /// The subtree was fully explored without reaching the goal.
    Failure,
}

/// Recursive depth-limited search from `node` with `budget` moves left.
///
/// Returns the first goal found in `Up, Down, Left, Right` order, which is
/// not necessarily the shallowest. Nodes of fully explored branches are
/// released before returning; on `Solved` the path to the goal stays in the
/// arena.
pub fn depth_limited_search<H: Heuristic>(
    arena: &mut NodeArena,
    node: NodeId,
    budget: usize,
    heuristic: &H,
    stats: &mut Stats,
) -> Result<SearchOutcome, SearchError> {
    if arena.get(node).board.is_goal() {
        return Ok(SearchOutcome::Solved(node));
    }
    if budget == 0 {
        return Ok(SearchOutcome::Cutoff);
    }

    stats.nodes_expanded += 1;
    let mark = arena.len();
    let children = arena.expand(node, heuristic)?;
    let children_end = arena.len();
    stats.nodes_generated += children.len();

    // Undoing the previous move can never be part of a shallowest solution
    let undo = arena.get(node).action.map(|direction| direction.opposite());

    let mut cutoff = false;
    for child in children {
        if arena.get(child).action == undo {
            continue;
        }
        match depth_limited_search(arena, child, budget - 1, heuristic, stats)? {
            SearchOutcome::Solved(goal) => return Ok(SearchOutcome::Solved(goal)),
            SearchOutcome::Cutoff => cutoff = true,
            SearchOutcome::Failure => {}
        }
        arena.truncate(children_end);
    }

    arena.truncate(mark);
    if cutoff {
        Ok(SearchOutcome::Cutoff)
    } else {
        Ok(SearchOutcome::Failure)
    }
}

/// Run depth-limited search with bounds `0, 1, ..., max_depth` and return the
/// moves of the first solution found, which is a shortest one.
#[instrument(skip_all, name = "iddfs", fields(max_depth = max_depth), level = "debug")]
pub fn iterative_deepening<H: Heuristic>(
    start: &Board,
    max_depth: usize,
    heuristic: &H,
    stats: &mut Stats,
) -> Result<Vec<Move>, SearchError> {
    for budget in 0..=max_depth {
        stats.iterations += 1;
        let mut arena = NodeArena::new();
        let root = arena.root(*start, heuristic)?;

        match depth_limited_search(&mut arena, root, budget, heuristic, stats)? {
            SearchOutcome::Solved(goal) => {
                let moves = arena.solution(goal);
                debug!(depth = budget, expanded = stats.nodes_expanded, "solved");
                return Ok(moves);
            }
            SearchOutcome::Failure => {
                debug!(depth = budget, "search space exhausted");
                return Err(SearchError::Exhausted(Exhaustion::SpaceExhausted));
            }
            SearchOutcome::Cutoff => {
                trace!(depth = budget, expanded = stats.nodes_expanded, "cutoff");
            }
        }
    }

    debug!("no solution within depth bound");
    Err(SearchError::Exhausted(Exhaustion::DepthLimit { max_depth }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GOAL;
    use crate::heuristic::ManhattanHeuristic;

    fn moves(text: &str) -> Vec<Move> {
        text.chars().filter_map(Move::from_char).collect()
    }

    fn solve(text: &str, max_depth: usize) -> (Result<Vec<Move>, SearchError>, Stats) {
        let board = Board::from_text(text).unwrap();
        let mut stats = Stats::default();
        let result = iterative_deepening(&board, max_depth, &ManhattanHeuristic::new(), &mut stats);
        (result, stats)
    }

    #[test]
    fn test_solve_already_solved() {
        let (result, stats) = solve("123456780", 31);
        assert_eq!(result.unwrap(), Vec::<Move>::new());
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.iterations, 1);
    }

    #[test]
    fn test_solve_one_move() {
        let (result, stats) = solve("123456708", 31);
        assert_eq!(result.unwrap(), vec![Move::Right]);
        assert_eq!(stats.iterations, 2);
    }

    #[test]
    fn test_solve_simple() {
        let (result, _) = solve("413726580", 31);
        let solution = result.unwrap();
        assert_eq!(solution, moves("LLUURDDR"));

        let board = Board::from_text("413726580").unwrap();
        assert_eq!(board.apply_moves(&solution).unwrap(), GOAL);
    }

    #[test]
    fn test_first_solution_follows_move_order() {
        let cases = [
            ("123576408", "ULDRR"),
            ("130724586", "LDRDLLURDR"),
            ("137526480", "UULDRDLULDRR"),
            ("150463278", "DLULDDRULURDDR"),
            ("156734820", "UULDDRUULDDLURRD"),
            ("215736840", "ULDLURURDDLLURULDDRR"),
        ];
        for (start, expected) in cases {
            let (result, stats) = solve(start, 31);
            assert_eq!(result.unwrap(), moves(expected), "start {start}");
            assert_eq!(stats.iterations, expected.len() + 1);
        }
    }

    #[test]
    fn test_depth_limit() {
        let (result, stats) = solve("413726580", 5);
        assert_eq!(
            result,
            Err(SearchError::Exhausted(Exhaustion::DepthLimit { max_depth: 5 }))
        );
        assert_eq!(stats.iterations, 6);
    }

    #[test]
    fn test_unsolvable_terminates_with_small_bound() {
        let (result, _) = solve("123456870", 10);
        assert_eq!(
            result,
            Err(SearchError::Exhausted(Exhaustion::DepthLimit { max_depth: 10 }))
        );
    }

    #[test]
    fn test_cutoff_releases_nodes() {
        let heuristic = ManhattanHeuristic::new();
        let mut arena = NodeArena::new();
        let root = arena
            .root(Board::from_text("413726580").unwrap(), &heuristic)
            .unwrap();
        let mut stats = Stats::default();

        let outcome = depth_limited_search(&mut arena, root, 6, &heuristic, &mut stats).unwrap();
        assert_eq!(outcome, SearchOutcome::Cutoff);
        assert_eq!(arena.len(), 1);
        assert!(stats.nodes_expanded > 0);
    }

    #[test]
    fn test_solved_keeps_path() {
        let heuristic = ManhattanHeuristic::new();
        let mut arena = NodeArena::new();
        let root = arena
            .root(Board::from_text("413726580").unwrap(), &heuristic)
            .unwrap();
        let mut stats = Stats::default();

        let outcome = depth_limited_search(&mut arena, root, 8, &heuristic, &mut stats).unwrap();
        let SearchOutcome::Solved(goal) = outcome else {
            panic!("expected a solution, got {outcome:?}");
        };
        assert!(arena.get(goal).board.is_goal());
        assert_eq!(arena.get(goal).g, 8);
        assert_eq!(arena.solution(goal), moves("LLUURDDR"));
    }

    #[test]
    fn test_budget_larger_than_optimal() {
        // Optimal is two moves, but a loose bound returns the first goal in
        // move order
        let heuristic = ManhattanHeuristic::new();
        let mut arena = NodeArena::new();
        let start = Board::from_text("123405786").unwrap();
        let root = arena.root(start, &heuristic).unwrap();
        let mut stats = Stats::default();

        let outcome = depth_limited_search(&mut arena, root, 10, &heuristic, &mut stats).unwrap();
        let SearchOutcome::Solved(goal) = outcome else {
            panic!("expected a solution, got {outcome:?}");
        };
        assert_eq!(arena.solution(goal), moves("DRULDRULDR"));

        let (result, _) = solve("123405786", 31);
        assert_eq!(result.unwrap(), moves("RD"));
    }
}
