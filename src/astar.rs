use crate::board::{Board, Move};
use crate::error::{Exhaustion, SearchError};
use crate::heuristic::Heuristic;
use crate::node::{NodeArena, NodeId};
use crate::pqueue::PriorityQueue;
use crate::stats::Stats;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// A* from `start`, giving up after `max_expansions` expansions.
///
/// The open set holds at most one entry per board. When a cheaper path to a
/// queued board turns up, its node is relaxed in place (new `g`, parent and
/// move) and its priority lowered. Expanded boards go to the closed set and
/// are never reopened, which is sound for a consistent heuristic.
#[instrument(skip_all, name = "a_star", fields(start = ?start.cells(), max_expansions = max_expansions), level = "debug")]
pub fn a_star_search<H: Heuristic>(
    start: &Board,
    max_expansions: usize,
    heuristic: &H,
    stats: &mut Stats,
) -> Result<Vec<Move>, SearchError> {
    let mut arena = NodeArena::new();
    let mut open_list: PriorityQueue<Board, NodeId> = PriorityQueue::new();
    let mut closed_list: HashSet<Board> = HashSet::new();

    let root = arena.root(*start, heuristic)?;
    open_list
        .push(*start, arena.get(root).f(), root)
        .map_err(|_| SearchError::OutOfMemory)?;
    stats.max_frontier = stats.max_frontier.max(open_list.len());

    while let Some((board, current, f_cost)) = open_list.pop_min() {
        let g_cost = arena.get(current).g;
        trace!(f_cost, g_cost, "pop");

        if board.is_goal() {
            debug!(cost = g_cost, expanded = stats.nodes_expanded, "solved");
            return Ok(arena.solution(current));
        }

        if stats.nodes_expanded >= max_expansions {
            debug!(limit = max_expansions, "expansion cap reached");
            return Err(SearchError::Exhausted(Exhaustion::ExpansionCap {
                limit: max_expansions,
            }));
        }
        stats.nodes_expanded += 1;
        stats.max_f_expanded = stats.max_f_expanded.max(f_cost);

        closed_list
            .try_reserve(1)
            .map_err(|_| SearchError::OutOfMemory)?;
        closed_list.insert(board);

        let tentative_g_cost = g_cost + 1;
        for direction in board.legal_moves() {
            let Ok(next) = board.apply_move(direction) else {
                continue;
            };
            stats.nodes_generated += 1;

            if closed_list.contains(&next) {
                continue;
            }

            if let Some((&existing, _)) = open_list.get(&next) {
                if tentative_g_cost < arena.get(existing).g {
                    let node = arena.get_mut(existing);
                    node.g = tentative_g_cost;
                    node.parent = Some(current);
                    node.action = Some(direction);
                    let f_cost = node.f();
                    open_list.decrease_priority(&next, f_cost);
                    stats.relaxations += 1;
                    trace!(f_cost, "relaxed open node");
                }
                continue;
            }

            if let Some(child) = arena.child(current, direction, heuristic)? {
                open_list
                    .push(next, arena.get(child).f(), child)
                    .map_err(|_| SearchError::OutOfMemory)?;
            }
        }
        stats.max_frontier = stats.max_frontier.max(open_list.len());
    }

    debug!(expanded = stats.nodes_expanded, "open list exhausted");
    Err(SearchError::Exhausted(Exhaustion::SpaceExhausted))
}
