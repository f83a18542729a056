use super::{construct_path, not_nan, OpenEntry, SearchNode};
use crate::grid::{Grid, Position};
use crate::heuristic::{Heuristic, Point};
use crate::stat::SearchStats;

use anyhow::ensure;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, instrument, trace};

fn cell_point(position: Position) -> Point {
    (position.0 as f64, position.1 as f64)
}

/// A* over a 2-D occupancy grid with 4-directional unit-cost movement.
///
/// Returns `Ok(None)` when the goal is unreachable; `stats` then describes
/// the fully explored region. Fails fast when start or goal is out of bounds
/// or blocked. Ties on f are broken towards the lower g, then towards the
/// earlier frontier insertion.
///
/// With an inadmissible heuristic (`AggressiveManhattan`) the returned path
/// may be suboptimal; the engine never validates admissibility.
#[instrument(skip_all, name = "astar_grid", fields(start = format!("{start:?}"), goal = format!("{goal:?}"), heuristic = heuristic.name()), level = "debug")]
pub fn astar_grid(
    grid: &Grid,
    start: Position,
    goal: Position,
    heuristic: Heuristic,
    stats: &mut SearchStats,
) -> anyhow::Result<Option<Vec<Position>>> {
    ensure!(grid.in_bounds(start), "start {start:?} is out of bounds");
    ensure!(grid.in_bounds(goal), "goal {goal:?} is out of bounds");
    ensure!(grid.is_free(start), "start {start:?} is blocked");
    ensure!(grid.is_free(goal), "goal {goal:?} is blocked");

    let mut arena: Vec<SearchNode<Position, usize>> = Vec::new();
    let mut open_list = BinaryHeap::new();
    let mut closed_list: HashSet<Position> = HashSet::new();
    // Lowest f currently on the frontier per position; stands in for the
    // linear frontier scan with identical accept/reject outcomes.
    let mut best_open_f = HashMap::new();

    let goal_point = cell_point(goal);
    let start_f = not_nan(heuristic.estimate(cell_point(start), goal_point));
    arena.push(SearchNode {
        state: start,
        parent: None,
        g_cost: 0,
    });
    open_list.push(OpenEntry {
        f_cost: start_f,
        g_cost: 0usize,
        index: 0,
    });
    best_open_f.insert(start, start_f);
    stats.frontier_peak = 1;

    while let Some(current) = open_list.pop() {
        let position = arena[current.index].state;

        // Stale frontier duplicate of an already finalized position.
        if closed_list.contains(&position) {
            continue;
        }
        trace!("expand node: {position:?} g={} f={}", current.g_cost, current.f_cost);

        if position == goal {
            let path = construct_path(&arena, current.index);
            stats.nodes_expanded = closed_list.len();
            stats.path_length = path.len();
            return Ok(Some(path));
        }

        closed_list.insert(position);
        best_open_f.remove(&position);

        // Uniform cost, one per 4-directional step.
        let tentative_g_cost = current.g_cost + 1;

        for neighbor in grid.neighbors(position) {
            if closed_list.contains(&neighbor) {
                continue;
            }

            let h_cost = heuristic.estimate(cell_point(neighbor), goal_point);
            let f_cost = not_nan(tentative_g_cost as f64 + h_cost);

            // A frontier entry at the same position with f <= the candidate
            // wins; otherwise both coexist until one is finalized.
            if best_open_f
                .get(&neighbor)
                .is_some_and(|&best| best <= f_cost)
            {
                continue;
            }

            arena.push(SearchNode {
                state: neighbor,
                parent: Some(current.index),
                g_cost: tentative_g_cost,
            });
            open_list.push(OpenEntry {
                f_cost,
                g_cost: tentative_g_cost,
                index: arena.len() - 1,
            });
            best_open_f.insert(neighbor, f_cost);
            stats.nodes_generated += 1;
            stats.frontier_peak = stats.frontier_peak.max(open_list.len());
        }
    }

    debug!("frontier exhausted without reaching goal");
    stats.nodes_expanded = closed_list.len();
    Ok(None)
}
