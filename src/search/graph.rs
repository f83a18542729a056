use super::{construct_path, not_nan, OpenEntry, SearchNode};
use crate::graph::{Graph, NodeKey, Positions};
use crate::heuristic::Heuristic;
use crate::stat::SearchStats;

use ordered_float::NotNan;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, instrument, trace};

// Geometric heuristics need both endpoints in the position table; anything
// missing degrades the estimate to zero. Feeding coordinate-free node ids to
// a geometric heuristic is a caller contract the engine does not police.
fn estimate<N: NodeKey>(
    heuristic: Heuristic,
    positions: Option<&Positions<N>>,
    node: &N,
    goal: &N,
) -> f64 {
    match positions {
        Some(table) => match (table.get(node), table.get(goal)) {
            (Some(&a), Some(&b)) => heuristic.estimate(a, b),
            _ => 0.0,
        },
        None => 0.0,
    }
}

/// A* over a weighted adjacency-list graph.
///
/// Edge costs are the stored weights; the caller guarantees they are
/// non-negative. A node id with no adjacency entry simply has zero
/// out-edges. `path_cost` is recomputed during reconstruction by looking up
/// each traversed edge in the parent's adjacency list; with parallel edges
/// of differing weights the first stored match wins.
///
/// Inadmissible heuristics may yield suboptimal paths; termination is
/// guaranteed on finite graphs regardless.
#[instrument(skip_all, name = "astar_graph", fields(start = format!("{start:?}"), goal = format!("{goal:?}"), heuristic = heuristic.name()), level = "debug")]
pub fn astar_graph<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    heuristic: Heuristic,
    positions: Option<&Positions<N>>,
    stats: &mut SearchStats,
) -> Option<Vec<N>> {
    let mut arena: Vec<SearchNode<N, NotNan<f64>>> = Vec::new();
    let mut open_list = BinaryHeap::new();
    let mut closed_list: HashSet<N> = HashSet::new();
    let mut best_open_f: HashMap<N, NotNan<f64>> = HashMap::new();

    let start_f = not_nan(estimate(heuristic, positions, start, goal));
    arena.push(SearchNode {
        state: start.clone(),
        parent: None,
        g_cost: not_nan(0.0),
    });
    open_list.push(OpenEntry {
        f_cost: start_f,
        g_cost: not_nan(0.0),
        index: 0,
    });
    best_open_f.insert(start.clone(), start_f);
    stats.frontier_peak = 1;

    while let Some(current) = open_list.pop() {
        let node = arena[current.index].state.clone();

        if closed_list.contains(&node) {
            continue;
        }
        trace!("expand node: {node:?} g={} f={}", current.g_cost, current.f_cost);

        if node == *goal {
            let path = construct_path(&arena, current.index);
            stats.nodes_expanded = closed_list.len();
            stats.path_length = path.len();
            stats.path_cost = reconstruct_cost(graph, &path);
            return Some(path);
        }

        closed_list.insert(node.clone());
        best_open_f.remove(&node);

        for (neighbor, weight) in graph.neighbors(&node) {
            if closed_list.contains(neighbor) {
                continue;
            }

            let tentative_g_cost = not_nan(current.g_cost.into_inner() + *weight);
            let h_cost = estimate(heuristic, positions, neighbor, goal);
            let f_cost = not_nan(tentative_g_cost.into_inner() + h_cost);

            if best_open_f
                .get(neighbor)
                .is_some_and(|&best| best <= f_cost)
            {
                continue;
            }

            arena.push(SearchNode {
                state: neighbor.clone(),
                parent: Some(current.index),
                g_cost: tentative_g_cost,
            });
            open_list.push(OpenEntry {
                f_cost,
                g_cost: tentative_g_cost,
                index: arena.len() - 1,
            });
            best_open_f.insert(neighbor.clone(), f_cost);
            stats.nodes_generated += 1;
            stats.frontier_peak = stats.frontier_peak.max(open_list.len());
        }
    }

    debug!("frontier exhausted without reaching goal");
    stats.nodes_expanded = closed_list.len();
    None
}

// Sum of first-match edge weights along consecutive path pairs.
fn reconstruct_cost<N: NodeKey>(graph: &Graph<N>, path: &[N]) -> f64 {
    path.windows(2)
        .map(|pair| graph.edge_weight(&pair[0], &pair[1]).unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function to setup tracing
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init();
    }

    // The direct a -> c edge is a trap; the detour through b is cheaper.
    fn triangle() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 1.0);
        graph.add_edge("b", "c", 1.0);
        graph.add_edge("a", "c", 5.0);
        graph
    }

    #[test]
    fn test_triangle_prefers_cheap_detour() {
        init_tracing();
        let graph = triangle();
        let mut stats = SearchStats::default();
        let path = astar_graph(&graph, &"a", &"c", Heuristic::Zero, None, &mut stats).unwrap();
        assert_eq!(path, vec!["a", "b", "c"]);
        assert_eq!(stats.path_cost, 2.0);
        assert_eq!(stats.path_length, 3);
    }

    #[test]
    fn test_path_cost_matches_adjacency_recomputation() {
        init_tracing();
        let mut graph = Graph::new();
        graph.add_undirected_edge(0, 1, 2.5);
        graph.add_undirected_edge(1, 2, 1.5);
        graph.add_undirected_edge(0, 3, 1.0);
        graph.add_undirected_edge(3, 2, 4.5);
        let mut stats = SearchStats::default();
        let path = astar_graph(&graph, &0, &2, Heuristic::Zero, None, &mut stats).unwrap();
        let recomputed: f64 = path
            .windows(2)
            .map(|pair| graph.edge_weight(&pair[0], &pair[1]).unwrap())
            .sum();
        assert_eq!(stats.path_cost, recomputed);
        assert_eq!(stats.path_cost, 4.0);
    }

    #[test]
    fn test_parallel_edges_cost_first_match_wins() {
        init_tracing();
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 3.0);
        graph.add_edge(0, 1, 1.0);
        let mut stats = SearchStats::default();
        let path = astar_graph(&graph, &0, &1, Heuristic::Zero, None, &mut stats).unwrap();
        assert_eq!(path, vec![0, 1]);
        // The reported cost comes from the first stored parallel edge, even
        // though a cheaper one exists.
        assert_eq!(stats.path_cost, 3.0);
    }

    #[test]
    fn test_geometric_heuristic_with_position_table() {
        init_tracing();
        let mut graph = Graph::new();
        graph.add_undirected_edge(0u32, 1, 10.0);
        graph.add_undirected_edge(1, 2, 10.0);
        graph.add_undirected_edge(0, 3, 10.0);
        graph.add_undirected_edge(3, 2, 10.0);
        let positions = Positions::from([
            (0, (0.0, 0.0)),
            (1, (1.0, 0.0)),
            (2, (2.0, 0.0)),
            (3, (0.0, 5.0)),
        ]);
        let mut stats = SearchStats::default();
        let path = astar_graph(
            &graph,
            &0,
            &2,
            Heuristic::Euclidean,
            Some(&positions),
            &mut stats,
        )
        .unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(stats.path_cost, 20.0);
        // The informed run never needs to finalize the detour node 3.
        assert!(stats.nodes_expanded <= 3);
    }

    #[test]
    fn test_start_equals_goal() {
        init_tracing();
        let graph = triangle();
        let mut stats = SearchStats::default();
        let path = astar_graph(&graph, &"a", &"a", Heuristic::Zero, None, &mut stats).unwrap();
        assert_eq!(path, vec!["a"]);
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.path_cost, 0.0);
    }

    #[test]
    fn test_unreachable_goal_returns_none_with_stats() {
        init_tracing();
        let mut graph = triangle();
        graph.add_node("island");
        let mut stats = SearchStats::default();
        let path = astar_graph(&graph, &"a", &"island", Heuristic::Zero, None, &mut stats);
        assert!(path.is_none());
        assert_eq!(stats.path_length, 0);
        // a, b, c all get finalized before the frontier empties.
        assert_eq!(stats.nodes_expanded, 3);
    }

    #[test]
    fn test_missing_adjacency_entry_is_zero_out_edges() {
        init_tracing();
        let mut graph = Graph::new();
        graph.add_edge("a", "dead-end", 1.0);
        let mut stats = SearchStats::default();
        // "dead-end" has no adjacency entry of its own; the search must
        // treat it as a sink rather than fault.
        let path = astar_graph(&graph, &"a", &"missing", Heuristic::Zero, None, &mut stats);
        assert!(path.is_none());
        assert_eq!(stats.nodes_expanded, 2);
    }

    #[test]
    fn test_zero_cost_never_exceeds_aggressive() {
        init_tracing();
        let mut graph = Graph::new();
        // Lattice with a tempting but costly shortcut.
        graph.add_undirected_edge((0, 0), (0, 1), 1.0);
        graph.add_undirected_edge((0, 1), (0, 2), 1.0);
        graph.add_undirected_edge((0, 0), (1, 0), 1.0);
        graph.add_undirected_edge((1, 0), (1, 2), 7.0);
        graph.add_undirected_edge((0, 2), (1, 2), 1.0);
        let positions: Positions<(i32, i32)> = graph
            .nodes()
            .map(|&n| (n, (n.0 as f64, n.1 as f64)))
            .collect();
        let mut zero_stats = SearchStats::default();
        astar_graph(
            &graph,
            &(0, 0),
            &(1, 2),
            Heuristic::Zero,
            Some(&positions),
            &mut zero_stats,
        )
        .unwrap();
        let mut aggressive_stats = SearchStats::default();
        astar_graph(
            &graph,
            &(0, 0),
            &(1, 2),
            Heuristic::AggressiveManhattan,
            Some(&positions),
            &mut aggressive_stats,
        )
        .unwrap();
        assert!(zero_stats.path_cost <= aggressive_stats.path_cost);
    }

    #[test]
    fn test_idempotent_over_repeated_calls() {
        init_tracing();
        let graph = triangle();
        let mut first = SearchStats::default();
        let path_a = astar_graph(&graph, &"a", &"c", Heuristic::Zero, None, &mut first).unwrap();
        let mut second = SearchStats::default();
        let path_b = astar_graph(&graph, &"a", &"c", Heuristic::Zero, None, &mut second).unwrap();
        assert_eq!(path_a, path_b);
        assert_eq!(first.path_cost, second.path_cost);
        assert_eq!(first.nodes_expanded, second.nodes_expanded);
    }
}
