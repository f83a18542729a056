use super::{construct_path, SearchNode};
use crate::graph::{Graph, NodeKey};
use crate::stat::SearchStats;

use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument};

/// Breadth-first search over the graph, edge weights ignored.
///
/// Nodes are marked visited at discovery (enqueue) time, so each node is
/// enqueued at most once and the returned path has the minimum edge count on
/// unweighted reachability. That does NOT minimize weighted cost; callers
/// wanting weighted shortest paths belong with the A* engines.
/// `nodes_expanded` reports the visited-set size at termination, matching
/// the discovery-time convention.
#[instrument(skip_all, name = "bfs", fields(start = format!("{start:?}"), goal = format!("{goal:?}")), level = "debug")]
pub fn bfs<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    stats: &mut SearchStats,
) -> Option<Vec<N>> {
    let mut arena: Vec<SearchNode<N, usize>> = Vec::new();
    let mut queue = VecDeque::new();
    let mut visited: HashSet<N> = HashSet::new();

    arena.push(SearchNode {
        state: start.clone(),
        parent: None,
        g_cost: 0,
    });
    visited.insert(start.clone());
    queue.push_back(0);
    stats.frontier_peak = 1;

    while let Some(index) = queue.pop_front() {
        let current = arena[index].state.clone();

        if current == *goal {
            let path = construct_path(&arena, index);
            stats.nodes_expanded = visited.len();
            stats.path_length = path.len();
            return Some(path);
        }

        for (neighbor, _) in graph.neighbors(&current) {
            if visited.insert(neighbor.clone()) {
                arena.push(SearchNode {
                    state: neighbor.clone(),
                    parent: Some(index),
                    g_cost: arena[index].g_cost + 1,
                });
                queue.push_back(arena.len() - 1);
                stats.nodes_generated += 1;
                stats.frontier_peak = stats.frontier_peak.max(queue.len());
            }
        }
    }

    debug!("queue exhausted without reaching goal");
    stats.nodes_expanded = visited.len();
    None
}

/// Depth-first search over the graph, edge weights ignored.
///
/// Nodes are marked visited at expansion time, so the same node may sit on
/// the stack several times before its first expansion; `nodes_expanded`
/// still counts true first expansions only. The asymmetry with [`bfs`] is
/// deliberate and observable in the stats. No optimality guarantee of any
/// kind.
#[instrument(skip_all, name = "dfs", fields(start = format!("{start:?}"), goal = format!("{goal:?}")), level = "debug")]
pub fn dfs<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    stats: &mut SearchStats,
) -> Option<Vec<N>> {
    let mut arena: Vec<SearchNode<N, usize>> = Vec::new();
    let mut stack = Vec::new();
    let mut visited: HashSet<N> = HashSet::new();

    arena.push(SearchNode {
        state: start.clone(),
        parent: None,
        g_cost: 0,
    });
    stack.push(0);
    stats.frontier_peak = 1;

    while let Some(index) = stack.pop() {
        let current = arena[index].state.clone();

        if current == *goal {
            let path = construct_path(&arena, index);
            stats.nodes_expanded = visited.len();
            stats.path_length = path.len();
            return Some(path);
        }

        if visited.insert(current.clone()) {
            for (neighbor, _) in graph.neighbors(&current) {
                if !visited.contains(neighbor) {
                    arena.push(SearchNode {
                        state: neighbor.clone(),
                        parent: Some(index),
                        g_cost: arena[index].g_cost + 1,
                    });
                    stack.push(arena.len() - 1);
                    stats.nodes_generated += 1;
                    stats.frontier_peak = stats.frontier_peak.max(stack.len());
                }
            }
        }
    }

    debug!("stack exhausted without reaching goal");
    stats.nodes_expanded = visited.len();
    None
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

    fn diamond() -> Graph<u32> {
        // 0 -> {1, 2}, 1 -> 3, 2 -> 3, plus a long tail 0 -> 4 -> 5 -> 3.
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(0, 2, 1.0);
        graph.add_edge(1, 3, 1.0);
        graph.add_edge(2, 3, 1.0);
        graph.add_edge(0, 4, 1.0);
        graph.add_edge(4, 5, 1.0);
        graph.add_edge(5, 3, 1.0);
        graph
    }

    // Every simple path between two nodes, found by exhaustive enumeration.
    fn all_simple_path_lengths(graph: &Graph<u32>, start: u32, goal: u32) -> Vec<usize> {
        fn recurse(
            graph: &Graph<u32>,
            current: u32,
            goal: u32,
            seen: &mut Vec<u32>,
            found: &mut Vec<usize>,
        ) {
            if current == goal {
                found.push(seen.len());
                return;
            }
            for (neighbor, _) in graph.neighbors(&current) {
                if !seen.contains(neighbor) {
                    seen.push(*neighbor);
                    recurse(graph, *neighbor, goal, seen, found);
                    seen.pop();
                }
            }
        }
        let mut found = Vec::new();
        recurse(graph, start, goal, &mut vec![start], &mut found);
        found
    }

    #[test]
    fn test_bfs_finds_minimum_edge_count_path() {
        init_tracing();
        let graph = diamond();
        let mut stats = SearchStats::default();
        let path = bfs(&graph, &0, &3, &mut stats).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(stats.path_length, 3);
        let minimum = all_simple_path_lengths(&graph, 0, 3)
            .into_iter()
            .min()
            .unwrap();
        assert_eq!(path.len(), minimum);
    }

    #[test]
    fn test_dfs_reaches_goal_without_optimality() {
        init_tracing();
        let graph = diamond();
        let mut stats = SearchStats::default();
        let path = dfs(&graph, &0, &3, &mut stats).unwrap();
        assert_eq!(*path.first().unwrap(), 0);
        assert_eq!(*path.last().unwrap(), 3);
        // Consecutive pairs must be real edges.
        for pair in path.windows(2) {
            assert!(graph.edge_weight(&pair[0], &pair[1]).is_some());
        }
    }

    #[test]
    fn test_visited_marking_asymmetry() {
        init_tracing();
        // A line 0 - 1 - 2 with the goal off to the side; BFS counts
        // discoveries, DFS counts expansions, so the totals differ.
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(0, 2, 1.0);
        graph.add_edge(1, 3, 1.0);

        let mut bfs_stats = SearchStats::default();
        bfs(&graph, &0, &3, &mut bfs_stats).unwrap();
        // BFS discovered 0, 1, 2, 3 by the time the goal is dequeued.
        assert_eq!(bfs_stats.nodes_expanded, 4);

        let mut dfs_stats = SearchStats::default();
        dfs(&graph, &0, &3, &mut dfs_stats).unwrap();
        // DFS expanded 0, 2, 1 before popping the goal; the goal itself is
        // never marked.
        assert_eq!(dfs_stats.nodes_expanded, 3);
    }

    #[test]
    fn test_start_equals_goal() {
        init_tracing();
        let graph = diamond();

        let mut bfs_stats = SearchStats::default();
        let path = bfs(&graph, &0, &0, &mut bfs_stats).unwrap();
        assert_eq!(path, vec![0]);
        // Discovery-time marking counts the start itself.
        assert_eq!(bfs_stats.nodes_expanded, 1);

        let mut dfs_stats = SearchStats::default();
        let path = dfs(&graph, &0, &0, &mut dfs_stats).unwrap();
        assert_eq!(path, vec![0]);
        assert_eq!(dfs_stats.nodes_expanded, 0);
    }

    #[test]
    fn test_failure_covers_reachable_component() {
        init_tracing();
        let mut graph = diamond();
        graph.add_node(99);
        let mut stats = SearchStats::default();
        assert!(bfs(&graph, &0, &99, &mut stats).is_none());
        assert_eq!(stats.nodes_expanded, 6);
        assert_eq!(stats.path_length, 0);

        let mut stats = SearchStats::default();
        assert!(dfs(&graph, &0, &99, &mut stats).is_none());
        assert_eq!(stats.nodes_expanded, 6);
    }

    #[test]
    fn test_zero_astar_matches_bfs_on_uniform_costs() {
        init_tracing();
        let graph = diamond();
        let mut astar_stats = SearchStats::default();
        let astar_path = crate::search::astar_graph(
            &graph,
            &0,
            &3,
            crate::heuristic::Heuristic::Zero,
            None,
            &mut astar_stats,
        )
        .unwrap();
        let mut bfs_stats = SearchStats::default();
        let bfs_path = bfs(&graph, &0, &3, &mut bfs_stats).unwrap();
        // All edges weigh 1, so the uniform-cost optimum is the minimum
        // edge-count path BFS finds.
        assert_eq!(astar_path.len(), bfs_path.len());
        assert_eq!(astar_stats.path_cost, (bfs_path.len() - 1) as f64);
    }

    #[test]
    fn test_bfs_ignores_weights() {
        init_tracing();
        // The two-hop route is heavy, the direct edge light; BFS must still
        // take the direct edge.
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 0.1);
        graph.add_edge(1, 2, 0.1);
        graph.add_edge(0, 2, 100.0);
        let mut stats = SearchStats::default();
        let path = bfs(&graph, &0, &2, &mut stats).unwrap();
        assert_eq!(path, vec![0, 2]);
    }
}
