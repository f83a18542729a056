//! Random instance generation for the experiment sweeps. Grids and graphs
//! come out immutable; the engines only ever read them.

use rand::Rng;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::{Graph, NodeKey, Positions};
use crate::search::not_nan;

/// 4-connected grid graph, nodes numbered row-major. Each edge survives
/// with probability `1 - remove_edge_prob`, so the result may be
/// disconnected. Surviving edges get uniform weights in 1..=10 when
/// `random_weights` is set, unit weights otherwise. Positions use the
/// (row, col) layout.
pub fn grid_graph<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    remove_edge_prob: f64,
    random_weights: bool,
    rng: &mut R,
) -> (Graph<usize>, Positions<usize>) {
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    let weight = |rng: &mut R| {
        if random_weights {
            rng.gen_range(1..=10) as f64
        } else {
            1.0
        }
    };
    for row in 0..rows {
        for col in 0..cols {
            let node = row * cols + col;
            graph.add_node(node);
            positions.insert(node, (row as f64, col as f64));
            if col + 1 < cols && !rng.gen_bool(remove_edge_prob) {
                let w = weight(rng);
                graph.add_undirected_edge(node, node + 1, w);
            }
            if row + 1 < rows && !rng.gen_bool(remove_edge_prob) {
                let w = weight(rng);
                graph.add_undirected_edge(node, node + cols, w);
            }
        }
    }
    (graph, positions)
}

/// Random geometric graph: `n` points in the unit square, connected when
/// closer than `radius`, weighted with the rounded distance scaled by 10.
pub fn geometric_graph<R: Rng + ?Sized>(
    n: usize,
    radius: f64,
    rng: &mut R,
) -> (Graph<usize>, Positions<usize>) {
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    for node in 0..n {
        graph.add_node(node);
        positions.insert(node, (rng.gen::<f64>(), rng.gen::<f64>()));
    }
    for a in 0..n {
        for b in (a + 1)..n {
            let (ax, ay) = positions[&a];
            let (bx, by) = positions[&b];
            let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
            if distance < radius {
                graph.add_undirected_edge(a, b, (distance * 10.0).round());
            }
        }
    }
    (graph, positions)
}

/// G(n, p): every unordered pair becomes an undirected edge with probability
/// `p`, weighted uniformly in 1..=10.
pub fn gnp_graph<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Graph<usize> {
    let mut graph = Graph::new();
    for node in 0..n {
        graph.add_node(node);
    }
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(p) {
                graph.add_undirected_edge(a, b, rng.gen_range(1..=10) as f64);
            }
        }
    }
    graph
}

/// G(n, k): exactly `k` distinct undirected edges sampled uniformly,
/// weighted uniformly in 1..=10. `k` is clamped to the number of pairs.
pub fn gnk_graph<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Graph<usize> {
    let mut graph = Graph::new();
    for node in 0..n {
        graph.add_node(node);
    }
    if n < 2 {
        return graph;
    }
    let max_edges = n * (n - 1) / 2;
    let target = k.min(max_edges);
    let mut chosen = HashSet::new();
    while chosen.len() < target {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        let pair = (a.min(b), a.max(b));
        if chosen.insert(pair) {
            graph.add_undirected_edge(pair.0, pair.1, rng.gen_range(1..=10) as f64);
        }
    }
    graph
}

/// Weighted shortest-path distances from `source` to every reachable node.
pub fn dijkstra_distances<N: NodeKey>(graph: &Graph<N>, source: &N) -> HashMap<N, f64> {
    let mut distances = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(source.clone(), 0.0);
    heap.push(Reverse((not_nan(0.0), source.clone())));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost.into_inner() > distances[&node] {
            continue;
        }
        for (neighbor, weight) in graph.neighbors(&node) {
            let next_cost = cost.into_inner() + weight;
            if distances.get(neighbor).is_none_or(|&known| next_cost < known) {
                distances.insert(neighbor.clone(), next_cost);
                heap.push(Reverse((not_nan(next_cost), neighbor.clone())));
            }
        }
    }

    distances
}

/// Start/goal pair maximizing weighted distance, found with two Dijkstra
/// sweeps. Deterministic: distance ties resolve towards the smaller node id.
pub fn farthest_pair<N: NodeKey>(graph: &Graph<N>) -> Option<(N, N)> {
    let source = graph.nodes().min()?.clone();
    let start = farthest_from(&dijkstra_distances(graph, &source))?;
    let goal = farthest_from(&dijkstra_distances(graph, &start))?;
    Some((start, goal))
}

fn farthest_from<N: NodeKey>(distances: &HashMap<N, f64>) -> Option<N> {
    distances
        .iter()
        .max_by(|a, b| {
            not_nan(*a.1)
                .cmp(&not_nan(*b.1))
                .then_with(|| b.0.cmp(a.0))
        })
        .map(|(node, _)| node.clone())
}
