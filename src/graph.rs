use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::heuristic::Point;

/// Bound required of graph node identifiers. Equality is identity-level;
/// any hashable, ordered, cloneable key works (integers, strings, tuples).
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}
impl<T: Clone + Eq + Hash + Ord + Debug> NodeKey for T {}

/// Optional node -> point table driving geometric heuristics on graphs.
pub type Positions<N> = HashMap<N, Point>;

/// Weighted adjacency-list graph. Edge direction is whatever the caller
/// inserted; the search engines simply follow the stored edges. A node with
/// no entry has zero out-edges.
#[derive(Debug, Clone, Default)]
pub struct Graph<N: NodeKey> {
    adjacency: HashMap<N, Vec<(N, f64)>>,
}

impl<N: NodeKey> Graph<N> {
    pub fn new() -> Self {
        Graph {
            adjacency: HashMap::new(),
        }
    }

    /// Ensures `node` exists, with no edges added.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.adjacency.entry(from).or_default().push((to, weight));
    }

    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    /// Out-edges of `node` in insertion order; empty for unknown nodes.
    pub fn neighbors(&self, node: &N) -> &[(N, f64)] {
        self.adjacency.get(node).map_or(&[], |edges| edges.as_slice())
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// Weight of the first stored edge from `from` to `to`. With parallel
    /// edges of differing weights, first match wins.
    pub fn edge_weight(&self, from: &N, to: &N) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|(neighbor, _)| neighbor == to)
            .map(|(_, weight)| *weight)
    }
}
