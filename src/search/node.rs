use ordered_float::NotNan;
use std::cmp::Ordering;

/// Arena-backed record created during one search call. The parent field
/// indexes into the per-call arena and exists only for path reconstruction;
/// the whole arena is dropped when the call returns.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode<T, C> {
    pub(crate) state: T,
    pub(crate) parent: Option<usize>,
    pub(crate) g_cost: C,
}

/// Frontier entry keyed by f. `C` is the accumulated-cost type (step count
/// on grids, `NotNan<f64>` on weighted graphs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenEntry<C> {
    pub(crate) f_cost: NotNan<f64>,
    pub(crate) g_cost: C,
    pub(crate) index: usize,
}

// Ordering for the max-heap where lower costs are given higher priority.
// Exact f ties fall back to the lower g, then to the earlier insertion
// (lower arena index), which keeps repeated runs deterministic.
impl<C: Ord> Ord for OpenEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl<C: Ord> PartialOrd for OpenEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walks parent links from `index` back to the root and returns the states
/// in start-to-finish order.
pub(crate) fn construct_path<T: Clone, C>(arena: &[SearchNode<T, C>], index: usize) -> Vec<T> {
    let mut path = vec![arena[index].state.clone()];
    let mut current = index;
    while let Some(parent) = arena[current].parent {
        path.push(arena[parent].state.clone());
        current = parent;
    }
    path.reverse();
    path
}

/// Costs are finite sums of finite non-negative inputs, so NaN here means a
/// broken heuristic contract.
pub(crate) fn not_nan(value: f64) -> NotNan<f64> {
    NotNan::new(value).expect("search cost must not be NaN")
}
