use tracing::info;

/// Counters filled in by every search call and returned alongside the path.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Closed-set finalizations at termination.
    pub nodes_expanded: usize,
    /// Neighbors actually pushed onto the frontier.
    pub nodes_generated: usize,
    /// Element count of the returned path, 0 on failure.
    pub path_length: usize,
    /// Maximum frontier size observed at any point.
    pub frontier_peak: usize,
    /// Sum of traversed edge weights. Only the weighted graph engine fills
    /// this in; it stays 0 for the unit-cost grid and the uninformed
    /// baselines.
    pub path_cost: f64,
}

impl SearchStats {
    pub fn print(&self) {
        info!(
            "Expanded {:?} Generated {:?} Path length {:?} Frontier peak {:?} Path cost {:?}",
            self.nodes_expanded,
            self.nodes_generated,
            self.path_length,
            self.frontier_peak,
            self.path_cost
        );
    }
}
