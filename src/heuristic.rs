/// A point in the plane used for heuristic evaluation. Grid cells map their
/// (row, col) indices here; graph nodes map through a position table.
pub type Point = (f64, f64);

/// Distance estimators selectable for the A* engines.
///
/// All variants are pure and return a non-negative estimate. `Zero` turns A*
/// into uniform-cost (Dijkstra-equivalent) search. `AggressiveManhattan`
/// overestimates by design and may return suboptimal paths; it exists to
/// measure the search-time vs path-quality trade-off, not to find optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Zero,
    Manhattan,
    Euclidean,
    AggressiveManhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Zero,
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::AggressiveManhattan,
    ];

    pub fn estimate(&self, a: Point, b: Point) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => (a.0 - b.0).abs() + (a.1 - b.1).abs(),
            Heuristic::Euclidean => ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt(),
            Heuristic::AggressiveManhattan => 2.5 * ((a.0 - b.0).abs() + (a.1 - b.1).abs()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::AggressiveManhattan => "aggressive_manhattan",
        }
    }
}
