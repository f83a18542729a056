mod graph;
mod grid;
mod node;
mod uninformed;

pub use graph::astar_graph;
pub use grid::astar_grid;
pub use uninformed::{bfs, dfs};

pub(crate) use node::{construct_path, not_nan, OpenEntry, SearchNode};
