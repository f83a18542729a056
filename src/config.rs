use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "Heuristic Search",
    about = "Shortest-path search benchmarks: A* heuristics vs uninformed baselines.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Substrate to search: grid, grid-graph, geometric, gnp, gnk",
        default_value = "grid"
    )]
    pub substrate: String,

    #[arg(long, help = "Grid rows", default_value_t = 20)]
    pub rows: usize,

    #[arg(long, help = "Grid columns", default_value_t = 20)]
    pub cols: usize,

    #[arg(
        long,
        help = "Per-cell obstacle probability for random grids",
        default_value_t = 0.2
    )]
    pub obstacle_prob: f64,

    #[arg(
        long,
        help = "Per-edge removal probability for grid graphs",
        default_value_t = 0.1
    )]
    pub remove_edge_prob: f64,

    #[arg(long, help = "Node count for graph substrates", default_value_t = 50)]
    pub nodes: usize,

    #[arg(
        long,
        help = "Connection radius for geometric graphs",
        default_value_t = 0.25
    )]
    pub radius: f64,

    #[arg(
        long,
        help = "Edge probability for gnp graphs",
        default_value_t = 0.05
    )]
    pub edge_prob: f64,

    #[arg(long, help = "Edge count for gnk graphs", default_value_t = 150)]
    pub num_edges: usize,

    #[arg(long, help = "Number of trials", default_value_t = 10)]
    pub trials: usize,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: usize,

    #[arg(
        long,
        help = "Path to the output file",
        default_value = "result/result.csv"
    )]
    pub output_path: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub substrate: String,
    pub rows: usize,
    pub cols: usize,
    pub obstacle_prob: f64,
    pub remove_edge_prob: f64,
    pub nodes: usize,
    pub radius: f64,
    pub edge_prob: f64,
    pub num_edges: usize,
    pub trials: usize,
    pub seed: usize,
    pub output_path: String,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            substrate: cli.substrate.clone(),
            rows: cli.rows,
            cols: cli.cols,
            obstacle_prob: cli.obstacle_prob,
            remove_edge_prob: cli.remove_edge_prob,
            nodes: cli.nodes,
            radius: cli.radius,
            edge_prob: cli.edge_prob,
            num_edges: cli.num_edges,
            trials: cli.trials,
            seed: cli.seed,
            output_path: cli.output_path.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.substrate.as_str() {
            "grid" => {
                if self.rows == 0 || self.cols == 0 {
                    return Err(anyhow!("grid dimensions must be at least 1x1"));
                }
                if !(0.0..=1.0).contains(&self.obstacle_prob) {
                    return Err(anyhow!(
                        "obstacle probability must lie in [0, 1], got {}",
                        self.obstacle_prob
                    ));
                }
            }
            "grid-graph" => {
                if self.rows == 0 || self.cols == 0 {
                    return Err(anyhow!("grid dimensions must be at least 1x1"));
                }
                if !(0.0..=1.0).contains(&self.remove_edge_prob) {
                    return Err(anyhow!(
                        "edge removal probability must lie in [0, 1], got {}",
                        self.remove_edge_prob
                    ));
                }
            }
            "geometric" | "gnp" | "gnk" => {
                if self.nodes == 0 {
                    return Err(anyhow!("graph substrates need at least one node"));
                }
                if self.substrate == "gnp" && !(0.0..=1.0).contains(&self.edge_prob) {
                    return Err(anyhow!(
                        "edge probability must lie in [0, 1], got {}",
                        self.edge_prob
                    ));
                }
            }
            other => return Err(anyhow!("unknown substrate: {other}")),
        }

        if self.trials == 0 {
            return Err(anyhow!("at least one trial is required"));
        }
        Ok(())
    }
}
