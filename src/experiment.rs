//! Trial sweeps comparing the A* heuristics against the uninformed
//! baselines, plus CSV persistence of the per-run records.

use anyhow::{bail, Context, Result};
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::generator;
use crate::graph::{Graph, NodeKey, Positions};
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::search::{astar_graph, astar_grid, bfs, dfs};
use crate::stat::SearchStats;

/// One row of the result table: a single algorithm run on one instance.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    pub trial: usize,
    pub algo: String,
    pub success: bool,
    pub path_length: usize,
    pub path_cost: f64,
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub frontier_peak: usize,
    pub time_us: u128,
}

impl TrialRecord {
    fn new(trial: usize, algo: String, success: bool, stats: &SearchStats, time_us: u128) -> Self {
        TrialRecord {
            trial,
            algo,
            success,
            path_length: stats.path_length,
            path_cost: stats.path_cost,
            nodes_expanded: stats.nodes_expanded,
            nodes_generated: stats.nodes_generated,
            frontier_peak: stats.frontier_peak,
            time_us,
        }
    }
}

/// Runs the sweep the configuration describes and returns one record per
/// algorithm per trial.
pub fn run<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Vec<TrialRecord>> {
    match config.substrate.as_str() {
        "grid" => run_grid_sweep(config, rng),
        "grid-graph" => {
            let (graph, positions) = generator::grid_graph(
                config.rows,
                config.cols,
                config.remove_edge_prob,
                true,
                rng,
            );
            run_graph_sweep(config, &graph, Some(&positions))
        }
        "geometric" => {
            let (graph, positions) = generator::geometric_graph(config.nodes, config.radius, rng);
            run_graph_sweep(config, &graph, Some(&positions))
        }
        "gnp" => {
            let graph = generator::gnp_graph(config.nodes, config.edge_prob, rng);
            run_graph_sweep(config, &graph, None)
        }
        "gnk" => {
            let graph = generator::gnk_graph(config.nodes, config.num_edges, rng);
            run_graph_sweep(config, &graph, None)
        }
        other => bail!("unknown substrate: {other}"),
    }
}

// A fresh random grid per trial, corner to corner, one run per heuristic.
fn run_grid_sweep<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Vec<TrialRecord>> {
    let start = (0, 0);
    let goal = (config.rows - 1, config.cols - 1);
    let mut records = Vec::new();

    for trial in 1..=config.trials {
        let grid = Grid::random(
            config.rows,
            config.cols,
            config.obstacle_prob,
            start,
            goal,
            rng,
        );
        for heuristic in Heuristic::ALL {
            let mut stats = SearchStats::default();
            let timer = Instant::now();
            let path = astar_grid(&grid, start, goal, heuristic, &mut stats)?;
            let time_us = timer.elapsed().as_micros();
            info!(
                "trial {trial} astar_{} success={}",
                heuristic.name(),
                path.is_some()
            );
            stats.print();
            records.push(TrialRecord::new(
                trial,
                format!("astar_{}", heuristic.name()),
                path.is_some(),
                &stats,
                time_us,
            ));
        }
    }

    Ok(records)
}

// One generated instance, every trial rerun on it: four heuristics plus the
// BFS and DFS baselines. Start and goal are the weighted farthest pair.
fn run_graph_sweep<N: NodeKey>(
    config: &Config,
    graph: &Graph<N>,
    positions: Option<&Positions<N>>,
) -> Result<Vec<TrialRecord>> {
    let (start, goal) =
        generator::farthest_pair(graph).context("generated graph has no nodes")?;
    info!("graph sweep: start {start:?} goal {goal:?} over {} nodes", graph.node_count());
    let mut records = Vec::new();

    for trial in 1..=config.trials {
        for heuristic in Heuristic::ALL {
            let mut stats = SearchStats::default();
            let timer = Instant::now();
            let path = astar_graph(graph, &start, &goal, heuristic, positions, &mut stats);
            let time_us = timer.elapsed().as_micros();
            stats.print();
            records.push(TrialRecord::new(
                trial,
                format!("astar_{}", heuristic.name()),
                path.is_some(),
                &stats,
                time_us,
            ));
        }

        let mut stats = SearchStats::default();
        let timer = Instant::now();
        let path = bfs(graph, &start, &goal, &mut stats);
        let time_us = timer.elapsed().as_micros();
        stats.print();
        records.push(TrialRecord::new(
            trial,
            "bfs".to_string(),
            path.is_some(),
            &stats,
            time_us,
        ));

        let mut stats = SearchStats::default();
        let timer = Instant::now();
        let path = dfs(graph, &start, &goal, &mut stats);
        let time_us = timer.elapsed().as_micros();
        stats.print();
        records.push(TrialRecord::new(
            trial,
            "dfs".to_string(),
            path.is_some(),
            &stats,
            time_us,
        ));
    }

    Ok(records)
}

/// Writes the records as CSV with a header row, creating the parent
/// directory if needed.
pub fn write_csv(path: &str, records: &[TrialRecord]) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create output directory {parent:?}"))?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("cannot create output file {path}"))?;
    let mut writer = BufWriter::new(file);
    writeln!(
        writer,
        "trial,algo,success,path_length,path_cost,nodes_expanded,nodes_generated,frontier_peak,time_us"
    )?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{}",
            record.trial,
            record.algo,
            if record.success { "yes" } else { "no" },
            record.path_length,
            record.path_cost,
            record.nodes_expanded,
            record.nodes_generated,
            record.frontier_peak,
            record.time_us
        )?;
    }
    Ok(())
}
