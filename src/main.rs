use heuristic_search::config::{Cli, Config};
use heuristic_search::experiment;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();

    let config = Config::new(&cli);
    config.validate()?;
    info!("running sweep: {config:?}");

    let mut rng = StdRng::seed_from_u64(config.seed as u64);
    let records = experiment::run(&config, &mut rng)?;

    experiment::write_csv(&config.output_path, &records)
        .with_context(|| format!("error writing results to {}", config.output_path))?;
    info!(
        "wrote {} records to {}",
        records.len(),
        config.output_path
    );

    Ok(())
}
