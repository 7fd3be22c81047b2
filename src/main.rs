use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rra::{read_dataset_path, Rra, RraConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "rra", version, about = "Robust Rank Aggregation")]
struct Cli {
    /// Input data file. Format: <item id> <group id> <list id> <value>
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file. Format: <group id> <number of items in the group> <lo-value> <false discovery rate>
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Only items with a percentile below this cutoff contribute beyond rank 1
    #[arg(short = 'p', long = "max-percentile", default_value_t = 0.25)]
    max_percentile: f64,

    /// Seed of the null model
    #[arg(long, default_value_t = 123456)]
    seed: u64,
}

fn init_tracing() -> Result<()> {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = RraConfig::builder()
        .max_percentile(cli.max_percentile)
        .seed(cli.seed)
        .build();
    config.validate()?;

    let dataset = read_dataset_path(&cli.input, &config)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let results = Rra::new(dataset, config).run()?;
    results
        .write_tsv_path(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        groups = results.groups().len(),
        significant = results.n_significant(0.05),
        "Finished"
    );
    Ok(())
}
