//! Run a benchmark from a TOML config file and print the console report
//!
//! Usage: cargo run -p statbench --example run_benchmark -- <config.toml>

use anyhow::{Context, Result};
use statbench::config::Config;
use statbench::reporter::{BenchmarkReport, OutputFormat, Reporter};
use statbench::runner::{BenchmarkRunner, RunSettings};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config_path = env::args()
        .nth(1)
        .context("Usage: run_benchmark <config.toml>")?;

    println!("Loading config from: {}", config_path);
    let config = Config::from_file(&config_path)?;

    println!("Starting benchmark: {}", config.benchmark.binary.display());
    println!("  Iterations: {}", config.benchmark.iterations);
    println!("  Warmup: {}", config.benchmark.warmup);
    println!("  Timeout: {}s", config.benchmark.timeout_secs);
    println!();

    let runner = BenchmarkRunner::new(RunSettings::from_config(&config)?)?;
    let outcome = runner.run().await?;

    // Print results
    let report = BenchmarkReport::from_outcome(&outcome);
    Reporter::new(OutputFormat::Console).report(&report)?;

    Ok(())
}
