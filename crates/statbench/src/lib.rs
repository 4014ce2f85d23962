//! Statistical runner for external benchmark binaries
//!
//! This crate runs a benchmark executable many times, parses the timing
//! lines it prints, and reports per-library statistics that can be trusted
//! across runs.
//!
//! # Features
//!
//! - **Isolated repetition**: every iteration is a fresh process with a timeout
//! - **Output parsing**: `<lib> | Parse: <t> μs | Serialize: <t> μs | ✓ PASS` lines
//! - **Statistical Analysis**: mean, median, sample stdev, P50/P95/P99,
//!   95% confidence intervals and coefficient of variation
//! - **Ranking**: libraries ordered by parse median with a reliability label
//! - **Multiple Output Formats**: JSON, Console, and Markdown reports
//!
//! # Example
//!
//! ```no_run
//! use statbench::{BenchmarkReport, BenchmarkRunner, Config, OutputFormat, Reporter, RunSettings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("statbench.toml")?;
//!
//! let runner = BenchmarkRunner::new(RunSettings::from_config(&config)?)?;
//! let outcome = runner.run().await?;
//! let report = BenchmarkReport::from_outcome(&outcome);
//!
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! Reporter::new(OutputFormat::JsonPretty).write_to_file(&report, "benchmark_results.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Runs are configured with an optional TOML file; every key has a default:
//!
//! ```toml
//! [benchmark]
//! binary = "build/benchmarks/bench_file_io"
//! iterations = 20
//! warmup = 0
//! timeout_secs = 60
//! args = []
//!
//! [execution]
//! on_failure = "abort"   # or "skip"
//! retries = 0
//!
//! [output]
//! path = "benchmark_results.json"
//! format = "json_pretty"
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod runner;
pub mod stats;

// Re-export main types for convenience
pub use config::{Config, FailurePolicy};
pub use error::{BenchError, Result};
pub use parser::{parse_output, MeasurementRecord, Status};
pub use reporter::{BenchmarkReport, OutputFormat, Reporter};
pub use runner::{BenchmarkRunner, RunOutcome, RunSettings};
pub use stats::{aggregate, Aggregates, DistributionSummary, LibraryStats};
