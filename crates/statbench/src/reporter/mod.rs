//! Benchmark result reporting
//!
//! This module handles formatting and outputting benchmark results in various formats
//! including JSON, human-readable text, and Markdown reports.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable library -> summary mapping for CI/CD integration
//! - **Console**: Human-readable per-library statistics and a ranked comparison
//! - **Markdown**: Documentation-friendly tables
//!
//! # Example
//!
//! ```no_run
//! use statbench::reporter::{BenchmarkReport, Reporter, OutputFormat};
//! use statbench::runner::RunOutcome;
//!
//! # fn example(outcome: RunOutcome) -> anyhow::Result<()> {
//! let report = BenchmarkReport::from_outcome(&outcome);
//! Reporter::new(OutputFormat::Console).report(&report)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::JsonPretty)
//!     .write_to_file(&report, "benchmark_results.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;
mod markdown;
pub mod ranking;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::RunOutcome;
use crate::stats::{aggregate, Aggregates, IterationBatch};

pub use console::{render_console, ConsoleReporter};
pub use json::{render_document, JsonReporter, LibraryEntry, MetricEntry, ReportDocument};
pub use markdown::MarkdownReporter;

/// Output format for benchmark results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console text with tables
    Console,
    /// Markdown format for documentation
    Markdown,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Console
    }
}

/// Aggregated statistics plus the metadata of the run that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Binary that was benchmarked
    pub binary: String,
    /// Measured iterations requested
    pub iterations: usize,
    /// Measured iterations that produced a batch
    pub completed_iterations: usize,
    /// Warmup invocations run before measuring
    pub warmup: usize,
    /// Iterations dropped under the skip policy
    pub skipped: Vec<usize>,
    /// Timestamp when the run started
    pub started_at: String,
    /// Total duration of the run
    pub duration_ms: u64,
    /// Per-library statistics
    pub libraries: Aggregates,
}

impl BenchmarkReport {
    /// Aggregate a finished run
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        Self {
            binary: outcome.binary.display().to_string(),
            iterations: outcome.iterations,
            completed_iterations: outcome.batches.len(),
            warmup: outcome.warmup,
            skipped: outcome.skipped.clone(),
            started_at: outcome.started_at.clone(),
            duration_ms: outcome.duration_ms,
            libraries: aggregate(&outcome.batches),
        }
    }

    /// Aggregate batches collected outside the runner
    pub fn from_batches(binary: impl Into<String>, batches: &[IterationBatch]) -> Self {
        Self {
            binary: binary.into(),
            iterations: batches.len(),
            completed_iterations: batches.len(),
            warmup: 0,
            skipped: Vec::new(),
            started_at: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            libraries: aggregate(batches),
        }
    }
}

/// Reporter for benchmark results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, report: &BenchmarkReport) -> Result<()> {
        let output = self.format_results(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &BenchmarkReport, path: P) -> Result<()> {
        let path = path.as_ref();
        let output = self.format_results(report)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, output)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_results(&self, report: &BenchmarkReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
            OutputFormat::Markdown => MarkdownReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
