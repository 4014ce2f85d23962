//! Configuration parsing for benchmark runs
//!
//! This module provides TOML-based configuration for the benchmark binary,
//! the number of iterations, per-invocation timeout, failure handling and
//! report output. Every field has a default, so an empty file is valid.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BenchError;
use crate::reporter::OutputFormat;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What to run and how often
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    /// How invocation failures are handled
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Where the report goes
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use statbench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("statbench.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use statbench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [benchmark]
    ///     binary = "build/benchmarks/bench_file_io"
    ///     iterations = 50
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.benchmark.iterations, 50);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Check values that serde can't express
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.benchmark.iterations == 0 {
            return Err(BenchError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        self.benchmark.timeout()?;
        Ok(())
    }
}

/// Core benchmark configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Path to the benchmark executable
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Number of measured invocations (default: 20)
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Invocations run and discarded before measuring (default: 0)
    #[serde(default)]
    pub warmup: u32,
    /// Per-invocation timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    /// Extra arguments passed to every invocation
    #[serde(default)]
    pub args: Vec<String>,
}

impl BenchmarkConfig {
    /// Per-invocation timeout.
    ///
    /// # Errors
    ///
    /// [`BenchError::InvalidConfig`] unless `timeout_secs` is positive and
    /// fits in a [`Duration`].
    pub fn timeout(&self) -> Result<Duration, BenchError> {
        let secs = self.timeout_secs;
        match Duration::try_from_secs_f64(secs) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(BenchError::InvalidConfig(format!(
                "timeout_secs must be a positive number of seconds that fits a duration (got {secs})"
            ))),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            iterations: default_iterations(),
            warmup: 0,
            timeout_secs: default_timeout_secs(),
            args: Vec::new(),
        }
    }
}

fn default_binary() -> PathBuf {
    PathBuf::from("build/benchmarks/bench_file_io")
}

fn default_iterations() -> u32 {
    20
}

fn default_timeout_secs() -> f64 {
    60.0
}

/// Failure handling for individual invocations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// What to do when an invocation fails or times out
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Re-launch a failed invocation up to this many times (default: 0)
    #[serde(default)]
    pub retries: u32,
}

/// What happens to the run when one invocation fails
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run; partial statistics are never produced
    #[default]
    Abort,
    /// Log the failure, drop the invocation and continue
    Skip,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the structured report is written
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// File format of the written report
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: default_output_format(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("benchmark_results.json")
}

fn default_output_format() -> OutputFormat {
    OutputFormat::JsonPretty
}
