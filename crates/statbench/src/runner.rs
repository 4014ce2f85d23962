//! Benchmark execution orchestration
//!
//! This module launches the benchmark binary once per iteration, enforces the
//! per-invocation timeout, and collects the parsed output of every invocation
//! as an [`IterationBatch`].
//!
//! # Architecture
//!
//! Invocations run strictly one after another. Running them concurrently
//! would make them compete for the same cores and caches, which is exactly
//! the noise repeated runs are meant to average out.
//!
//! ```text
//!  warmup 1..W          iteration 1..N
//! ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐
//! │ spawn  │→│ spawn  │→│ spawn  │→│ spawn  │→ ... → Vec<IterationBatch>
//! │ (drop) │ │ (drop) │ │ parse  │ │ parse  │
//! └────────┘ └────────┘ └────────┘ └────────┘
//! ```
//!
//! Each invocation is a fresh process whose working directory is the
//! binary's own directory, so relative data files resolve the same way they
//! would when the binary is run by hand.
//!
//! # Example
//!
//! ```no_run
//! use statbench::config::Config;
//! use statbench::runner::{BenchmarkRunner, RunSettings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("statbench.toml")?;
//! let runner = BenchmarkRunner::new(RunSettings::from_config(&config)?)?;
//! let outcome = runner.run().await?;
//!
//! println!("{} batches collected", outcome.batches.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, FailurePolicy};
use crate::error::{BenchError, Invocation, Result};
use crate::parser::parse_output;
use crate::stats::IterationBatch;

/// Everything the runner needs to drive one benchmark run
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Benchmark executable
    pub binary: PathBuf,
    /// Measured invocations
    pub iterations: usize,
    /// Discarded invocations before measuring
    pub warmup: usize,
    /// Limit for each single invocation
    pub timeout: Duration,
    /// Extra arguments for every invocation
    pub args: Vec<String>,
    pub on_failure: FailurePolicy,
    /// Re-launches allowed per invocation before `on_failure` applies
    pub retries: u32,
}

impl RunSettings {
    /// Settings with the conservative defaults: abort on failure, no retries
    pub fn new(binary: impl Into<PathBuf>, iterations: usize, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            iterations,
            warmup: 0,
            timeout,
            args: Vec::new(),
            on_failure: FailurePolicy::Abort,
            retries: 0,
        }
    }

    /// Build settings from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            binary: config.benchmark.binary.clone(),
            iterations: config.benchmark.iterations as usize,
            warmup: config.benchmark.warmup as usize,
            timeout: config.benchmark.timeout()?,
            args: config.benchmark.args.clone(),
            on_failure: config.execution.on_failure,
            retries: config.execution.retries,
        })
    }
}

/// Progress notification sent after every invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub invocation: Invocation,
    /// Records parsed from this invocation's output
    pub records: usize,
    /// The invocation failed and was skipped
    pub skipped: bool,
}

/// Everything collected by a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Resolved path of the binary that was run
    pub binary: PathBuf,
    /// One batch per successful measured invocation, in invocation order
    #[serde(skip)]
    pub batches: Vec<IterationBatch>,
    /// Measured iterations requested
    pub iterations: usize,
    /// Warmup invocations run
    pub warmup: usize,
    /// 1-based indices of measured iterations dropped under the skip policy
    pub skipped: Vec<usize>,
    /// Timestamp when the run started
    pub started_at: String,
    /// Wall-clock duration of the whole run
    pub duration_ms: u64,
}

/// Runs the benchmark binary repeatedly
#[derive(Debug)]
pub struct BenchmarkRunner {
    settings: RunSettings,
    binary: PathBuf,
    working_dir: PathBuf,
}

impl BenchmarkRunner {
    /// Create a runner, resolving the binary path up front.
    ///
    /// # Errors
    ///
    /// [`BenchError::BinaryNotFound`] if the binary doesn't exist, before
    /// anything is launched.
    pub fn new(settings: RunSettings) -> Result<Self> {
        if !settings.binary.is_file() {
            return Err(BenchError::BinaryNotFound(settings.binary.clone()));
        }

        // Absolute, so changing the working directory can't break the lookup
        let binary = settings.binary.canonicalize()?;
        let working_dir = binary
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            settings,
            binary,
            working_dir,
        })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run warmup and measured invocations
    pub async fn run(&self) -> Result<RunOutcome> {
        self.run_with_progress(|_| {}).await
    }

    /// Run warmup and measured invocations, reporting after each one
    ///
    /// # Returns
    ///
    /// All batches in invocation order. Under [`FailurePolicy::Abort`] the
    /// first failure ends the run and nothing collected so far is returned.
    #[instrument(skip(self, on_progress), fields(binary = %self.binary.display()))]
    pub async fn run_with_progress<F>(&self, mut on_progress: F) -> Result<RunOutcome>
    where
        F: FnMut(&Progress),
    {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();
        let iterations = self.settings.iterations;
        let warmup = self.settings.warmup;

        info!(
            "Running {} ({} warmup, {} iterations, timeout {:?})",
            self.binary.display(),
            warmup,
            iterations,
            self.settings.timeout
        );

        for index in 1..=warmup {
            let invocation = Invocation::warmup(index, warmup);
            let progress = match self.invoke_with_retries(invocation).await {
                Ok(stdout) => Progress {
                    invocation,
                    records: parse_output(&stdout).len(),
                    skipped: false,
                },
                Err(e) => self.tolerate(e, invocation)?,
            };
            on_progress(&progress);
        }

        let mut batches: Vec<IterationBatch> = Vec::with_capacity(iterations);
        let mut skipped = Vec::new();

        for index in 1..=iterations {
            let invocation = Invocation::measure(index, iterations);
            let progress = match self.invoke_with_retries(invocation).await {
                Ok(stdout) => {
                    let batch = parse_output(&stdout);
                    if batch.is_empty() {
                        warn!("{} produced no measurement lines", invocation);
                    } else {
                        debug!("{} produced {} records", invocation, batch.len());
                    }
                    let records = batch.len();
                    batches.push(batch);
                    Progress {
                        invocation,
                        records,
                        skipped: false,
                    }
                }
                Err(e) => {
                    let progress = self.tolerate(e, invocation)?;
                    skipped.push(index);
                    progress
                }
            };
            on_progress(&progress);
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Completed {} of {} iterations in {}ms",
            batches.len(),
            iterations,
            duration_ms
        );

        Ok(RunOutcome {
            binary: self.binary.clone(),
            batches,
            iterations,
            warmup,
            skipped,
            started_at,
            duration_ms,
        })
    }

    /// Apply the failure policy: propagate under abort, log and continue under skip
    fn tolerate(&self, error: BenchError, invocation: Invocation) -> Result<Progress> {
        match self.settings.on_failure {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                warn!("Skipping {}: {}", invocation, error);
                Ok(Progress {
                    invocation,
                    records: 0,
                    skipped: true,
                })
            }
        }
    }

    async fn invoke_with_retries(&self, invocation: Invocation) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.invoke(invocation).await {
                Ok(stdout) => return Ok(stdout),
                Err(e) if attempt < self.settings.retries => {
                    attempt += 1;
                    warn!(
                        "{} failed ({}), retrying ({}/{})",
                        invocation, e, attempt, self.settings.retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Launch one fresh process and wait for it within the timeout
    #[instrument(skip(self), fields(invocation = %invocation))]
    async fn invoke(&self, invocation: Invocation) -> Result<String> {
        let child = Command::new(&self.binary)
            .args(&self.settings.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BenchError::Spawn {
                binary: self.binary.clone(),
                invocation,
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
        {
            Ok(output) => output.map_err(|source| BenchError::Wait {
                binary: self.binary.clone(),
                invocation,
                source,
            })?,
            Err(_elapsed) => {
                return Err(BenchError::InvocationTimeout {
                    binary: self.binary.clone(),
                    invocation,
                    timeout: self.settings.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(BenchError::InvocationFailure {
                binary: self.binary.clone(),
                invocation,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Run `binary` for `iterations` invocations with the default policy.
///
/// Convenience wrapper returning only the batches.
pub async fn run(
    binary: impl Into<PathBuf>,
    iterations: usize,
    per_run_timeout: Duration,
) -> Result<Vec<IterationBatch>> {
    let runner = BenchmarkRunner::new(RunSettings::new(binary, iterations, per_run_timeout))?;
    Ok(runner.run().await?.batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_are_conservative() {
        let settings = RunSettings::new("bench", 20, Duration::from_secs(60));
        assert_eq!(settings.on_failure, FailurePolicy::Abort);
        assert_eq!(settings.retries, 0);
        assert_eq!(settings.warmup, 0);
        assert!(settings.args.is_empty());
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::from_str(
            r#"
            [benchmark]
            binary = "bench"
            iterations = 7
            warmup = 2
            timeout_secs = 0.5

            [execution]
            on_failure = "skip"
            retries = 1
        "#,
        )
        .unwrap();

        let settings = RunSettings::from_config(&config).unwrap();
        assert_eq!(settings.binary, PathBuf::from("bench"));
        assert_eq!(settings.iterations, 7);
        assert_eq!(settings.warmup, 2);
        assert_eq!(settings.timeout, Duration::from_millis(500));
        assert_eq!(settings.on_failure, FailurePolicy::Skip);
        assert_eq!(settings.retries, 1);
    }

    #[test]
    fn test_settings_from_oversized_timeout() {
        let config = Config::from_str("[benchmark]\ntimeout_secs = 1e30").unwrap();
        assert!(matches!(
            RunSettings::from_config(&config),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_settings_from_invalid_config() {
        let config = Config::from_str("[benchmark]\niterations = 0").unwrap();
        assert!(matches!(
            RunSettings::from_config(&config),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_binary_rejected_before_run() {
        let settings = RunSettings::new("/no/such/bench_file_io", 3, Duration::from_secs(1));
        let err = BenchmarkRunner::new(settings).unwrap_err();
        assert!(matches!(err, BenchError::BinaryNotFound(_)));
    }

    #[test]
    fn test_convenience_run_reports_missing_binary() {
        let result = tokio_test::block_on(run("/no/such/bench_file_io", 3, Duration::from_secs(1)));
        assert!(matches!(result, Err(BenchError::BinaryNotFound(_))));
    }

    #[test]
    fn test_directory_is_not_a_binary() {
        let settings = RunSettings::new(std::env::temp_dir(), 3, Duration::from_secs(1));
        assert!(matches!(
            BenchmarkRunner::new(settings),
            Err(BenchError::BinaryNotFound(_))
        ));
    }

    #[test]
    fn test_run_outcome_serialization_skips_batches() {
        let outcome = RunOutcome {
            binary: PathBuf::from("/opt/bench"),
            batches: vec![vec![]],
            iterations: 1,
            warmup: 0,
            skipped: vec![],
            started_at: "2024-01-01T00:00:00Z".to_string(),
            duration_ms: 10,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("/opt/bench"));
        assert!(!json.contains("batches"));
    }
}
