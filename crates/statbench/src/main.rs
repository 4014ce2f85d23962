//! statbench binary
//!
//! Runs a benchmark executable repeatedly and prints a statistical report.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statbench::config::{Config, FailurePolicy};
use statbench::reporter::{BenchmarkReport, OutputFormat, Reporter};
use statbench::runner::{BenchmarkRunner, Progress, RunSettings};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FailureArg {
    Abort,
    Skip,
}

impl From<FailureArg> for FailurePolicy {
    fn from(v: FailureArg) -> Self {
        match v {
            FailureArg::Abort => FailurePolicy::Abort,
            FailureArg::Skip => FailurePolicy::Skip,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "statbench")]
#[command(version, about = "Run a benchmark binary repeatedly and report statistics")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the benchmark binary [default: build/benchmarks/bench_file_io]
    #[arg(long, value_name = "PATH")]
    binary: Option<PathBuf>,

    /// Number of measured iterations [default: 20]
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Invocations to run and discard before measuring [default: 0]
    #[arg(long)]
    warmup: Option<u32>,

    /// Per-invocation timeout in seconds [default: 60]
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<f64>,

    /// Where to write the report [default: benchmark_results.json]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Format of the written report [default: json-pretty]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// What to do when an invocation fails or times out [default: abort]
    #[arg(long, value_enum)]
    on_failure: Option<FailureArg>,

    /// Re-launch a failed invocation up to N times [default: 0]
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Extra argument for the benchmark binary (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Don't print per-iteration progress
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    /// Load the config file (if any) and apply command-line overrides
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(binary) = &self.binary {
            config.benchmark.binary = binary.clone();
        }
        if let Some(iterations) = self.iterations {
            config.benchmark.iterations = iterations;
        }
        if let Some(warmup) = self.warmup {
            config.benchmark.warmup = warmup;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.benchmark.timeout_secs = timeout_secs;
        }
        if !self.args.is_empty() {
            config.benchmark.args = self.args.clone();
        }
        if let Some(on_failure) = self.on_failure {
            config.execution.on_failure = on_failure.into();
        }
        if let Some(retries) = self.retries {
            config.execution.retries = retries;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_progress(progress: &Progress) {
    let status = if progress.skipped { " (skipped)" } else { "" };
    eprint!("  {}...{}\r", progress.invocation, status);
    let _ = std::io::stderr().flush();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let settings = RunSettings::from_config(&config)?;

    if settings.on_failure == FailurePolicy::Skip || settings.retries > 0 {
        tracing::warn!(
            "Non-default failure handling (on_failure={:?}, retries={}); statistics may mix in retried or missing iterations",
            settings.on_failure,
            settings.retries
        );
    }

    let runner = BenchmarkRunner::new(settings)?;
    eprintln!("Benchmark binary: {}", runner.binary().display());
    eprintln!("Iterations: {}", runner.settings().iterations);

    let outcome = if args.quiet {
        runner.run().await?
    } else {
        let outcome = runner.run_with_progress(print_progress).await?;
        eprintln!();
        outcome
    };

    let report = BenchmarkReport::from_outcome(&outcome);
    if report.libraries.is_empty() {
        tracing::warn!("No output line matched the measurement format");
    }

    Reporter::new(OutputFormat::Console).report(&report)?;

    Reporter::new(config.output.format)
        .write_to_file(&report, &config.output.path)
        .context("Failed to save report")?;
    eprintln!("\nResults saved to: {}", config.output.path.display());

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
