//! Error types for benchmark orchestration

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Phase an invocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Discarded runs before measurement
    Warmup,
    /// Runs whose output feeds the statistics
    Measure,
}

/// Identifies one invocation of the benchmark binary (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub phase: Phase,
    pub index: usize,
    pub total: usize,
}

impl Invocation {
    pub fn warmup(index: usize, total: usize) -> Self {
        Self {
            phase: Phase::Warmup,
            index,
            total,
        }
    }

    pub fn measure(index: usize, total: usize) -> Self {
        Self {
            phase: Phase::Measure,
            index,
            total,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Warmup => write!(f, "warmup {}/{}", self.index, self.total),
            Phase::Measure => write!(f, "iteration {}/{}", self.index, self.total),
        }
    }
}

/// Errors raised while running or reporting a benchmark
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Benchmark binary not found: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("{} failed on {invocation} (exit code {}): {}", .binary.display(), format_code(.code), .stderr.trim())]
    InvocationFailure {
        binary: PathBuf,
        invocation: Invocation,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{} timed out on {invocation} after {:.1}s", .binary.display(), .timeout.as_secs_f64())]
    InvocationTimeout {
        binary: PathBuf,
        invocation: Invocation,
        timeout: Duration,
    },

    #[error("Failed to launch {} on {invocation}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        invocation: Invocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Lost {} on {invocation} while collecting its output: {source}", .binary.display())]
    Wait {
        binary: PathBuf,
        invocation: Invocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// The invocation this error is tied to, if any
    pub fn invocation(&self) -> Option<Invocation> {
        match self {
            BenchError::InvocationFailure { invocation, .. }
            | BenchError::InvocationTimeout { invocation, .. }
            | BenchError::Spawn { invocation, .. }
            | BenchError::Wait { invocation, .. } => Some(*invocation),
            _ => None,
        }
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
