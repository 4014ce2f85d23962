//! Benchmark output parsing
//!
//! Turns the free-text output of one benchmark invocation into
//! [`MeasurementRecord`]s. The binary prints one line per library:
//!
//! ```text
//! beast_json           | Parse:      1441.71 μs | Serialize:       447.08 μs | ✓ PASS
//! ```
//!
//! Lines that don't look like this (banners, diagnostics, blank lines) are
//! skipped without error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// One measurement line: library, parse time, serialize time, status.
    ///
    /// Accepts `μs` (greek mu), `µs` (micro sign) or plain `us`. The status
    /// symbol is optional; the status word decides pass/fail.
    static ref RECORD_PATTERN: Regex = Regex::new(
        r"(\S+)\s+\|\s+Parse:\s+([\d.]+)\s*(?:μs|µs|us)\s+\|\s+Serialize:\s+([\d.]+)\s*(?:μs|µs|us)\s+\|\s+(?:[✓✔✗✘]\s+)?(?i:(PASS|FAIL))\b"
    )
    .unwrap();
}

/// Outcome the benchmark binary reported for a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    fn from_word(word: &str) -> Self {
        if word.eq_ignore_ascii_case("pass") {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }
}

/// A single observation for one library in one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    library: String,
    parse_time_us: f64,
    serialize_time_us: f64,
    status: Status,
}

impl MeasurementRecord {
    /// Build a record, rejecting empty names and negative or non-finite times.
    pub fn new(
        library: impl Into<String>,
        parse_time_us: f64,
        serialize_time_us: f64,
        status: Status,
    ) -> Option<Self> {
        let library = library.into();
        let valid_time = |t: f64| t.is_finite() && t >= 0.0;

        if library.is_empty() || !valid_time(parse_time_us) || !valid_time(serialize_time_us) {
            return None;
        }

        Some(Self {
            library,
            parse_time_us,
            serialize_time_us,
            status,
        })
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn parse_time_us(&self) -> f64 {
        self.parse_time_us
    }

    pub fn serialize_time_us(&self) -> f64 {
        self.serialize_time_us
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Parse the captured stdout of one invocation.
///
/// Returns records in the order they appear. Never fails: empty or
/// unrecognised output yields an empty vector.
///
/// # Examples
///
/// ```
/// use statbench::parser::{parse_output, Status};
///
/// let records = parse_output("libX | Parse: 100.00 μs | Serialize: 50.00 μs | ✓ PASS\n");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].library(), "libX");
/// assert_eq!(records[0].status(), Status::Pass);
/// ```
pub fn parse_output(output: &str) -> Vec<MeasurementRecord> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<MeasurementRecord> {
    let caps = RECORD_PATTERN.captures(line)?;

    // "1.2.3" matches the pattern but isn't a number; treat the line as noise
    let parse_us = caps[2].parse::<f64>().ok()?;
    let serialize_us = caps[3].parse::<f64>().ok()?;

    MeasurementRecord::new(&caps[1], parse_us, serialize_us, Status::from_word(&caps[4]))
}
