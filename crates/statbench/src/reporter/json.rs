//! JSON reporter for benchmark results
//!
//! The persisted document maps each library name to its parse and
//! serialize summaries plus the number of runs behind them:
//!
//! ```json
//! {
//!   "beast_json": {
//!     "parse": { "mean": 1441.7, "median": 1440.0, "stdev": 12.3, "p50": 1440.0,
//!                "p95": 1460.2, "p99": 1463.9, "ci_low": 1436.2, "ci_high": 1447.2,
//!                "cv": 0.85 },
//!     "serialize": { ... },
//!     "runs": 20
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::BenchmarkReport;
use crate::stats::{Aggregates, DistributionSummary};

/// Structured report: library name -> entry
pub type ReportDocument = BTreeMap<String, LibraryEntry>;

/// Both metrics for one library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub parse: MetricEntry,
    pub serialize: MetricEntry,
    /// Sample count behind both summaries
    pub runs: usize,
}

/// Persisted fields of a distribution summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    /// Coefficient of variation in percent
    pub cv: f64,
}

impl From<&DistributionSummary> for MetricEntry {
    fn from(summary: &DistributionSummary) -> Self {
        MetricEntry {
            mean: summary.mean,
            median: summary.median,
            stdev: summary.stdev,
            p50: summary.p50,
            p95: summary.p95,
            p99: summary.p99,
            ci_low: summary.ci_low,
            ci_high: summary.ci_high,
            cv: summary.coefficient_of_variation,
        }
    }
}

/// Build the structured document from aggregates
pub fn render_document(aggregates: &Aggregates) -> ReportDocument {
    aggregates
        .iter()
        .map(|lib| {
            (
                lib.library.clone(),
                LibraryEntry {
                    parse: MetricEntry::from(&lib.parse),
                    serialize: MetricEntry::from(&lib.serialize),
                    runs: lib.runs,
                },
            )
        })
        .collect()
}

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format the report's library mapping as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The benchmark report to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &BenchmarkReport, pretty: bool) -> Result<String> {
        let document = render_document(&report.libraries);
        let output = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(output)
    }

    /// Read a document previously written by this reporter
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<ReportDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed report: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_output;
    use crate::stats::aggregate;
    use pretty_assertions::assert_eq;

    fn create_test_report() -> BenchmarkReport {
        let batches = vec![
            parse_output("beast_json | Parse: 10.0 μs | Serialize: 4.0 μs | ✓ PASS"),
            parse_output("beast_json | Parse: 20.0 μs | Serialize: 5.0 μs | ✓ PASS"),
            parse_output("beast_json | Parse: 30.0 μs | Serialize: 6.0 μs | ✓ PASS"),
        ];
        BenchmarkReport::from_batches("/opt/bench/bench_file_io", &batches)
    }

    #[test]
    fn test_json_format_compact() {
        let report = create_test_report();
        let output = JsonReporter::format(&report, false).unwrap();

        assert!(!output.contains('\n'));
        assert!(output.contains("\"beast_json\":{"));
        assert!(output.contains("\"runs\":3"));
    }

    #[test]
    fn test_json_format_pretty() {
        let report = create_test_report();
        let output = JsonReporter::format(&report, true).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn test_document_field_names() {
        let report = create_test_report();
        let value: serde_json::Value =
            serde_json::from_str(&JsonReporter::format(&report, false).unwrap()).unwrap();

        let parse = &value["beast_json"]["parse"];
        for field in ["mean", "median", "stdev", "p50", "p95", "p99", "ci_low", "ci_high", "cv"] {
            assert!(parse[field].is_f64(), "missing field {}", field);
        }
        assert_eq!(parse["mean"], 20.0);
        assert_eq!(value["beast_json"]["serialize"]["median"], 5.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let report = create_test_report();
        let json = JsonReporter::format(&report, false).unwrap();
        let parsed: ReportDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, render_document(&report.libraries));
    }

    #[test]
    fn test_metric_values_read_back_bit_exact() {
        let entry = MetricEntry {
            mean: 20.0,
            median: 20.0,
            stdev: 10.0,
            p50: 20.0,
            p95: 29.0,
            p99: 29.8,
            ci_low: 3.845299461620749,
            ci_high: 36.15470053837925,
            cv: 50.0,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: MetricEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ci_low.to_bits(), entry.ci_low.to_bits());
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_read_document_missing_file() {
        assert!(JsonReporter::read_document("/no/such/report.json").is_err());
    }

    #[test]
    fn test_empty_aggregates_render_empty_object() {
        let report = BenchmarkReport::from_batches("bench", &[]);
        assert_eq!(JsonReporter::format(&report, false).unwrap(), "{}");
    }
}
