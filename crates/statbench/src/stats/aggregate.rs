//! Grouping of iteration batches into per-library summaries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::summary::DistributionSummary;
use crate::parser::MeasurementRecord;

/// Records produced by one invocation of the benchmark binary.
pub type IterationBatch = Vec<MeasurementRecord>;

/// Which timing a summary describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Parse,
    Serialize,
}

/// Parse and serialize summaries for one library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub library: String,
    pub parse: DistributionSummary,
    pub serialize: DistributionSummary,
    /// Number of batches this library appeared in
    pub runs: usize,
    /// How many of those records reported FAIL
    pub failed_runs: usize,
}

impl LibraryStats {
    pub fn metric(&self, metric: Metric) -> &DistributionSummary {
        match metric {
            Metric::Parse => &self.parse,
            Metric::Serialize => &self.serialize,
        }
    }
}

/// Per-library statistics in first-seen order.
///
/// Libraries keep the order in which they first appeared in the batches.
/// Ranking relies on this to break ties deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    libraries: Vec<LibraryStats>,
}

impl Aggregates {
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Libraries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &LibraryStats> {
        self.libraries.iter()
    }

    pub fn get(&self, library: &str) -> Option<&LibraryStats> {
        self.libraries.iter().find(|l| l.library == library)
    }

    /// Libraries sorted by name (byte order, case-sensitive)
    pub fn sorted_by_name(&self) -> Vec<&LibraryStats> {
        let mut libs: Vec<_> = self.libraries.iter().collect();
        libs.sort_by(|a, b| a.library.cmp(&b.library));
        libs
    }
}

/// Samples gathered for one library while folding batches.
#[derive(Default)]
struct Accumulator {
    parse: Vec<f64>,
    serialize: Vec<f64>,
    failed: usize,
}

/// Group measurement records by library and summarize each metric.
///
/// Libraries missing from some batches just have fewer samples. A library
/// that never produced a record does not appear at all.
///
/// # Examples
///
/// ```
/// use statbench::parser::parse_output;
/// use statbench::stats::aggregate;
///
/// let batches = vec![
///     parse_output("a | Parse: 10.0 μs | Serialize: 1.0 μs | ✓ PASS"),
///     parse_output("a | Parse: 30.0 μs | Serialize: 3.0 μs | ✓ PASS"),
/// ];
/// let aggregates = aggregate(&batches);
/// assert_eq!(aggregates.get("a").unwrap().parse.mean, 20.0);
/// ```
pub fn aggregate(batches: &[IterationBatch]) -> Aggregates {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Accumulator> = HashMap::new();

    for batch in batches {
        for record in batch {
            let acc = groups.entry(record.library().to_string()).or_insert_with(|| {
                order.push(record.library().to_string());
                Accumulator::default()
            });
            acc.parse.push(record.parse_time_us());
            acc.serialize.push(record.serialize_time_us());
            if !record.status().is_pass() {
                acc.failed += 1;
            }
        }
    }

    let libraries = order
        .into_iter()
        .filter_map(|library| {
            let acc = groups.remove(&library)?;
            let parse = DistributionSummary::from_samples(&acc.parse)?;
            let serialize = DistributionSummary::from_samples(&acc.serialize)?;
            Some(LibraryStats {
                runs: parse.n,
                failed_runs: acc.failed,
                library,
                parse,
                serialize,
            })
        })
        .collect();

    Aggregates { libraries }
}
