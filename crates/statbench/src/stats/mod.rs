//! Statistical analysis of benchmark results
//!
//! This module groups measurement records per library and computes
//! distribution summaries: mean, median, sample standard deviation,
//! interpolated percentiles, a 95% confidence interval and the
//! coefficient of variation.
//!
//! # Examples
//!
//! ```
//! use statbench::stats::{DistributionSummary, Reliability};
//!
//! let summary = DistributionSummary::from_samples(&[100.0, 102.0, 98.0, 101.0]).unwrap();
//! assert!(summary.ci_low <= summary.mean && summary.mean <= summary.ci_high);
//! assert_eq!(summary.reliability(), Reliability::Excellent);
//! ```

pub mod aggregate;
pub mod outliers;
pub mod percentiles;
pub mod summary;

pub use aggregate::{aggregate, Aggregates, IterationBatch, LibraryStats, Metric};
pub use outliers::OutlierReport;
pub use percentiles::{percentile, percentile_of_sorted};
pub use summary::{DistributionSummary, Reliability};
