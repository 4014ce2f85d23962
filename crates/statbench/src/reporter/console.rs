//! Console reporter for benchmark results
//!
//! Per-library statistics followed by a ranked comparison table.

use anyhow::Result;
use std::fmt::Write;

use super::ranking::rank_by_parse_median;
use super::BenchmarkReport;
use crate::stats::{Aggregates, DistributionSummary, LibraryStats};

const RULE: &str =
    "════════════════════════════════════════════════════════════════════════════════════════════════════";
const THIN_RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────────────────────────";

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a full report: run metadata, then the statistics
    pub fn format(report: &BenchmarkReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "Binary:      {}", report.binary)?;
        writeln!(output, "Started:     {}", report.started_at)?;
        writeln!(output, "Duration:    {}ms", report.duration_ms)?;
        writeln!(
            output,
            "Iterations:  {} completed of {} (warmup: {})",
            report.completed_iterations, report.iterations, report.warmup
        )?;

        if !report.skipped.is_empty() {
            let skipped: Vec<String> = report.skipped.iter().map(|i| i.to_string()).collect();
            writeln!(output, "Skipped:     {} (failed iterations)", skipped.join(", "))?;
        }

        Self::format_aggregates(&mut output, &report.libraries)?;
        Ok(output)
    }

    /// Format per-library statistics and the comparison table
    pub fn format_aggregates(output: &mut String, aggregates: &Aggregates) -> Result<()> {
        writeln!(output)?;
        writeln!(output, "{}", RULE)?;
        writeln!(output, "STATISTICAL BENCHMARK REPORT")?;
        writeln!(output, "{}", RULE)?;

        if aggregates.is_empty() {
            writeln!(output)?;
            writeln!(output, "No measurement lines matched the expected format.")?;
            writeln!(output, "{}", RULE)?;
            return Ok(());
        }

        for lib in aggregates.sorted_by_name() {
            Self::format_library(output, lib)?;
        }

        writeln!(output)?;
        writeln!(output, "{}", RULE)?;
        Self::format_comparison(output, aggregates)?;
        writeln!(output, "{}", RULE)?;
        Ok(())
    }

    fn format_library(output: &mut String, lib: &LibraryStats) -> Result<()> {
        writeln!(output)?;
        writeln!(output, "{} ({} runs):", lib.library, lib.runs)?;
        writeln!(output, "{}", THIN_RULE)?;

        Self::format_summary(output, "Parse Time (μs)", &lib.parse)?;
        Self::format_summary(output, "Serialize Time (μs)", &lib.serialize)?;

        if lib.failed_runs > 0 {
            writeln!(
                output,
                "  ✗ Reported FAIL in {} of {} runs",
                lib.failed_runs, lib.runs
            )?;
        }
        Ok(())
    }

    fn format_summary(output: &mut String, title: &str, s: &DistributionSummary) -> Result<()> {
        writeln!(output, "  {}:", title)?;
        writeln!(
            output,
            "    Mean:       {:8.2} ± {:6.2} (CV: {:.1}%)",
            s.mean, s.stdev, s.coefficient_of_variation
        )?;
        writeln!(output, "    Median:     {:8.2}", s.median)?;
        writeln!(output, "    95% CI:     [{:8.2}, {:8.2}]", s.ci_low, s.ci_high)?;
        writeln!(
            output,
            "    Percentiles: P50={:7.2}, P95={:7.2}, P99={:7.2}",
            s.p50, s.p95, s.p99
        )?;
        if s.outliers > 0 {
            writeln!(output, "    Outliers:   {} (IQR, kept)", s.outliers)?;
        }
        Ok(())
    }

    fn format_comparison(output: &mut String, aggregates: &Aggregates) -> Result<()> {
        writeln!(output)?;
        writeln!(output, "COMPARISON (Parse Median):")?;
        writeln!(output, "{}", THIN_RULE)?;
        writeln!(
            output,
            "{:<6} {:<20} {:<15} {:<15} Reliability",
            "Rank", "Library", "Median (μs)", "vs Fastest"
        )?;
        writeln!(output, "{}", THIN_RULE)?;

        for entry in rank_by_parse_median(aggregates) {
            writeln!(
                output,
                "{:<6} {:<20} {:>10.2} μs   {:>6.2}x         {} (CV={:.1}%)",
                entry.rank, entry.library, entry.median, entry.ratio, entry.reliability, entry.cv
            )?;
        }
        Ok(())
    }
}

/// Render aggregates as console text, without run metadata
pub fn render_console(aggregates: &Aggregates) -> Result<String> {
    let mut output = String::new();
    ConsoleReporter::format_aggregates(&mut output, aggregates)?;
    Ok(output)
}
