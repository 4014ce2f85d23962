//! Markdown reporter for benchmark results

use anyhow::Result;
use std::fmt::Write;

use super::ranking::rank_by_parse_median;
use super::BenchmarkReport;
use crate::stats::Metric;

/// Markdown format reporter
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Format a report as Markdown tables
    pub fn format(report: &BenchmarkReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "# Benchmark Report")?;
        writeln!(output)?;
        writeln!(output, "- **Binary:** `{}`", report.binary)?;
        writeln!(output, "- **Started:** {}", report.started_at)?;
        writeln!(
            output,
            "- **Iterations:** {} completed of {} (warmup: {})",
            report.completed_iterations, report.iterations, report.warmup
        )?;
        if !report.skipped.is_empty() {
            writeln!(output, "- **Skipped:** {:?}", report.skipped)?;
        }
        writeln!(output)?;

        if report.libraries.is_empty() {
            writeln!(output, "_No measurements collected._")?;
            return Ok(output);
        }

        writeln!(output, "## Comparison (parse median)")?;
        writeln!(output)?;
        writeln!(output, "| Rank | Library | Median (μs) | vs Fastest | Reliability |")?;
        writeln!(output, "|-----:|---------|------------:|-----------:|-------------|")?;
        for entry in rank_by_parse_median(&report.libraries) {
            writeln!(
                output,
                "| {} | {} | {:.2} | {:.2}x | {} (CV={:.1}%) |",
                entry.rank, entry.library, entry.median, entry.ratio, entry.reliability, entry.cv
            )?;
        }
        writeln!(output)?;

        for (title, metric) in [("Parse", Metric::Parse), ("Serialize", Metric::Serialize)] {
            writeln!(output, "## {} time (μs)", title)?;
            writeln!(output)?;
            writeln!(
                output,
                "| Library | Runs | Mean | Stdev | CV % | Median | 95% CI | P95 | P99 |"
            )?;
            writeln!(
                output,
                "|---------|-----:|-----:|------:|-----:|-------:|--------|----:|----:|"
            )?;
            for lib in report.libraries.sorted_by_name() {
                let s = lib.metric(metric);
                writeln!(
                    output,
                    "| {} | {} | {:.2} | {:.2} | {:.1} | {:.2} | [{:.2}, {:.2}] | {:.2} | {:.2} |",
                    lib.library,
                    s.n,
                    s.mean,
                    s.stdev,
                    s.coefficient_of_variation,
                    s.median,
                    s.ci_low,
                    s.ci_high,
                    s.p95,
                    s.p99
                )?;
            }
            writeln!(output)?;
        }

        Ok(output)
    }
}
