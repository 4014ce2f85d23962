//! Outlier diagnostics for timing samples.
//!
//! Uses the Interquartile Range (IQR) method. Detection is informational:
//! the summaries never drop samples, so every invocation keeps its weight.

use super::percentiles::percentile_of_sorted;

/// Minimum sample count for a meaningful IQR fence.
const MIN_SAMPLES: usize = 4;

/// IQR fences and the samples falling outside them.
///
/// Outliers are points outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
    /// Lower fence (Q1 - 1.5*IQR)
    pub lower_fence: f64,
    /// Upper fence (Q3 + 1.5*IQR)
    pub upper_fence: f64,
}

impl OutlierReport {
    /// Detect outliers in ascending-sorted samples.
    ///
    /// Returns `None` when there are fewer than four samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use statbench::stats::outliers::OutlierReport;
    ///
    /// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
    /// let report = OutlierReport::detect(&data).unwrap();
    /// assert_eq!(report.outliers, vec![100.0]);
    /// ```
    pub fn detect(sorted: &[f64]) -> Option<Self> {
        if sorted.len() < MIN_SAMPLES {
            return None;
        }

        let q1 = percentile_of_sorted(sorted, 25.0)?;
        let q3 = percentile_of_sorted(sorted, 75.0)?;
        let iqr = q3 - q1;

        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(Self {
            outliers,
            lower_fence,
            upper_fence,
        })
    }

    pub fn count(&self) -> usize {
        self.outliers.len()
    }
}

/// Number of IQR outliers, zero when there are too few samples to tell.
pub fn count_outliers(sorted: &[f64]) -> usize {
    OutlierReport::detect(sorted).map_or(0, |r| r.count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_samples() {
        assert!(OutlierReport::detect(&[]).is_none());
        assert!(OutlierReport::detect(&[1.0, 2.0, 300.0]).is_none());
        assert_eq!(count_outliers(&[1.0, 2.0, 300.0]), 0);
    }

    #[test]
    fn test_no_outliers_in_tight_data() {
        let data = [10.0, 10.5, 11.0, 11.5, 12.0];
        let report = OutlierReport::detect(&data).unwrap();
        assert_eq!(report.count(), 0);
        assert!(report.lower_fence < 10.0);
        assert!(report.upper_fence > 12.0);
    }

    #[test]
    fn test_detects_both_tails() {
        let data = [-50.0, 10.0, 11.0, 12.0, 13.0, 14.0, 200.0];
        let report = OutlierReport::detect(&data).unwrap();
        assert_eq!(report.outliers, vec![-50.0, 200.0]);
    }

    #[test]
    fn test_identical_samples() {
        let data = [5.0; 8];
        assert_eq!(count_outliers(&data), 0);
    }
}
