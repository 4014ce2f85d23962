//! Distribution summaries for one (library, metric) sample set.

use serde::{Deserialize, Serialize};

use super::outliers::count_outliers;
use super::percentiles::{median_of_sorted, percentile_of_sorted, sorted};

/// t-value used for the 95% interval once the normal approximation holds.
pub const T_LARGE_SAMPLE: f64 = 1.96;

/// t-value used for small samples. A fixed approximation, not a Student-t
/// lookup; keeps intervals reproducible across runs and tools.
pub const T_SMALL_SAMPLE: f64 = 2.0;

/// Sample counts above this use [`T_LARGE_SAMPLE`].
pub const LARGE_SAMPLE_THRESHOLD: usize = 30;

/// Full statistical characterization of one metric's samples.
///
/// Built once from a complete sample set and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Samples in ascending order
    pub samples: Vec<f64>,
    /// Number of samples
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator), 0 for a single sample
    pub stdev: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    /// Lower bound of the 95% confidence interval of the mean
    pub ci_low: f64,
    /// Upper bound of the 95% confidence interval of the mean
    pub ci_high: f64,
    /// stdev / mean as a percentage, 0 when the mean is 0
    pub coefficient_of_variation: f64,
    /// IQR outliers (informational; nothing is removed)
    pub outliers: usize,
}

impl DistributionSummary {
    /// Compute the summary from samples in any order.
    ///
    /// # Returns
    ///
    /// * `Some(summary)` - Statistical summary
    /// * `None` - If samples is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use statbench::stats::DistributionSummary;
    ///
    /// let summary = DistributionSummary::from_samples(&[30.0, 10.0, 20.0]).unwrap();
    /// assert_eq!(summary.mean, 20.0);
    /// assert_eq!(summary.median, 20.0);
    /// assert_eq!(summary.stdev, 10.0);
    /// assert_eq!(summary.ci_low, 20.0 - 2.0 * 10.0 / 3f64.sqrt());
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let samples = sorted(samples);
        let n = samples.len();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let median = median_of_sorted(&samples)?;

        let stdev = if n > 1 {
            let squared_diffs: f64 = samples.iter().map(|&x| (x - mean).powi(2)).sum();
            (squared_diffs / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let p50 = percentile_of_sorted(&samples, 50.0)?;
        let p95 = percentile_of_sorted(&samples, 95.0)?;
        let p99 = percentile_of_sorted(&samples, 99.0)?;

        let (ci_low, ci_high) = if n > 1 {
            let margin = t_value(n) * stdev / (n as f64).sqrt();
            (mean - margin, mean + margin)
        } else {
            (mean, mean)
        };

        let coefficient_of_variation = if mean > 0.0 {
            stdev / mean * 100.0
        } else {
            0.0
        };

        let outliers = count_outliers(&samples);

        Some(Self {
            samples,
            n,
            mean,
            median,
            stdev,
            p50,
            p95,
            p99,
            ci_low,
            ci_high,
            coefficient_of_variation,
            outliers,
        })
    }

    /// Half-width of the 95% confidence interval.
    pub fn margin(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }

    /// Reliability class derived from the coefficient of variation.
    pub fn reliability(&self) -> Reliability {
        Reliability::from_cv(self.coefficient_of_variation)
    }
}

/// t-value for a 95% interval over `n` samples.
pub fn t_value(n: usize) -> f64 {
    if n > LARGE_SAMPLE_THRESHOLD {
        T_LARGE_SAMPLE
    } else {
        T_SMALL_SAMPLE
    }
}

/// How trustworthy a measurement is, judged by its CV (in percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reliability {
    /// CV below 5%
    Excellent,
    /// CV below 10%
    Good,
    /// CV below 20%
    Fair,
    Poor,
}

impl Reliability {
    pub fn from_cv(cv_percent: f64) -> Self {
        if cv_percent < 5.0 {
            Reliability::Excellent
        } else if cv_percent < 10.0 {
            Reliability::Good
        } else if cv_percent < 20.0 {
            Reliability::Fair
        } else {
            Reliability::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Reliability::Excellent => "Excellent",
            Reliability::Good => "Good",
            Reliability::Fair => "Fair",
            Reliability::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Reliability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_empty() {
        assert!(DistributionSummary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_summary_single_sample() {
        let summary = DistributionSummary::from_samples(&[42.0]).unwrap();

        assert_eq!(summary.n, 1);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.stdev, 0.0);
        assert_eq!(summary.ci_low, 42.0);
        assert_eq!(summary.ci_high, 42.0);
        assert_eq!(summary.p99, 42.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_summary_three_samples() {
        let summary = DistributionSummary::from_samples(&[10.0, 20.0, 30.0]).unwrap();

        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.p50, 20.0);
        assert!(summary.stdev > 0.0);
        assert_eq!(summary.stdev, 10.0);
        assert!((summary.coefficient_of_variation - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_sample_std_dev() {
        let samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = DistributionSummary::from_samples(&samples).unwrap();

        assert_eq!(summary.mean, 5.0);
        // sum of squared diffs = 32, n - 1 = 7
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((summary.stdev - expected).abs() < 1e-10);
    }

    #[test]
    fn test_small_sample_interval_uses_two() {
        let samples: Vec<f64> = (1..=30).map(f64::from).collect();
        let summary = DistributionSummary::from_samples(&samples).unwrap();

        let expected = 2.0 * summary.stdev / 30f64.sqrt();
        assert!((summary.margin() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_large_sample_interval_uses_normal_approximation() {
        let samples: Vec<f64> = (1..=31).map(f64::from).collect();
        let summary = DistributionSummary::from_samples(&samples).unwrap();

        let expected = 1.96 * summary.stdev / 31f64.sqrt();
        assert!((summary.margin() - expected).abs() < 1e-9);
        assert!(summary.ci_low <= summary.mean && summary.mean <= summary.ci_high);
    }

    #[test]
    fn test_zero_mean_cv_is_zero() {
        let summary = DistributionSummary::from_samples(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_samples_kept_sorted() {
        let summary = DistributionSummary::from_samples(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.samples, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_outliers_counted_not_removed() {
        let summary = DistributionSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(summary.outliers, 1);
        assert_eq!(summary.n, 6);
    }

    #[test]
    fn test_reliability_thresholds() {
        assert_eq!(Reliability::from_cv(0.0), Reliability::Excellent);
        assert_eq!(Reliability::from_cv(4.99), Reliability::Excellent);
        assert_eq!(Reliability::from_cv(5.0), Reliability::Good);
        assert_eq!(Reliability::from_cv(9.99), Reliability::Good);
        assert_eq!(Reliability::from_cv(10.0), Reliability::Fair);
        assert_eq!(Reliability::from_cv(19.99), Reliability::Fair);
        assert_eq!(Reliability::from_cv(20.0), Reliability::Poor);
        assert_eq!(Reliability::Poor.to_string(), "Poor");
    }
}
