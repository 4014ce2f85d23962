//! Order statistics over timing samples.
//!
//! All functions here use linear interpolation between the two nearest
//! ranks: for percentile `p` over `n` sorted samples the rank is
//! `k = (n - 1) * p / 100`.

/// Sort samples ascending (IEEE total order, so NaN sorts last).
pub fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculate a percentile from already-sorted samples.
///
/// # Returns
///
/// * `Some(value)` - The interpolated percentile
/// * `None` - If samples is empty or p is outside 0..=100
///
/// # Examples
///
/// ```
/// use statbench::stats::percentiles::percentile_of_sorted;
///
/// let data = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentile_of_sorted(&data, 50.0), Some(25.0));
/// ```
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        Some(lower_value + fraction * (upper_value - lower_value))
    }
}

/// Calculate a percentile from unsorted samples.
///
/// # Examples
///
/// ```
/// use statbench::stats::percentiles::percentile;
///
/// let data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    percentile_of_sorted(&sorted(samples), p)
}

/// Median of sorted samples: the middle value, or the mean of the two
/// middle values for an even count.
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}
