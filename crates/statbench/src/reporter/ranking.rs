//! Ranked comparison of libraries by parse-time median

use serde::Serialize;

use crate::stats::{Aggregates, Reliability};

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry<'a> {
    /// 1 is the fastest
    pub rank: usize,
    pub library: &'a str,
    /// Parse-time median in microseconds
    pub median: f64,
    /// `median / fastest_median`
    pub ratio: f64,
    /// Parse-time coefficient of variation in percent
    pub cv: f64,
    pub reliability: Reliability,
}

/// Rank libraries by ascending parse-time median.
///
/// The sort is stable, so equal medians keep the aggregates' first-seen
/// order.
///
/// # Examples
///
/// ```
/// use statbench::parser::parse_output;
/// use statbench::reporter::ranking::rank_by_parse_median;
/// use statbench::stats::aggregate;
///
/// let batch = parse_output(
///     "slow | Parse: 20.0 μs | Serialize: 1.0 μs | ✓ PASS\n\
///      fast | Parse: 10.0 μs | Serialize: 1.0 μs | ✓ PASS",
/// );
/// let aggregates = aggregate(&[batch]);
/// let ranking = rank_by_parse_median(&aggregates);
///
/// assert_eq!(ranking[0].library, "fast");
/// assert_eq!(ranking[1].ratio, 2.0);
/// ```
pub fn rank_by_parse_median(aggregates: &Aggregates) -> Vec<RankEntry<'_>> {
    let mut libs: Vec<_> = aggregates.iter().collect();
    libs.sort_by(|a, b| {
        a.parse
            .median
            .partial_cmp(&b.parse.median)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(fastest) = libs.first().map(|l| l.parse.median) else {
        return Vec::new();
    };

    libs.into_iter()
        .enumerate()
        .map(|(i, lib)| RankEntry {
            rank: i + 1,
            library: &lib.library,
            median: lib.parse.median,
            ratio: ratio_to_fastest(lib.parse.median, fastest),
            cv: lib.parse.coefficient_of_variation,
            reliability: lib.parse.reliability(),
        })
        .collect()
}

/// A zero fastest median only ties with other zeros; anything slower is
/// infinitely slower.
fn ratio_to_fastest(median: f64, fastest: f64) -> f64 {
    if fastest > 0.0 {
        median / fastest
    } else if median == 0.0 {
        1.0
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{MeasurementRecord, Status};
    use crate::stats::aggregate;

    fn batch(entries: &[(&str, f64)]) -> Vec<MeasurementRecord> {
        entries
            .iter()
            .map(|&(lib, parse)| MeasurementRecord::new(lib, parse, 1.0, Status::Pass).unwrap())
            .collect()
    }

    #[test]
    fn test_rank_two_libraries() {
        let aggregates = aggregate(&[batch(&[("slow", 20.0), ("fast", 10.0)])]);
        let ranking = rank_by_parse_median(&aggregates);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].library, "fast");
        assert_eq!(ranking[0].ratio, 1.0);
        assert_eq!(ranking[1].rank, 2);
        assert_eq!(ranking[1].library, "slow");
        assert_eq!(ranking[1].ratio, 2.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let aggregates = aggregate(&[batch(&[("zeta", 5.0), ("alpha", 5.0), ("mid", 1.0)])]);
        let names: Vec<_> = rank_by_parse_median(&aggregates)
            .into_iter()
            .map(|e| e.library)
            .collect();

        assert_eq!(names, vec!["mid", "zeta", "alpha"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_by_parse_median(&Aggregates::default()).is_empty());
    }

    #[test]
    fn test_zero_fastest_median() {
        assert_eq!(ratio_to_fastest(0.0, 0.0), 1.0);
        assert_eq!(ratio_to_fastest(3.0, 0.0), f64::INFINITY);
        assert_eq!(ratio_to_fastest(3.0, 1.5), 2.0);
    }

    #[test]
    fn test_reliability_from_parse_cv() {
        let aggregates = aggregate(&[
            batch(&[("noisy", 10.0), ("steady", 100.0)]),
            batch(&[("noisy", 30.0), ("steady", 101.0)]),
        ]);
        let ranking = rank_by_parse_median(&aggregates);

        assert_eq!(ranking[0].library, "noisy");
        assert_eq!(ranking[0].reliability, Reliability::Poor);
        assert_eq!(ranking[1].reliability, Reliability::Excellent);
    }
}
