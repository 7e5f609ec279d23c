//! Moments and group summaries.

use crate::constants::QUARTILES;
use crate::result::GroupSummary;
use crate::types::Group;

use super::quantile::{quantile_sorted, sorted_copy};

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (ddof = 1) around a precomputed mean.
///
/// Returns NaN when fewer than two observations are given.
pub fn variance(data: &[f64], mean: f64) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let ss: f64 = data.iter().map(|&x| (x - mean) * (x - mean)).sum();
    ss / (n - 1) as f64
}

/// Sum of squared deviations from the mean.
pub fn sum_of_squares(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum()
}

/// Describe one group: count, mean, std, min, quartiles and max.
///
/// # Panics
///
/// Panics if `data` is empty. [`Sample`](crate::Sample) guarantees it is not.
pub fn summarize(group: Group, data: &[f64]) -> GroupSummary {
    let sorted = sorted_copy(data);
    let [q1, q2, q3] = QUARTILES.map(|p| quantile_sorted(&sorted, p));
    let m = mean(&sorted);

    GroupSummary {
        group,
        count: sorted.len(),
        mean: m,
        std: variance(&sorted, m).sqrt(),
        min: sorted[0],
        q1,
        median: q2,
        q3,
        max: sorted[sorted.len() - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&data);
        assert!((m - 5.0).abs() < 1e-12);
        // Population variance is 4, sample variance is 32/7
        assert!((variance(&data, m) - 32.0 / 7.0).abs() < 1e-12);
        assert!((sum_of_squares(&data) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_single_value_is_nan() {
        assert!(variance(&[1.0], 1.0).is_nan());
    }

    #[test]
    fn test_summarize() {
        let data: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let summary = summarize(Group::Control, &data);
        assert_eq!(summary.count, 10);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 10.0);
        assert!((summary.mean - 5.5).abs() < 1e-12);
        assert!((summary.median - 5.5).abs() < 1e-12);
        assert!((summary.q1 - 3.25).abs() < 1e-12);
        assert!((summary.q3 - 7.75).abs() < 1e-12);
        assert!((summary.std - 3.0276503540974917).abs() < 1e-12);
    }
}
