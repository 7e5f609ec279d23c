//! Step 2: Levene's test for equal variances.
//!
//! Absolute deviations from each group's centre are compared with a one-way
//! ANOVA; the statistic follows F(k - 1, N - k) under the null.

use tracing::trace;

use crate::config::LeveneCenter;
use crate::constants::MIN_VARIANCE_SAMPLES;
use crate::error::{reject_nonfinite, require_len, Error, Result};
use crate::result::AssumptionResult;
use crate::statistics::{f_sf, mean, median, sorted_copy};
use crate::types::SignificanceLevel;

const PROCEDURE: &str = "Levene's test";

/// Levene statistic and p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levene {
    /// F statistic.
    pub statistic: f64,
    /// Upper tail probability of the F distribution.
    pub p_value: f64,
}

/// Run the variance homogeneity check on two samples.
///
/// # Errors
///
/// - [`Error::InsufficientData`] if either sample has fewer than 2 observations
/// - [`Error::NonFiniteInput`] for NaN or infinite values
/// - [`Error::ComputationError`] if the absolute deviations have no spread
///   within either group (every group constant around its centre)
pub fn check_homogeneity(
    control: &[f64],
    test: &[f64],
    center: LeveneCenter,
    alpha: SignificanceLevel,
) -> Result<AssumptionResult> {
    let levene = levene(&[control, test], center)?;
    Ok(AssumptionResult::new(levene.statistic, levene.p_value, alpha))
}

/// Levene's test over any number of groups.
pub fn levene(groups: &[&[f64]], center: LeveneCenter) -> Result<Levene> {
    if groups.len() < 2 {
        return Err(Error::InsufficientData {
            procedure: PROCEDURE,
            required: 2,
            actual: groups.len(),
        });
    }
    for group in groups {
        require_len(PROCEDURE, group, MIN_VARIANCE_SAMPLES)?;
        reject_nonfinite(group)?;
    }

    let center = center.validate()?;
    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|group| absolute_deviations(group, center))
        .collect();

    let k = deviations.len() as f64;
    let total: usize = deviations.iter().map(Vec::len).sum();
    let n_total = total as f64;

    let group_means: Vec<f64> = deviations.iter().map(|z| mean(z)).collect();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / n_total;

    let between: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, &zm)| z.len() as f64 * (zm - grand_mean).powi(2))
        .sum();
    let within: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, &zm)| z.iter().map(|&v| (v - zm).powi(2)).sum::<f64>())
        .sum();

    if within <= 0.0 {
        return Err(Error::computation(
            PROCEDURE,
            "absolute deviations are constant within every group",
        ));
    }

    let d1 = k - 1.0;
    let d2 = n_total - k;
    let statistic = (d2 * between) / (d1 * within);
    let p_value = f_sf(statistic, d1, d2, PROCEDURE)?;

    if !statistic.is_finite() || !p_value.is_finite() {
        return Err(Error::computation(PROCEDURE, "non-finite statistic"));
    }

    trace!(statistic, p_value, d1, d2, "levene");

    Ok(Levene { statistic, p_value })
}

fn absolute_deviations(group: &[f64], center: LeveneCenter) -> Vec<f64> {
    let (values, c) = match center {
        LeveneCenter::Mean => (group.to_vec(), mean(group)),
        LeveneCenter::Median => (group.to_vec(), median(group)),
        LeveneCenter::Trimmed(proportion) => {
            let trimmed = trim_both(group, proportion);
            let c = mean(&trimmed);
            (trimmed, c)
        }
    };
    values.iter().map(|&v| (v - c).abs()).collect()
}

/// Sort and drop `floor(proportion * n)` observations from each end.
///
/// `proportion` must already be validated to lie in [0, 0.5).
fn trim_both(group: &[f64], proportion: f64) -> Vec<f64> {
    let sorted = sorted_copy(group);
    let cut = (proportion * sorted.len() as f64).floor() as usize;
    sorted[cut..sorted.len() - cut].to_vec()
}
