//! Mann-Whitney U rank-sum test (two-sided).
//!
//! The exact null distribution of U is the coefficient sequence of the
//! Gaussian binomial `[n1 + n2 choose n1]_q`; it is built incrementally so
//! every intermediate polynomial has non-negative integer coefficients.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::MannWhitneyMethod;
use crate::constants::MANN_WHITNEY_EXACT_MAX;
use crate::error::{reject_nonfinite, require_len, Error, Result};
use crate::statistics::{normal_sf, rank_average};

const PROCEDURE: &str = "Mann-Whitney U test";

/// How the p-value was actually computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PValueMethod {
    /// Exact permutation distribution.
    Exact,
    /// Normal approximation.
    Asymptotic,
}

/// Result of a Mann-Whitney U test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitneyOutcome {
    /// U statistic of the first (Control) sample.
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Method used for the p-value.
    pub method: PValueMethod,
}

/// Run the two-sided Mann-Whitney U test.
///
/// # Errors
///
/// - [`Error::InsufficientData`] if either sample is empty
/// - [`Error::NonFiniteInput`] for NaN or infinite values
/// - [`Error::ComputationError`] if every observation is tied, which leaves
///   the normal approximation with zero variance
pub fn mann_whitney_u(
    control: &[f64],
    test: &[f64],
    method: MannWhitneyMethod,
    continuity: bool,
) -> Result<MannWhitneyOutcome> {
    require_len(PROCEDURE, control, 1)?;
    require_len(PROCEDURE, test, 1)?;
    reject_nonfinite(control)?;
    reject_nonfinite(test)?;

    let n1 = control.len();
    let n2 = test.len();

    let pooled: Vec<f64> = control.iter().chain(test).copied().collect();
    let ranking = rank_average(&pooled);
    let rank_sum: f64 = ranking.ranks[..n1].iter().sum();

    let u1 = rank_sum - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u_max = u1.max(u2);

    let method = match method {
        MannWhitneyMethod::Exact => PValueMethod::Exact,
        MannWhitneyMethod::Asymptotic => PValueMethod::Asymptotic,
        MannWhitneyMethod::Auto => {
            if n1.min(n2) <= MANN_WHITNEY_EXACT_MAX && !ranking.has_ties() {
                PValueMethod::Exact
            } else {
                PValueMethod::Asymptotic
            }
        }
    };

    let p_value = match method {
        PValueMethod::Exact => exact_p_value(u_max, n1, n2),
        PValueMethod::Asymptotic => {
            let n = (n1 + n2) as f64;
            let (n1f, n2f) = (n1 as f64, n2 as f64);
            let variance =
                n1f * n2f / 12.0 * ((n + 1.0) - ranking.tie_term() / (n * (n - 1.0)));
            if variance.is_nan() || variance <= 0.0 {
                return Err(Error::computation(
                    PROCEDURE,
                    "all observations are tied; the normal approximation is degenerate",
                ));
            }
            let correction = if continuity { 0.5 } else { 0.0 };
            let z = (u_max - n1f * n2f / 2.0 - correction) / variance.sqrt();
            (2.0 * normal_sf(z)).min(1.0)
        }
    };

    if !p_value.is_finite() {
        return Err(Error::computation(PROCEDURE, "non-finite p-value"));
    }

    trace!(u1, p_value, ?method, "mann-whitney");

    Ok(MannWhitneyOutcome {
        statistic: u1,
        p_value,
        method,
    })
}

/// Two-sided exact p-value `2 * P(U >= u)`, capped at 1.
fn exact_p_value(u: f64, n1: usize, n2: usize) -> f64 {
    let counts = u_distribution(n1, n2);
    let total: f64 = counts.iter().sum();
    let start = (u.ceil() as usize).min(counts.len());
    let upper: f64 = counts[start..].iter().sum();
    (2.0 * upper / total).min(1.0)
}

/// Number of arrangements giving each U value 0..=n1*n2.
fn u_distribution(n1: usize, n2: usize) -> Vec<f64> {
    let m = n1.min(n2);
    let n = n1 + n2;
    let len = m * (n - m) + 1;

    let mut c = vec![0.0; len];
    c[0] = 1.0;
    for i in 1..=m {
        // multiply by (1 - q^(n - m + i))
        let a = n - m + i;
        for k in (a..len).rev() {
            c[k] -= c[k - a];
        }
        // divide by (1 - q^i)
        for k in i..len {
            c[k] += c[k - i];
        }
    }
    c
}
