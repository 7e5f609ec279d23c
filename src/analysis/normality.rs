//! Step 1: Shapiro-Wilk normality check.
//!
//! Implements Royston's (1995) algorithm AS R94:
//! - Coefficients from expected normal order statistics (Blom scores), with
//!   polynomial corrections for the one or two most extreme coefficients
//! - Exact p-value for n = 3
//! - Log-normal approximation of `1 - W` for 4 <= n <= 11 and for n >= 12

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use tracing::trace;

use crate::constants::{MAX_NORMALITY_SAMPLES, MIN_NORMALITY_SAMPLES, ZERO_RANGE};
use crate::error::{reject_nonfinite, require_len, Result};
use crate::result::AssumptionResult;
use crate::statistics::{normal_ppf, normal_sf, sorted_copy, sum_of_squares};
use crate::types::SignificanceLevel;

const PROCEDURE: &str = "Shapiro-Wilk test";

// Royston (1995) polynomial coefficients
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const GAMMA: [f64; 2] = [-2.273, 0.459];

/// Shapiro-Wilk statistic and p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// W statistic in (0, 1].
    pub w: f64,
    /// Probability of a W this small under normality.
    pub p_value: f64,
}

/// Run the normality check on one sample.
///
/// `holds` is true when the p-value exceeds `alpha`, i.e. normality is
/// not rejected.
///
/// # Errors
///
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) for fewer than 3 observations
/// - [`Error::NonFiniteInput`](crate::Error::NonFiniteInput) for NaN or infinite values
pub fn check_normality(sample: &[f64], alpha: SignificanceLevel) -> Result<AssumptionResult> {
    let sw = shapiro_wilk(sample)?;
    let mut result = AssumptionResult::new(sw.w, sw.p_value, alpha);

    if sample.len() > MAX_NORMALITY_SAMPLES {
        result = result.with_note(format!(
            "p-value may be inaccurate for n > {} (n = {})",
            MAX_NORMALITY_SAMPLES,
            sample.len()
        ));
    } else if sw.w == 1.0 && sw.p_value == 1.0 && is_constant(sample) {
        result = result.with_note("sample has zero range");
    }

    Ok(result)
}

/// Compute the Shapiro-Wilk W statistic and its p-value.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk> {
    require_len(PROCEDURE, sample, MIN_NORMALITY_SAMPLES)?;
    reject_nonfinite(sample)?;

    let n = sample.len();
    let sorted = sorted_copy(sample);

    if sorted[n - 1] - sorted[0] < ZERO_RANGE {
        return Ok(ShapiroWilk {
            w: 1.0,
            p_value: 1.0,
        });
    }

    let a = coefficients(n);
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();
    let w = (numerator * numerator / sum_of_squares(&sorted)).min(1.0);
    let p_value = p_value(w, n);

    trace!(n, w, p_value, "shapiro-wilk");

    Ok(ShapiroWilk { w, p_value })
}

/// Antisymmetric half of the Shapiro-Wilk weight vector, largest first.
fn coefficients(n: usize) -> Vec<f64> {
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }

    let half = n / 2;
    let an = n as f64;
    let an25 = an + 0.25;

    // Expected lower order statistics (negative)
    let m: Vec<f64> = (1..=half)
        .map(|i| normal_ppf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let mut a = vec![0.0; half];
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    a[0] = a1;

    let (first, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };

    for (ai, mi) in a.iter_mut().zip(&m).skip(first) {
        *ai = -mi / fac;
    }
    a
}

fn p_value(w: f64, n: usize) -> f64 {
    if w >= 1.0 {
        return 1.0;
    }

    if n == 3 {
        // Exact: 6/pi * (asin(sqrt(W)) - asin(sqrt(3/4)))
        let p = 6.0 / PI * (w.sqrt().asin() - PI / 3.0);
        return p.clamp(0.0, 1.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();

    let (m, s) = if n <= 11 {
        let gamma = poly(&GAMMA, an);
        if y >= gamma {
            return 0.0;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    normal_sf((y - m) / s)
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + ...`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &coef| acc * x + coef)
}

fn is_constant(sample: &[f64]) -> bool {
    sample.windows(2).all(|w| w[0] == w[1])
}
