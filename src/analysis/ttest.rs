//! Independent two-sample t-tests (Student and Welch).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::MIN_VARIANCE_SAMPLES;
use crate::error::{reject_nonfinite, require_len, Error, Result};
use crate::statistics::{mean, student_t_two_sided, variance};

const STUDENT: &str = "Student's t-test";
const WELCH: &str = "Welch's t-test";

/// Statistic, two-sided p-value and degrees of freedom of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestOutcome {
    /// t statistic, positive when the first group has the larger mean.
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Degrees of freedom (fractional for Welch).
    pub df: f64,
}

/// Summary moments of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Mean.
    pub mean: f64,
    /// Sample standard deviation (ddof = 1).
    pub std: f64,
    /// Number of observations.
    pub n: usize,
    /// Every observation is identical.
    #[serde(default)]
    pub constant: bool,
}

impl Moments {
    fn of(procedure: &'static str, data: &[f64]) -> Result<Self> {
        require_len(procedure, data, MIN_VARIANCE_SAMPLES)?;
        reject_nonfinite(data)?;
        let m = mean(data);
        Ok(Self {
            mean: m,
            std: variance(data, m).sqrt(),
            n: data.len(),
            // Rounding in the mean leaves a tiny nonzero std for values
            // such as 0.1, so constancy is read off the data itself.
            constant: data.windows(2).all(|w| w[0] == w[1]),
        })
    }

    /// Moments from published summary statistics.
    ///
    /// A std within one ulp-scale of the mean counts as zero.
    fn from_summary(mean: f64, std: f64, n: usize) -> Self {
        Self {
            mean,
            std,
            n,
            constant: std <= f64::EPSILON * mean.abs(),
        }
    }
}

/// Student's t-test assuming equal population variances.
pub fn student_t(control: &[f64], test: &[f64]) -> Result<TTestOutcome> {
    let a = Moments::of(STUDENT, control)?;
    let b = Moments::of(STUDENT, test)?;
    ttest_from_moments(a, b, true)
}

/// Welch's t-test for unequal population variances.
pub fn welch_t(control: &[f64], test: &[f64]) -> Result<TTestOutcome> {
    let a = Moments::of(WELCH, control)?;
    let b = Moments::of(WELCH, test)?;
    ttest_from_moments(a, b, false)
}

/// t-test from published summary statistics (mean, std with ddof = 1, n).
///
/// Reproduces a decision from a `describe()` table when raw rows are not
/// available.
pub fn ttest_from_stats(
    mean1: f64,
    std1: f64,
    n1: usize,
    mean2: f64,
    std2: f64,
    n2: usize,
    equal_var: bool,
) -> Result<TTestOutcome> {
    let procedure = if equal_var { STUDENT } else { WELCH };
    for (n, std, m) in [(n1, std1, mean1), (n2, std2, mean2)] {
        if n < MIN_VARIANCE_SAMPLES {
            return Err(Error::InsufficientData {
                procedure,
                required: MIN_VARIANCE_SAMPLES,
                actual: n,
            });
        }
        if !m.is_finite() || !std.is_finite() || std < 0.0 {
            return Err(Error::computation(
                procedure,
                format!("invalid summary statistics (mean {m}, std {std})"),
            ));
        }
    }
    ttest_from_moments(
        Moments::from_summary(mean1, std1, n1),
        Moments::from_summary(mean2, std2, n2),
        equal_var,
    )
}

fn ttest_from_moments(a: Moments, b: Moments, equal_var: bool) -> Result<TTestOutcome> {
    let procedure = if equal_var { STUDENT } else { WELCH };

    // A constant group makes the t statistic meaningless even when the
    // pooled variance stays positive.
    for (label, m) in [("control", a), ("test", b)] {
        if m.constant || m.std == 0.0 {
            return Err(Error::computation(
                procedure,
                format!("{label} sample has zero variance"),
            ));
        }
    }

    let (n1, n2) = (a.n as f64, b.n as f64);
    let (v1, v2) = (a.std * a.std, b.std * b.std);

    let (se, df) = if equal_var {
        let df = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
        ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
    } else {
        let (q1, q2) = (v1 / n1, v2 / n2);
        let df = (q1 + q2).powi(2) / (q1 * q1 / (n1 - 1.0) + q2 * q2 / (n2 - 1.0));
        ((q1 + q2).sqrt(), df)
    };

    let statistic = (a.mean - b.mean) / se;
    if !statistic.is_finite() || !df.is_finite() {
        return Err(Error::computation(procedure, "non-finite t statistic"));
    }
    let p_value = student_t_two_sided(statistic, df, procedure)?;

    trace!(statistic, p_value, df, equal_var, "t-test");

    Ok(TTestOutcome {
        statistic,
        p_value,
        df,
    })
}
