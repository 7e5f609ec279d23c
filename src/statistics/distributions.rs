//! Tail probabilities of the reference distributions.
//!
//! Thin wrappers over `statrs` that turn constructor failures into
//! [`Error::ComputationError`] instead of panicking.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use crate::error::{Error, Result};

fn standard_normal() -> Normal {
    // Parameters are constant and valid.
    Normal::standard()
}

/// Upper tail P(Z > z) of the standard normal.
pub fn normal_sf(z: f64) -> f64 {
    standard_normal().sf(z)
}

/// Standard normal quantile function.
pub fn normal_ppf(p: f64) -> f64 {
    standard_normal().inverse_cdf(p)
}

/// Two-sided p-value `2 * P(T > |t|)` for Student's t with `df` degrees of freedom.
pub fn student_t_two_sided(t: f64, df: f64, procedure: &'static str) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|err| {
        Error::computation(procedure, format!("invalid degrees of freedom {df}: {err}"))
    })?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// Upper tail P(F > f) for the F distribution with (`d1`, `d2`) degrees of freedom.
pub fn f_sf(f: f64, d1: f64, d2: f64, procedure: &'static str) -> Result<f64> {
    let dist = FisherSnedecor::new(d1, d2).map_err(|err| {
        Error::computation(
            procedure,
            format!("invalid degrees of freedom ({d1}, {d2}): {err}"),
        )
    })?;
    Ok(dist.sf(f))
}
