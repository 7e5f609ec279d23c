//! Core value types: samples, group labels and the significance level.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SIGNIFICANCE_LEVEL, EXPLORATORY_SIGNIFICANCE_LEVEL, STRICT_SIGNIFICANCE_LEVEL,
};
use crate::error::{reject_nonfinite, Error, Result};

/// Experimental group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Baseline cohort.
    Control,
    /// Cohort exposed to the new treatment.
    Test,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Control => f.write_str("Control"),
            Group::Test => f.write_str("Test"),
        }
    }
}

/// Repeated measurements of one metric for one group.
///
/// Non-empty, every value finite, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample, validating that it is non-empty and finite.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(Error::InsufficientData {
                procedure: "sample",
                required: 1,
                actual: 0,
            });
        }
        reject_nonfinite(&values)?;
        Ok(Self { values })
    }

    /// Observations in load order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Deref for Sample {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Sample::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Sample::new(values.to_vec())
    }
}

/// Significance level (alpha) for one pipeline invocation.
///
/// Always finite and strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// alpha = 0.01
    pub const STRICT: Self = Self(STRICT_SIGNIFICANCE_LEVEL);
    /// alpha = 0.10
    pub const EXPLORATORY: Self = Self(EXPLORATORY_SIGNIFICANCE_LEVEL);

    /// Validate and wrap an alpha value.
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha.is_finite() && alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(Error::InvalidSignificanceLevel(alpha))
        }
    }

    /// The raw alpha value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when an assumption's null hypothesis is retained (`p > alpha`).
    pub fn retains(self, p_value: f64) -> bool {
        p_value > self.0
    }

    /// True when the null hypothesis is rejected (`p <= alpha`).
    pub fn rejects(self, p_value: f64) -> bool {
        p_value <= self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(DEFAULT_SIGNIFICANCE_LEVEL)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = Error;

    fn try_from(alpha: f64) -> Result<Self> {
        SignificanceLevel::new(alpha)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(level: SignificanceLevel) -> f64 {
        level.0
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rejects_empty_and_nonfinite() {
        assert!(matches!(
            Sample::new(Vec::new()),
            Err(Error::InsufficientData { actual: 0, .. })
        ));
        assert!(matches!(
            Sample::new(vec![1.0, f64::NEG_INFINITY]),
            Err(Error::NonFiniteInput { index: 1, .. })
        ));
        let sample = Sample::new(vec![3.0, 1.0, 2.0]).unwrap();
        assert_eq!(sample.values(), &[3.0, 1.0, 2.0]);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn test_significance_level_bounds() {
        assert!(SignificanceLevel::new(0.05).is_ok());
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(SignificanceLevel::new(bad).is_err(), "{bad} accepted");
        }
        assert_eq!(SignificanceLevel::default().value(), 0.05);
    }

    #[test]
    fn test_retains_and_rejects_are_complementary() {
        let alpha = SignificanceLevel::default();
        for p in [0.0, 0.01, 0.05, 0.050001, 0.5, 1.0] {
            assert_ne!(alpha.retains(p), alpha.rejects(p));
        }
        assert!(alpha.rejects(0.05));
    }

    #[test]
    fn test_significance_level_serde() {
        let json = serde_json::to_string(&SignificanceLevel::default()).unwrap();
        assert_eq!(json, "0.05");
        assert!(serde_json::from_str::<SignificanceLevel>("2.0").is_err());
    }
}
