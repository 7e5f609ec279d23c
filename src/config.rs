//! Configuration for the hypothesis test pipeline.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TRIM_PROPORTION;
use crate::error::{Error, Result};
use crate::types::SignificanceLevel;

/// Configuration options for [`HypothesisTest`](crate::HypothesisTest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Alpha used by the assumption checks and the final decision (default: 0.05).
    pub significance_level: SignificanceLevel,

    /// Centre used for absolute deviations in Levene's test (default: median).
    pub levene_center: LeveneCenter,

    /// How the Mann-Whitney p-value is computed (default: auto).
    pub mann_whitney_method: MannWhitneyMethod,

    /// Apply the 0.5 continuity correction to the Mann-Whitney normal
    /// approximation (default: true).
    pub continuity_correction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            significance_level: SignificanceLevel::default(),
            levene_center: LeveneCenter::Median,
            mann_whitney_method: MannWhitneyMethod::Auto,
            continuity_correction: true,
        }
    }
}

/// Centre for Levene's absolute deviations.
///
/// Deserialization rejects a trim proportion outside [0, 0.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LeveneCenterRepr")]
pub enum LeveneCenter {
    /// Group mean (Levene's original test).
    Mean,
    /// Group median (Brown-Forsythe). Robust to skewed data.
    Median,
    /// Mean after trimming this proportion from both ends of each group.
    Trimmed(f64),
}

impl Default for LeveneCenter {
    fn default() -> Self {
        Self::Median
    }
}

impl LeveneCenter {
    /// Trimmed centre with the default 5% proportion.
    pub fn trimmed() -> Self {
        Self::Trimmed(DEFAULT_TRIM_PROPORTION)
    }

    /// Trimmed centre cutting `proportion` from each end.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTrimProportion`] unless `0 <= proportion < 0.5`.
    pub fn trimmed_by(proportion: f64) -> Result<Self> {
        Self::Trimmed(proportion).validate()
    }

    /// Check the trim proportion of a directly built value.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Trimmed(p) if !(0.0..0.5).contains(&p) => Err(Error::InvalidTrimProportion(p)),
            center => Ok(center),
        }
    }
}

#[derive(Deserialize)]
enum LeveneCenterRepr {
    Mean,
    Median,
    Trimmed(f64),
}

impl TryFrom<LeveneCenterRepr> for LeveneCenter {
    type Error = Error;

    fn try_from(repr: LeveneCenterRepr) -> Result<Self> {
        let center = match repr {
            LeveneCenterRepr::Mean => Self::Mean,
            LeveneCenterRepr::Median => Self::Median,
            LeveneCenterRepr::Trimmed(p) => Self::Trimmed(p),
        };
        center.validate()
    }
}

/// Computation method for the Mann-Whitney U p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MannWhitneyMethod {
    /// Exact distribution for small tie-free samples, normal approximation otherwise.
    Auto,
    /// Always use the exact null distribution (ties are ignored by the exact counts).
    Exact,
    /// Always use the tie-corrected normal approximation.
    Asymptotic,
}

impl Default for MannWhitneyMethod {
    fn default() -> Self {
        Self::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.significance_level.value(), 0.05);
        assert_eq!(config.levene_center, LeveneCenter::Median);
        assert_eq!(config.mann_whitney_method, MannWhitneyMethod::Auto);
        assert!(config.continuity_correction);
    }

    #[test]
    fn test_trimmed_by() {
        assert_eq!(LeveneCenter::trimmed_by(0.0).unwrap(), LeveneCenter::Trimmed(0.0));
        assert_eq!(LeveneCenter::trimmed_by(0.1).unwrap(), LeveneCenter::Trimmed(0.1));
        for p in [-0.01, 0.5, 0.7, f64::INFINITY] {
            assert!(matches!(
                LeveneCenter::trimmed_by(p),
                Err(Error::InvalidTrimProportion(_))
            ));
        }
    }

    #[test]
    fn test_deserialize_rejects_bad_trim() {
        let err = serde_json::from_str::<LeveneCenter>(r#"{"Trimmed":0.7}"#).unwrap_err();
        assert!(err.to_string().contains("trim proportion"));

        let center: LeveneCenter = serde_json::from_str(r#"{"Trimmed":0.2}"#).unwrap();
        assert_eq!(center, LeveneCenter::Trimmed(0.2));
        let center: LeveneCenter = serde_json::from_str(r#""Median""#).unwrap();
        assert_eq!(center, LeveneCenter::Median);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config {
            levene_center: LeveneCenter::trimmed(),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);

        let bad = json.replace("0.05}", "0.6}");
        assert!(serde_json::from_str::<Config>(&bad).is_err());
    }
}
