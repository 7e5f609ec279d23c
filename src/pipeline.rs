//! Main `HypothesisTest` entry point and builder.

use tracing::{debug, debug_span};

use crate::analysis::{check_homogeneity, check_normality, execute_test, select_test};
use crate::config::{Config, LeveneCenter, MannWhitneyMethod};
use crate::error::Result;
use crate::result::{AbTestReport, Stage, TestDecision};
use crate::statistics::summarize;
use crate::types::{Group, Sample, SignificanceLevel};

/// Assumption-checked two-sample comparison.
///
/// Runs the linear pipeline
/// `Loaded → NormalityChecked → HomogeneityChecked → TestSelected → Executed → Decided`
/// and returns exactly one decision, or the first error encountered.
///
/// # Example
///
/// ```
/// use ab_oracle::{HypothesisTest, TestProcedure};
///
/// let control = [19.1, 20.3, 21.5, 22.0, 18.7, 20.9, 21.2, 19.8];
/// let test = [22.4, 23.1, 21.8, 24.0, 22.9, 23.5, 22.2];
///
/// let report = HypothesisTest::new()
///     .significance_level(0.05)?
///     .run("Purchase", &control, &test)?;
///
/// assert_eq!(report.procedure(), TestProcedure::StudentT);
/// assert!(report.decision.reject_null);
/// # Ok::<(), ab_oracle::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HypothesisTest {
    config: Config,
}

impl HypothesisTest {
    /// Create with default configuration (alpha = 0.05).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Stricter preset for confirmatory experiments (alpha = 0.01).
    pub fn strict() -> Self {
        Self::with_config(Config {
            significance_level: SignificanceLevel::STRICT,
            ..Config::default()
        })
    }

    /// Looser preset for exploratory looks at the data (alpha = 0.10).
    pub fn exploratory() -> Self {
        Self::with_config(Config {
            significance_level: SignificanceLevel::EXPLORATORY,
            ..Config::default()
        })
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the significance level.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSignificanceLevel`](crate::Error::InvalidSignificanceLevel)
    /// if `alpha` is not strictly between 0 and 1.
    pub fn significance_level(mut self, alpha: f64) -> Result<Self> {
        self.config.significance_level = SignificanceLevel::new(alpha)?;
        Ok(self)
    }

    /// Set the centre used by Levene's test.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTrimProportion`](crate::Error::InvalidTrimProportion)
    /// for a trimmed centre outside [0, 0.5).
    pub fn levene_center(mut self, center: LeveneCenter) -> Result<Self> {
        self.config.levene_center = center.validate()?;
        Ok(self)
    }

    /// Set how the Mann-Whitney p-value is computed.
    pub fn mann_whitney_method(mut self, method: MannWhitneyMethod) -> Self {
        self.config.mann_whitney_method = method;
        self
    }

    /// Enable or disable the Mann-Whitney continuity correction.
    pub fn continuity_correction(mut self, enabled: bool) -> Self {
        self.config.continuity_correction = enabled;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline on one metric and return the report.
    ///
    /// `control` and `test` are validated into [`Sample`]s first, so empty or
    /// non-finite input fails before any statistic is computed.
    pub fn run(&self, metric: &str, control: &[f64], test: &[f64]) -> Result<AbTestReport> {
        let control = Sample::try_from(control)?;
        let test = Sample::try_from(test)?;
        self.run_samples(metric, &control, &test)
    }

    /// Run the full pipeline on already validated samples.
    pub fn run_samples(
        &self,
        metric: &str,
        control: &Sample,
        test: &Sample,
    ) -> Result<AbTestReport> {
        let span = debug_span!("ab_test", metric, n_control = control.len(), n_test = test.len());
        let _guard = span.enter();

        let alpha = self.config.significance_level;
        debug!(stage = ?Stage::Loaded, alpha = alpha.value());

        let normality_control = check_normality(control, alpha)?;
        let normality_test = check_normality(test, alpha)?;
        debug!(
            stage = ?Stage::NormalityChecked,
            control_p = normality_control.p_value,
            control_holds = normality_control.holds,
            test_p = normality_test.p_value,
            test_holds = normality_test.holds,
        );

        let homogeneity = check_homogeneity(control, test, self.config.levene_center, alpha)?;
        debug!(
            stage = ?Stage::HomogeneityChecked,
            statistic = homogeneity.statistic,
            p = homogeneity.p_value,
            holds = homogeneity.holds,
        );

        let procedure = select_test(&normality_control, &normality_test, &homogeneity);
        debug!(stage = ?Stage::TestSelected, %procedure);

        let decision = execute_test(control, test, procedure, &self.config)?;
        debug!(
            stage = ?Stage::Executed,
            statistic = decision.statistic,
            p = decision.p_value,
        );
        debug!(stage = ?Stage::Decided, reject_null = decision.reject_null);

        Ok(AbTestReport {
            metric: metric.to_string(),
            significance_level: alpha,
            control: summarize(Group::Control, control),
            test: summarize(Group::Test, test),
            normality_control,
            normality_test,
            homogeneity,
            decision,
        })
    }

    /// Run the pipeline and return only the decision.
    pub fn decide(&self, control: &[f64], test: &[f64]) -> Result<TestDecision> {
        self.run("value", control, test).map(|report| report.decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::result::TestProcedure;

    #[test]
    fn test_builder_sets_config() {
        let pipeline = HypothesisTest::new()
            .significance_level(0.01)
            .unwrap()
            .levene_center(LeveneCenter::Mean)
            .unwrap()
            .mann_whitney_method(MannWhitneyMethod::Asymptotic)
            .continuity_correction(false);

        let config = pipeline.config();
        assert_eq!(config.significance_level.value(), 0.01);
        assert_eq!(config.levene_center, LeveneCenter::Mean);
        assert_eq!(config.mann_whitney_method, MannWhitneyMethod::Asymptotic);
        assert!(!config.continuity_correction);
    }

    #[test]
    fn test_presets() {
        assert_eq!(HypothesisTest::new().config().significance_level.value(), 0.05);
        assert_eq!(HypothesisTest::strict().config().significance_level.value(), 0.01);
        assert_eq!(
            HypothesisTest::exploratory().config().significance_level.value(),
            0.10
        );
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(matches!(
            HypothesisTest::new().significance_level(1.2),
            Err(Error::InvalidSignificanceLevel(_))
        ));
    }

    #[test]
    fn test_invalid_trim_proportion() {
        for proportion in [-0.1, 0.5, f64::NAN] {
            assert!(matches!(
                HypothesisTest::new().levene_center(LeveneCenter::Trimmed(proportion)),
                Err(Error::InvalidTrimProportion(_))
            ));
        }
        let pipeline = HypothesisTest::new()
            .levene_center(LeveneCenter::trimmed())
            .unwrap();
        assert_eq!(pipeline.config().levene_center, LeveneCenter::Trimmed(0.05));
    }

    #[test]
    fn test_small_groups_fail_at_normality() {
        let err = HypothesisTest::new()
            .decide(&[1.0, 2.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData { required: 3, .. }));
    }

    #[test]
    fn test_skewed_group_selects_mann_whitney() {
        let skewed = [
            0.11, 7.87, 4.61, 10.14, 7.95, 3.14, 0.46, 4.43, 0.21, 4.75, 0.71, 1.52, 3.24, 0.93,
            0.42, 4.97, 9.53, 4.55, 0.47, 6.66,
        ];
        let normal = [
            1.36, 1.14, 2.92, 2.55, 1.46, 1.06, 5.27, -1.11, 3.48, 1.10, 0.88, -0.51, 1.46, 0.52,
            6.20, 1.69, 0.08, 3.67, 2.81, 3.49,
        ];
        let report = HypothesisTest::new().run("Click", &skewed, &normal).unwrap();
        assert!(!report.normality_control.holds);
        assert!(report.normality_test.holds);
        assert_eq!(report.procedure(), TestProcedure::MannWhitneyU);
        assert_eq!(report.metric, "Click");
    }
}
