//! Result types produced by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::PValueMethod;
use crate::types::{Group, SignificanceLevel};

/// Outcome of one assumption check (normality or variance homogeneity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionResult {
    /// Test statistic (Shapiro-Wilk W or Levene's F).
    pub statistic: f64,
    /// p-value of the check.
    pub p_value: f64,
    /// `p_value > significance_level`: the assumption is retained.
    pub holds: bool,
    /// Accuracy caveat, e.g. for very large Shapiro-Wilk samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AssumptionResult {
    /// Build a result, deriving `holds` from the significance level.
    pub fn new(statistic: f64, p_value: f64, alpha: SignificanceLevel) -> Self {
        Self {
            statistic,
            p_value,
            holds: alpha.retains(p_value),
            note: None,
        }
    }

    pub(crate) fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Broad family of the comparison test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestFamily {
    /// t-test on means.
    Parametric,
    /// Rank-based test.
    NonParametric,
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFamily::Parametric => f.write_str("Parametric"),
            TestFamily::NonParametric => f.write_str("NonParametric"),
        }
    }
}

/// Concrete two-sample comparison procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestProcedure {
    /// Independent two-sample t-test with pooled (equal) variances.
    StudentT,
    /// Two-sample t-test with Welch's unequal-variance correction.
    WelchT,
    /// Mann-Whitney U rank-sum test.
    MannWhitneyU,
}

impl TestProcedure {
    /// Family this procedure belongs to.
    pub fn family(self) -> TestFamily {
        match self {
            TestProcedure::StudentT | TestProcedure::WelchT => TestFamily::Parametric,
            TestProcedure::MannWhitneyU => TestFamily::NonParametric,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            TestProcedure::StudentT => "Student's t-test",
            TestProcedure::WelchT => "Welch's t-test",
            TestProcedure::MannWhitneyU => "Mann-Whitney U test",
        }
    }
}

impl fmt::Display for TestProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final decision of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDecision {
    /// Parametric or non-parametric.
    pub test_name: TestFamily,
    /// Procedure that produced the statistic.
    pub procedure: TestProcedure,
    /// t statistic (Control − Test orientation) or U of the Control group.
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Degrees of freedom for t-tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_of_freedom: Option<f64>,
    /// How the Mann-Whitney p-value was obtained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value_method: Option<PValueMethod>,
    /// Alpha the decision was taken at.
    pub significance_level: SignificanceLevel,
    /// `p_value <= significance_level`.
    pub reject_null: bool,
}

impl TestDecision {
    pub(crate) fn new(
        procedure: TestProcedure,
        statistic: f64,
        p_value: f64,
        degrees_of_freedom: Option<f64>,
        alpha: SignificanceLevel,
    ) -> Self {
        Self {
            test_name: procedure.family(),
            procedure,
            statistic,
            p_value,
            degrees_of_freedom,
            p_value_method: None,
            significance_level: alpha,
            reject_null: alpha.rejects(p_value),
        }
    }

    pub(crate) fn with_p_value_method(mut self, method: PValueMethod) -> Self {
        self.p_value_method = Some(method);
        self
    }
}

/// Descriptive summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Which group this summarises.
    pub group: Group,
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); NaN for a single observation.
    pub std: f64,
    /// Smallest observation.
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Largest observation.
    pub max: f64,
}

/// Pipeline states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Samples validated.
    Loaded,
    /// Shapiro-Wilk run on both groups.
    NormalityChecked,
    /// Levene's test run.
    HomogeneityChecked,
    /// Procedure chosen.
    TestSelected,
    /// Comparison test executed.
    Executed,
    /// Decision taken against alpha.
    Decided,
}

/// Everything the pipeline learned about one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbTestReport {
    /// Metric (column) that was compared.
    pub metric: String,
    /// Alpha used throughout.
    pub significance_level: SignificanceLevel,
    /// Control group summary.
    pub control: GroupSummary,
    /// Test group summary.
    pub test: GroupSummary,
    /// Shapiro-Wilk on the Control group.
    pub normality_control: AssumptionResult,
    /// Shapiro-Wilk on the Test group.
    pub normality_test: AssumptionResult,
    /// Levene's test across both groups.
    pub homogeneity: AssumptionResult,
    /// Final decision.
    pub decision: TestDecision,
}

impl AbTestReport {
    /// Procedure the selector chose.
    pub fn procedure(&self) -> TestProcedure {
        self.decision.procedure
    }

    /// Test mean minus Control mean.
    pub fn mean_difference(&self) -> f64 {
        self.test.mean - self.control.mean
    }

    /// Relative change of the Test mean over the Control mean.
    ///
    /// `None` when the Control mean is zero.
    pub fn relative_lift(&self) -> Option<f64> {
        if self.control.mean == 0.0 {
            None
        } else {
            Some(self.mean_difference() / self.control.mean)
        }
    }

    /// Null and alternative hypotheses in words.
    pub fn hypotheses(&self) -> (String, String) {
        let subject = match self.decision.test_name {
            TestFamily::Parametric => "mean",
            TestFamily::NonParametric => "distribution",
        };
        (
            format!(
                "H0: no difference in {} {} between Control and Test",
                self.metric, subject
            ),
            format!(
                "H1: the {} {} differs between Control and Test",
                self.metric, subject
            ),
        )
    }

    /// One-sentence interpretation of the decision.
    pub fn conclusion(&self) -> String {
        let confidence = (1.0 - self.significance_level.value()) * 100.0;
        if self.decision.reject_null {
            format!(
                "H0 rejected (p = {:.4} <= {}): there is a statistically significant difference \
                 in {} between the Control and Test groups at {:.0}% confidence.",
                self.decision.p_value, self.significance_level, self.metric, confidence
            )
        } else {
            format!(
                "H0 cannot be rejected (p = {:.4} > {}): there is no statistically significant \
                 difference in {} between the Control and Test groups at {:.0}% confidence.",
                self.decision.p_value, self.significance_level, self.metric, confidence
            )
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn summary(group: Group, mean: f64) -> GroupSummary {
        GroupSummary {
            group,
            count: 40,
            mean,
            std: 150.0,
            min: mean - 300.0,
            q1: mean - 100.0,
            median: mean,
            q3: mean + 100.0,
            max: mean + 300.0,
        }
    }

    pub fn report(p_value: f64) -> AbTestReport {
        let alpha = SignificanceLevel::default();
        AbTestReport {
            metric: "Purchase".to_string(),
            significance_level: alpha,
            control: summary(Group::Control, 550.894),
            test: summary(Group::Test, 582.106),
            normality_control: AssumptionResult::new(0.9773, 0.5891, alpha),
            normality_test: AssumptionResult::new(0.9589, 0.1541, alpha),
            homogeneity: AssumptionResult::new(2.6393, 0.1083, alpha),
            decision: TestDecision::new(
                TestProcedure::StudentT,
                -0.9416,
                p_value,
                Some(78.0),
                alpha,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_families() {
        assert_eq!(TestProcedure::StudentT.family(), TestFamily::Parametric);
        assert_eq!(TestProcedure::WelchT.family(), TestFamily::Parametric);
        assert_eq!(TestProcedure::MannWhitneyU.family(), TestFamily::NonParametric);
    }

    #[test]
    fn test_decision_boundary_rejects_at_alpha() {
        let alpha = SignificanceLevel::default();
        let at = TestDecision::new(TestProcedure::StudentT, 2.0, 0.05, Some(10.0), alpha);
        assert!(at.reject_null);
        let above = TestDecision::new(TestProcedure::StudentT, 2.0, 0.0501, Some(10.0), alpha);
        assert!(!above.reject_null);
    }

    #[test]
    fn test_assumption_holds_strictly_above_alpha() {
        let alpha = SignificanceLevel::default();
        assert!(!AssumptionResult::new(0.9, 0.05, alpha).holds);
        assert!(AssumptionResult::new(0.9, 0.0501, alpha).holds);
    }

    #[test]
    fn test_report_conclusion_and_lift() {
        let report = fixtures::report(0.3493);
        assert!(report.conclusion().contains("cannot be rejected"));
        assert!(report.conclusion().contains("95% confidence"));
        assert!((report.mean_difference() - 31.212).abs() < 1e-9);
        let lift = report.relative_lift().unwrap();
        assert!((lift - 31.212 / 550.894).abs() < 1e-12);

        let significant = fixtures::report(0.01);
        assert!(significant.conclusion().starts_with("H0 rejected"));
    }

    #[test]
    fn test_hypotheses_mention_metric() {
        let (h0, h1) = fixtures::report(0.3493).hypotheses();
        assert!(h0.contains("Purchase mean"));
        assert!(h1.starts_with("H1"));
    }
}
