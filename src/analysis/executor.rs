//! Step 4: run the selected comparison test and take the decision.

use crate::config::Config;
use crate::error::Result;
use crate::result::{TestDecision, TestProcedure};

use super::mann_whitney::mann_whitney_u;
use super::ttest::{student_t, welch_t};

/// Dispatch to the selected procedure and decide against the configured alpha.
///
/// The statistic is oriented Control vs Test: a negative t means the Control
/// mean is lower; U is the Control group's U.
pub fn execute_test(
    control: &[f64],
    test: &[f64],
    procedure: TestProcedure,
    config: &Config,
) -> Result<TestDecision> {
    let alpha = config.significance_level;

    let decision = match procedure {
        TestProcedure::StudentT => {
            let t = student_t(control, test)?;
            TestDecision::new(procedure, t.statistic, t.p_value, Some(t.df), alpha)
        }
        TestProcedure::WelchT => {
            let t = welch_t(control, test)?;
            TestDecision::new(procedure, t.statistic, t.p_value, Some(t.df), alpha)
        }
        TestProcedure::MannWhitneyU => {
            let u = mann_whitney_u(
                control,
                test,
                config.mann_whitney_method,
                config.continuity_correction,
            )?;
            TestDecision::new(procedure, u.statistic, u.p_value, None, alpha)
                .with_p_value_method(u.method)
        }
    };

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::analysis::PValueMethod;
    use crate::result::TestFamily;

    const A: [f64; 8] = [19.1, 20.3, 21.5, 22.0, 18.7, 20.9, 21.2, 19.8];
    const B: [f64; 7] = [22.4, 23.1, 21.8, 24.0, 22.9, 23.5, 22.2];

    #[test]
    fn test_every_procedure_decides_consistently() {
        let config = Config::default();
        for procedure in [
            TestProcedure::StudentT,
            TestProcedure::WelchT,
            TestProcedure::MannWhitneyU,
        ] {
            let decision = execute_test(&A, &B, procedure, &config).unwrap();
            assert_eq!(decision.procedure, procedure);
            assert_eq!(decision.test_name, procedure.family());
            assert_eq!(
                decision.reject_null,
                decision.p_value <= config.significance_level.value()
            );
            assert!(decision.reject_null, "{procedure} should detect the shift");
            assert_eq!(
                decision.p_value_method.is_some(),
                procedure == TestProcedure::MannWhitneyU
            );
        }
    }

    #[test]
    fn test_mann_whitney_decision() {
        let decision =
            execute_test(&A, &B, TestProcedure::MannWhitneyU, &Config::default()).unwrap();
        assert_eq!(decision.test_name, TestFamily::NonParametric);
        assert_eq!(decision.statistic, 1.0);
        assert_eq!(decision.degrees_of_freedom, None);
        // Exact: no ties and min(n1, n2) = 7
        assert_eq!(decision.p_value_method, Some(PValueMethod::Exact));
        assert!((decision.p_value - 0.000621600621600).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_surfaces_error() {
        let constant = [550.0; 10];
        let err = execute_test(&constant, &A, TestProcedure::StudentT, &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::ComputationError { .. }));
    }
}
