//! Step 3: choose the comparison test from the assumption checks.

use crate::result::{AssumptionResult, TestProcedure};

/// Select the comparison procedure.
///
/// | both normal | equal variances | procedure      |
/// |-------------|-----------------|----------------|
/// | yes         | yes             | Student's t    |
/// | yes         | no              | Welch's t      |
/// | no          | any             | Mann-Whitney U |
pub fn select_test(
    normality_control: &AssumptionResult,
    normality_test: &AssumptionResult,
    homogeneity: &AssumptionResult,
) -> TestProcedure {
    select_from_flags(
        normality_control.holds,
        normality_test.holds,
        homogeneity.holds,
    )
}

/// Same decision table over the raw `holds` flags.
pub fn select_from_flags(
    control_normal: bool,
    test_normal: bool,
    equal_variances: bool,
) -> TestProcedure {
    match (control_normal && test_normal, equal_variances) {
        (true, true) => TestProcedure::StudentT,
        (true, false) => TestProcedure::WelchT,
        (false, _) => TestProcedure::MannWhitneyU,
    }
}
