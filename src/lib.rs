//! # ab-oracle
//!
//! Assumption-checked two-sample hypothesis testing for A/B experiments.
//!
//! Given the observations of one metric for a Control and a Test group, the
//! pipeline:
//! - checks normality of each group (Shapiro-Wilk)
//! - checks homogeneity of variances (Levene, median centred by default)
//! - picks Student's t, Welch's t or Mann-Whitney U from those checks
//! - runs the test and decides at the configured significance level
//!
//! Every check is two-sided and uses the same alpha. An assumption "holds"
//! when its p-value is strictly greater than alpha; the null hypothesis of
//! the final test is rejected when `p <= alpha`.
//!
//! ## Quick Start
//!
//! ```
//! use ab_oracle::{test, TestFamily};
//!
//! let control = [19.1, 20.3, 21.5, 22.0, 18.7, 20.9, 21.2, 19.8];
//! let treatment = [22.4, 23.1, 21.8, 24.0, 22.9, 23.5, 22.2];
//!
//! let decision = test(&control, &treatment)?;
//! assert_eq!(decision.test_name, TestFamily::Parametric);
//! println!("p = {:.4}, reject H0: {}", decision.p_value, decision.reject_null);
//! # Ok::<(), ab_oracle::Error>(())
//! ```
//!
//! For a full report with group summaries and assumption results, use
//! [`HypothesisTest::run`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod pipeline;
mod result;
mod types;

// Functional modules
pub mod analysis;
pub mod io;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use config::{Config, LeveneCenter, MannWhitneyMethod};
pub use constants::{
    DEFAULT_SIGNIFICANCE_LEVEL, EXPLORATORY_SIGNIFICANCE_LEVEL, MANN_WHITNEY_EXACT_MAX,
    MAX_NORMALITY_SAMPLES, MIN_NORMALITY_SAMPLES, MIN_VARIANCE_SAMPLES,
    STRICT_SIGNIFICANCE_LEVEL,
};
pub use error::{Error, Result};
pub use pipeline::HypothesisTest;
pub use result::{
    AbTestReport, AssumptionResult, GroupSummary, Stage, TestDecision, TestFamily,
    TestProcedure,
};
pub use types::{Group, Sample, SignificanceLevel};

/// Convenience function: run the full pipeline with default configuration.
///
/// Returns the decision only; see [`HypothesisTest`] for the full report and
/// for changing the significance level or the Levene centre.
///
/// # Errors
///
/// - [`Error::InsufficientData`] if a group has fewer than 3 observations
/// - [`Error::NonFiniteInput`] if any value is NaN or infinite
/// - [`Error::ComputationError`] for degenerate data such as a constant group
pub fn test(control: &[f64], test: &[f64]) -> Result<TestDecision> {
    HypothesisTest::new().decide(control, test)
}
