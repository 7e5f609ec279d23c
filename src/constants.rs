//! Numerical constants used throughout the crate.

/// Default significance level for assumption checks and the final decision.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Significance level used by [`HypothesisTest::strict`](crate::HypothesisTest::strict).
pub const STRICT_SIGNIFICANCE_LEVEL: f64 = 0.01;

/// Significance level used by [`HypothesisTest::exploratory`](crate::HypothesisTest::exploratory).
pub const EXPLORATORY_SIGNIFICANCE_LEVEL: f64 = 0.10;

/// Minimum observations for the Shapiro-Wilk test.
pub const MIN_NORMALITY_SAMPLES: usize = 3;

/// Above this size the Shapiro-Wilk p-value approximation is no longer validated.
pub const MAX_NORMALITY_SAMPLES: usize = 5000;

/// Minimum observations per group for Levene's test and the t-tests.
pub const MIN_VARIANCE_SAMPLES: usize = 2;

/// Exact Mann-Whitney distribution is used (method `Auto`) when the smaller
/// group has at most this many observations and there are no ties.
pub const MANN_WHITNEY_EXACT_MAX: usize = 8;

/// Default trimming proportion for Levene's test with a trimmed-mean centre.
pub const DEFAULT_TRIM_PROPORTION: f64 = 0.05;

/// Ranges below this are treated as zero (constant sample).
pub const ZERO_RANGE: f64 = 1e-19;

/// Quartile probabilities reported in group summaries.
pub const QUARTILES: [f64; 3] = [0.25, 0.5, 0.75];
