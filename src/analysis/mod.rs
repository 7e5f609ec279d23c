//! Analysis module for two-sample comparison.
//!
//! This module implements the decision pipeline stages:
//!
//! 1. **Normality** ([`normality`]): Shapiro-Wilk on each group
//! 2. **Homogeneity** ([`homogeneity`]): Levene's test across groups
//! 3. **Selection** ([`selector`]): Student, Welch or Mann-Whitney
//! 4. **Execution** ([`executor`]): run the chosen test and decide

mod executor;
mod homogeneity;
mod mann_whitney;
mod normality;
mod selector;
mod ttest;

pub use executor::execute_test;
pub use homogeneity::{check_homogeneity, levene, Levene};
pub use mann_whitney::{mann_whitney_u, MannWhitneyOutcome, PValueMethod};
pub use normality::{check_normality, shapiro_wilk, ShapiroWilk};
pub use selector::{select_from_flags, select_test};
pub use ttest::{student_t, ttest_from_stats, welch_t, Moments, TTestOutcome};
