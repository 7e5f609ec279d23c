//! Error type for the hypothesis test pipeline.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline invocation.
///
/// Every error is terminal for the invocation that produced it: no partial
/// decision is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A sample is too small for the statistical routine that needs it.
    #[error("insufficient data for {procedure}: {required} observations required, got {actual}")]
    InsufficientData {
        /// Routine that rejected the sample.
        procedure: &'static str,
        /// Minimum number of observations.
        required: usize,
        /// Observations supplied.
        actual: usize,
    },

    /// A sample contains NaN or an infinite value.
    #[error("sample contains a non-finite value ({value}) at index {index}")]
    NonFiniteInput {
        /// Position of the first offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The underlying numeric routine hit a degenerate condition.
    #[error("{procedure} cannot be computed: {reason}")]
    ComputationError {
        /// Routine that failed.
        procedure: &'static str,
        /// What made the input degenerate.
        reason: String,
    },

    /// Significance level outside the open interval (0, 1).
    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidSignificanceLevel(f64),

    /// Levene trim proportion outside [0, 0.5).
    #[error("trim proportion must lie in [0, 0.5), got {0}")]
    InvalidTrimProportion(f64),
}

impl Error {
    pub(crate) fn computation(procedure: &'static str, reason: impl Into<String>) -> Self {
        Error::ComputationError {
            procedure,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InsufficientData { .. } => "InsufficientData",
            Error::NonFiniteInput { .. } => "NonFiniteInput",
            Error::ComputationError { .. } => "ComputationError",
            Error::InvalidSignificanceLevel(_) => "InvalidSignificanceLevel",
            Error::InvalidTrimProportion(_) => "InvalidTrimProportion",
        }
    }
}

/// Reject NaN / Inf inputs.
pub(crate) fn reject_nonfinite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteInput {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Reject samples with fewer than `required` observations.
pub(crate) fn require_len(procedure: &'static str, values: &[f64], required: usize) -> Result<()> {
    if values.len() < required {
        Err(Error::InsufficientData {
            procedure,
            required,
            actual: values.len(),
        })
    } else {
        Ok(())
    }
}
