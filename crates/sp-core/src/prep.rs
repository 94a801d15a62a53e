//! Series preparation pipeline
//!
//! Two ordered stages clean a raw series before it reaches a fitting call:
//!
//! 1. [`ImputePolicy`] removes missing values according to a policy chosen
//!    up front (mean, median, constant, forward/backward fill).
//! 2. [`Transform`] applies one named numeric transform (returns, risk
//!    adjustment, log, square root), validating its mathematical
//!    preconditions first and collecting both hard errors and non-fatal
//!    suggestions.
//!
//! Every stage is a pure function over in-memory series: no I/O, no shared
//! state, and the input series is never mutated.

mod impute;
mod transform;

#[cfg(test)]
mod tests;

// Re-exports
pub use impute::ImputePolicy;
pub use transform::{Transform, TransformOutcome, CATALOG};

use crate::data::DataError;

/// Errors raised by imputation and transform stages
#[derive(thiserror::Error, Debug, Clone)]
pub enum PrepError {
    /// Series too short for the requested transform
    #[error("Insufficient data: '{series}' has {got} observations, {needed} required")]
    InsufficientData {
        series: String,
        needed: usize,
        got: usize,
    },

    /// A value violates the transform's mathematical precondition
    #[error("'{transform}' cannot be applied to '{series}': {reason}")]
    DomainViolation {
        transform: String,
        series: String,
        reason: String,
    },

    /// Two series required to be paired differ in length or stamps
    #[error("Series '{series}' and '{other}' are not aligned: {reason}")]
    AlignmentError {
        series: String,
        other: String,
        reason: String,
    },

    /// Imputation policy applied to a series whose element type it does not
    /// support
    #[error("Policy '{policy}' does not support {dtype} series")]
    UnsupportedType {
        policy: String,
        dtype: &'static str,
    },

    /// Malformed constant for the "Value" policy
    #[error("Cannot parse '{token}' as {expected}")]
    ParseError {
        token: String,
        expected: &'static str,
    },

    /// Data-layer errors that bubble up from the series
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Result type for preparation operations
pub type Result<T> = std::result::Result<T, PrepError>;
