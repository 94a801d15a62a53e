//! Declarative parameter registries and validators
//!
//! A regression family describes each of its parameters once, as a named
//! [`ParamSpec`] with a documentation note and a domain ([`ParamDomain`]):
//! an ordered choice list, a bounded numeric range, an array/matrix shape,
//! or a data-dependent rule validated by the family itself. The registry
//! ([`ParameterSet`]) is immutable once built; the values supplied by the
//! caller live in a separate, mutable [`ParameterValues`] map and are
//! validated on access.
//!
//! Validation never substitutes a default for a *supplied* value: defaults
//! apply only when a parameter is absent from the map. Every failure names
//! the parameter and the violated rule.

mod check;
mod parse;
mod spec;
mod value;

#[cfg(test)]
mod tests;

// Re-exports
pub use parse::{
    parse_float_array, parse_float_matrix, parse_int_array, parse_int_matrix, parse_text_array,
};
pub use spec::{ElementType, NumericType, ParamDomain, ParamSpec, ParameterSet};
pub use value::{ParamValue, ParameterValues};

/// Parameter validation errors
#[derive(thiserror::Error, Debug)]
pub enum ParamError {
    #[error("Parameter '{0}' is not defined in this parameter set")]
    UnknownParameter(String),

    #[error("Duplicate parameter '{0}' in parameter set definition")]
    DuplicateParameter(String),

    #[error("Parameter '{name}': '{value}' is not a valid choice (allowed: {allowed})")]
    InvalidChoice {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("Parameter '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Parameter '{name}': {value} violates bound '{bound}'")]
    RangeViolation {
        name: String,
        value: f64,
        bound: String,
    },

    #[error("Parameter '{name}': cannot parse '{token}' as {expected}")]
    ParseError {
        name: String,
        token: String,
        expected: &'static str,
    },

    #[error("Parameter '{name}': {message}")]
    ShapeError { name: String, message: String },

    #[error("Parameter '{name}' is required but was not supplied")]
    Missing { name: String },

    #[error("Parameter '{name}': validator expects a {expected} domain, registry declares {actual}")]
    WrongDomain {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, ParamError>;
