//! Regression parameter registries and validators for statprep
//!
//! Each supported regression family (OLS, WLS, GLS, GLSAR, quantile
//! regression, robust linear models) declares its model and fit parameters
//! as immutable [`params::ParameterSet`] registries. Raw values supplied by
//! the caller (typically strings collected from form fields) are carried
//! in a [`params::ParameterValues`] map and validated into typed arguments
//! shaped like the external fitting call.
//!
//! Fitting itself is out of scope: this crate stops at producing validated
//! argument structs.

pub mod error;
pub mod lm;
pub mod params;

pub use error::ModelError;
pub use params::{ParamError, ParamValue, ParameterSet, ParameterValues};
