//! Ordinary Least Squares parameter sets
//!
//! OLS carries no family-specific parameters; its registries are the
//! shared base sets that the other least-squares families extend.

use super::{base_fit_set, base_model_set, LeastSquaresFit, LsModelArgs, RegressionParams};
use crate::params::{ParameterSet, ParameterValues, Result};

/// Model and fit parameter registries for ordinary least squares
#[derive(Debug, Clone)]
pub struct OlsParams {
    model: ParameterSet,
    fit: ParameterSet,
}

impl OlsParams {
    /// Build the registries
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?,
            fit: base_fit_set()?,
        })
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<LsModelArgs> {
        self.base_model_args(values)
    }
}

impl RegressionParams for OlsParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}

impl LeastSquaresFit for OlsParams {}
