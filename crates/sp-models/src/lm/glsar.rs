//! GLSAR (feasible GLS with autoregressive errors) parameter sets
//!
//! GLSAR extends the OLS base with the order of the AR error process.

use super::{base_fit_set, base_model_set, LeastSquaresFit, LsModelArgs, RegressionParams};
use crate::params::{ParamSpec, ParameterSet, ParameterValues, Result};

/// Validated structural arguments for a GLSAR model call
#[derive(Debug, Clone, PartialEq)]
pub struct GlsarModelArgs {
    pub missing: String,
    pub hasconst: Option<bool>,
    /// AR order of the error process
    pub rho: i64,
}

/// Model and fit parameter registries for GLSAR
#[derive(Debug, Clone)]
pub struct GlsarParams {
    model: ParameterSet,
    fit: ParameterSet,
}

impl GlsarParams {
    /// Build the registries: the OLS base plus `rho`
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?.extend([(
                "rho",
                ParamSpec::int_range("Order of the autoregressive error process", 1, 12, 1),
            )])?,
            fit: base_fit_set()?,
        })
    }

    /// Validated AR order
    pub fn rho(&self, values: &ParameterValues) -> Result<i64> {
        self.model.check_int("rho", values)
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<GlsarModelArgs> {
        let LsModelArgs { missing, hasconst } = self.base_model_args(values)?;
        Ok(GlsarModelArgs {
            missing,
            hasconst,
            rho: self.rho(values)?,
        })
    }
}

impl RegressionParams for GlsarParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}

impl LeastSquaresFit for GlsarParams {}
