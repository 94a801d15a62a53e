//! Generalized Least Squares parameter sets
//!
//! GLS extends the OLS base with the error covariance structure `sigma`.
//! Squareness against the number of observations is data-dependent and
//! left to the fitting layer; a vector sigma is a valid (broadcast)
//! argument and passes through as a one-row matrix.

use ndarray::Array2;

use super::{base_fit_set, base_model_set, LeastSquaresFit, LsModelArgs, RegressionParams};
use crate::params::{ElementType, ParamSpec, ParameterSet, ParameterValues, Result};

/// Validated structural arguments for a GLS model call
#[derive(Debug, Clone, PartialEq)]
pub struct GlsModelArgs {
    pub missing: String,
    pub hasconst: Option<bool>,
    /// Absent means an identity covariance (plain OLS)
    pub sigma: Option<Array2<f64>>,
}

/// Model and fit parameter registries for generalized least squares
#[derive(Debug, Clone)]
pub struct GlsParams {
    model: ParameterSet,
    fit: ParameterSet,
}

impl GlsParams {
    /// Build the registries: the OLS base plus `sigma`
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?.extend([(
                "sigma",
                ParamSpec::matrix(
                    "Error covariance structure; a vector is broadcast by the \
                     fitting routine",
                    ElementType::Float,
                ),
            )])?,
            fit: base_fit_set()?,
        })
    }

    /// Validated error covariance structure
    pub fn sigma(&self, values: &ParameterValues) -> Result<Option<Array2<f64>>> {
        self.model.check_float_matrix("sigma", values)
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<GlsModelArgs> {
        let LsModelArgs { missing, hasconst } = self.base_model_args(values)?;
        Ok(GlsModelArgs {
            missing,
            hasconst,
            sigma: self.sigma(values)?,
        })
    }
}

impl RegressionParams for GlsParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}

impl LeastSquaresFit for GlsParams {}
