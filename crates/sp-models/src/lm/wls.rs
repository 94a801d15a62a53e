//! Weighted Least Squares parameter sets
//!
//! WLS extends the OLS base with one model parameter: the observation
//! weights. The weight vector's length must match the data, which only the
//! caller knows; here it is validated as a float array.

use ndarray::Array1;

use super::{base_fit_set, base_model_set, LeastSquaresFit, LsModelArgs, RegressionParams};
use crate::params::{ElementType, ParamSpec, ParameterSet, ParameterValues, Result};

/// Validated structural arguments for a WLS model call
#[derive(Debug, Clone, PartialEq)]
pub struct WlsModelArgs {
    pub missing: String,
    pub hasconst: Option<bool>,
    /// Absent means unit weights (the fitting routine's default)
    pub weights: Option<Array1<f64>>,
}

/// Model and fit parameter registries for weighted least squares
#[derive(Debug, Clone)]
pub struct WlsParams {
    model: ParameterSet,
    fit: ParameterSet,
}

impl WlsParams {
    /// Build the registries: the OLS base plus `weights`
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?.extend([(
                "weights",
                ParamSpec::array(
                    "Observation weights, one per observation; length is validated \
                     against the data by the caller",
                    ElementType::Float,
                ),
            )])?,
            fit: base_fit_set()?,
        })
    }

    /// Validated observation weights
    pub fn weights(&self, values: &ParameterValues) -> Result<Option<Array1<f64>>> {
        self.model.check_float_array("weights", values)
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<WlsModelArgs> {
        let LsModelArgs { missing, hasconst } = self.base_model_args(values)?;
        Ok(WlsModelArgs {
            missing,
            hasconst,
            weights: self.weights(values)?,
        })
    }
}

impl RegressionParams for WlsParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}

impl LeastSquaresFit for WlsParams {}
