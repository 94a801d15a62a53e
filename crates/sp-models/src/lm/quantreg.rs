//! Quantile regression parameter sets
//!
//! Uses the shared base model set, but its own fit set: the quantile to
//! estimate, the covariance flavor, the kernel/bandwidth pair for the
//! sparsity estimate, and the iteration controls of the IRLS solver.

use super::{base_model_set, LsModelArgs, RegressionParams};
use crate::params::{ParamSpec, ParameterSet, ParameterValues, Result};

/// Validated fit arguments for a quantile regression fit call
#[derive(Debug, Clone, PartialEq)]
pub struct QuantRegFitArgs {
    pub q: f64,
    pub vcov: String,
    pub kernel: String,
    pub bandwidth: String,
    pub max_iter: i64,
    pub p_tol: f64,
}

/// Model and fit parameter registries for quantile regression
#[derive(Debug, Clone)]
pub struct QuantRegParams {
    model: ParameterSet,
    fit: ParameterSet,
}

impl QuantRegParams {
    /// Build the registries
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?,
            fit: ParameterSet::build([
                (
                    "q",
                    ParamSpec::float_range(
                        "Quantile to estimate, strictly between 0 and 1",
                        (0.0, false),
                        (1.0, false),
                        0.5,
                        2,
                    ),
                ),
                (
                    "vcov",
                    ParamSpec::choice("Covariance flavor", &["robust", "iid"]),
                ),
                (
                    "kernel",
                    ParamSpec::choice(
                        "Kernel for the sparsity estimate",
                        &["epa", "cos", "gau", "par"],
                    ),
                ),
                (
                    "bandwidth",
                    ParamSpec::choice(
                        "Bandwidth rule for the sparsity estimate",
                        &["hsheather", "bofinger", "chamberlain"],
                    ),
                ),
                (
                    "max_iter",
                    ParamSpec::int_range("Iteration cap of the IRLS solver", 1, 10_000, 1000),
                ),
                (
                    "p_tol",
                    ParamSpec::float_range(
                        "Convergence tolerance on the parameter change",
                        (0.0, false),
                        (1.0, true),
                        1e-6,
                        8,
                    ),
                ),
            ])?,
        })
    }

    /// Validated quantile
    pub fn q(&self, values: &ParameterValues) -> Result<f64> {
        self.fit.check_float("q", values)
    }

    /// Validated covariance flavor
    pub fn vcov(&self, values: &ParameterValues) -> Result<String> {
        self.fit.check_choice("vcov", values)
    }

    /// Validated kernel choice
    pub fn kernel(&self, values: &ParameterValues) -> Result<String> {
        self.fit.check_choice("kernel", values)
    }

    /// Validated bandwidth rule
    pub fn bandwidth(&self, values: &ParameterValues) -> Result<String> {
        self.fit.check_choice("bandwidth", values)
    }

    /// Validated iteration cap
    pub fn max_iter(&self, values: &ParameterValues) -> Result<i64> {
        self.fit.check_int("max_iter", values)
    }

    /// Validated convergence tolerance
    pub fn p_tol(&self, values: &ParameterValues) -> Result<f64> {
        self.fit.check_float("p_tol", values)
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<LsModelArgs> {
        self.base_model_args(values)
    }

    /// Validated fit arguments, shaped like the fitting call
    pub fn fit_args(&self, values: &ParameterValues) -> Result<QuantRegFitArgs> {
        Ok(QuantRegFitArgs {
            q: self.q(values)?,
            vcov: self.vcov(values)?,
            kernel: self.kernel(values)?,
            bandwidth: self.bandwidth(values)?,
            max_iter: self.max_iter(values)?,
            p_tol: self.p_tol(values)?,
        })
    }
}

impl RegressionParams for QuantRegParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}
