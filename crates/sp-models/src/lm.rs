//! Regression family parameter sets
//!
//! One module per supported family:
//! - Ordinary Least Squares (OLS), which defines the shared base sets
//! - Weighted Least Squares (WLS)
//! - Generalized Least Squares (GLS)
//! - GLS with autoregressive errors (GLSAR)
//! - Quantile regression
//! - Robust linear models (RLM)
//!
//! Each family owns two registries, model parameters (structural
//! arguments to the model constructor) and fit parameters (arguments to
//! the fit call), and exposes one accessor per parameter plus aggregate
//! `model_args`/`fit_args` builders shaped like the external fitting call.
//! The WLS/GLS/GLSAR registries are composed from the OLS base via
//! [`ParameterSet::extend`], so a clashing name fails at construction.

pub mod gls;
pub mod glsar;
pub mod ols;
pub mod quantreg;
pub mod rlm;
pub mod wls;


// Re-exports
pub use gls::GlsParams;
pub use glsar::GlsarParams;
pub use ols::OlsParams;
pub use quantreg::QuantRegParams;
pub use rlm::{MEstimator, RlmParams};
pub use wls::WlsParams;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::Result as ModelResult;
use crate::params::{ParamError, ParamSpec, ParameterSet, ParameterValues, Result};
use sp_core::data::DataSeries;
use sp_core::prep::PrepError;

/// Shared model-parameter registry (OLS's, reused by every family)
pub fn base_model_set() -> Result<ParameterSet> {
    ParameterSet::build([
        (
            "missing",
            ParamSpec::choice(
                "How missing observations in the design are treated",
                &["none", "drop", "raise"],
            ),
        ),
        (
            "hasconst",
            ParamSpec::opt_bool_choice(
                "Whether the design already contains a user-supplied constant; \
                 None lets the fitting routine decide",
            ),
        ),
    ])
}

/// Shared fit-parameter registry for the least-squares families
pub fn base_fit_set() -> Result<ParameterSet> {
    ParameterSet::build([
        (
            "fit_method",
            ParamSpec::choice("Solver used for the coefficient estimate", &["pinv", "qr"]),
        ),
        (
            "cov_type",
            ParamSpec::choice(
                "Covariance estimator for the coefficient standard errors",
                &[
                    "nonrobust",
                    "fixed scale",
                    "HC0",
                    "HC1",
                    "HC2",
                    "HC3",
                    "HAC",
                    "cluster",
                ],
            ),
        ),
        (
            "scale",
            ParamSpec::float_range(
                "Fixed scale for the 'fixed scale' covariance",
                (0.0, false),
                (1e6, true),
                1.0,
                6,
            ),
        ),
        (
            "kernel",
            ParamSpec::choice("HAC weighting kernel", &["bartlett", "uniform"]),
        ),
        (
            "maxlags",
            ParamSpec::int_range("HAC lag count", 0, 1000, 1),
        ),
        (
            "use_correction",
            ParamSpec::bool_choice("Small-sample correction for HAC/cluster covariances"),
        ),
        (
            "groups",
            ParamSpec::array(
                "Cluster labels, one per observation (cluster covariance only)",
                crate::params::ElementType::Int,
            ),
        ),
        (
            "df_correction",
            ParamSpec::bool_choice("Degrees-of-freedom correction for the cluster covariance"),
        ),
        (
            "use_t",
            ParamSpec::opt_bool_choice(
                "Use the t distribution for inference; None keeps the estimator's default",
            ),
        ),
    ])
}

/// Auxiliary covariance arguments, assembled only when the governing
/// `cov_type` choice activates them.
#[derive(Debug, Clone, PartialEq)]
pub enum CovArgs {
    /// `cov_type = "fixed scale"`
    FixedScale { scale: f64 },
    /// `cov_type = "HAC"`
    Hac {
        kernel: String,
        maxlags: i64,
        use_correction: bool,
    },
    /// `cov_type = "cluster"`
    Cluster {
        groups: Array1<i64>,
        use_correction: bool,
        df_correction: bool,
    },
}

/// Validated structural arguments shared by every family's model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LsModelArgs {
    pub missing: String,
    pub hasconst: Option<bool>,
}

/// Validated fit arguments for the least-squares families
#[derive(Debug, Clone, PartialEq)]
pub struct LsFitArgs {
    pub method: String,
    pub cov_type: String,
    pub cov_args: Option<CovArgs>,
    pub use_t: Option<bool>,
}

/// Common surface of every family's parameter object
pub trait RegressionParams {
    /// Model-parameter registry
    fn model_set(&self) -> &ParameterSet;

    /// Fit-parameter registry
    fn fit_set(&self) -> &ParameterSet;

    /// Validated `missing` policy
    fn missing(&self, values: &ParameterValues) -> Result<String> {
        self.model_set().check_choice("missing", values)
    }

    /// Validated `hasconst` flag
    fn hasconst(&self, values: &ParameterValues) -> Result<Option<bool>> {
        self.model_set().check_opt_bool("hasconst", values)
    }

    /// Validated structural arguments common to every family
    fn base_model_args(&self, values: &ParameterValues) -> Result<LsModelArgs> {
        Ok(LsModelArgs {
            missing: self.missing(values)?,
            hasconst: self.hasconst(values)?,
        })
    }
}

/// Fit-parameter surface shared by the least-squares families
/// (OLS, WLS, GLS, GLSAR)
pub trait LeastSquaresFit: RegressionParams {
    /// Validated solver choice
    fn fit_method(&self, values: &ParameterValues) -> Result<String> {
        self.fit_set().check_choice("fit_method", values)
    }

    /// Validated covariance estimator choice
    fn cov_type(&self, values: &ParameterValues) -> Result<String> {
        self.fit_set().check_choice("cov_type", values)
    }

    /// Auxiliary covariance arguments for the selected `cov_type`.
    ///
    /// Only three choices carry auxiliary settings; every other choice
    /// yields no auxiliary argument at all.
    fn cov_args(&self, values: &ParameterValues) -> Result<Option<CovArgs>> {
        let set = self.fit_set();
        match self.cov_type(values)?.as_str() {
            "fixed scale" => Ok(Some(CovArgs::FixedScale {
                scale: set.check_float("scale", values)?,
            })),
            "HAC" => Ok(Some(CovArgs::Hac {
                kernel: set.check_choice("kernel", values)?,
                maxlags: set.check_int("maxlags", values)?,
                use_correction: set.check_bool("use_correction", values)?,
            })),
            "cluster" => {
                let groups = set
                    .check_int_array("groups", values)?
                    .ok_or_else(|| ParamError::Missing {
                        name: "groups".to_string(),
                    })?;
                Ok(Some(CovArgs::Cluster {
                    groups,
                    use_correction: set.check_bool("use_correction", values)?,
                    df_correction: set.check_bool("df_correction", values)?,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Validated `use_t` flag
    fn use_t(&self, values: &ParameterValues) -> Result<Option<bool>> {
        self.fit_set().check_opt_bool("use_t", values)
    }

    /// Validated fit arguments, shaped like the fitting call
    fn fit_args(&self, values: &ParameterValues) -> Result<LsFitArgs> {
        Ok(LsFitArgs {
            method: self.fit_method(values)?,
            cov_type: self.cov_type(values)?,
            cov_args: self.cov_args(values)?,
            use_t: self.use_t(values)?,
        })
    }
}

/// Assemble the response vector and design matrix for a fitting call from
/// cleaned series.
///
/// All series must be dense (imputed) and of equal length; transform costs
/// should have been used upstream to predict matching lengths.
pub fn design_from_series(
    endog: &DataSeries,
    exog: &[DataSeries],
) -> ModelResult<(Array1<f64>, Array2<f64>)> {
    let y = endog.to_float_array().map_err(PrepError::from)?;
    let n = y.len();

    let mut design = Array2::zeros((n, exog.len()));
    for (j, series) in exog.iter().enumerate() {
        if series.len() != n {
            return Err(PrepError::AlignmentError {
                series: endog.name().to_string(),
                other: series.name().to_string(),
                reason: format!("lengths differ ({} vs {})", n, series.len()),
            }
            .into());
        }
        let column = series.to_float_array().map_err(PrepError::from)?;
        design.column_mut(j).assign(&column);
    }

    Ok((y, design))
}
