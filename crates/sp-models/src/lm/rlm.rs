//! Robust linear model parameter sets
//!
//! RLM extends the base model set with the M-estimator selection and three
//! shared tuning-constant fields. A negative tuning value is the sentinel
//! for "unset": resolution substitutes the selected estimator's own
//! default. Hampel is the one estimator with an ordering invariant across
//! its three constants, validated at resolution time.

use serde::{Deserialize, Serialize};

use super::{base_model_set, LsModelArgs, RegressionParams};
use crate::params::{ParamError, ParamSpec, ParameterSet, ParameterValues, Result};

/// A resolved M-estimator selection with its tuning constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MEstimator {
    HuberT { t: f64 },
    LeastSquares,
    RamsayE { a: f64 },
    AndrewWave { a: f64 },
    TrimmedMean { c: f64 },
    Hampel { a: f64, b: f64, c: f64 },
    TukeyBiweight { c: f64 },
}

/// Validated structural arguments for an RLM model call
#[derive(Debug, Clone, PartialEq)]
pub struct RlmModelArgs {
    pub missing: String,
    pub hasconst: Option<bool>,
    pub m_estimator: MEstimator,
}

/// Validated fit arguments for an RLM fit call
#[derive(Debug, Clone, PartialEq)]
pub struct RlmFitArgs {
    pub cov: String,
    pub scale_est: String,
    pub conv: String,
    pub maxiter: i64,
    pub tol: f64,
    pub update_scale: bool,
}

/// Model and fit parameter registries for robust linear models
#[derive(Debug, Clone)]
pub struct RlmParams {
    model: ParameterSet,
    fit: ParameterSet,
}

fn tune_spec(note: &'static str) -> ParamSpec {
    // -1.0 is the "unset" sentinel; real tuning constants are positive
    ParamSpec::float_range(note, (-1.0, true), (100.0, true), -1.0, 4)
}

impl RlmParams {
    /// Build the registries: the base model set plus the estimator
    /// selection and its shared tuning fields
    pub fn new() -> Result<Self> {
        Ok(Self {
            model: base_model_set()?.extend([
                (
                    "m_estimator",
                    ParamSpec::choice(
                        "M-estimator weighting function",
                        &[
                            "HuberT",
                            "LeastSquares",
                            "RamsayE",
                            "AndrewWave",
                            "TrimmedMean",
                            "Hampel",
                            "TukeyBiweight",
                        ],
                    ),
                ),
                (
                    "tune1",
                    tune_spec(
                        "First tuning constant; negative means the estimator's default",
                    ),
                ),
                (
                    "tune2",
                    tune_spec("Second tuning constant (Hampel only)"),
                ),
                (
                    "tune3",
                    tune_spec("Third tuning constant (Hampel only)"),
                ),
            ])?,
            fit: ParameterSet::build([
                (
                    "cov",
                    ParamSpec::choice("Covariance estimator", &["H1", "H2", "H3"]),
                ),
                (
                    "scale_est",
                    ParamSpec::choice("Scale estimator", &["mad", "HuberScale"]),
                ),
                (
                    "conv",
                    ParamSpec::choice(
                        "Convergence criterion",
                        &["dev", "params", "weights", "sresid"],
                    ),
                ),
                (
                    "maxiter",
                    ParamSpec::int_range("Iteration cap of the IRLS solver", 1, 10_000, 50),
                ),
                (
                    "tol",
                    ParamSpec::float_range(
                        "Convergence tolerance",
                        (0.0, false),
                        (1.0, true),
                        1e-8,
                        10,
                    ),
                ),
                (
                    "update_scale",
                    ParamSpec::bool_choice("Re-estimate the scale at each iteration"),
                ),
            ])?,
        })
    }

    /// Resolve the M-estimator selection.
    ///
    /// Tuning constants left at the negative sentinel take the selected
    /// estimator's default. For Hampel the resolved constants must satisfy
    /// `0 < a <= b <= c`.
    pub fn m_estimator(&self, values: &ParameterValues) -> Result<MEstimator> {
        let choice = self.model.check_choice("m_estimator", values)?;
        let tune1 = self.model.check_float("tune1", values)?;
        let tune2 = self.model.check_float("tune2", values)?;
        let tune3 = self.model.check_float("tune3", values)?;

        match choice.as_str() {
            "HuberT" => Ok(MEstimator::HuberT {
                t: resolve(tune1, 1.345),
            }),
            "LeastSquares" => Ok(MEstimator::LeastSquares),
            "RamsayE" => Ok(MEstimator::RamsayE {
                a: resolve(tune1, 0.3),
            }),
            "AndrewWave" => Ok(MEstimator::AndrewWave {
                a: resolve(tune1, 1.339),
            }),
            "TrimmedMean" => Ok(MEstimator::TrimmedMean {
                c: resolve(tune1, 2.0),
            }),
            "Hampel" => {
                let a = resolve(tune1, 2.0);
                let b = resolve(tune2, 4.0);
                let c = resolve(tune3, 8.0);
                if !(a > 0.0 && a <= b && b <= c) {
                    return Err(ParamError::RangeViolation {
                        name: "tune1".to_string(),
                        value: a,
                        bound: format!("0 < {} <= {} <= {}", a, b, c),
                    });
                }
                Ok(MEstimator::Hampel { a, b, c })
            }
            // The choice check restricts to the list above
            _ => Ok(MEstimator::TukeyBiweight {
                c: resolve(tune1, 4.685),
            }),
        }
    }

    /// Validated structural arguments for the model call
    pub fn model_args(&self, values: &ParameterValues) -> Result<RlmModelArgs> {
        let LsModelArgs { missing, hasconst } = self.base_model_args(values)?;
        Ok(RlmModelArgs {
            missing,
            hasconst,
            m_estimator: self.m_estimator(values)?,
        })
    }

    /// Validated fit arguments, shaped like the fitting call
    pub fn fit_args(&self, values: &ParameterValues) -> Result<RlmFitArgs> {
        Ok(RlmFitArgs {
            cov: self.fit.check_choice("cov", values)?,
            scale_est: self.fit.check_choice("scale_est", values)?,
            conv: self.fit.check_choice("conv", values)?,
            maxiter: self.fit.check_int("maxiter", values)?,
            tol: self.fit.check_float("tol", values)?,
            update_scale: self.fit.check_bool("update_scale", values)?,
        })
    }
}

/// Substitute the estimator default for the negative "unset" sentinel
fn resolve(tune: f64, default: f64) -> f64 {
    if tune < 0.0 { default } else { tune }
}

impl RegressionParams for RlmParams {
    fn model_set(&self) -> &ParameterSet {
        &self.model
    }

    fn fit_set(&self) -> &ParameterSet {
        &self.fit
    }
}
