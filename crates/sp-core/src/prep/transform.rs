//! Named numeric transforms with domain validation
//!
//! A [`Transform`] is a label from a fixed 8-member catalog (the identity
//! included). A single label can encode several operations; they are always
//! applied in precedence order:
//!
//! 1. Returns: percent change between consecutive observations, dropping
//!    the newest one.
//! 2. Risk adjustment: elementwise subtraction of a second, aligned series.
//! 3. Log / square root: elementwise, after any previous operation.
//!
//! Application proceeds in two checked phases because the risk-adjustment
//! asset series may itself need the return transform applied before the two
//! series can be aligned: [`Transform::check_apply_returns`] runs first on
//! each series independently, [`Transform::check_apply_remaining`] runs on
//! the pair. Each phase validates its preconditions, collecting every
//! violation rather than stopping at the first, and only performs the math
//! when no hard error was found. Non-fatal observations (negative values
//! ahead of a percent change, remaining missing values) are reported as
//! suggestions and never abort the operation.

use serde::{Deserialize, Serialize};

use super::{PrepError, Result};
use crate::data::{DataSeries, SeriesValues};

/// One named transform from the catalog.
///
/// The variants whose label contains "Risk Adj." require a second series
/// (the risk-adjustment asset) at application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    /// Identity (label "")
    None,
    /// Percent change, newest observation dropped
    Returns,
    /// Percent change, then natural log
    LnReturns,
    /// Percent change, then risk adjustment
    RiskAdjReturns,
    /// Percent change, risk adjustment, then natural log
    RiskAdjLnReturns,
    /// Risk adjustment only
    RiskAdj,
    /// Natural log
    Ln,
    /// Square root
    Sqrt,
}

/// Every catalog member, in display order
pub const CATALOG: [Transform; 8] = [
    Transform::None,
    Transform::Returns,
    Transform::LnReturns,
    Transform::RiskAdjReturns,
    Transform::RiskAdjLnReturns,
    Transform::RiskAdj,
    Transform::Ln,
    Transform::Sqrt,
];

/// Result of a checked transform phase.
///
/// `errors` and `suggestions` are collected independently; when `errors` is
/// non-empty the embedded series is the unmodified input and must be
/// ignored by the caller.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// The transformed series (or the unmodified input on error)
    pub series: DataSeries,
    /// Hard errors; non-empty means the math was not performed
    pub errors: Vec<PrepError>,
    /// Non-fatal observations surfaced to the user
    pub suggestions: Vec<String>,
}

impl TransformOutcome {
    fn unchanged(series: &DataSeries) -> Self {
        Self {
            series: series.clone(),
            errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Whether the phase completed without hard errors
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Transform {
    /// Parse a transform from its display label
    pub fn from_label(label: &str) -> Option<Transform> {
        match label {
            "" => Some(Transform::None),
            "Returns" => Some(Transform::Returns),
            "LN Returns" => Some(Transform::LnReturns),
            "Risk Adj. Returns" => Some(Transform::RiskAdjReturns),
            "Risk Adj. LN Returns" => Some(Transform::RiskAdjLnReturns),
            "Risk Adj." => Some(Transform::RiskAdj),
            "LN" => Some(Transform::Ln),
            "SQRT" => Some(Transform::Sqrt),
            _ => None,
        }
    }

    /// Display label of the transform
    pub fn label(&self) -> &'static str {
        match self {
            Transform::None => "",
            Transform::Returns => "Returns",
            Transform::LnReturns => "LN Returns",
            Transform::RiskAdjReturns => "Risk Adj. Returns",
            Transform::RiskAdjLnReturns => "Risk Adj. LN Returns",
            Transform::RiskAdj => "Risk Adj.",
            Transform::Ln => "LN",
            Transform::Sqrt => "SQRT",
        }
    }

    /// Whether the transform starts with a percent-change step
    pub fn is_returns(&self) -> bool {
        matches!(
            self,
            Transform::Returns
                | Transform::LnReturns
                | Transform::RiskAdjReturns
                | Transform::RiskAdjLnReturns
        )
    }

    /// Whether the transform subtracts a risk-adjustment asset series
    pub fn is_risk_adjusting(&self) -> bool {
        matches!(
            self,
            Transform::RiskAdj | Transform::RiskAdjReturns | Transform::RiskAdjLnReturns
        )
    }

    /// Whether the transform ends with a natural log
    pub fn is_log(&self) -> bool {
        matches!(
            self,
            Transform::Ln | Transform::LnReturns | Transform::RiskAdjLnReturns
        )
    }

    /// Whether the transform ends with a square root
    pub fn is_sqrt(&self) -> bool {
        matches!(self, Transform::Sqrt)
    }

    /// Whether the transform may be applied to the risk-adjustment asset
    /// series itself (a risk-adjusting transform cannot be).
    pub fn usable_for_risk_asset(&self) -> bool {
        !self.is_risk_adjusting()
    }

    /// Observation-count delta of the transform: -1 when a percent-change
    /// step drops the newest observation, 0 otherwise.
    ///
    /// Callers use this to predict output lengths (for example to confirm
    /// that dependent and independent series will end up with equal
    /// observation counts) without executing the transform.
    pub fn cost(&self) -> i64 {
        if self.is_returns() { -1 } else { 0 }
    }

    /// Phase 1: validate and apply the percent-change step.
    ///
    /// A no-op for transforms without one. Preconditions are collected, not
    /// short-circuited: the series must be numeric with at least two
    /// observations and contain no exact zero (the change is relative to the
    /// earlier value). Negative and missing values are legal but surfaced as
    /// suggestions.
    ///
    /// The change between observations i and i+1 is stored at position i,
    /// associating each return with the earlier stamp; the newest
    /// observation is dropped, so the output is one shorter than the input.
    pub fn check_apply_returns(&self, series: &DataSeries) -> TransformOutcome {
        if !self.is_returns() {
            return TransformOutcome::unchanged(series);
        }

        let mut errors = Vec::new();
        let mut suggestions = Vec::new();

        if series.len() < 2 {
            errors.push(PrepError::InsufficientData {
                series: series.name().to_string(),
                needed: 2,
                got: series.len(),
            });
        }

        let floats = match series.as_floats() {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e.into());
                None
            }
        };

        if let Some(values) = &floats {
            if values.iter().flatten().any(|&v| v == 0.0) {
                errors.push(PrepError::DomainViolation {
                    transform: self.label().to_string(),
                    series: series.name().to_string(),
                    reason: "series contains a zero; percent change would divide by zero"
                        .to_string(),
                });
            }
            if values.iter().flatten().any(|&v| v < 0.0) {
                suggestions.push(format!(
                    "'{}' contains negative values before the return calculation; is this intended?",
                    series.name()
                ));
            }
            if values.iter().any(Option::is_none) {
                suggestions.push(format!(
                    "'{}' contains missing values; consider an imputation policy",
                    series.name()
                ));
            }
        }

        if !errors.is_empty() {
            return TransformOutcome {
                series: series.clone(),
                errors,
                suggestions,
            };
        }

        let values = floats.unwrap_or_default();
        let returns = percent_change(&values);
        let stamps = series.stamps()[..series.len() - 1].to_vec();
        match series.replaced(stamps, SeriesValues::Float(returns)) {
            Ok(out) => TransformOutcome {
                series: out,
                errors,
                suggestions,
            },
            Err(e) => {
                errors.push(e.into());
                TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                }
            }
        }
    }

    /// Phase 2: validate and apply risk adjustment, log, and square root.
    ///
    /// A no-op for transforms with none of those steps. The risk-adjustment
    /// asset series must be present, of equal length, and carry identical
    /// stamps; the three conditions are checked independently and every
    /// violation reported. The log step requires strictly positive values
    /// and the square-root step non-negative values, both evaluated against
    /// the series as it stands after any previous step. A remaining missing
    /// value in the result is surfaced as a suggestion.
    pub fn check_apply_remaining(
        &self,
        series: &DataSeries,
        raa: Option<&DataSeries>,
    ) -> TransformOutcome {
        if !self.is_risk_adjusting() && !self.is_log() && !self.is_sqrt() {
            return TransformOutcome::unchanged(series);
        }

        let mut errors = Vec::new();
        let mut suggestions = Vec::new();

        let mut current = match series.as_floats() {
            Ok(v) => v,
            Err(e) => {
                errors.push(e.into());
                return TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                };
            }
        };

        if self.is_risk_adjusting() {
            match raa {
                None => errors.push(PrepError::AlignmentError {
                    series: series.name().to_string(),
                    other: "<risk adjustment asset>".to_string(),
                    reason: "no risk adjustment asset series was supplied".to_string(),
                }),
                Some(asset) => {
                    if asset.len() != series.len() {
                        errors.push(PrepError::AlignmentError {
                            series: series.name().to_string(),
                            other: asset.name().to_string(),
                            reason: format!(
                                "lengths differ ({} vs {})",
                                series.len(),
                                asset.len()
                            ),
                        });
                    }
                    if !series.same_stamps(asset) {
                        errors.push(PrepError::AlignmentError {
                            series: series.name().to_string(),
                            other: asset.name().to_string(),
                            reason: "stamps differ".to_string(),
                        });
                    }
                    if errors.is_empty() {
                        match asset.as_floats() {
                            Ok(asset_values) => {
                                current = subtract(&current, &asset_values);
                            }
                            Err(e) => errors.push(e.into()),
                        }
                    }
                }
            }
            if !errors.is_empty() {
                return TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                };
            }
        }

        if self.is_log() {
            if current.iter().flatten().any(|&v| v <= 0.0) {
                errors.push(PrepError::DomainViolation {
                    transform: self.label().to_string(),
                    series: series.name().to_string(),
                    reason:
                        "log requires strictly positive values (after previous transforms, if any)"
                            .to_string(),
                });
                return TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                };
            }
            current = map_present(&current, f64::ln);
        }

        if self.is_sqrt() {
            if current.iter().flatten().any(|&v| v < 0.0) {
                errors.push(PrepError::DomainViolation {
                    transform: self.label().to_string(),
                    series: series.name().to_string(),
                    reason:
                        "square root requires non-negative values (after previous transforms, if any)"
                            .to_string(),
                });
                return TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                };
            }
            current = map_present(&current, f64::sqrt);
        }

        if current.iter().any(Option::is_none) {
            suggestions.push(format!(
                "'{}' still contains missing values after the transform",
                series.name()
            ));
        }

        match series.with_float_values(current) {
            Ok(out) => TransformOutcome {
                series: out,
                errors,
                suggestions,
            },
            Err(e) => {
                errors.push(e.into());
                TransformOutcome {
                    series: series.clone(),
                    errors,
                    suggestions,
                }
            }
        }
    }

    /// Unchecked fast path: run every step of the transform in precedence
    /// order (returns, risk adjustment, log, square root).
    ///
    /// Intended for use after both checked phases reported zero errors; the
    /// risk-adjustment asset, if any, must already be on the same basis as
    /// the series (i.e. have had its own return transform applied).
    /// Alignment and type problems still surface as errors, but domain
    /// preconditions are not re-validated.
    pub fn apply(&self, series: &DataSeries, raa: Option<&DataSeries>) -> Result<DataSeries> {
        let mut current = series.as_floats()?;
        let mut stamps = series.stamps().to_vec();

        if self.is_returns() {
            if series.len() < 2 {
                return Err(PrepError::InsufficientData {
                    series: series.name().to_string(),
                    needed: 2,
                    got: series.len(),
                });
            }
            current = percent_change(&current);
            stamps.truncate(stamps.len() - 1);
        }

        if self.is_risk_adjusting() {
            let asset = raa.ok_or_else(|| PrepError::AlignmentError {
                series: series.name().to_string(),
                other: "<risk adjustment asset>".to_string(),
                reason: "no risk adjustment asset series was supplied".to_string(),
            })?;
            let asset_values = asset.as_floats()?;
            if asset_values.len() != current.len() {
                return Err(PrepError::AlignmentError {
                    series: series.name().to_string(),
                    other: asset.name().to_string(),
                    reason: format!("lengths differ ({} vs {})", current.len(), asset_values.len()),
                });
            }
            current = subtract(&current, &asset_values);
        }

        if self.is_log() {
            current = map_present(&current, f64::ln);
        }

        if self.is_sqrt() {
            current = map_present(&current, f64::sqrt);
        }

        Ok(series.replaced(stamps, SeriesValues::Float(current))?)
    }
}

/// Percent change between consecutive observations, stored at the earlier
/// position; the final (newest) observation is dropped. A missing operand
/// yields a missing result.
fn percent_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .windows(2)
        .map(|pair| match (pair[0], pair[1]) {
            (Some(prev), Some(next)) => Some((next - prev) / prev),
            _ => None,
        })
        .collect()
}

/// Elementwise subtraction; missing propagates from either operand
fn subtract(left: &[Option<f64>], right: &[Option<f64>]) -> Vec<Option<f64>> {
    left.iter()
        .zip(right.iter())
        .map(|(l, r)| match (l, r) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        })
        .collect()
}

/// Apply a function to present values, leaving missing ones untouched
fn map_present(values: &[Option<f64>], f: impl Fn(f64) -> f64) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(&f)).collect()
}
