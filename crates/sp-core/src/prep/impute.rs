//! Imputation policies for single series
//!
//! A policy is fully determined before it sees any data: it depends only on
//! the series it is applied to, never on other series. For any policy other
//! than [`ImputePolicy::None`], the result of a successful application
//! contains zero missing values.

use serde::{Deserialize, Serialize};

use super::{PrepError, Result};
use crate::data::{DataSeries, SeriesValues};

/// A missing-value policy for one data series.
///
/// The `Value` policy carries its constant as raw text; it is coerced to
/// the series' element type when the policy is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputePolicy {
    /// Leave the series untouched (missing values may remain)
    None,
    /// Propagate the last known value forward, then back-fill any
    /// still-missing leading values
    ForwardFill,
    /// Propagate the next known value backward, then forward-fill any
    /// still-missing trailing values
    BackwardFill,
    /// Fill with the series' own mean (numeric series only)
    Mean,
    /// Fill with the series' own median (numeric series only)
    Median,
    /// Fill with a constant, coerced to the series' element type
    Value(String),
}

impl ImputePolicy {
    /// Parse a policy from its display label.
    ///
    /// `value` is consulted only for the "Value" label.
    pub fn from_label(label: &str, value: &str) -> Option<ImputePolicy> {
        match label {
            "" => Some(ImputePolicy::None),
            "Forward Fill" => Some(ImputePolicy::ForwardFill),
            "Backward Fill" => Some(ImputePolicy::BackwardFill),
            "Mean" => Some(ImputePolicy::Mean),
            "Median" => Some(ImputePolicy::Median),
            "Value" => Some(ImputePolicy::Value(value.to_string())),
            _ => None,
        }
    }

    /// Display label of the policy
    pub fn label(&self) -> &'static str {
        match self {
            ImputePolicy::None => "",
            ImputePolicy::ForwardFill => "Forward Fill",
            ImputePolicy::BackwardFill => "Backward Fill",
            ImputePolicy::Mean => "Mean",
            ImputePolicy::Median => "Median",
            ImputePolicy::Value(_) => "Value",
        }
    }

    /// Apply the policy, returning a new series.
    ///
    /// An empty series and the `None` policy are both returned unchanged.
    /// Mean/median on a string series fail with
    /// [`PrepError::UnsupportedType`]; a numeric series with no present
    /// values has no mean or median and fails rather than defaulting.
    pub fn apply(&self, series: &DataSeries) -> Result<DataSeries> {
        if series.is_empty() || matches!(self, ImputePolicy::None) {
            return Ok(series.clone());
        }

        match self {
            ImputePolicy::None => Ok(series.clone()),
            ImputePolicy::ForwardFill => {
                let values = match series.values() {
                    SeriesValues::Float(v) => SeriesValues::Float(fill_forward_then_back(v)),
                    SeriesValues::Int(v) => SeriesValues::Int(fill_forward_then_back(v)),
                    SeriesValues::Text(v) => SeriesValues::Text(fill_forward_then_back(v)),
                };
                Ok(series.replaced(series.stamps().to_vec(), values)?)
            }
            ImputePolicy::BackwardFill => {
                let values = match series.values() {
                    SeriesValues::Float(v) => SeriesValues::Float(fill_back_then_forward(v)),
                    SeriesValues::Int(v) => SeriesValues::Int(fill_back_then_forward(v)),
                    SeriesValues::Text(v) => SeriesValues::Text(fill_back_then_forward(v)),
                };
                Ok(series.replaced(series.stamps().to_vec(), values)?)
            }
            ImputePolicy::Mean => self.fill_with_statistic(series, series.mean()),
            ImputePolicy::Median => self.fill_with_statistic(series, series.median()),
            ImputePolicy::Value(raw) => self.fill_with_constant(series, raw),
        }
    }

    fn fill_with_statistic(
        &self,
        series: &DataSeries,
        statistic: crate::data::Result<f64>,
    ) -> Result<DataSeries> {
        if !series.is_numeric() {
            return Err(PrepError::UnsupportedType {
                policy: self.label().to_string(),
                dtype: series.dtype(),
            });
        }
        let fill = statistic?;
        let filled = series
            .as_floats()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(fill)))
            .collect();
        Ok(series.with_float_values(filled)?)
    }

    fn fill_with_constant(&self, series: &DataSeries, raw: &str) -> Result<DataSeries> {
        let values = match series.values() {
            SeriesValues::Float(v) => {
                let fill: f64 = raw.trim().parse().map_err(|_| PrepError::ParseError {
                    token: raw.to_string(),
                    expected: "float",
                })?;
                SeriesValues::Float(v.iter().map(|o| Some(o.unwrap_or(fill))).collect())
            }
            SeriesValues::Int(v) => {
                let fill: i64 = raw.trim().parse().map_err(|_| PrepError::ParseError {
                    token: raw.to_string(),
                    expected: "int",
                })?;
                SeriesValues::Int(v.iter().map(|o| Some(o.unwrap_or(fill))).collect())
            }
            SeriesValues::Text(v) => SeriesValues::Text(
                v.iter()
                    .map(|o| Some(o.clone().unwrap_or_else(|| raw.to_string())))
                    .collect(),
            ),
        };
        Ok(series.replaced(series.stamps().to_vec(), values)?)
    }
}

/// Forward-fill, then back-fill what the forward pass could not reach
/// (leading missing values).
fn fill_forward_then_back<T: Clone>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut out: Vec<Option<T>> = Vec::with_capacity(values.len());
    let mut last: Option<T> = None;
    for v in values {
        if v.is_some() {
            last = v.clone();
        }
        out.push(last.clone());
    }
    back_fill_in_place(&mut out);
    out
}

/// Backward-fill, then forward-fill what the backward pass could not reach
/// (trailing missing values).
fn fill_back_then_forward<T: Clone>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut out: Vec<Option<T>> = vec![None; values.len()];
    let mut next: Option<T> = None;
    for (i, v) in values.iter().enumerate().rev() {
        if v.is_some() {
            next = v.clone();
        }
        out[i] = next.clone();
    }
    forward_fill_in_place(&mut out);
    out
}

fn forward_fill_in_place<T: Clone>(values: &mut [Option<T>]) {
    let mut last: Option<T> = None;
    for v in values.iter_mut() {
        if v.is_some() {
            last = v.clone();
        } else {
            *v = last.clone();
        }
    }
}

fn back_fill_in_place<T: Clone>(values: &mut [Option<T>]) {
    let mut next: Option<T> = None;
    for v in values.iter_mut().rev() {
        if v.is_some() {
            next = v.clone();
        } else {
            *v = next.clone();
        }
    }
}
