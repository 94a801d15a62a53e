//! Series data structure for ordered, possibly-missing observations
//!
//! A DataSeries pairs an ordered sequence of stamps (dates or positions)
//! with typed values. Missing observations are explicit (`None`) rather
//! than encoded as sentinels, so imputation and transform stages can reason
//! about them directly.

use super::*;

use ndarray::Array1;

/// Typed value storage for a series, one variant per element type.
///
/// Missing observations are represented as `None` in every variant.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesValues {
    /// Floating point numbers (f64)
    Float(Vec<Option<f64>>),
    /// Integer numbers (i64)
    Int(Vec<Option<i64>>),
    /// String values
    Text(Vec<Option<String>>),
}

/// A single observation extracted from a series, typed like its storage
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl SeriesValues {
    /// Number of observations, missing included
    pub fn len(&self) -> usize {
        match self {
            SeriesValues::Float(v) => v.len(),
            SeriesValues::Int(v) => v.len(),
            SeriesValues::Text(v) => v.len(),
        }
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name of the stored elements
    pub fn dtype(&self) -> &'static str {
        match self {
            SeriesValues::Float(_) => "float64",
            SeriesValues::Int(_) => "int64",
            SeriesValues::Text(_) => "string",
        }
    }

    /// Number of missing observations
    pub fn missing_count(&self) -> usize {
        match self {
            SeriesValues::Float(v) => v.iter().filter(|o| o.is_none()).count(),
            SeriesValues::Int(v) => v.iter().filter(|o| o.is_none()).count(),
            SeriesValues::Text(v) => v.iter().filter(|o| o.is_none()).count(),
        }
    }
}

/// An ordered series of (stamp, value) pairs, the unit of work of the
/// preparation pipeline.
///
/// Invariant: `stamps.len() == values.len()`, validated at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSeries {
    name: String,
    stamps: Vec<SeriesStamp>,
    values: SeriesValues,
}

impl DataSeries {
    /// Create a new series, validating that stamps and values agree in length
    pub fn new(
        name: impl Into<String>,
        stamps: Vec<SeriesStamp>,
        values: SeriesValues,
    ) -> Result<Self> {
        if stamps.len() != values.len() {
            return Err(DataError::LengthMismatch {
                stamps: stamps.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            stamps,
            values,
        })
    }

    /// Create a float series with positional stamps
    pub fn from_floats(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let stamps = (0..values.len()).map(SeriesStamp::Position).collect();
        Self {
            name: name.into(),
            stamps,
            values: SeriesValues::Float(values),
        }
    }

    /// Create an integer series with positional stamps
    pub fn from_ints(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        let stamps = (0..values.len()).map(SeriesStamp::Position).collect();
        Self {
            name: name.into(),
            stamps,
            values: SeriesValues::Int(values),
        }
    }

    /// Create a string series with positional stamps
    pub fn from_text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        let stamps = (0..values.len()).map(SeriesStamp::Position).collect();
        Self {
            name: name.into(),
            stamps,
            values: SeriesValues::Text(values),
        }
    }

    /// Series name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stamps, in order
    pub fn stamps(&self) -> &[SeriesStamp] {
        &self.stamps
    }

    /// Raw value storage
    pub fn values(&self) -> &SeriesValues {
        &self.values
    }

    /// Number of observations, missing included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type name of the stored elements
    pub fn dtype(&self) -> &'static str {
        self.values.dtype()
    }

    /// Whether the element type supports arithmetic
    pub fn is_numeric(&self) -> bool {
        !matches!(self.values, SeriesValues::Text(_))
    }

    /// Whether any observation is missing
    pub fn has_missing(&self) -> bool {
        self.values.missing_count() > 0
    }

    /// Number of missing observations
    pub fn missing_count(&self) -> usize {
        self.values.missing_count()
    }

    /// Stamp and observation at position `idx`.
    ///
    /// The inner `Option` is the observation itself, `None` when missing.
    pub fn get(&self, idx: usize) -> Result<(&SeriesStamp, Option<SeriesValue>)> {
        if idx >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.len(),
            });
        }
        let value = match &self.values {
            SeriesValues::Float(v) => v[idx].map(SeriesValue::Float),
            SeriesValues::Int(v) => v[idx].map(SeriesValue::Int),
            SeriesValues::Text(v) => v[idx].clone().map(SeriesValue::Text),
        };
        Ok((&self.stamps[idx], value))
    }

    /// Whether two series share an identical stamp sequence
    pub fn same_stamps(&self, other: &DataSeries) -> bool {
        self.stamps == other.stamps
    }

    /// Values as `Option<f64>`, integers promoted.
    ///
    /// Fails on string series; this is the entry point for every numeric
    /// stage of the pipeline.
    pub fn as_floats(&self) -> Result<Vec<Option<f64>>> {
        match &self.values {
            SeriesValues::Float(v) => Ok(v.clone()),
            SeriesValues::Int(v) => Ok(v.iter().map(|o| o.map(|x| x as f64)).collect()),
            SeriesValues::Text(_) => Err(DataError::NonNumericData {
                operation: "as_floats",
                dtype: self.dtype(),
            }),
        }
    }

    /// Export as a dense float array for a fitting call.
    ///
    /// Fails on string series and on any remaining missing value; run the
    /// series through an imputation policy first.
    pub fn to_float_array(&self) -> Result<FloatArray> {
        let floats = self.as_floats()?;
        let dense: Option<Vec<f64>> = floats.into_iter().collect();
        match dense {
            Some(v) => Ok(Array1::from(v)),
            None => Err(DataError::MissingValues),
        }
    }

    /// Mean over present values.
    ///
    /// Fails on string series; a series with no present values has no mean.
    pub fn mean(&self) -> Result<f64> {
        let present = self.present_floats("mean")?;
        if present.is_empty() {
            return Err(DataError::NoPresentValues { operation: "mean" });
        }
        Ok(present.iter().sum::<f64>() / present.len() as f64)
    }

    /// Median over present values (midpoint interpolation for even counts)
    pub fn median(&self) -> Result<f64> {
        let mut present = self.present_floats("median")?;
        if present.is_empty() {
            return Err(DataError::NoPresentValues { operation: "median" });
        }
        present.sort_by(f64::total_cmp);
        let n = present.len();
        if n % 2 == 1 {
            Ok(present[n / 2])
        } else {
            Ok((present[n / 2 - 1] + present[n / 2]) / 2.0)
        }
    }

    /// Produce a new series with the same name, replacing stamps and values.
    ///
    /// Used by pipeline stages; the receiver is left untouched.
    pub fn replaced(&self, stamps: Vec<SeriesStamp>, values: SeriesValues) -> Result<DataSeries> {
        DataSeries::new(self.name.clone(), stamps, values)
    }

    /// Produce a new float series with the same name and stamps
    pub fn with_float_values(&self, values: Vec<Option<f64>>) -> Result<DataSeries> {
        DataSeries::new(
            self.name.clone(),
            self.stamps.clone(),
            SeriesValues::Float(values),
        )
    }

    fn present_floats(&self, operation: &'static str) -> Result<Vec<f64>> {
        match &self.values {
            SeriesValues::Float(v) => Ok(v.iter().flatten().copied().collect()),
            SeriesValues::Int(v) => Ok(v.iter().flatten().map(|&x| x as f64).collect()),
            SeriesValues::Text(_) => Err(DataError::NonNumericData {
                operation,
                dtype: self.dtype(),
            }),
        }
    }
}
