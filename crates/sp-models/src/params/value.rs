//! Supplied parameter values
//!
//! Values arrive from the caller as an explicitly tagged variant rather
//! than as duck-typed strings: the UI layer sets text, a programmatic
//! caller can hand over already-typed arrays, and the validators decide
//! per-domain what is acceptable.

use indexmap::IndexMap;
use ndarray::{Array1, Array2};

/// One supplied parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    FloatArray(Array1<f64>),
    IntArray(Array1<i64>),
    TextArray(Vec<String>),
    FloatMatrix(Array2<f64>),
    IntMatrix(Array2<i64>),
}

impl ParamValue {
    /// Short kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "text",
            ParamValue::FloatArray(_) => "float array",
            ParamValue::IntArray(_) => "int array",
            ParamValue::TextArray(_) => "text array",
            ParamValue::FloatMatrix(_) => "float matrix",
            ParamValue::IntMatrix(_) => "int matrix",
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<Array1<f64>> for ParamValue {
    fn from(v: Array1<f64>) -> Self {
        ParamValue::FloatArray(v)
    }
}

impl From<Array1<i64>> for ParamValue {
    fn from(v: Array1<i64>) -> Self {
        ParamValue::IntArray(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::TextArray(v)
    }
}

impl From<Array2<f64>> for ParamValue {
    fn from(v: Array2<f64>) -> Self {
        ParamValue::FloatMatrix(v)
    }
}

/// The mutable map of supplied values, owned by the caller and handed
/// read-only into the validators.
///
/// Absent names fall back to the registry defaults; a present name is
/// validated as supplied, never silently replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterValues {
    values: IndexMap<String, ParamValue>,
}

impl ParameterValues {
    /// Create an empty value map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one value, replacing any previous one for the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Remove a value, restoring default behavior for the name
    pub fn unset(&mut self, name: &str) -> Option<ParamValue> {
        self.values.shift_remove(name)
    }

    /// Look up a supplied value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Whether a value was supplied for the name
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
