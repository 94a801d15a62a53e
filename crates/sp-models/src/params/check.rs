//! Validators: turn supplied values into typed, safe arguments
//!
//! Each validator looks up the named spec in the registry, falls back to
//! the domain default when no value was supplied, and otherwise checks the
//! supplied value against the domain. All validators are pure functions
//! over the registry and the value map.

use ndarray::{Array1, Array2};

use super::parse;
use super::spec::{ElementType, NumericType, ParamDomain, ParameterSet};
use super::value::{ParamValue, ParameterValues};
use super::{ParamError, Result};

impl ParameterSet {
    /// Validate a choice parameter.
    ///
    /// Absent → the first listed value; supplied → membership test against
    /// the allowed set.
    pub fn check_choice(&self, name: &str, values: &ParameterValues) -> Result<String> {
        let allowed = self.choice_values(name)?;
        match values.get(name) {
            None => Ok(allowed[0].to_string()),
            Some(ParamValue::Text(s)) => {
                if allowed.iter().any(|v| v == s) {
                    Ok(s.clone())
                } else {
                    Err(ParamError::InvalidChoice {
                        name: name.to_string(),
                        value: s.clone(),
                        allowed: allowed.join(", "),
                    })
                }
            }
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    /// Validate a `"True"/"False"` choice into a boolean
    pub fn check_bool(&self, name: &str, values: &ParameterValues) -> Result<bool> {
        Ok(self.check_choice(name, values)? == "True")
    }

    /// Validate a `"None"/"True"/"False"` choice into an optional boolean
    pub fn check_opt_bool(&self, name: &str, values: &ParameterValues) -> Result<Option<bool>> {
        match self.check_choice(name, values)?.as_str() {
            "None" => Ok(None),
            "True" => Ok(Some(true)),
            _ => Ok(Some(false)),
        }
    }

    /// Validate a float-typed numeric range parameter.
    ///
    /// Absent → the declared default; supplied → the value must be a float
    /// (an integer is a type mismatch, not a coercion) and must satisfy
    /// both bounds, strictly where the bound is exclusive.
    pub fn check_float(&self, name: &str, values: &ParameterValues) -> Result<f64> {
        let range = self.numeric_range(name, NumericType::Float)?;
        match values.get(name) {
            None => Ok(range.default),
            Some(ParamValue::Float(v)) => {
                range.check(name, *v)?;
                Ok(*v)
            }
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "float",
                actual: other.kind(),
            }),
        }
    }

    /// Validate an int-typed numeric range parameter
    pub fn check_int(&self, name: &str, values: &ParameterValues) -> Result<i64> {
        let range = self.numeric_range(name, NumericType::Int)?;
        match values.get(name) {
            None => Ok(range.default as i64),
            Some(ParamValue::Int(v)) => {
                range.check(name, *v as f64)?;
                Ok(*v)
            }
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "int",
                actual: other.kind(),
            }),
        }
    }

    /// Validate a float array parameter.
    ///
    /// A typed array passes through unchanged; text is parsed with the
    /// array grammar. Absent → `None` (the owning family decides whether
    /// the parameter is required).
    pub fn check_float_array(
        &self,
        name: &str,
        values: &ParameterValues,
    ) -> Result<Option<Array1<f64>>> {
        self.array_domain(name, ElementType::Float)?;
        match values.get(name) {
            None => Ok(None),
            Some(ParamValue::FloatArray(a)) => Ok(Some(a.clone())),
            Some(ParamValue::Text(raw)) => Ok(Some(parse::parse_float_array(name, raw)?)),
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "float array",
                actual: other.kind(),
            }),
        }
    }

    /// Validate an integer array parameter
    pub fn check_int_array(
        &self,
        name: &str,
        values: &ParameterValues,
    ) -> Result<Option<Array1<i64>>> {
        self.array_domain(name, ElementType::Int)?;
        match values.get(name) {
            None => Ok(None),
            Some(ParamValue::IntArray(a)) => Ok(Some(a.clone())),
            Some(ParamValue::Text(raw)) => Ok(Some(parse::parse_int_array(name, raw)?)),
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "int array",
                actual: other.kind(),
            }),
        }
    }

    /// Validate a text array parameter
    pub fn check_text_array(
        &self,
        name: &str,
        values: &ParameterValues,
    ) -> Result<Option<Vec<String>>> {
        self.array_domain(name, ElementType::Text)?;
        match values.get(name) {
            None => Ok(None),
            Some(ParamValue::TextArray(a)) => Ok(Some(a.clone())),
            Some(ParamValue::Text(raw)) => Ok(Some(parse::parse_text_array(raw))),
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "text array",
                actual: other.kind(),
            }),
        }
    }

    /// Validate a float matrix parameter.
    ///
    /// A typed matrix passes through unchanged; a typed 1×N array is
    /// reshaped into a one-row matrix; text is parsed with the matrix
    /// grammar (rectangularity enforced).
    pub fn check_float_matrix(
        &self,
        name: &str,
        values: &ParameterValues,
    ) -> Result<Option<Array2<f64>>> {
        self.matrix_domain(name, ElementType::Float)?;
        match values.get(name) {
            None => Ok(None),
            Some(ParamValue::FloatMatrix(m)) => Ok(Some(m.clone())),
            Some(ParamValue::FloatArray(a)) => {
                let row = a
                    .clone()
                    .into_shape_with_order((1, a.len()))
                    .map_err(|e| ParamError::ShapeError {
                        name: name.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(row))
            }
            Some(ParamValue::Text(raw)) => Ok(Some(parse::parse_float_matrix(name, raw)?)),
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "float matrix",
                actual: other.kind(),
            }),
        }
    }

    /// Validate an integer matrix parameter
    pub fn check_int_matrix(
        &self,
        name: &str,
        values: &ParameterValues,
    ) -> Result<Option<Array2<i64>>> {
        self.matrix_domain(name, ElementType::Int)?;
        match values.get(name) {
            None => Ok(None),
            Some(ParamValue::IntMatrix(m)) => Ok(Some(m.clone())),
            Some(ParamValue::IntArray(a)) => {
                let row = a
                    .clone()
                    .into_shape_with_order((1, a.len()))
                    .map_err(|e| ParamError::ShapeError {
                        name: name.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(row))
            }
            Some(ParamValue::Text(raw)) => Ok(Some(parse::parse_int_matrix(name, raw)?)),
            Some(other) => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: "int matrix",
                actual: other.kind(),
            }),
        }
    }

    // ==================== Domain lookups ====================

    fn choice_values(&self, name: &str) -> Result<&[&'static str]> {
        match &self.spec(name)?.domain {
            ParamDomain::Choice { values } => Ok(values),
            other => Err(ParamError::WrongDomain {
                name: name.to_string(),
                expected: "choice",
                actual: other.kind(),
            }),
        }
    }

    fn numeric_range(&self, name: &str, ty: NumericType) -> Result<RangeCheck> {
        match &self.spec(name)?.domain {
            ParamDomain::NumericRange {
                ty: declared,
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
                default,
                ..
            } => {
                if *declared != ty {
                    return Err(ParamError::TypeMismatch {
                        name: name.to_string(),
                        expected: match ty {
                            NumericType::Int => "int",
                            NumericType::Float => "float",
                        },
                        actual: match declared {
                            NumericType::Int => "int",
                            NumericType::Float => "float",
                        },
                    });
                }
                Ok(RangeCheck {
                    lower: *lower,
                    lower_inclusive: *lower_inclusive,
                    upper: *upper,
                    upper_inclusive: *upper_inclusive,
                    default: *default,
                })
            }
            other => Err(ParamError::WrongDomain {
                name: name.to_string(),
                expected: "numeric range",
                actual: other.kind(),
            }),
        }
    }

    fn array_domain(&self, name: &str, element: ElementType) -> Result<()> {
        match &self.spec(name)?.domain {
            ParamDomain::Array { element: declared } if *declared == element => Ok(()),
            ParamDomain::Array { element: declared } => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: element.name(),
                actual: declared.name(),
            }),
            other => Err(ParamError::WrongDomain {
                name: name.to_string(),
                expected: "array",
                actual: other.kind(),
            }),
        }
    }

    fn matrix_domain(&self, name: &str, element: ElementType) -> Result<()> {
        match &self.spec(name)?.domain {
            ParamDomain::Matrix { element: declared } if *declared == element => Ok(()),
            ParamDomain::Matrix { element: declared } => Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: element.name(),
                actual: declared.name(),
            }),
            other => Err(ParamError::WrongDomain {
                name: name.to_string(),
                expected: "matrix",
                actual: other.kind(),
            }),
        }
    }
}

/// Bounds of one numeric range, with both ends enforced.
///
/// A supplied value violating either bound raises; the default is never
/// substituted for a supplied value.
struct RangeCheck {
    lower: f64,
    lower_inclusive: bool,
    upper: f64,
    upper_inclusive: bool,
    default: f64,
}

impl RangeCheck {
    fn check(&self, name: &str, value: f64) -> Result<()> {
        let lower_ok = if self.lower_inclusive {
            value >= self.lower
        } else {
            value > self.lower
        };
        if !lower_ok {
            return Err(ParamError::RangeViolation {
                name: name.to_string(),
                value,
                bound: format!(
                    "{} {}",
                    if self.lower_inclusive { ">=" } else { ">" },
                    self.lower
                ),
            });
        }

        let upper_ok = if self.upper_inclusive {
            value <= self.upper
        } else {
            value < self.upper
        };
        if !upper_ok {
            return Err(ParamError::RangeViolation {
                name: name.to_string(),
                value,
                bound: format!(
                    "{} {}",
                    if self.upper_inclusive { "<=" } else { "<" },
                    self.upper
                ),
            });
        }

        Ok(())
    }
}
