//! Text grammar for array- and matrix-valued parameters
//!
//! Arrays are comma-separated; matrices are semicolon-separated rows of
//! arrays (a trailing empty row is tolerated). Numeric tokens are trimmed
//! before parsing; text tokens are taken verbatim. Matrices must be
//! rectangular; callers hand them to fitting routines that assume it.

use ndarray::{Array1, Array2};

use super::{ParamError, Result};

/// Parse a comma-separated float array, e.g. `"1.0, 2.0, 3.0"`
pub fn parse_float_array(name: &str, raw: &str) -> Result<Array1<f64>> {
    let values = raw
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .map_err(|_| ParamError::ParseError {
                    name: name.to_string(),
                    token: token.trim().to_string(),
                    expected: "float",
                })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(Array1::from(values))
}

/// Parse a comma-separated integer array, e.g. `"1, 2, 3"`
pub fn parse_int_array(name: &str, raw: &str) -> Result<Array1<i64>> {
    let values = raw
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| ParamError::ParseError {
                    name: name.to_string(),
                    token: token.trim().to_string(),
                    expected: "int",
                })
        })
        .collect::<Result<Vec<i64>>>()?;
    Ok(Array1::from(values))
}

/// Split a comma-separated text array; tokens are kept verbatim
/// (whitespace is only stripped for numeric types)
pub fn parse_text_array(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Parse a semicolon/comma matrix, e.g. `"1.0, 2.0; 3.0, 4.0"`.
///
/// A trailing `;` (empty last row) is dropped. Ragged rows are rejected.
pub fn parse_float_matrix(name: &str, raw: &str) -> Result<Array2<f64>> {
    let rows = row_texts(raw)
        .map(|row| parse_float_array(name, row))
        .collect::<Result<Vec<_>>>()?;
    rows_to_matrix(name, rows)
}

/// Parse a semicolon/comma integer matrix
pub fn parse_int_matrix(name: &str, raw: &str) -> Result<Array2<i64>> {
    let rows = row_texts(raw)
        .map(|row| parse_int_array(name, row))
        .collect::<Result<Vec<_>>>()?;
    rows_to_matrix(name, rows)
}

/// Split into row texts, dropping only a trailing empty row (a trailing
/// `;`); an empty row elsewhere is a parse error in the row grammar
fn row_texts(raw: &str) -> impl Iterator<Item = &str> {
    let mut parts: Vec<&str> = raw.split(';').collect();
    if parts.len() > 1 && parts.last().is_some_and(|s| s.trim().is_empty()) {
        parts.pop();
    }
    parts.into_iter()
}

fn rows_to_matrix<T: Clone>(name: &str, rows: Vec<Array1<T>>) -> Result<Array2<T>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Array1::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(ParamError::ShapeError {
                name: name.to_string(),
                message: format!(
                    "matrix rows differ in length (row 0 has {}, row {} has {})",
                    ncols,
                    i,
                    row.len()
                ),
            });
        }
    }
    let flat: Vec<T> = rows.into_iter().flat_map(|r| r.to_vec()).collect();
    Array2::from_shape_vec((nrows, ncols), flat).map_err(|e| ParamError::ShapeError {
        name: name.to_string(),
        message: e.to_string(),
    })
}
