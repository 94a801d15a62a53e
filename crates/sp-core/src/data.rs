//! Core data structures for statprep
//!
//! This module provides the ordered, possibly-missing data series that the
//! preparation pipeline operates on. A series is constructed once (by the
//! surrounding application, from a database read or a file import) and then
//! flows by value through imputation and transforms; no stage mutates it
//! in place.

mod series;
mod stamp;


// Re-exports
pub use series::{DataSeries, SeriesValue, SeriesValues};
pub use stamp::SeriesStamp;

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type IntArray = ndarray::Array1<i64>;
pub type Matrix = ndarray::Array2<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone)]
pub enum DataError {
    #[error("Length mismatch: {stamps} stamps for {values} values")]
    LengthMismatch { stamps: usize, values: usize },

    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Operation '{operation}' requires numeric data, got {dtype}")]
    NonNumericData {
        operation: &'static str,
        dtype: &'static str,
    },

    #[error("Operation '{operation}' is undefined: series has no present values")]
    NoPresentValues { operation: &'static str },

    #[error("Series contains missing values and cannot be exported as a dense array")]
    MissingValues,
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
