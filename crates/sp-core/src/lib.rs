//! Core data structures and preparation pipeline for statprep
//!
//! This crate provides the in-memory data series used throughout statprep,
//! together with the two preparation stages that clean a raw series before
//! it is handed to a regression fitting call:
//!
//! - [`data`]: typed, ordered data series with explicit missing values.
//! - [`prep`]: imputation policies and the ordered transform pipeline
//!   (returns, risk adjustment, log, square root).
//!
//! The crate performs no I/O: series are constructed by the surrounding
//! application (database query, file import) and every preparation stage
//! returns a new series, leaving the input intact.

pub mod data;
pub mod error;
pub mod prep;

pub use data::{DataSeries, SeriesStamp, SeriesValue, SeriesValues};
pub use error::StatPrepError;
pub use prep::{ImputePolicy, PrepError, Transform, TransformOutcome};
