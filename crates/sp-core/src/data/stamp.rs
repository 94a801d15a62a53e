//! Stamp (index) values for data series

use std::fmt;

/// A single index value of a [`DataSeries`](super::DataSeries): either a
/// date label as delivered by the data layer, or a plain position for
/// series without a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesStamp {
    /// ISO date label, e.g. "2024-03-29"
    Date(String),
    /// Zero-based position
    Position(usize),
}

impl SeriesStamp {
    /// Create a date stamp from any string-like label
    pub fn date(label: impl Into<String>) -> Self {
        SeriesStamp::Date(label.into())
    }
}

impl fmt::Display for SeriesStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesStamp::Date(label) => write!(f, "{}", label),
            SeriesStamp::Position(pos) => write!(f, "{}", pos),
        }
    }
}

impl From<usize> for SeriesStamp {
    fn from(pos: usize) -> Self {
        SeriesStamp::Position(pos)
    }
}

impl From<&str> for SeriesStamp {
    fn from(label: &str) -> Self {
        SeriesStamp::Date(label.to_string())
    }
}
