use serde::{Deserialize, Serialize};

/// Domain entity - one period of the revenue series.
///
/// The order of points in a series defines the X index space `0..len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    pub timestamp: u64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64, timestamp: u64) -> Self {
        Self { label: label.into(), value, timestamp }
    }
}

/// Builds a series from `(label, value)` pairs with zeroed timestamps.
pub fn series_from_values(values: &[(&str, f64)]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, (label, value))| DataPoint::new(*label, *value, i as u64))
        .collect()
}
