use crate::domain::errors::{NetworkError, NetworkResult};
use crate::domain::kpi::DataPoint;
use serde::{Deserialize, Serialize};

/// Wire shape of one series entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDataPointDto {
    pub month: String,
    pub revenue: f64,
    pub timestamp: u64,
}

impl From<KpiDataPointDto> for DataPoint {
    fn from(dto: KpiDataPointDto) -> Self {
        DataPoint::new(dto.month, dto.revenue, dto.timestamp)
    }
}

impl From<&DataPoint> for KpiDataPointDto {
    fn from(point: &DataPoint) -> Self {
        Self {
            month: point.label.clone(),
            revenue: point.value,
            timestamp: point.timestamp,
        }
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDto {
    pub error: String,
}

/// Parses a JSON array of series entries.
pub fn parse_series(body: &str) -> NetworkResult<Vec<DataPoint>> {
    let entries: Vec<KpiDataPointDto> =
        serde_json::from_str(body).map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
    Ok(entries.into_iter().map(DataPoint::from).collect())
}

/// Message of an error body, if it has the expected shape.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorDto>(body).ok().map(|dto| dto.error)
}
