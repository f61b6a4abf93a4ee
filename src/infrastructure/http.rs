pub mod dto;

use crate::domain::{
    errors::{NetworkError, NetworkResult},
    kpi::{DataPoint, SeriesSource},
    logging::{LogComponent, get_logger},
};
use dto::{parse_error_message, parse_series};
use gloo::net::http::{Request, Response};

/// HTTP client for the KPI series endpoint
#[derive(Debug, Clone)]
pub struct KpiHttpClient {
    endpoint: String,
}

impl KpiHttpClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the current series
    pub async fn fetch_series(&self) -> NetworkResult<Vec<DataPoint>> {
        get_logger().debug(
            LogComponent::Infrastructure("KpiHttpClient"),
            &format!("GET {}", self.endpoint),
        );
        let response = Request::get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NetworkError::RequestFailed(format!("{:?}", e)))?;
        Self::read_series(response).await
    }

    /// POST to regenerate the series
    pub async fn regenerate_series(&self) -> NetworkResult<Vec<DataPoint>> {
        get_logger().debug(
            LogComponent::Infrastructure("KpiHttpClient"),
            &format!("POST {}", self.endpoint),
        );
        let response = Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NetworkError::RequestFailed(format!("{:?}", e)))?;
        Self::read_series(response).await
    }

    async fn read_series(response: Response) -> NetworkResult<Vec<DataPoint>> {
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::InvalidResponse(format!("{:?}", e)))?;

        if !response.ok() {
            let message = parse_error_message(&body).unwrap_or_else(|| response.status_text());
            get_logger().error(
                LogComponent::Infrastructure("KpiHttpClient"),
                &format!("HTTP {}: {}", response.status(), message),
            );
            return Err(NetworkError::Status { status: response.status(), message });
        }

        let series = parse_series(&body)?;
        get_logger().info(
            LogComponent::Infrastructure("KpiHttpClient"),
            &format!("received {} data points", series.len()),
        );
        Ok(series)
    }
}

impl SeriesSource for KpiHttpClient {
    async fn load(&self) -> NetworkResult<Vec<DataPoint>> {
        self.fetch_series().await
    }

    async fn refresh(&self) -> NetworkResult<Vec<DataPoint>> {
        self.regenerate_series().await
    }
}
