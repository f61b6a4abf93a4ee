use crate::domain::{
    errors::NetworkResult,
    kpi::{DataPoint, SeriesSource},
    logging::{LogComponent, get_logger, get_time_provider},
};
use gloo_timers::future::TimeoutFuture;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const BASE_REVENUE: f64 = 500_000.0;
const ANNUAL_TREND: f64 = 0.08;
const DAY_MS: u64 = 24 * 60 * 60 * 1000;

pub const LOAD_LATENCY_MS: u32 = 500;
pub const REFRESH_LATENCY_MS: u32 = 1000;

/// Twelve months of compounding revenue with trend, noise and seasonality.
///
/// `random` must yield values in `[0, 1)`.
pub fn generate_kpi_series(now_ms: u64, mut random: impl FnMut() -> f64) -> Vec<DataPoint> {
    let mut revenue = BASE_REVENUE;
    MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let volatility = (random() - 0.5) * 0.2;
            let seasonality = (index as f64 / 12.0 * 2.0 * std::f64::consts::PI).sin() * 0.1;
            revenue *= 1.0 + ANNUAL_TREND / 12.0 + volatility + seasonality;
            DataPoint::new(*month, revenue.round(), now_ms + index as u64 * DAY_MS)
        })
        .collect()
}

/// In-browser series source for running without a backend
#[derive(Debug, Clone, Copy)]
pub struct SyntheticKpiSource {
    load_latency_ms: u32,
    refresh_latency_ms: u32,
}

impl Default for SyntheticKpiSource {
    fn default() -> Self {
        Self::new(LOAD_LATENCY_MS, REFRESH_LATENCY_MS)
    }
}

impl SyntheticKpiSource {
    pub fn new(load_latency_ms: u32, refresh_latency_ms: u32) -> Self {
        Self { load_latency_ms, refresh_latency_ms }
    }

    async fn generate(&self, latency_ms: u32) -> NetworkResult<Vec<DataPoint>> {
        TimeoutFuture::new(latency_ms).await;
        let series = generate_kpi_series(get_time_provider().current_timestamp(), js_sys::Math::random);
        get_logger().debug(
            LogComponent::Infrastructure("SyntheticKpiSource"),
            &format!("generated {} data points", series.len()),
        );
        Ok(series)
    }
}

impl SeriesSource for SyntheticKpiSource {
    async fn load(&self) -> NetworkResult<Vec<DataPoint>> {
        self.generate(self.load_latency_ms).await
    }

    async fn refresh(&self) -> NetworkResult<Vec<DataPoint>> {
        self.generate(self.refresh_latency_ms).await
    }
}
