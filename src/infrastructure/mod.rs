pub mod dom_events;
pub mod http;
pub mod rendering;
pub mod services;
pub mod storage;
pub mod synthetic;

use crate::domain::{
    chart::{ChartConfig, DataSourceMode},
    errors::NetworkResult,
    kpi::{DataPoint, SeriesSource},
};
use http::KpiHttpClient;
use synthetic::SyntheticKpiSource;

/// Series source selected by [`DataSourceMode`]
#[derive(Debug, Clone)]
pub enum KpiSource {
    Http(KpiHttpClient),
    Synthetic(SyntheticKpiSource),
}

impl KpiSource {
    pub fn from_config(config: &ChartConfig) -> Self {
        match config.source_mode {
            DataSourceMode::Http => Self::Http(KpiHttpClient::new(config.api_path)),
            DataSourceMode::Synthetic => Self::Synthetic(SyntheticKpiSource::default()),
        }
    }

    pub fn mode(&self) -> DataSourceMode {
        match self {
            Self::Http(_) => DataSourceMode::Http,
            Self::Synthetic(_) => DataSourceMode::Synthetic,
        }
    }
}

impl SeriesSource for KpiSource {
    async fn load(&self) -> NetworkResult<Vec<DataPoint>> {
        match self {
            Self::Http(client) => client.load().await,
            Self::Synthetic(source) => source.load().await,
        }
    }

    async fn refresh(&self) -> NetworkResult<Vec<DataPoint>> {
        match self {
            Self::Http(client) => client.refresh().await,
            Self::Synthetic(source) => source.refresh().await,
        }
    }
}
