use super::{AxisDomain, ContentBox};
use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

/// Where the revenue series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum DataSourceMode {
    #[default]
    #[display(fmt = "HTTP")]
    #[strum(serialize = "http")]
    Http,
    #[display(fmt = "Synthetic")]
    #[strum(serialize = "synthetic")]
    Synthetic,
}

impl DataSourceMode {
    /// Reads the `source` parameter of a URL query string such as `?source=synthetic`.
    ///
    /// Unknown or missing values fall back to [`DataSourceMode::Http`].
    pub fn from_query(query: &str) -> Self {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "source")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Chart-wide constants.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub content_box: ContentBox,
    pub chart_height: f64,
    /// Horizontal distance of a threshold handle left of the plot area.
    pub handle_offset: f64,
    pub axis_padding_ratio: f64,
    pub fallback_domain: AxisDomain,
    pub snap_step: f64,
    pub settle_delay_ms: u32,
    pub stagger_step_ms: u32,
    pub reveal_delay_ms: u32,
    pub storage_key: &'static str,
    pub storage_version: u32,
    pub api_path: &'static str,
    pub source_mode: DataSourceMode,
    pub fetch_retry_attempts: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            content_box: ContentBox { top: 36.0, bottom: 36.0, left: 96.0, right: 46.0 },
            chart_height: 400.0,
            handle_offset: 10.0,
            axis_padding_ratio: 0.15,
            fallback_domain: AxisDomain::new(0.0, 1_000_000.0),
            snap_step: 1000.0,
            settle_delay_ms: 150,
            stagger_step_ms: 100,
            reveal_delay_ms: 500,
            storage_key: super::repositories::STORAGE_KEY,
            storage_version: super::repositories::STORAGE_VERSION,
            api_path: "/api/kpis",
            source_mode: DataSourceMode::Http,
            fetch_retry_attempts: 1,
        }
    }
}

impl ChartConfig {
    pub fn with_source_mode(self, source_mode: DataSourceMode) -> Self {
        Self { source_mode, ..self }
    }
}
