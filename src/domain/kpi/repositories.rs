use super::DataPoint;
use crate::domain::errors::NetworkResult;

/// Source of the revenue series.
///
/// `load` returns the current series, `refresh` asks the source to regenerate
/// it. Both return a full replacement series or fail.
#[allow(async_fn_in_trait)]
pub trait SeriesSource {
    async fn load(&self) -> NetworkResult<Vec<DataPoint>>;
    async fn refresh(&self) -> NetworkResult<Vec<DataPoint>>;
}
