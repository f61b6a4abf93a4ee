use super::DataPoint;

/// Summary statistics of a revenue series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Value of the last point.
    pub current: f64,
}

impl SeriesStats {
    /// Returns `None` for an empty series.
    pub fn from_series(series: &[DataPoint]) -> Option<Self> {
        let last = series.last()?;
        let count = series.len();
        let n = count as f64;

        let mean = series.iter().map(|p| p.value).sum::<f64>() / n;
        let variance = series.iter().map(|p| (p.value - mean).powi(2)).sum::<f64>() / n;
        let min = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            current: last.value,
        })
    }
}
