//! Axis scaling, grid snapping and threshold suggestions derived from a series.

use super::{AxisDomain, ChartConfig, Threshold, ThresholdDraft};
use crate::domain::kpi::{DataPoint, SeriesStats};

pub const PERFORMANCE_TARGET_COLOR: &str = "#10b981";
pub const WARNING_LEVEL_COLOR: &str = "#f59e0b";
pub const CRITICAL_THRESHOLD_COLOR: &str = "#ef4444";

/// Y axis domain covering the series and every visible threshold.
///
/// Hidden thresholds and non-finite values do not participate. The range is
/// padded on both ends and the lower bound never drops below zero.
pub fn compute_axis_domain(series: &[DataPoint], thresholds: &[Threshold]) -> AxisDomain {
    compute_axis_domain_with(series, thresholds, &ChartConfig::default())
}

pub fn compute_axis_domain_with(
    series: &[DataPoint],
    thresholds: &[Threshold],
    config: &ChartConfig,
) -> AxisDomain {
    let values = series
        .iter()
        .map(|p| p.value)
        .chain(thresholds.iter().filter(|t| t.is_visible).map(|t| t.value))
        .filter(|v| v.is_finite());

    let bounds = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        None => Some((v, v)),
    });

    let Some((min, max)) = bounds else {
        return config.fallback_domain;
    };

    let padding = (max - min) * config.axis_padding_ratio;
    AxisDomain::new((min - padding).max(0.0), max + padding)
}

/// Round to the nearest multiple of 1000.
pub fn snap_to_grid(value: f64) -> f64 {
    snap_to_step(value, ChartConfig::default().snap_step)
}

pub fn snap_to_step(value: f64, step: f64) -> f64 {
    let snapped = (value / step).round() * step;
    // avoid -0
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Three suggested thresholds around the series mean, empty for an empty series.
pub fn auto_generate_thresholds(series: &[DataPoint]) -> Vec<ThresholdDraft> {
    let Some(stats) = SeriesStats::from_series(series) else {
        return Vec::new();
    };
    thresholds_from_stats(&stats)
}

pub fn thresholds_from_stats(stats: &SeriesStats) -> Vec<ThresholdDraft> {
    let SeriesStats { mean, std_dev, min, .. } = *stats;
    vec![
        ThresholdDraft::new(
            "Performance Target",
            snap_to_grid(mean + 0.5 * std_dev),
            PERFORMANCE_TARGET_COLOR,
        ),
        ThresholdDraft::new("Warning Level", snap_to_grid(mean - 0.5 * std_dev), WARNING_LEVEL_COLOR),
        ThresholdDraft::new(
            "Critical Threshold",
            snap_to_grid((0.9 * min).max(mean - std_dev)),
            CRITICAL_THRESHOLD_COLOR,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_rounds_half_away_from_zero() {
        assert_eq!(snap_to_grid(1499.0), 1000.0);
        assert_eq!(snap_to_grid(1500.0), 2000.0);
        assert_eq!(snap_to_grid(-400.0), 0.0);
        assert!(snap_to_grid(-400.0).is_sign_positive());
    }

    #[test]
    fn suggestions_from_known_stats() {
        let stats = SeriesStats {
            count: 12,
            mean: 550_000.0,
            std_dev: 50_000.0,
            min: 480_000.0,
            max: 650_000.0,
            current: 590_000.0,
        };
        let values: Vec<f64> = thresholds_from_stats(&stats).iter().map(|d| d.value).collect();
        assert_eq!(values, vec![575_000.0, 525_000.0, 500_000.0]);
    }
}
