use kpi_threshold_chart::application::SeedPlan;
use kpi_threshold_chart::domain::chart::{
    ChartConfig, ChartStore, InMemoryChartStateRepository, auto_generate_thresholds,
};
use kpi_threshold_chart::domain::kpi::{DataPoint, SeriesStats, series_from_values};
use wasm_bindgen_test::*;

/// Mean 550 000, population deviation 50 000, minimum 480 000.
fn scenario_series() -> Vec<DataPoint> {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    let thousands = [480.0, 650.0, 500.0, 605.0, 520.0, 560.0, 490.0, 560.0, 555.0, 585.0, 505.0, 590.0];
    let pairs: Vec<(&str, f64)> = months.iter().copied().zip(thousands.iter().map(|v| v * 1000.0)).collect();
    series_from_values(&pairs)
}

#[wasm_bindgen_test]
fn scenario_statistics() {
    let stats = SeriesStats::from_series(&scenario_series()).unwrap();
    assert_eq!(stats.mean, 550_000.0);
    assert_eq!(stats.std_dev, 50_000.0);
    assert_eq!(stats.min, 480_000.0);
    assert_eq!(stats.max, 650_000.0);
    assert_eq!(stats.current, 590_000.0);
}

#[wasm_bindgen_test]
fn three_suggestions_in_order() {
    let drafts = auto_generate_thresholds(&scenario_series());
    let summary: Vec<(&str, f64, &str)> =
        drafts.iter().map(|d| (d.name.as_str(), d.value, d.color.as_str())).collect();
    assert_eq!(
        summary,
        vec![
            ("Performance Target", 575_000.0, "#10b981"),
            ("Warning Level", 525_000.0, "#f59e0b"),
            ("Critical Threshold", 500_000.0, "#ef4444"),
        ]
    );
    assert!(drafts.iter().all(|d| d.is_visible && !d.is_locked));
}

#[wasm_bindgen_test]
fn critical_uses_ninety_percent_of_min_when_higher() {
    // mean 100 000, deviation 100 000, min 0 -> max(0, 0) = 0
    let series = series_from_values(&[("Jan", 0.0), ("Feb", 200_000.0)]);
    let drafts = auto_generate_thresholds(&series);
    assert_eq!(drafts[2].value, 0.0);

    // mean 1 000 000, deviation 10 000, min 990 000 -> max(891 000, 990 000)
    let series = series_from_values(&[("Jan", 990_000.0), ("Feb", 1_010_000.0)]);
    let drafts = auto_generate_thresholds(&series);
    assert_eq!(drafts[2].value, 990_000.0);
}

#[wasm_bindgen_test]
fn empty_series_suggests_nothing() {
    assert!(auto_generate_thresholds(&[]).is_empty());
    assert!(SeedPlan::for_series(&[], &ChartConfig::default()).is_none());
}

#[wasm_bindgen_test]
fn seed_plan_is_staggered() {
    let plan = SeedPlan::for_series(&scenario_series(), &ChartConfig::default()).unwrap();
    let delays: Vec<u32> = plan.steps.iter().map(|s| s.delay_ms).collect();
    assert_eq!(delays, vec![0, 100, 200]);
    assert_eq!(plan.reveal_after_ms, 500);

    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    let ids = plan.apply_all(&mut store);
    assert_eq!(ids.len(), 3);
    let values: Vec<f64> = store.thresholds().iter().map(|t| t.value).collect();
    assert_eq!(values, vec![575_000.0, 525_000.0, 500_000.0]);
}
