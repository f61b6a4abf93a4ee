#![cfg(target_arch = "wasm32")]

use kpi_threshold_chart::domain::chart::{ChartStateRepository, ChartStore, ThresholdDraft};
use kpi_threshold_chart::infrastructure::storage::LocalStorageRepository;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn chart_state_survives_reopen() {
    let repository = LocalStorageRepository::new("kpi-chart-test-state");
    repository.clear();
    assert_eq!(repository.load(), Ok(None));

    let mut store = ChartStore::open(repository.clone());
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));

    let reopened = ChartStore::open(repository.clone());
    assert_eq!(reopened.threshold(&id).map(|t| t.value), Some(600_000.0));
    repository.clear();
}
