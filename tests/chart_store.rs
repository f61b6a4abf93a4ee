use insta::assert_json_snapshot;
use kpi_threshold_chart::domain::chart::{
    Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, ChartState, ChartStateRepository, ChartStore,
    InMemoryChartStateRepository, PersistedChartState, STORAGE_VERSION, ThresholdDraft, ThresholdId,
    ThresholdPatch, encode_state,
};
use std::collections::HashSet;
use wasm_bindgen_test::*;

fn annotation_draft(index: usize) -> AnnotationDraft {
    AnnotationDraft {
        data_point_index: index,
        label: "Jun".to_string(),
        note: String::new(),
        timestamp: 1_700_000_000_000,
    }
}

#[wasm_bindgen_test]
fn add_then_delete_restores_collection() {
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    let before = store.state().clone();

    let id = store.add_threshold(ThresholdDraft::new("Stretch", 700_000.0, "#3b82f6"));
    assert_eq!(store.thresholds().len(), 2);
    assert!(store.delete_threshold(&id));

    assert_eq!(store.state(), &before);
}

#[wasm_bindgen_test]
fn thresholds_keep_insertion_order() {
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    for (name, value) in [("C", 3.0), ("A", 1.0), ("B", 2.0)] {
        store.add_threshold(ThresholdDraft::new(name, value, "#000000"));
    }
    let names: Vec<&str> = store.thresholds().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[wasm_bindgen_test]
fn update_merges_only_given_fields() {
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));

    assert!(store.update_threshold(&id, ThresholdPatch::locked(true)));
    let threshold = store.threshold(&id).unwrap();
    assert!(threshold.is_locked);
    assert_eq!(threshold.value, 600_000.0);
    assert_eq!(threshold.name, "Target");
}

#[wasm_bindgen_test]
fn missing_ids_are_no_ops() {
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    store.add_threshold(ThresholdDraft::new("Target", 1.0, "#000000"));
    let before = store.state().clone();

    assert!(!store.update_threshold(&ThresholdId::new("nope"), ThresholdPatch::value(5.0)));
    assert!(!store.delete_threshold(&ThresholdId::new("nope")));
    assert!(!store.update_annotation(&AnnotationId::new("nope"), AnnotationPatch::note("hi")));
    assert!(!store.delete_annotation(&AnnotationId::new("nope")));

    assert_eq!(store.state(), &before);
    assert!(store.state().annotations.is_empty());
}

#[wasm_bindgen_test]
fn generated_ids_are_unique() {
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    let thresholds: HashSet<ThresholdId> = (0..50)
        .map(|i| store.add_threshold(ThresholdDraft::new("t", i as f64, "#000000")))
        .collect();
    let annotations: HashSet<AnnotationId> = (0..50).map(|i| store.add_annotation(annotation_draft(i))).collect();

    assert_eq!(thresholds.len(), 50);
    assert_eq!(annotations.len(), 50);
    assert!(thresholds.iter().all(|id| id.as_str().starts_with("threshold-")));
    assert!(annotations.iter().all(|id| id.as_str().starts_with("annotation-")));
}

#[wasm_bindgen_test]
fn state_survives_reopen() {
    let repository = InMemoryChartStateRepository::new();
    let mut store = ChartStore::open(repository.clone());
    let threshold = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    let annotation = store.add_annotation(annotation_draft(5));
    store.update_annotation(&annotation, AnnotationPatch::note("Launch"));
    let saved = store.state().clone();
    drop(store);

    let reopened = ChartStore::open(repository);
    assert_eq!(reopened.state(), &saved);
    assert_eq!(reopened.threshold(&threshold).unwrap().value, 600_000.0);
    assert_eq!(reopened.annotation(&annotation).unwrap().note, "Launch");
}

#[wasm_bindgen_test]
fn version_mismatch_starts_empty() {
    let repository = InMemoryChartStateRepository::with_raw(
        r##"{"state":{"thresholds":[{"id":"t","name":"Old","value":1,"color":"#000","isLocked":false,"isVisible":true}],"annotations":{}},"version":0}"##,
    );
    let store = ChartStore::open(repository);
    assert!(store.thresholds().is_empty());
}

#[wasm_bindgen_test]
fn unreadable_payload_starts_empty() {
    let store = ChartStore::open(InMemoryChartStateRepository::with_raw("{not json"));
    assert_eq!(store.state(), &ChartState::default());
}

#[wasm_bindgen_test]
fn every_mutation_is_written() {
    let repository = InMemoryChartStateRepository::new();
    let mut store = ChartStore::open(repository.clone());
    assert!(repository.raw().is_none());

    let id = store.add_threshold(ThresholdDraft::new("Target", 1.0, "#000000"));
    assert_eq!(repository.load().unwrap().unwrap().thresholds.len(), 1);

    store.delete_threshold(&id);
    assert!(repository.load().unwrap().unwrap().thresholds.is_empty());
}

#[test]
fn persisted_envelope_format() {
    let id = AnnotationId::new("annotation-1-0");
    let mut state = ChartState::default();
    state.annotations.insert(
        id.clone(),
        Annotation {
            id,
            data_point_index: 5,
            label: "Jun".to_string(),
            note: "Launch".to_string(),
            timestamp: 1_700_000_000_000,
        },
    );
    let persisted = PersistedChartState { state: state.clone(), version: STORAGE_VERSION };
    assert_eq!(serde_json::to_value(&persisted).unwrap(), encode_state(&state).unwrap());

    assert_json_snapshot!(persisted, @r#"
    {
      "state": {
        "thresholds": [],
        "annotations": {
          "annotation-1-0": {
            "id": "annotation-1-0",
            "dataPointIndex": 5,
            "label": "Jun",
            "note": "Launch",
            "timestamp": 1700000000000
          }
        }
      },
      "version": 1
    }
    "#);
}
