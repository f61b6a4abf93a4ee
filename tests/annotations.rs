use kpi_threshold_chart::application::ChartSession;
use kpi_threshold_chart::domain::chart::{
    AnnotationEditor, AxisDomain, ChartConfig, ChartGeometry, ChartStore, ContainerRect,
    InMemoryChartStateRepository, annotation_draft_at,
};
use kpi_threshold_chart::domain::kpi::{DataPoint, series_from_values};
use wasm_bindgen_test::*;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

fn twelve_months() -> Vec<DataPoint> {
    let pairs: Vec<(&str, f64)> = MONTHS.iter().enumerate().map(|(i, m)| (*m, 500_000.0 + i as f64 * 1_000.0)).collect();
    series_from_values(&pairs)
}

fn geometry() -> ChartGeometry {
    ChartGeometry::new(ChartConfig::default().content_box, 800.0, 400.0, AxisDomain::new(0.0, 1_000_000.0))
}

#[wasm_bindgen_test]
fn double_click_creates_annotation_at_nearest_point() {
    let series = twelve_months();
    let g = geometry();
    let x = g.index_to_pixel_x(5, series.len()) + 3.0;

    let draft = annotation_draft_at(&series, &g, x, 42).unwrap();
    assert_eq!(draft.data_point_index, 5);
    assert_eq!(draft.label, "Jun");
    assert_eq!(draft.note, "");
    assert_eq!(draft.timestamp, 42);
}

#[wasm_bindgen_test]
fn double_click_on_empty_series_does_nothing() {
    assert!(annotation_draft_at(&[], &geometry(), 300.0, 0).is_none());

    let mut session: ChartSession<_, ()> =
        ChartSession::new(ChartConfig::default(), InMemoryChartStateRepository::new());
    let rect = ContainerRect::new(0.0, 0.0, 800.0, 400.0);
    assert!(session.annotate_at(&rect, 300.0, 0).is_none());
    assert!(session.store().state().annotations.is_empty());
}

#[wasm_bindgen_test]
fn session_annotates_in_client_coordinates() {
    let mut session: ChartSession<_, ()> =
        ChartSession::new(ChartConfig::default(), InMemoryChartStateRepository::new());
    session.set_series(twelve_months());
    let rect = ContainerRect::new(10.0, 20.0, 800.0, 400.0);
    let client_x = rect.left + geometry().index_to_pixel_x(5, 12);

    let id = session.annotate_at(&rect, client_x, 7).unwrap();
    let annotations = &session.store().state().annotations;
    assert_eq!(annotations.len(), 1);
    let annotation = &annotations[&id];
    assert_eq!(annotation.data_point_index, 5);
    assert_eq!(annotation.note, "");

    // no de-duplication
    session.annotate_at(&rect, client_x, 8).unwrap();
    assert_eq!(session.store().state().annotations.len(), 2);
}

#[wasm_bindgen_test]
fn editor_save_cancel_delete() {
    let series = twelve_months();
    let mut store = ChartStore::open(InMemoryChartStateRepository::new());
    let id = store.add_annotation(annotation_draft_at(&series, &geometry(), 96.0, 1).unwrap());
    let mut editor = AnnotationEditor::new();

    assert!(editor.open(&store, &id));
    editor.set_note("Discarded");
    editor.cancel();
    assert!(!editor.is_open_for(&id));
    assert_eq!(store.annotation(&id).unwrap().note, "");

    editor.open(&store, &id);
    editor.set_note("Big launch");
    assert!(editor.save(&mut store));
    assert_eq!(store.annotation(&id).unwrap().note, "Big launch");

    editor.open(&store, &id);
    assert_eq!(editor.note(), "Big launch");
    assert!(editor.delete(&mut store));
    assert!(store.annotation(&id).is_none());
    assert!(!editor.save(&mut store));
}

#[wasm_bindgen_test]
fn session_editor_round_trip() {
    let mut session: ChartSession<_, ()> =
        ChartSession::new(ChartConfig::default(), InMemoryChartStateRepository::new());
    session.set_series(twelve_months());
    let rect = ContainerRect::new(0.0, 0.0, 800.0, 400.0);
    let id = session.annotate_at(&rect, 96.0, 0).unwrap();

    assert!(session.open_annotation(&id));
    session.set_annotation_note("Q1 kickoff");
    assert!(session.save_annotation());
    assert_eq!(session.store().annotation(&id).unwrap().note, "Q1 kickoff");

    session.open_annotation(&id);
    assert!(session.delete_annotation());
    assert!(session.store().state().annotations.is_empty());
}
