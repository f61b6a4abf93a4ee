use kpi_threshold_chart::application::ChartSession;
use kpi_threshold_chart::domain::chart::{
    AxisDomain, ChartConfig, ChartGeometry, ChartStore, ContainerRect, DragController,
    InMemoryChartStateRepository, ThresholdDraft, ThresholdPatch,
};
use kpi_threshold_chart::domain::kpi::series_from_values;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;

/// Stand-in for the document listeners; counts releases.
struct CountingCapture(Rc<Cell<usize>>);

impl Drop for CountingCapture {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn geometry() -> ChartGeometry {
    ChartGeometry::new(ChartConfig::default().content_box, 800.0, 400.0, AxisDomain::new(0.0, 1_000_000.0))
}

fn setup() -> (ChartStore<InMemoryChartStateRepository>, DragController<CountingCapture>, Rc<Cell<usize>>) {
    let store = ChartStore::open(InMemoryChartStateRepository::new());
    (store, DragController::new(), Rc::new(Cell::new(0)))
}

#[wasm_bindgen_test]
fn drag_moves_snaps_and_clamps() {
    let (mut store, mut drag, released) = setup();
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    let g = geometry();

    assert!(drag.pointer_down(&store, &id, geometry().domain, || CountingCapture(released.clone())));
    assert_eq!(drag.active_threshold(), Some(&id));

    // middle of the plot area
    assert_eq!(drag.pointer_move(&mut store, &g, 200.0), Some(500_000.0));
    assert_eq!(store.threshold(&id).unwrap().value, 500_000.0);

    // a few pixels off lands on the nearest thousand
    let value = drag.pointer_move(&mut store, &g, 201.0).unwrap();
    assert_eq!(value % 1000.0, 0.0);
    assert_eq!(value, 497_000.0);

    assert_eq!(drag.pointer_move(&mut store, &g, 5_000.0), Some(0.0));
    assert_eq!(drag.pointer_move(&mut store, &g, -5_000.0), Some(1_000_000.0));

    assert_eq!(drag.pointer_up(), Some(id));
    assert!(!drag.is_dragging());
    assert_eq!(released.get(), 1);
}

#[wasm_bindgen_test]
fn locked_threshold_never_moves() {
    let (mut store, mut drag, released) = setup();
    let id = store.add_threshold(ThresholdDraft::new("Floor", 300_000.0, "#ef4444").locked());

    let mut acquired = false;
    assert!(!drag.pointer_down(&store, &id, geometry().domain, || {
        acquired = true;
        CountingCapture(released.clone())
    }));
    assert!(!acquired);
    assert!(!drag.is_dragging());

    assert_eq!(drag.pointer_move(&mut store, &geometry(), 100.0), None);
    assert_eq!(store.threshold(&id).unwrap().value, 300_000.0);
}

#[wasm_bindgen_test]
fn locking_mid_drag_stops_updates() {
    let (mut store, mut drag, released) = setup();
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    drag.pointer_down(&store, &id, geometry().domain, || CountingCapture(released.clone()));

    store.update_threshold(&id, ThresholdPatch::locked(true));
    assert_eq!(drag.pointer_move(&mut store, &geometry(), 200.0), None);
    assert_eq!(store.threshold(&id).unwrap().value, 600_000.0);

    drag.pointer_up();
    assert_eq!(released.get(), 1);
}

#[wasm_bindgen_test]
fn deleting_mid_drag_does_not_resurrect() {
    let (mut store, mut drag, released) = setup();
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    drag.pointer_down(&store, &id, geometry().domain, || CountingCapture(released.clone()));

    store.delete_threshold(&id);
    assert_eq!(drag.pointer_move(&mut store, &geometry(), 200.0), None);
    assert!(store.thresholds().is_empty());
}

#[wasm_bindgen_test]
fn capture_released_exactly_once_per_gesture() {
    let (mut store, mut drag, released) = setup();
    let a = store.add_threshold(ThresholdDraft::new("A", 1.0, "#000000"));
    let b = store.add_threshold(ThresholdDraft::new("B", 2.0, "#000000"));

    drag.pointer_down(&store, &a, geometry().domain, || CountingCapture(released.clone()));
    // a new gesture replaces the old capture
    drag.pointer_down(&store, &b, geometry().domain, || CountingCapture(released.clone()));
    assert_eq!(released.get(), 1);
    assert_eq!(drag.active_threshold(), Some(&b));

    drag.pointer_up();
    assert_eq!(released.get(), 2);
    assert_eq!(drag.pointer_up(), None);
    assert_eq!(released.get(), 2);

    drag.pointer_down(&store, &a, geometry().domain, || CountingCapture(released.clone()));
    drop(drag);
    assert_eq!(released.get(), 3);
}

#[wasm_bindgen_test]
fn session_drags_in_client_coordinates() {
    let mut session: ChartSession<_, ()> =
        ChartSession::new(ChartConfig::default(), InMemoryChartStateRepository::new());
    session.set_series(series_from_values(&[("Jan", 400_000.0), ("Feb", 600_000.0)]));
    let id = session.add_threshold(ThresholdDraft::new("Target", 500_000.0, "#10b981"));

    // domain is [370 000, 630 000]; top of the plot area is 36 px below the container
    let rect = ContainerRect::new(10.0, 100.0, 800.0, 400.0);
    assert!(session.begin_drag(&id, || ()));
    assert_eq!(session.drag_to(&rect, 136.0), Some(630_000.0));
    assert_eq!(session.end_drag(), Some(id.clone()));
    assert_eq!(session.drag_to(&rect, 300.0), None);
    assert_eq!(session.store().threshold(&id).unwrap().value, 630_000.0);
}

#[wasm_bindgen_test]
fn holding_the_pointer_still_keeps_the_value() {
    let mut session: ChartSession<_, ()> =
        ChartSession::new(ChartConfig::default(), InMemoryChartStateRepository::new());
    session.set_series(series_from_values(&[("Jan", 400_000.0), ("Feb", 600_000.0)]));
    let id = session.add_threshold(ThresholdDraft::new("Target", 500_000.0, "#10b981"));
    let rect = ContainerRect::new(0.0, 0.0, 800.0, 400.0);

    let before = session.axis_domain();
    session.begin_drag(&id, || ());
    let values: Vec<_> = (0..10).filter_map(|_| session.drag_to(&rect, 36.0)).collect();
    assert_eq!(values, vec![630_000.0; 10]);
    assert_eq!(session.axis_domain(), before);

    // the domain follows the new value once the gesture ends
    session.end_drag();
    assert!(session.axis_domain().max > before.max);
}

#[wasm_bindgen_test]
fn drag_maps_through_the_domain_at_pointer_down() {
    let (mut store, mut drag, released) = setup();
    let id = store.add_threshold(ThresholdDraft::new("Target", 600_000.0, "#10b981"));
    drag.pointer_down(&store, &id, AxisDomain::new(0.0, 1_000_000.0), || CountingCapture(released.clone()));
    assert_eq!(drag.frozen_domain(), Some(AxisDomain::new(0.0, 1_000_000.0)));

    // a geometry built from a wider domain does not shift the mapping
    let wider = ChartGeometry { domain: AxisDomain::new(0.0, 2_000_000.0), ..geometry() };
    assert_eq!(drag.pointer_move(&mut store, &wider, 200.0), Some(500_000.0));
    assert_eq!(drag.pointer_move(&mut store, &wider, 36.0), Some(1_000_000.0));

    drag.pointer_up();
    assert_eq!(drag.frozen_domain(), None);
}
