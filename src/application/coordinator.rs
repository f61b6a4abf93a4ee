use super::threshold_seeding::{SeedDecision, SeedPlan};
use crate::domain::{
    chart::{
        AnnotationEditor, AnnotationId, AxisDomain, ChartConfig, ChartGeometry, ChartStateRepository,
        ChartStore, ContainerRect, DragController, OverlayPositions, PositionSynchronizer, SyncTrigger,
        ThresholdDraft, ThresholdId, ThresholdPatch, annotation_draft_at, compute_axis_domain_with,
    },
    kpi::{DataPoint, SeriesStats},
    logging::{LogComponent, get_logger},
};

/// Everything one chart on screen needs: the store, the current series and
/// the in-progress gestures. `C` is the drag pointer capture.
pub struct ChartSession<R: ChartStateRepository, C> {
    config: ChartConfig,
    store: ChartStore<R>,
    series: Vec<DataPoint>,
    drag: DragController<C>,
    editor: AnnotationEditor,
    thresholds_shown: bool,
    seeding: bool,
}

impl<R: ChartStateRepository, C> ChartSession<R, C> {
    pub fn new(config: ChartConfig, repository: R) -> Self {
        Self {
            config,
            store: ChartStore::open(repository),
            series: Vec::new(),
            drag: DragController::new(),
            editor: AnnotationEditor::new(),
            thresholds_shown: false,
            seeding: false,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn store(&self) -> &ChartStore<R> {
        &self.store
    }

    pub fn series(&self) -> &[DataPoint] {
        &self.series
    }

    pub fn thresholds_shown(&self) -> bool {
        self.thresholds_shown
    }

    pub fn is_seeding(&self) -> bool {
        self.seeding
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn editor(&self) -> &AnnotationEditor {
        &self.editor
    }

    /// Replaces the series and decides whether thresholds should be suggested.
    pub fn set_series(&mut self, series: Vec<DataPoint>) -> SeedDecision {
        self.series = series;
        if self.series.is_empty() || self.seeding {
            return SeedDecision::Wait;
        }
        if !self.store.thresholds().is_empty() {
            self.thresholds_shown = true;
            return SeedDecision::RevealNow;
        }
        match SeedPlan::for_series(&self.series, &self.config) {
            Some(plan) => {
                get_logger().info(
                    LogComponent::Application("ChartSession"),
                    &format!("seeding {} thresholds", plan.steps.len()),
                );
                self.seeding = true;
                SeedDecision::Seed(plan)
            }
            None => SeedDecision::Wait,
        }
    }

    pub fn apply_seed_step(&mut self, draft: ThresholdDraft) -> ThresholdId {
        self.store.add_threshold(draft)
    }

    pub fn reveal_thresholds(&mut self) {
        self.seeding = false;
        self.thresholds_shown = true;
    }

    /// Current axis domain; held fixed while a threshold is being dragged.
    pub fn axis_domain(&self) -> AxisDomain {
        self.drag
            .frozen_domain()
            .unwrap_or_else(|| compute_axis_domain_with(&self.series, self.store.thresholds(), &self.config))
    }

    pub fn geometry(&self, rect: &ContainerRect) -> Option<ChartGeometry> {
        ChartGeometry::measured(rect, &self.config, self.axis_domain())
    }

    /// Handle and marker positions; handles stay hidden until thresholds are revealed.
    pub fn overlay_positions(&self, rect: &ContainerRect) -> OverlayPositions {
        self.positions_for(self.geometry(rect).as_ref())
    }

    /// Feeds freshly computed positions to `synchronizer`. Returns `true` when they changed.
    pub fn sync_positions(
        &self,
        synchronizer: &mut PositionSynchronizer,
        trigger: SyncTrigger,
        rect: &ContainerRect,
    ) -> bool {
        let geometry = self.geometry(rect);
        let positions = self.positions_for(geometry.as_ref());
        synchronizer.apply(trigger, positions, geometry.map(|g| g.domain))
    }

    fn positions_for(&self, geometry: Option<&ChartGeometry>) -> OverlayPositions {
        let mut positions = OverlayPositions::compute(self.store.state(), &self.series, geometry, &self.config);
        if !self.thresholds_shown {
            positions.thresholds.clear();
        }
        positions
    }

    pub fn stats(&self) -> Option<SeriesStats> {
        SeriesStats::from_series(&self.series)
    }

    pub fn visible_threshold_count(&self) -> usize {
        self.store.state().visible_thresholds().count()
    }

    pub fn add_threshold(&mut self, draft: ThresholdDraft) -> ThresholdId {
        let id = self.store.add_threshold(draft);
        self.thresholds_shown = true;
        id
    }

    pub fn toggle_threshold_visibility(&mut self, id: &ThresholdId) -> bool {
        let Some(visible) = self.store.threshold(id).map(|t| t.is_visible) else {
            return false;
        };
        self.store.update_threshold(id, ThresholdPatch::visible(!visible))
    }

    pub fn toggle_threshold_lock(&mut self, id: &ThresholdId) -> bool {
        let Some(locked) = self.store.threshold(id).map(|t| t.is_locked) else {
            return false;
        };
        self.store.update_threshold(id, ThresholdPatch::locked(!locked))
    }

    pub fn delete_threshold(&mut self, id: &ThresholdId) -> bool {
        if self.drag.active_threshold() == Some(id) {
            self.drag.pointer_up();
        }
        self.store.delete_threshold(id)
    }

    pub fn begin_drag(&mut self, id: &ThresholdId, acquire: impl FnOnce() -> C) -> bool {
        let domain = self.axis_domain();
        self.drag.pointer_down(&self.store, id, domain, acquire)
    }

    /// Drags the active threshold to the client Y coordinate.
    pub fn drag_to(&mut self, rect: &ContainerRect, client_y: f64) -> Option<f64> {
        let geometry = self.geometry(rect)?;
        let local = rect.local_point(0.0, client_y);
        self.drag.pointer_move(&mut self.store, &geometry, local.y)
    }

    pub fn end_drag(&mut self) -> Option<ThresholdId> {
        self.drag.pointer_up()
    }

    /// Annotates the data point nearest to the client X coordinate.
    pub fn annotate_at(&mut self, rect: &ContainerRect, client_x: f64, now_ms: u64) -> Option<AnnotationId> {
        let geometry = self.geometry(rect)?;
        let local = rect.local_point(client_x, 0.0);
        let draft = annotation_draft_at(&self.series, &geometry, local.x, now_ms)?;
        Some(self.store.add_annotation(draft))
    }

    pub fn open_annotation(&mut self, id: &AnnotationId) -> bool {
        self.editor.open(&self.store, id)
    }

    pub fn set_annotation_note(&mut self, note: impl Into<String>) {
        self.editor.set_note(note);
    }

    pub fn save_annotation(&mut self) -> bool {
        self.editor.save(&mut self.store)
    }

    pub fn cancel_annotation(&mut self) {
        self.editor.cancel();
    }

    pub fn delete_annotation(&mut self) -> bool {
        self.editor.delete(&mut self.store)
    }
}
