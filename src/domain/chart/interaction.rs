//! Direct manipulation: threshold dragging and annotation editing.

use super::{
    AnnotationDraft, AnnotationId, AnnotationPatch, AxisDomain, ChartGeometry, ChartStateRepository, ChartStore,
    ThresholdId, ThresholdPatch, snap_to_grid,
};
use crate::domain::kpi::DataPoint;

/// Drag gesture state. `C` is the pointer capture held for the gesture's lifetime.
///
/// `domain` is the axis domain at pointer-down; it stays fixed until pointer-up.
#[derive(Debug)]
pub enum DragState<C> {
    Idle,
    Dragging { threshold_id: ThresholdId, domain: AxisDomain, capture: C },
}

/// One threshold drag at a time.
///
/// The capture is dropped when the gesture ends, when a new gesture starts
/// and when the controller itself is dropped.
#[derive(Debug)]
pub struct DragController<C> {
    state: DragState<C>,
}

impl<C> Default for DragController<C> {
    fn default() -> Self {
        Self { state: DragState::Idle }
    }
}

impl<C> DragController<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState<C> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_threshold(&self) -> Option<&ThresholdId> {
        match &self.state {
            DragState::Dragging { threshold_id, .. } => Some(threshold_id),
            DragState::Idle => None,
        }
    }

    /// Axis domain frozen for the active gesture.
    pub fn frozen_domain(&self) -> Option<AxisDomain> {
        match &self.state {
            DragState::Dragging { domain, .. } => Some(*domain),
            DragState::Idle => None,
        }
    }

    /// Starts dragging an unlocked threshold.
    ///
    /// Locked or unknown thresholds are ignored and `acquire` is not called.
    pub fn pointer_down<R: ChartStateRepository>(
        &mut self,
        store: &ChartStore<R>,
        id: &ThresholdId,
        domain: AxisDomain,
        acquire: impl FnOnce() -> C,
    ) -> bool {
        if !store.threshold(id).is_some_and(|t| !t.is_locked) {
            return false;
        }
        self.state = DragState::Idle;
        let capture = acquire();
        self.state = DragState::Dragging { threshold_id: id.clone(), domain, capture };
        true
    }

    /// Moves the dragged threshold to the value under `y`, clamped and snapped.
    ///
    /// `y` is mapped through the domain captured at pointer-down, not the
    /// domain of `geometry`.
    ///
    /// Returns the written value, or `None` when idle or when the threshold was
    /// locked or deleted since the gesture started.
    pub fn pointer_move<R: ChartStateRepository>(
        &mut self,
        store: &mut ChartStore<R>,
        geometry: &ChartGeometry,
        y: f64,
    ) -> Option<f64> {
        let DragState::Dragging { threshold_id, domain, .. } = &self.state else {
            return None;
        };
        if !store.threshold(threshold_id).is_some_and(|t| !t.is_locked) {
            return None;
        }
        let frozen = ChartGeometry { domain: *domain, ..*geometry };
        let value = snap_to_grid(domain.clamp(frozen.pixel_y_to_value(y)));
        store.update_threshold(threshold_id, ThresholdPatch::value(value));
        Some(value)
    }

    /// Ends the gesture and releases the capture.
    pub fn pointer_up(&mut self) -> Option<ThresholdId> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { threshold_id, capture, .. } => {
                drop(capture);
                Some(threshold_id)
            }
            DragState::Idle => None,
        }
    }
}

/// Annotation draft for a double-click at container-local `x`.
///
/// `None` for an empty series.
pub fn annotation_draft_at(
    series: &[DataPoint],
    geometry: &ChartGeometry,
    x: f64,
    now_ms: u64,
) -> Option<AnnotationDraft> {
    let index = geometry.pixel_x_to_index(x, series.len())?;
    let point = series.get(index)?;
    Some(AnnotationDraft {
        data_point_index: index,
        label: point.label.clone(),
        note: String::new(),
        timestamp: now_ms,
    })
}

/// Popover editor for a single annotation's note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationEditor {
    open: Option<AnnotationId>,
    note: String,
}

impl AnnotationEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the editor on an existing annotation with its current note.
    pub fn open<R: ChartStateRepository>(&mut self, store: &ChartStore<R>, id: &AnnotationId) -> bool {
        let Some(annotation) = store.annotation(id) else {
            return false;
        };
        self.open = Some(id.clone());
        self.note = annotation.note.clone();
        true
    }

    pub fn is_open_for(&self, id: &AnnotationId) -> bool {
        self.open.as_ref() == Some(id)
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn save<R: ChartStateRepository>(&mut self, store: &mut ChartStore<R>) -> bool {
        let Some(id) = self.open.take() else {
            return false;
        };
        let note = std::mem::take(&mut self.note);
        store.update_annotation(&id, AnnotationPatch::note(note))
    }

    pub fn cancel(&mut self) {
        self.open = None;
        self.note.clear();
    }

    pub fn delete<R: ChartStateRepository>(&mut self, store: &mut ChartStore<R>) -> bool {
        let Some(id) = self.open.take() else {
            return false;
        };
        self.note.clear();
        store.delete_annotation(&id)
    }
}
