use super::{AnnotationId, AxisDomain, ChartConfig, ChartGeometry, ChartState, PixelPoint, ThresholdId};
use crate::domain::kpi::DataPoint;
use derive_more::Display;
use std::collections::BTreeMap;

/// Why overlay positions are being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SyncTrigger {
    #[display(fmt = "initial layout")]
    InitialLayout,
    #[display(fmt = "thresholds revealed")]
    ThresholdsRevealed,
    #[display(fmt = "resize")]
    Resize,
    #[display(fmt = "state changed")]
    StateChanged,
}

/// Pixel positions of every overlay element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPositions {
    /// Handle positions of visible thresholds.
    pub thresholds: BTreeMap<ThresholdId, PixelPoint>,
    /// Marker positions, one per annotation; those pointing past the series sit at `{0,0}`.
    pub annotations: BTreeMap<AnnotationId, PixelPoint>,
}

impl OverlayPositions {
    /// Empty when there is no geometry or no series.
    pub fn compute(
        state: &ChartState,
        series: &[DataPoint],
        geometry: Option<&ChartGeometry>,
        config: &ChartConfig,
    ) -> Self {
        let Some(geometry) = geometry else {
            return Self::default();
        };
        if series.is_empty() {
            return Self::default();
        }

        let handle_x = geometry.content_box.left - config.handle_offset;
        let thresholds = state
            .visible_thresholds()
            .map(|t| (t.id.clone(), PixelPoint::new(handle_x, geometry.value_to_pixel_y(t.value))))
            .collect();

        let annotations = state
            .annotations
            .values()
            .map(|a| (a.id.clone(), geometry.point_at(series, a.data_point_index).unwrap_or_default()))
            .collect();

        Self { thresholds, annotations }
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty() && self.annotations.is_empty()
    }

    pub fn threshold(&self, id: &ThresholdId) -> Option<PixelPoint> {
        self.thresholds.get(id).copied()
    }

    /// Marker position, `{0,0}` for an unknown annotation.
    pub fn annotation_or_origin(&self, id: &AnnotationId) -> PixelPoint {
        self.annotations.get(id).copied().unwrap_or_default()
    }
}

/// Keeps the last computed overlay positions.
#[derive(Debug, Clone, Default)]
pub struct PositionSynchronizer {
    positions: OverlayPositions,
    last_domain: Option<AxisDomain>,
    last_trigger: Option<SyncTrigger>,
    syncs: usize,
}

impl PositionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &OverlayPositions {
        &self.positions
    }

    pub fn last_domain(&self) -> Option<AxisDomain> {
        self.last_domain
    }

    pub fn last_trigger(&self) -> Option<SyncTrigger> {
        self.last_trigger
    }

    pub fn sync_count(&self) -> usize {
        self.syncs
    }

    /// Recomputes positions. Returns `true` when they changed.
    pub fn sync(
        &mut self,
        trigger: SyncTrigger,
        state: &ChartState,
        series: &[DataPoint],
        geometry: Option<&ChartGeometry>,
        config: &ChartConfig,
    ) -> bool {
        let next = OverlayPositions::compute(state, series, geometry, config);
        self.apply(trigger, next, geometry.map(|g| g.domain))
    }

    /// Stores already computed positions. Returns `true` when they changed.
    pub fn apply(&mut self, trigger: SyncTrigger, next: OverlayPositions, domain: Option<AxisDomain>) -> bool {
        self.syncs += 1;
        self.last_domain = domain;
        self.last_trigger = Some(trigger);
        if next == self.positions {
            return false;
        }
        crate::log_trace!(
            crate::domain::logging::LogComponent::Domain("Positions"),
            "{}: {} handles, {} markers",
            trigger,
            next.thresholds.len(),
            next.annotations.len()
        );
        self.positions = next;
        true
    }
}
