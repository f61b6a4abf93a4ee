use super::{
    Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, ChartState, ChartStateRepository,
    Threshold, ThresholdDraft, ThresholdId, ThresholdPatch,
};
use crate::domain::logging::{LogComponent, get_logger, get_time_provider};
use crate::log_debug;

/// Single source of truth for thresholds and annotations.
///
/// Every effective mutation is written through to the repository. Storage
/// failures are logged and never surface to callers.
pub struct ChartStore<R: ChartStateRepository> {
    state: ChartState,
    repository: R,
    next_seq: u64,
}

impl<R: ChartStateRepository> ChartStore<R> {
    /// Loads the persisted state, starting empty when it is missing or unreadable.
    pub fn open(repository: R) -> Self {
        let state = match repository.load() {
            Ok(Some(state)) => {
                log_debug!(
                    LogComponent::Domain("ChartStore"),
                    "restored {} thresholds and {} annotations",
                    state.thresholds.len(),
                    state.annotations.len()
                );
                state
            }
            Ok(None) => ChartState::default(),
            Err(e) => {
                get_logger().warn(
                    LogComponent::Domain("ChartStore"),
                    &format!("discarding stored chart state: {}", e),
                );
                ChartState::default()
            }
        };
        Self { state, repository, next_seq: 0 }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.state.thresholds
    }

    pub fn threshold(&self, id: &ThresholdId) -> Option<&Threshold> {
        self.state.threshold(id)
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.state.annotation(id)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn add_threshold(&mut self, draft: ThresholdDraft) -> ThresholdId {
        let id = ThresholdId::new(next_id(&mut self.next_seq, "threshold", |candidate| {
            self.state.thresholds.iter().any(|t| t.id.as_str() == candidate)
        }));
        log_debug!(LogComponent::Domain("ChartStore"), "add threshold {} = {}", id, draft.value);
        self.state.thresholds.push(Threshold::from_draft(id.clone(), draft));
        self.persist();
        id
    }

    /// Returns `false` when no threshold has this id.
    pub fn update_threshold(&mut self, id: &ThresholdId, patch: ThresholdPatch) -> bool {
        let Some(threshold) = self.state.threshold_mut(id) else {
            return false;
        };
        threshold.apply(patch);
        self.persist();
        true
    }

    pub fn delete_threshold(&mut self, id: &ThresholdId) -> bool {
        let before = self.state.thresholds.len();
        self.state.thresholds.retain(|t| &t.id != id);
        if self.state.thresholds.len() == before {
            return false;
        }
        log_debug!(LogComponent::Domain("ChartStore"), "delete threshold {}", id);
        self.persist();
        true
    }

    pub fn add_annotation(&mut self, draft: AnnotationDraft) -> AnnotationId {
        let id = AnnotationId::new(next_id(&mut self.next_seq, "annotation", |candidate| {
            self.state.annotations.keys().any(|k| k.as_str() == candidate)
        }));
        log_debug!(
            LogComponent::Domain("ChartStore"),
            "add annotation {} at index {}",
            id,
            draft.data_point_index
        );
        self.state
            .annotations
            .insert(id.clone(), Annotation::from_draft(id.clone(), draft));
        self.persist();
        id
    }

    /// Returns `false` and creates nothing when no annotation has this id.
    pub fn update_annotation(&mut self, id: &AnnotationId, patch: AnnotationPatch) -> bool {
        let Some(annotation) = self.state.annotations.get_mut(id) else {
            return false;
        };
        annotation.apply(patch);
        self.persist();
        true
    }

    pub fn delete_annotation(&mut self, id: &AnnotationId) -> bool {
        if self.state.annotations.remove(id).is_none() {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.state) {
            get_logger().warn(
                LogComponent::Domain("ChartStore"),
                &format!("failed to persist chart state: {}", e),
            );
        }
    }
}

/// `<prefix>-<ms>-<seq>`, skipping any candidate already taken.
fn next_id(seq: &mut u64, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let now = get_time_provider().current_timestamp();
    loop {
        let candidate = format!("{}-{}-{}", prefix, now, *seq);
        *seq += 1;
        if !taken(&candidate) {
            return candidate;
        }
    }
}
