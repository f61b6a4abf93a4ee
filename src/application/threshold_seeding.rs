use crate::domain::chart::{
    ChartConfig, ChartStateRepository, ChartStore, ThresholdDraft, ThresholdId, auto_generate_thresholds,
};
use crate::domain::kpi::DataPoint;

/// One suggested threshold and when to add it, relative to the series arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedStep {
    pub delay_ms: u32,
    pub draft: ThresholdDraft,
}

/// Staggered insertion of the suggested thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub steps: Vec<SeedStep>,
    pub reveal_after_ms: u32,
}

impl SeedPlan {
    /// `None` for an empty series.
    pub fn for_series(series: &[DataPoint], config: &ChartConfig) -> Option<Self> {
        let drafts = auto_generate_thresholds(series);
        if drafts.is_empty() {
            return None;
        }
        let steps = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| SeedStep { delay_ms: i as u32 * config.stagger_step_ms, draft })
            .collect();
        Some(Self { steps, reveal_after_ms: config.reveal_delay_ms })
    }

    /// Adds every step at once, in order.
    pub fn apply_all<R: ChartStateRepository>(self, store: &mut ChartStore<R>) -> Vec<ThresholdId> {
        self.steps.into_iter().map(|step| store.add_threshold(step.draft)).collect()
    }
}

/// What to do with thresholds once a series arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedDecision {
    /// The store was empty: add the suggestions, then reveal.
    Seed(SeedPlan),
    /// Thresholds already exist: show them.
    RevealNow,
    /// No series yet, or a seed is already under way.
    Wait,
}
