use crate::domain::{
    errors::NetworkResult,
    kpi::{DataPoint, SeriesSource},
    logging::{LogComponent, get_logger},
};
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use std::cell::RefCell;

/// Load status shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

/// Outcome of a series request.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesState {
    Loading,
    Ready(Vec<DataPoint>),
    Empty,
    Failed(String),
}

impl SeriesState {
    pub fn from_result(result: NetworkResult<Vec<DataPoint>>) -> Self {
        match result {
            Ok(series) if series.is_empty() => Self::Empty,
            Ok(series) => Self::Ready(series),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Splits into the status and, when the request produced one, the new series.
    ///
    /// An empty response yields an empty replacement series; loading and
    /// failure leave the current series alone.
    pub fn into_parts(self) -> (LoadStatus, Option<Vec<DataPoint>>) {
        match self {
            Self::Loading => (LoadStatus::Loading, None),
            Self::Ready(series) => (LoadStatus::Ready, Some(series)),
            Self::Empty => (LoadStatus::Empty, Some(Vec::new())),
            Self::Failed(message) => (LoadStatus::Failed(message), None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Read the current series; retried on failure.
    Load,
    /// Ask the source to regenerate the series; never retried.
    Refresh,
}

/// Runs one request against the source, retrying loads up to `retry_attempts` times.
pub async fn fetch_series<S: SeriesSource>(source: &S, kind: FetchKind, retry_attempts: u32) -> SeriesState {
    let attempts = match kind {
        FetchKind::Load => retry_attempts + 1,
        FetchKind::Refresh => 1,
    };

    let mut last_error = None;
    for attempt in 1..=attempts {
        let result = match kind {
            FetchKind::Load => source.load().await,
            FetchKind::Refresh => source.refresh().await,
        };
        match result {
            Ok(series) => return SeriesState::from_result(Ok(series)),
            Err(e) => {
                get_logger().warn(
                    LogComponent::Application("SeriesQuery"),
                    &format!("{:?} attempt {}/{} failed: {}", kind, attempt, attempts, e),
                );
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => SeriesState::from_result(Err(e)),
        None => SeriesState::Empty,
    }
}

/// What a finished request does to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutcome {
    /// Show this state.
    Apply(SeriesState),
    /// A refresh failed over a chart that is already on screen; keep it.
    KeepChart(String),
}

impl SeriesOutcome {
    /// A failed refresh only keeps the chart when one is showing. Before the
    /// first successful load it surfaces as an error so the dashboard never
    /// stays on the spinner.
    pub fn resolve(kind: FetchKind, current: &LoadStatus, state: SeriesState) -> Self {
        match state {
            SeriesState::Failed(message) if kind == FetchKind::Refresh && *current == LoadStatus::Ready => {
                Self::KeepChart(message)
            }
            state => Self::Apply(state),
        }
    }
}

/// Tracks the in-flight request so that only the latest one lands.
#[derive(Debug, Default)]
pub struct RefreshGate {
    current: Option<AbortHandle>,
    generation: u64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts the previous request and registers a new one.
    pub fn begin(&mut self) -> (AbortRegistration, u64) {
        self.cancel();
        let (handle, registration) = AbortHandle::new_pair();
        self.current = Some(handle);
        self.generation += 1;
        (registration, self.generation)
    }

    /// Marks `generation` finished. Returns `false` if a newer request superseded it.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.current = None;
        true
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }
}

/// Fetches through `gate`, returning `None` if the request was superseded.
pub async fn fetch_latest<S: SeriesSource>(
    gate: &RefCell<RefreshGate>,
    source: &S,
    kind: FetchKind,
    retry_attempts: u32,
) -> Option<SeriesState> {
    let (registration, generation) = gate.borrow_mut().begin();
    let result = Abortable::new(fetch_series(source, kind, retry_attempts), registration).await;
    let is_current = gate.borrow_mut().finish(generation);
    match result {
        Ok(state) if is_current => Some(state),
        _ => {
            get_logger().debug(
                LogComponent::Application("SeriesQuery"),
                &format!("request {} superseded", generation),
            );
            None
        }
    }
}
