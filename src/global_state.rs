use crate::application::{ChartSession, LoadStatus};
use crate::domain::chart::{ChartConfig, ContainerRect, DataSourceMode, OverlayPositions, SyncTrigger};
use crate::infrastructure::{dom_events::DragCapture, storage::LocalStorageRepository};
use leptos::*;
use once_cell::unsync::OnceCell;

pub type AppSession = ChartSession<LocalStorageRepository, DragCapture>;

/// Latest container measurement and what caused it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub rect: ContainerRect,
    pub trigger: SyncTrigger,
    pub seq: u64,
}

impl Default for Measurement {
    fn default() -> Self {
        Self { rect: ContainerRect::default(), trigger: SyncTrigger::InitialLayout, seq: 0 }
    }
}

#[derive(Clone, Copy)]
pub struct Globals {
    pub session: RwSignal<AppSession>,
    pub load_status: RwSignal<LoadStatus>,
    pub is_refreshing: RwSignal<bool>,
    pub measurement: RwSignal<Measurement>,
    pub overlay: RwSignal<OverlayPositions>,
}

thread_local! {
    static GLOBALS: OnceCell<Globals> = const { OnceCell::new() };
}

/// Chart configuration for this page, honoring `?source=`.
pub fn page_config() -> ChartConfig {
    let query = window().location().search().unwrap_or_default();
    ChartConfig::default().with_source_mode(DataSourceMode::from_query(&query))
}

pub fn globals() -> Globals {
    GLOBALS.with(|cell| {
        *cell.get_or_init(|| {
            let config = page_config();
            let repository = LocalStorageRepository::new(config.storage_key);
            Globals {
                session: create_rw_signal(ChartSession::new(config, repository)),
                load_status: create_rw_signal(LoadStatus::Loading),
                is_refreshing: create_rw_signal(false),
                measurement: create_rw_signal(Measurement::default()),
                overlay: create_rw_signal(OverlayPositions::default()),
            }
        })
    })
}

/// Writes `value` only when it differs, so subscribers are not woken for nothing.
pub fn set_if_changed<T: PartialEq + 'static>(signal: RwSignal<T>, value: T) -> bool {
    if signal.with_untracked(|current| *current == value) {
        return false;
    }
    signal.set(value);
    true
}

crate::global_signals! {
    pub chart_session => session: AppSession,
    pub load_status => load_status: LoadStatus,
    pub is_refreshing => is_refreshing: bool,
    pub measurement => measurement: Measurement,
    pub overlay_positions => overlay: OverlayPositions,
}
