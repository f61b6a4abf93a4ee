use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::{
    application::{
        FetchKind, LoadStatus, RefreshGate, SeedDecision, SeedPlan, SeriesOutcome, SeriesState, fetch_latest,
    },
    domain::{
        chart::SyncTrigger,
        logging::{LogComponent, get_logger},
    },
    global_state::{chart_session, globals, is_refreshing, load_status, set_if_changed},
    infrastructure::KpiSource,
    presentation::{
        chart_view::{ChartVisualization, remeasure},
        format::format_currency,
        threshold_controls::{AddThresholdDialog, ThresholdPills},
    },
};

thread_local! {
    static REFRESH_GATE: Rc<RefCell<RefreshGate>> = Rc::new(RefCell::new(RefreshGate::new()));
}

/// Starts a series request; a newer request supersedes any in flight.
pub fn request_series(kind: FetchKind) {
    let config = chart_session().with_untracked(|s| s.config().clone());
    let source = KpiSource::from_config(&config);
    let gate = REFRESH_GATE.with(Rc::clone);

    match kind {
        FetchKind::Load => {
            is_refreshing().set(false);
            load_status().set(LoadStatus::Loading);
        }
        FetchKind::Refresh => is_refreshing().set(true),
    }

    get_logger().info(
        LogComponent::Presentation("App"),
        &format!("{:?} series from {} source", kind, source.mode()),
    );

    spawn_local(async move {
        let Some(state) = fetch_latest(&gate, &source, kind, config.fetch_retry_attempts).await else {
            return;
        };
        if kind == FetchKind::Refresh {
            is_refreshing().set(false);
        }
        match SeriesOutcome::resolve(kind, &load_status().get_untracked(), state) {
            SeriesOutcome::Apply(state) => apply_series_state(state),
            SeriesOutcome::KeepChart(message) => get_logger().error(
                LogComponent::Presentation("App"),
                &format!("refresh failed: {}", message),
            ),
        }
    });
}

fn apply_series_state(state: SeriesState) {
    let (status, series) = state.into_parts();
    if let Some(series) = series {
        match chart_session().try_update(|s| s.set_series(series)) {
            Some(SeedDecision::Seed(plan)) => schedule_seed(plan),
            Some(SeedDecision::RevealNow) => settle_after_reveal(),
            _ => {}
        }
    }
    set_if_changed(load_status(), status);
}

/// Adds the suggested thresholds one by one, then reveals them.
fn schedule_seed(plan: SeedPlan) {
    let session = chart_session();
    let reveal_after = Duration::from_millis(plan.reveal_after_ms as u64);
    for step in plan.steps {
        let draft = step.draft;
        set_timeout(
            move || {
                session.try_update(|s| s.apply_seed_step(draft));
            },
            Duration::from_millis(step.delay_ms as u64),
        );
    }
    set_timeout(
        move || {
            session.try_update(|s| s.reveal_thresholds());
            settle_after_reveal();
        },
        reveal_after,
    );
}

fn settle_after_reveal() {
    let delay = chart_session().with_untracked(|s| s.config().settle_delay_ms);
    set_timeout(
        || remeasure(SyncTrigger::ThresholdsRevealed),
        Duration::from_millis(delay as u64),
    );
}

#[component]
pub fn App() -> impl IntoView {
    // signals must belong to the root owner
    globals();
    request_series(FetchKind::Load);

    view! {
        <style>{STYLES}</style>
        <div class="kpi-app">
            <div class="kpi-card">
                <ChartHeader/>
                <Dashboard/>
            </div>
        </div>
    }
}

#[component]
fn ChartHeader() -> impl IntoView {
    let dialog_open = create_rw_signal(false);
    let refreshing = is_refreshing();
    let status = load_status();
    let busy = move || refreshing.get() || status.get() == LoadStatus::Loading;

    view! {
        <div class="card-header">
            <div>
                <h2>"Monthly Revenue"</h2>
                <p class="subtitle">"Drag threshold handles to adjust. Double-click the chart to annotate."</p>
            </div>
            <div class="header-actions">
                <button
                    class="btn"
                    disabled=busy
                    on:click=move |_| request_series(FetchKind::Refresh)
                >
                    {move || if refreshing.get() { "Refreshing..." } else { "Refresh" }}
                </button>
                <button class="btn primary" on:click=move |_| dialog_open.set(true)>"Add Threshold"</button>
            </div>
            <AddThresholdDialog open=dialog_open/>
        </div>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let status = load_status();

    move || match status.get() {
        LoadStatus::Loading => view! { <LoadingState/> }.into_view(),
        LoadStatus::Failed(message) => view! { <ErrorState message=message/> }.into_view(),
        LoadStatus::Empty => view! { <EmptyState/> }.into_view(),
        LoadStatus::Ready => view! {
            <ThresholdPills/>
            <ChartVisualization/>
            <ChartStats/>
        }
        .into_view(),
    }
}

#[component]
fn LoadingState() -> impl IntoView {
    view! {
        <div class="state-panel">
            <div class="spinner"></div>
            <p>"Loading revenue data..."</p>
        </div>
    }
}

#[component]
fn ErrorState(message: String) -> impl IntoView {
    view! {
        <div class="state-panel error">
            <p>"Failed to load revenue data"</p>
            <p class="detail">{message}</p>
            <button class="btn" on:click=move |_| request_series(FetchKind::Load)>"Try Again"</button>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="state-panel">
            <p>"No data available"</p>
            <button class="btn" on:click=move |_| request_series(FetchKind::Refresh)>"Refresh"</button>
        </div>
    }
}

#[component]
fn ChartStats() -> impl IntoView {
    let session = chart_session();
    let current = move || session.with(|s| s.stats().map(|st| format_currency(st.current)).unwrap_or_default());
    let peak = move || session.with(|s| s.stats().map(|st| format_currency(st.max)).unwrap_or_default());
    let active = move || session.with(|s| s.visible_threshold_count());
    let annotations = move || session.with(|s| s.store().state().annotations.len());

    view! {
        <div class="chart-stats">
            <div class="stat"><span class="stat-label">"Current Revenue"</span><span class="stat-value">{current}</span></div>
            <div class="stat"><span class="stat-label">"Peak Revenue"</span><span class="stat-value">{peak}</span></div>
            <div class="stat"><span class="stat-label">"Active Thresholds"</span><span class="stat-value">{active}</span></div>
            <div class="stat"><span class="stat-label">"Annotations"</span><span class="stat-value">{annotations}</span></div>
        </div>
    }
}

const STYLES: &str = r#"
.kpi-app {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    background: #f8fafc;
    min-height: 100vh;
    padding: 24px;
    color: #0f172a;
}
.kpi-card {
    max-width: 1100px;
    margin: 0 auto;
    background: #ffffff;
    border: 1px solid #e2e8f0;
    border-radius: 12px;
    padding: 20px;
}
.card-header { display: flex; justify-content: space-between; align-items: flex-start; gap: 16px; }
.card-header h2 { margin: 0; }
.subtitle { margin: 4px 0 0; color: #64748b; font-size: 13px; }
.header-actions { display: flex; gap: 8px; }
.btn {
    border: 1px solid #cbd5e1;
    background: #ffffff;
    border-radius: 6px;
    padding: 6px 12px;
    cursor: pointer;
}
.btn:disabled { opacity: 0.6; cursor: default; }
.btn.primary { background: #0f172a; color: #ffffff; border-color: #0f172a; }
.btn.danger { color: #dc2626; }
.threshold-pills { display: flex; flex-wrap: wrap; gap: 8px; margin: 16px 0; }
.threshold-pill {
    display: flex;
    align-items: center;
    gap: 6px;
    border: 1px solid #e2e8f0;
    border-radius: 999px;
    padding: 2px 8px 2px 2px;
    font-size: 12px;
}
.threshold-pill.muted { opacity: 0.5; }
.pill-badge { border-radius: 999px; padding: 2px 8px; font-weight: 600; }
.pill-btn { border: none; background: none; cursor: pointer; color: #475569; font-size: 12px; }
.pill-btn.danger { color: #dc2626; }
.chart-surface { position: relative; height: 400px; user-select: none; }
.chart-canvas { position: absolute; inset: 0; width: 100%; height: 100%; }
.threshold-handle {
    position: absolute;
    width: 14px;
    height: 14px;
    border-radius: 50%;
    border: 2px solid #ffffff;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.3);
    transform: translate(-50%, -50%);
    cursor: ns-resize;
}
.threshold-handle.locked { cursor: not-allowed; opacity: 0.7; }
.handle-badge {
    position: absolute;
    left: 18px;
    top: 50%;
    transform: translateY(-50%);
    white-space: nowrap;
    border-radius: 4px;
    padding: 1px 6px;
    color: #ffffff;
    font-size: 11px;
    font-weight: 600;
    pointer-events: none;
}
.handle-value { margin-left: 6px; font-weight: 400; }
.annotation-anchor { position: absolute; transform: translate(-50%, -50%); }
.annotation-marker {
    width: 12px;
    height: 12px;
    border-radius: 50%;
    border: 2px solid #3b82f6;
    background: #ffffff;
    cursor: pointer;
    padding: 0;
}
.annotation-marker.has-note { background: #3b82f6; }
.annotation-popover {
    position: absolute;
    top: 18px;
    left: 50%;
    transform: translateX(-50%);
    width: 240px;
    background: #ffffff;
    border: 1px solid #e2e8f0;
    border-radius: 8px;
    padding: 10px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    z-index: 10;
}
.popover-title { font-weight: 600; margin-bottom: 6px; }
.popover-note { width: 100%; min-height: 60px; box-sizing: border-box; }
.popover-actions, .dialog-actions { display: flex; justify-content: flex-end; gap: 6px; margin-top: 8px; }
.chart-stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-top: 16px; }
.stat { display: flex; flex-direction: column; }
.stat-label { color: #64748b; font-size: 12px; }
.stat-value { font-size: 18px; font-weight: 700; }
.state-panel { text-align: center; padding: 48px 0; color: #475569; }
.state-panel.error { color: #dc2626; }
.state-panel .detail { font-size: 12px; color: #64748b; }
.spinner {
    margin: 0 auto 12px;
    width: 28px;
    height: 28px;
    border: 3px solid #e2e8f0;
    border-top-color: #0f172a;
    border-radius: 50%;
    animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.dialog-backdrop {
    position: fixed;
    inset: 0;
    background: rgba(15, 23, 42, 0.4);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 20;
}
.dialog { background: #ffffff; border-radius: 10px; padding: 20px; width: 320px; display: flex; flex-direction: column; gap: 10px; }
.dialog label { display: flex; flex-direction: column; gap: 4px; font-size: 13px; }
.swatches { display: flex; gap: 6px; }
.swatch { width: 22px; height: 22px; border-radius: 50%; border: 2px solid transparent; cursor: pointer; }
.swatch.selected { border-color: #0f172a; }
"#;
