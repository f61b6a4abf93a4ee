use super::annotation_popover::AnnotationMarker;
use super::format::{format_currency, threshold_caption};
use crate::domain::{
    chart::{ContainerRect, PositionSynchronizer, SyncTrigger, ThresholdId},
    logging::{LogComponent, get_logger, get_time_provider},
};
use crate::global_state::{Measurement, chart_session, measurement, overlay_positions};
use crate::infrastructure::{dom_events::DragCapture, rendering::LineChartRenderer};
use leptos::html::Canvas;
use leptos::*;
use web_sys::MouseEvent;

pub const CHART_CONTAINER_ID: &str = "kpi-chart-container";

/// Current bounding box of the chart container, zero-sized when it is not mounted.
pub fn read_container_rect() -> ContainerRect {
    document()
        .get_element_by_id(CHART_CONTAINER_ID)
        .map(|element| {
            let rect = element.get_bounding_client_rect();
            ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height())
        })
        .unwrap_or_default()
}

/// Re-measures the container and schedules an overlay recomputation.
pub fn remeasure(trigger: SyncTrigger) {
    let rect = read_container_rect();
    measurement().try_update(|m| {
        *m = Measurement { rect, trigger, seq: m.seq + 1 };
    });
}

#[component]
pub fn ChartVisualization() -> impl IntoView {
    let session = chart_session();
    let canvas_ref = create_node_ref::<Canvas>();
    let synchronizer = store_value(PositionSynchronizer::new());

    // positions follow the session and every new measurement
    create_effect(move |last_seq: Option<u64>| {
        let Measurement { rect, trigger, seq } = measurement().get();
        let trigger = if last_seq == Some(seq) { SyncTrigger::StateChanged } else { trigger };
        let changed = session.with(|s| {
            let mut synced = None;
            synchronizer.update_value(|sync| {
                if s.sync_positions(sync, trigger, &rect) {
                    synced = Some(sync.positions().clone());
                }
            });
            synced
        });
        if let Some(positions) = changed {
            overlay_positions().set(positions);
        }
        seq
    });

    create_effect(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let rect = measurement().get().rect;
        session.with(|s| {
            let Some(geometry) = s.geometry(&rect) else {
                return;
            };
            let thresholds = if s.thresholds_shown() { s.store().thresholds() } else { &[] };
            let canvas: &web_sys::HtmlCanvasElement = &canvas;
            let result = LineChartRenderer::new(canvas.clone())
                .and_then(|renderer| renderer.render(&geometry, s.series(), thresholds));
            if let Err(e) = result {
                get_logger().error(
                    LogComponent::Presentation("ChartVisualization"),
                    &format!("canvas render failed: {:?}", e),
                );
            }
        });
    });

    create_effect(move |_| {
        if canvas_ref.get().is_some() {
            request_animation_frame(|| remeasure(SyncTrigger::InitialLayout));
        }
    });

    let resize = window_event_listener(ev::resize, |_| remeasure(SyncTrigger::Resize));
    on_cleanup(move || {
        resize.remove();
        session.try_update(|s| s.end_drag());
    });

    let on_dblclick = move |ev: MouseEvent| {
        let rect = read_container_rect();
        let now = get_time_provider().current_timestamp();
        let created = session
            .try_update(|s| s.annotate_at(&rect, ev.client_x() as f64, now))
            .flatten();
        if let Some(id) = created {
            get_logger().info(
                LogComponent::Presentation("ChartVisualization"),
                &format!("annotation {} created", id),
            );
        }
    };

    let handles = move || {
        overlay_positions()
            .with(|positions| {
                positions
                    .thresholds
                    .iter()
                    .map(|(id, point)| (id.clone(), *point))
                    .collect::<Vec<_>>()
            })
            .into_iter()
            .map(|(id, point)| view! { <ThresholdHandle id=id x=point.x y=point.y/> })
            .collect_view()
    };

    let markers = move || {
        overlay_positions()
            .with(|positions| positions.annotations.keys().cloned().collect::<Vec<_>>())
            .into_iter()
            .map(|id| view! { <AnnotationMarker id=id/> })
            .collect_view()
    };

    view! {
        <div
            id=CHART_CONTAINER_ID
            class="chart-surface"
            on:dblclick=on_dblclick
        >
            <canvas node_ref=canvas_ref class="chart-canvas"></canvas>
            {handles}
            {markers}
        </div>
    }
}

#[component]
fn ThresholdHandle(id: ThresholdId, x: f64, y: f64) -> impl IntoView {
    let session = chart_session();
    let threshold = {
        let id = id.clone();
        move || session.with(|s| s.store().threshold(&id).cloned())
    };

    let on_mousedown = {
        let id = id.clone();
        move |ev: MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            let on_move = move |ev: MouseEvent| {
                let rect = read_container_rect();
                session.try_update(|s| s.drag_to(&rect, ev.client_y() as f64));
            };
            let on_up = move |_: MouseEvent| {
                session.try_update(|s| s.end_drag());
            };
            session.update(|s| {
                s.begin_drag(&id, || DragCapture::acquire(on_move, on_up));
            });
        }
    };

    let color = {
        let threshold = threshold.clone();
        move || threshold().map(|t| t.color).unwrap_or_default()
    };
    let color_badge = color.clone();
    let locked = {
        let threshold = threshold.clone();
        move || threshold().is_some_and(|t| t.is_locked)
    };
    let title = {
        let threshold = threshold.clone();
        move || {
            threshold()
                .map(|t| threshold_caption(&t.name, t.value, t.is_locked))
                .unwrap_or_default()
        }
    };
    let badge = {
        let threshold = threshold.clone();
        move || threshold().map(|t| t.name).unwrap_or_default()
    };
    let value = move || threshold().map(|t| format_currency(t.value)).unwrap_or_default();

    view! {
        <div
            class="threshold-handle"
            class:locked=locked
            style:left=format!("{}px", x)
            style:top=format!("{}px", y)
            style:background-color=color
            title=title
            on:mousedown=on_mousedown
            on:dblclick=|ev: MouseEvent| ev.stop_propagation()
        >
            <span class="handle-badge" style:background-color=color_badge>
                {badge}
                <span class="handle-value">{value}</span>
            </span>
        </div>
    }
}
