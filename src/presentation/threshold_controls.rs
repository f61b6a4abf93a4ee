use super::format::{contrast_color, format_currency, normalize_threshold_name, parse_threshold_value};
use crate::domain::chart::{Threshold, ThresholdDraft};
use crate::domain::logging::{LogComponent, get_logger};
use crate::global_state::chart_session;
use derive_more::Display;
use leptos::*;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Colors offered when adding a threshold by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, IntoStaticStr)]
pub enum ThresholdColor {
    #[default]
    #[display(fmt = "Red")]
    #[strum(serialize = "#ef4444")]
    Red,
    #[display(fmt = "Orange")]
    #[strum(serialize = "#f97316")]
    Orange,
    #[display(fmt = "Yellow")]
    #[strum(serialize = "#eab308")]
    Yellow,
    #[display(fmt = "Green")]
    #[strum(serialize = "#22c55e")]
    Green,
    #[display(fmt = "Cyan")]
    #[strum(serialize = "#06b6d4")]
    Cyan,
    #[display(fmt = "Blue")]
    #[strum(serialize = "#3b82f6")]
    Blue,
    #[display(fmt = "Violet")]
    #[strum(serialize = "#8b5cf6")]
    Violet,
    #[display(fmt = "Pink")]
    #[strum(serialize = "#ec4899")]
    Pink,
}

impl ThresholdColor {
    pub fn hex(self) -> &'static str {
        self.into()
    }
}

/// Builds a draft from raw dialog input; `None` when the name is blank or the value has no digits.
pub fn draft_from_input(name: &str, value: &str, color: ThresholdColor) -> Option<ThresholdDraft> {
    let name = normalize_threshold_name(name)?;
    let value = parse_threshold_value(value)?;
    Some(ThresholdDraft::new(name, value, color.hex()))
}

#[component]
pub fn ThresholdPills() -> impl IntoView {
    let session = chart_session();
    let pills = move || {
        session
            .with(|s| s.store().thresholds().to_vec())
            .into_iter()
            .map(|threshold| view! { <ThresholdPill threshold=threshold/> })
            .collect_view()
    };

    view! { <div class="threshold-pills">{pills}</div> }
}

#[component]
fn ThresholdPill(threshold: Threshold) -> impl IntoView {
    let session = chart_session();
    let Threshold { id, name, value, color, is_locked, is_visible } = threshold;
    let text_color = contrast_color(&color);

    let toggle_visible = {
        let id = id.clone();
        move |_| {
            session.update(|s| {
                s.toggle_threshold_visibility(&id);
            })
        }
    };
    let toggle_lock = {
        let id = id.clone();
        move |_| {
            session.update(|s| {
                s.toggle_threshold_lock(&id);
            })
        }
    };
    let delete = move |_| {
        session.update(|s| {
            s.delete_threshold(&id);
        })
    };

    view! {
        <div class="threshold-pill" class:muted=!is_visible>
            <span class="pill-badge" style:background-color=color.clone() style:color=text_color>
                {name}
            </span>
            <span class="pill-value">{format_currency(value)}</span>
            <button class="pill-btn" title="Toggle visibility" on:click=toggle_visible>
                {if is_visible { "Hide" } else { "Show" }}
            </button>
            <button class="pill-btn" title="Toggle lock" on:click=toggle_lock>
                {if is_locked { "Unlock" } else { "Lock" }}
            </button>
            <button class="pill-btn danger" title="Delete" on:click=delete>"×"</button>
        </div>
    }
}

#[component]
pub fn AddThresholdDialog(open: RwSignal<bool>) -> impl IntoView {
    let session = chart_session();
    let name = create_rw_signal(String::new());
    let value = create_rw_signal(String::new());
    let color = create_rw_signal(ThresholdColor::default());

    let reset = move || {
        name.set(String::new());
        value.set(String::new());
        color.set(ThresholdColor::default());
        open.set(false);
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(draft) = draft_from_input(&name.get_untracked(), &value.get_untracked(), color.get_untracked())
        else {
            get_logger().warn(
                LogComponent::Presentation("AddThresholdDialog"),
                "threshold needs a name and a numeric value",
            );
            return;
        };
        session.update(|s| {
            s.add_threshold(draft);
        });
        reset();
    };

    let swatches = move || {
        ThresholdColor::iter()
            .map(|option| {
                view! {
                    <button
                        type="button"
                        class="swatch"
                        class:selected=move || color.get() == option
                        style:background-color=option.hex()
                        title=option.to_string()
                        on:click=move |_| color.set(option)
                    ></button>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| reset()>
                <form class="dialog" on:submit=submit on:click=|ev| ev.stop_propagation()>
                    <h3>"Add Threshold"</h3>
                    <label>
                        "Name"
                        <input
                            type="text"
                            placeholder="e.g. Stretch Goal"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Value"
                        <input
                            type="text"
                            inputmode="numeric"
                            placeholder="e.g. 600000"
                            prop:value=move || value.get()
                            on:input=move |ev| value.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="swatches">{swatches}</div>
                    <div class="dialog-actions">
                        <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                        <button type="submit" class="btn primary">"Add"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
