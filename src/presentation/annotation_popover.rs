use crate::domain::chart::AnnotationId;
use crate::global_state::{chart_session, overlay_positions};
use leptos::*;
use web_sys::MouseEvent;

/// Dot on an annotated data point; clicking it opens the note editor.
#[component]
pub fn AnnotationMarker(id: AnnotationId) -> impl IntoView {
    let session = chart_session();

    let position = {
        let id = id.clone();
        move || overlay_positions().with(|p| p.annotation_or_origin(&id))
    };
    let has_note = {
        let id = id.clone();
        move || session.with(|s| s.store().annotation(&id).is_some_and(|a| !a.note.is_empty()))
    };
    let is_open = {
        let id = id.clone();
        move || session.with(|s| s.editor().is_open_for(&id))
    };
    let title = {
        let id = id.clone();
        move || session.with(|s| s.store().annotation(&id).map(|a| a.label.clone()).unwrap_or_default())
    };
    let on_click = {
        let id = id.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            session.update(|s| {
                s.open_annotation(&id);
            });
        }
    };

    let left = {
        let position = position.clone();
        move || format!("{}px", position().x)
    };
    let top = move || format!("{}px", position().y);

    view! {
        <div class="annotation-anchor" style:left=left style:top=top>
            <button
                class="annotation-marker"
                class:has-note=has_note
                title=title
                on:click=on_click
                on:dblclick=|ev: MouseEvent| ev.stop_propagation()
            ></button>
            <Show when=is_open>
                <AnnotationPopover/>
            </Show>
        </div>
    }
}

/// Editor for the annotation currently open in the session.
#[component]
fn AnnotationPopover() -> impl IntoView {
    let session = chart_session();
    let label = move || {
        session.with(|s| {
            s.store()
                .state()
                .annotations
                .values()
                .find(|a| s.editor().is_open_for(&a.id))
                .map(|a| a.label.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="annotation-popover"
            on:click=|ev: MouseEvent| ev.stop_propagation()
            on:dblclick=|ev: MouseEvent| ev.stop_propagation()
        >
            <div class="popover-title">{label}</div>
            <textarea
                class="popover-note"
                placeholder="Add a note..."
                prop:value=move || session.with(|s| s.editor().note().to_string())
                on:input=move |ev| {
                    let note = event_target_value(&ev);
                    session.update(|s| s.set_annotation_note(note));
                }
            ></textarea>
            <div class="popover-actions">
                <button class="btn danger" on:click=move |_| session.update(|s| {
                    s.delete_annotation();
                })>"Delete"</button>
                <button class="btn" on:click=move |_| session.update(|s| s.cancel_annotation())>"Cancel"</button>
                <button class="btn primary" on:click=move |_| session.update(|s| {
                    s.save_annotation();
                })>"Save"</button>
            </div>
        </div>
    }
}
