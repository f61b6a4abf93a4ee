use leptos::ev::{self, EventDescriptor};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, MouseEvent};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

/// Listener registered on `document`, removed when dropped.
pub struct DocumentListener {
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl DocumentListener {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback_and_bool(
                &self.event_name,
                self.callback.as_ref().unchecked_ref(),
                self.capture,
            );
        }
    }
}

pub fn document_event_listener_with_options<E>(
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> DocumentListener
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let event_name = event.name().into_owned();
    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    }) as Box<dyn FnMut(Event)>);

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            &event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        );
    }

    DocumentListener { event_name, callback, capture: options.capture }
}

/// Document-wide pointer capture for the duration of one drag.
///
/// Both listeners go away together when the capture is dropped.
pub struct DragCapture {
    _on_move: DocumentListener,
    _on_up: DocumentListener,
}

impl DragCapture {
    pub fn acquire(
        on_move: impl FnMut(MouseEvent) + 'static,
        on_up: impl FnMut(MouseEvent) + 'static,
    ) -> Self {
        let options = EventOptions::default();
        Self {
            _on_move: document_event_listener_with_options(ev::mousemove, &options, on_move),
            _on_up: document_event_listener_with_options(ev::mouseup, &options, on_up),
        }
    }
}
