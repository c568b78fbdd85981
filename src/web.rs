//! Browser glue
//!
//! [`WebClipboardEvent`] adapts `web_sys::ClipboardEvent` to the
//! controller's event trait. [`ClipboardBinding`] subscribes a controller to
//! the copy, cut and paste events of the editing surface and unsubscribes
//! when dropped.

use crate::clipboard::{ClipboardController, ClipboardEvent, EditorHost, PasteOutcome, PendingPaste};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

/// A browser clipboard event
pub struct WebClipboardEvent {
    event: web_sys::ClipboardEvent,
}

impl WebClipboardEvent {
    pub fn new(event: web_sys::ClipboardEvent) -> Self {
        Self { event }
    }
}

impl ClipboardEvent for WebClipboardEvent {
    fn has_items(&self) -> bool {
        // Older WebKit exposes clipboardData without an `items` list
        self.event
            .clipboard_data()
            .and_then(|data| js_sys::Reflect::get(&data, &JsValue::from_str("items")).ok())
            .map(|items| !items.is_undefined() && !items.is_null())
            .unwrap_or(false)
    }

    fn default_prevented(&self) -> bool {
        self.event.default_prevented()
    }

    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    fn get_data(&self, format: &str) -> Option<String> {
        let data = self.event.clipboard_data()?;
        data.get_data(format).ok().filter(|value| !value.is_empty())
    }

    fn set_data(&mut self, format: &str, data: &str) {
        if let Some(transfer) = self.event.clipboard_data() {
            if let Err(e) = transfer.set_data(format, data) {
                log::warn!("Failed to write {} to clipboard: {:?}", format, e);
            }
        }
    }
}

type Listener = Closure<dyn FnMut(web_sys::ClipboardEvent)>;

/// Live subscription of a controller to an element's clipboard events
pub struct ClipboardBinding {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl ClipboardBinding {
    /// Listen for copy, cut and paste on `target`
    pub fn install<H: EditorHost + 'static>(
        target: EventTarget,
        controller: Rc<RefCell<ClipboardController<H>>>,
    ) -> Result<Self, JsValue> {
        let mut binding = Self { target, listeners: Vec::new() };

        for (name, is_cut) in [("copy", false), ("cut", true)] {
            let controller = controller.clone();
            let listener: Listener = Closure::new(move |event: web_sys::ClipboardEvent| {
                let mut event = WebClipboardEvent::new(event);
                controller.borrow_mut().on_capture_copy(&mut event, is_cut);
            });
            binding.add(name, listener)?;
        }

        let paste_controller = controller;
        let listener: Listener = Closure::new(move |event: web_sys::ClipboardEvent| {
            let mut event = WebClipboardEvent::new(event);
            let outcome = paste_controller.borrow_mut().on_paste(&mut event);
            if let PasteOutcome::Deferred(pending) = outcome {
                schedule_resume(paste_controller.clone(), pending, defer);
            }
        });
        binding.add("paste", listener)?;

        log::debug!("Clipboard listeners installed");
        Ok(binding)
    }

    fn add(&mut self, name: &'static str, listener: Listener) -> Result<(), JsValue> {
        self.target
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((name, listener));
        Ok(())
    }
}

impl Drop for ClipboardBinding {
    fn drop(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        log::debug!("Clipboard listeners removed");
    }
}

/// Finish a deferred paste through `schedule`
///
/// The event is already suppressed, so if scheduling fails the paste is
/// applied immediately instead of being lost.
pub fn schedule_resume<H, S>(
    controller: Rc<RefCell<ClipboardController<H>>>,
    pending: PendingPaste,
    schedule: S,
) where
    H: EditorHost + 'static,
    S: FnOnce(JsValue) -> Result<(), JsValue>,
{
    let fallback = pending.clone();
    let deferred = controller.clone();
    let resume = Closure::once_into_js(move || {
        deferred.borrow_mut().resume_paste(pending);
    });
    if let Err(e) = schedule(resume) {
        log::warn!("Failed to schedule deferred paste, applying now: {:?}", e);
        controller.borrow_mut().resume_paste(fallback);
    }
}

/// Run `callback` on the next tick
pub fn defer(callback: JsValue) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)?;
    Ok(())
}
