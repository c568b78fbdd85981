//! Clipboard event surface
//!
//! Events expose named payload slots plus the usual default-action flags.
//! [`MemoryClipboardEvent`] is the in-process implementation; the browser
//! one lives in `crate::web`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
/// Default slot for the serialized Delta
pub const APPLICATION_JSON: &str = "application/json";

/// A copy, cut or paste event as seen by the controller
pub trait ClipboardEvent {
    /// Whether the platform exposes clipboard items at all
    ///
    /// When it does not, the controller leaves the event to the browser.
    fn has_items(&self) -> bool;

    fn default_prevented(&self) -> bool;

    fn prevent_default(&mut self);

    /// Read a slot; missing and unreadable slots are `None`
    fn get_data(&self, format: &str) -> Option<String>;

    fn set_data(&mut self, format: &str, data: &str);
}

/// Format name → content, as written to or read from the clipboard
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardPayload(BTreeMap<String, String>);

impl ClipboardPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, format: &str, data: impl Into<String>) {
        self.0.insert(format.to_string(), data.into());
    }

    pub fn get(&self, format: &str) -> Option<&str> {
        self.0.get(format).map(String::as_str)
    }

    pub fn contains(&self, format: &str) -> bool {
        self.0.contains_key(format)
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write every slot into an event
    pub fn write_to<E: ClipboardEvent + ?Sized>(&self, event: &mut E) {
        for (format, data) in &self.0 {
            event.set_data(format, data);
        }
    }
}

/// Clipboard event backed by an in-memory payload
#[derive(Clone, Debug)]
pub struct MemoryClipboardEvent {
    pub payload: ClipboardPayload,
    pub has_items: bool,
    pub default_prevented: bool,
}

impl MemoryClipboardEvent {
    /// Event with an empty clipboard, as for a copy
    pub fn new() -> Self {
        Self::with_payload(ClipboardPayload::new())
    }

    /// Event carrying `payload`, as for a paste
    pub fn with_payload(payload: ClipboardPayload) -> Self {
        Self {
            payload,
            has_items: true,
            default_prevented: false,
        }
    }

    /// Event from a platform without clipboard item support
    pub fn without_items() -> Self {
        Self {
            has_items: false,
            ..Self::new()
        }
    }
}

impl Default for MemoryClipboardEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardEvent for MemoryClipboardEvent {
    fn has_items(&self) -> bool {
        self.has_items
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn get_data(&self, format: &str) -> Option<String> {
        self.payload.get(format).map(str::to_string)
    }

    fn set_data(&mut self, format: &str, data: &str) {
        self.payload.set(format, data);
    }
}
