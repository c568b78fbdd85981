//! Rich-Text Editor Clipboard WASM Module
//!
//! Copy, cut and paste for a Delta-based rich-text editor. Selections are
//! written to the clipboard as plain text, semantic HTML and Delta JSON;
//! pastes take the most faithful format available and merge it at the
//! selection.
//!
//! - [`html`]: blot tree → semantic HTML, including nested list rebuilding
//! - [`clipboard`]: the copy/cut/paste controller and its host/event traits
//! - [`delta`]: the operation-sequence document model
//! - [`blot`]: read-only document tree view and a tree built from a Delta

pub mod api;
pub mod blot;
pub mod clipboard;
pub mod config;
pub mod delta;
pub mod error;
pub mod html;
pub mod web;

// Re-export commonly used types
pub use clipboard::{
    ClipboardController, ClipboardEvent, ClipboardPayload, CopyOutcome, EditorHost,
    MemoryClipboardEvent, PasteFormat, PasteOutcome, PendingPaste, Range, Source,
};
pub use config::{ClipboardConfig, StructuredSource};
pub use delta::{AttributeMap, Delta, Op};
pub use error::PayloadError;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();
    log::info!("Clipboard WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger already set: {}", e)));
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
