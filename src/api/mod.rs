//! Clipboard WASM API
//!
//! JavaScript-facing helpers for hosts that manage the clipboard
//! themselves: render a document Delta as semantic HTML, validate a
//! structured clipboard payload and complete clipboard options.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation and error handling

pub mod helpers;

use crate::blot::tree::Node;
use crate::config::ClipboardConfig;
use crate::delta::Delta;
use crate::html::{convert, delta_to_html as render_delta};
use helpers::{deserialize, serialize, validate_range, validation_error};
use wasm_bindgen::prelude::*;

/// Render a whole document Delta as semantic HTML
#[wasm_bindgen(js_name = deltaToHtml)]
pub fn delta_to_html(delta_js: JsValue) -> Result<String, JsValue> {
    let delta: Delta = deserialize(delta_js, "Failed to deserialize delta")?;
    log::debug!("deltaToHtml: {} ops", delta.ops.len());
    Ok(render_delta(&delta))
}

/// Render `[index, index + length)` of a document Delta as semantic HTML
#[wasm_bindgen(js_name = semanticHtml)]
pub fn semantic_html(delta_js: JsValue, index: usize, length: usize) -> Result<String, JsValue> {
    let delta: Delta = deserialize(delta_js, "Failed to deserialize delta")?;
    let root = Node::from_delta(&delta);
    validate_range(index, length, root.length()).map_err(validation_error)?;
    Ok(convert(&root, index, length, true))
}

/// Decode a structured clipboard payload
///
/// Returns the Delta when the JSON is non-empty document content (inserts
/// only) and `null` otherwise.
#[wasm_bindgen(js_name = parseClipboardDelta)]
pub fn parse_clipboard_delta(json: &str) -> Result<JsValue, JsValue> {
    match Delta::from_json(json) {
        Ok(delta) if delta.is_document() => serialize(&delta, "Failed to serialize delta"),
        Ok(_) => Ok(JsValue::NULL),
        Err(e) => {
            log::debug!("parseClipboardDelta: {}", e);
            Ok(JsValue::NULL)
        }
    }
}

/// Complete a clipboard options object with defaults
///
/// `undefined` or `null` yields the default configuration.
#[wasm_bindgen(js_name = clipboardConfig)]
pub fn clipboard_config(options: JsValue) -> Result<JsValue, JsValue> {
    let config: ClipboardConfig = if options.is_undefined() || options.is_null() {
        ClipboardConfig::default()
    } else {
        deserialize(options, "Failed to deserialize clipboard options")?
    };
    serialize(&config, "Failed to serialize clipboard options")
}
