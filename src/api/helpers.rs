//! Shared helpers for WASM API operations
//!
//! Serialization, deserialization and range validation used by every
//! exported function. Errors are logged before being handed back to
//! JavaScript.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps become plain objects so Delta attributes look the way JavaScript
/// editors expect.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that `[index, index + length)` lies inside a document
pub fn validate_range(index: usize, length: usize, max_length: usize) -> Result<(), String> {
    let end = index
        .checked_add(length)
        .ok_or_else(|| format!("Range overflow: {} + {}", index, length))?;
    if end > max_length {
        return Err(format!(
            "Range {}..{} out of bounds (document length {})",
            index, end, max_length
        ));
    }
    Ok(())
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}
