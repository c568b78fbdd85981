//! Clipboard configuration
//!
//! Passed from JavaScript as a plain options object, e.g.
//! `{ writeHtml: false, deferPlainPaste: true }`. Missing keys take their
//! defaults.

use crate::clipboard::event::APPLICATION_JSON;
use serde::{Deserialize, Serialize};

/// Where the structured copy payload comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructuredSource {
    /// The host's Delta for the selection
    #[default]
    Contents,
    /// The selection's semantic HTML parsed back by the host, which keeps
    /// only what HTML can carry
    SemanticHtml,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipboardConfig {
    /// Also write `text/html` on copy/cut
    pub write_html: bool,
    /// Slot holding the serialized Delta
    pub structured_format: String,
    pub structured_source: StructuredSource,
    /// Apply plain-text pastes on the next tick and restore scroll/focus
    /// afterwards (workaround for browsers that move focus during paste)
    pub defer_plain_paste: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            write_html: true,
            structured_format: APPLICATION_JSON.to_string(),
            structured_source: StructuredSource::Contents,
            defer_plain_paste: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClipboardConfig::default();
        assert!(config.write_html);
        assert!(!config.defer_plain_paste);
        assert_eq!(config.structured_format, "application/json");
        assert_eq!(config.structured_source, StructuredSource::Contents);
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let config: ClipboardConfig =
            serde_json::from_str(r#"{"deferPlainPaste":true,"structuredSource":"semanticHtml"}"#).unwrap();
        assert!(config.defer_plain_paste);
        assert!(config.write_html);
        assert_eq!(config.structured_source, StructuredSource::SemanticHtml);
    }
}
