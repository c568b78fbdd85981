//! Copy and cut capture.

use super::event::{ClipboardEvent, ClipboardPayload, TEXT_HTML, TEXT_PLAIN};
use super::host::{EditorHost, Range, Source};
use super::{ClipboardController, CopyOutcome};
use crate::config::StructuredSource;
use crate::delta::Delta;

impl<H: EditorHost> ClipboardController<H> {
    /// Handle a native copy (`is_cut == false`) or cut event
    pub fn on_capture_copy<E: ClipboardEvent + ?Sized>(
        &mut self,
        event: &mut E,
        is_cut: bool,
    ) -> CopyOutcome {
        // Without clipboard items the platform cannot take our formats
        if !event.has_items() {
            log::debug!("copy: no clipboard items, leaving event to the browser");
            return CopyOutcome::Native;
        }
        if event.default_prevented() {
            return CopyOutcome::Ignored;
        }
        event.prevent_default();

        let Some(range) = self.host.selection(false) else {
            log::debug!("copy: no selection");
            return CopyOutcome::Ignored;
        };

        let payload = self.serialize_selection(range);
        payload.write_to(event);
        log::info!(
            "{}: {:?} as [{}]",
            if is_cut { "cut" } else { "copy" },
            range,
            payload.formats().collect::<Vec<_>>().join(", ")
        );

        if is_cut {
            let delta = Delta::new().retain(range.index).delete(range.length);
            self.host.update_contents(&delta, Source::User);
            return CopyOutcome::Cut(range);
        }
        CopyOutcome::Copied(range)
    }

    /// Every clipboard format for `range`
    ///
    /// Plain text is always present. The structured Delta is withheld in
    /// preview mode so pastes elsewhere fall back to text or HTML.
    pub fn serialize_selection(&self, range: Range) -> ClipboardPayload {
        let mut payload = ClipboardPayload::new();
        payload.set(TEXT_PLAIN, self.host.text(range));

        if !self.host.is_preview() {
            let delta = match self.config.structured_source {
                StructuredSource::Contents => self.host.contents(range),
                StructuredSource::SemanticHtml => {
                    self.host.convert_html(&self.semantic_html(range))
                }
            };
            match delta.to_json() {
                Ok(json) => payload.set(&self.config.structured_format, json),
                Err(e) => log::warn!("copy: structured payload skipped: {}", e),
            }
        }

        if self.config.write_html {
            payload.set(TEXT_HTML, self.semantic_html(range));
        }
        payload
    }
}
