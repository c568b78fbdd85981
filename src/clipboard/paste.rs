//! Paste handling.

use super::event::{ClipboardEvent, TEXT_HTML, TEXT_PLAIN};
use super::host::{EditorHost, Range, Source};
use super::{ClipboardController, PasteFormat, PasteOutcome};
use crate::delta::Delta;

/// A plain-text paste captured before deferral
///
/// Selection and scroll position are a snapshot taken when the event was
/// suppressed; they are not re-read when the paste resumes.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPaste {
    pub range: Range,
    pub scroll_top: f64,
    pub content: Delta,
}

impl<H: EditorHost> ClipboardController<H> {
    /// Handle a native paste event
    pub fn on_paste<E: ClipboardEvent + ?Sized>(&mut self, event: &mut E) -> PasteOutcome {
        if !event.has_items() {
            log::debug!("paste: no clipboard items, leaving event to the browser");
            return PasteOutcome::Native;
        }
        if event.default_prevented() || !self.host.is_enabled() {
            return PasteOutcome::Ignored;
        }
        event.prevent_default();
        self.host.cutoff_history();

        let Some(range) = self.host.selection(true) else {
            log::debug!("paste: no selection");
            return PasteOutcome::Ignored;
        };

        let (format, content) = self.read_payload(event);

        if format == PasteFormat::Plain && self.config.defer_plain_paste {
            log::debug!("paste: deferring plain text at {:?}", range);
            return PasteOutcome::Deferred(PendingPaste {
                range,
                scroll_top: self.host.scroll_top(),
                content,
            });
        }

        let caret = self.merge_at_range(range, &content);
        log::info!("paste: {:?} at {:?}, caret {}", format, range, caret);
        PasteOutcome::Applied { format, caret }
    }

    /// Finish a deferred plain-text paste
    pub fn resume_paste(&mut self, pending: PendingPaste) -> PasteOutcome {
        let caret = self.merge_at_range(pending.range, &pending.content);
        self.host.set_scroll_top(pending.scroll_top);
        self.host.focus();
        log::info!("paste: deferred plain text at {:?}, caret {}", pending.range, caret);
        PasteOutcome::Applied { format: PasteFormat::Plain, caret }
    }

    /// Pick the most trusted format present and turn it into content
    pub fn read_payload<E: ClipboardEvent + ?Sized>(&self, event: &E) -> (PasteFormat, Delta) {
        if let Some(delta) = event
            .get_data(&self.config.structured_format)
            .and_then(|json| parse_structured(&json))
        {
            return (PasteFormat::Structured, delta);
        }

        if let Some(html) = event.get_data(TEXT_HTML).filter(|html| !html.trim().is_empty()) {
            return (PasteFormat::Html, self.host.convert_html(&html));
        }

        let text = event.get_data(TEXT_PLAIN).unwrap_or_default();
        (PasteFormat::Plain, Delta::new().insert(text))
    }

    /// Replace `range` with `content` as one user edit; returns the caret
    pub fn merge_at_range(&mut self, range: Range, content: &Delta) -> usize {
        let delta = Delta::new()
            .retain(range.index)
            .delete(range.length)
            .concat(content);
        self.host.update_contents(&delta, Source::User);

        let caret = range.index + content.insert_length();
        self.host.set_selection(Range::caret(caret), Source::Silent);
        self.host.scroll_into_view();
        caret
    }
}

/// A structured payload counts only if it is non-empty document content
///
/// Retains and deletes would edit text outside the selection, so a payload
/// carrying any is rejected as a whole.
fn parse_structured(json: &str) -> Option<Delta> {
    match Delta::from_json(json) {
        Ok(delta) if delta.is_document() => Some(delta),
        Ok(delta) if delta.is_empty() => {
            log::debug!("paste: structured payload is empty");
            None
        }
        Ok(_) => {
            log::warn!("paste: structured payload contains retain/delete ops, ignored");
            None
        }
        Err(e) => {
            log::debug!("paste: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured_requires_content() {
        assert!(parse_structured(r#"{"ops":[{"insert":"x"}]}"#).is_some());
        assert!(parse_structured(r#"{"ops":[]}"#).is_none());
        assert!(parse_structured(r#"[]"#).is_none());
        assert!(parse_structured("{oops").is_none());
        assert!(parse_structured("").is_none());
        assert!(parse_structured(r#"{"ops":[{"delete":6}]}"#).is_none());
        assert!(parse_structured(r#"{"ops":[{"insert":"x"},{"retain":3}]}"#).is_none());
    }
}
