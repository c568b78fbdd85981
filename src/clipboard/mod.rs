//! Clipboard controller for copy/cut/paste.
//!
//! The controller sits between clipboard events and the host editor. On
//! copy it writes the selection in several formats; on paste it picks the
//! most trustworthy inbound format and merges it at the selection.
//!
//! ## Module Structure
//!
//! - [`host`] - [`EditorHost`] trait implemented by the editor
//! - [`event`] - [`ClipboardEvent`] trait, payload slots, in-memory event
//! - `copy` - copy/cut capture and selection serialization
//! - `paste` - format selection and merge
//!
//! ## Paste trust order
//!
//! 1. Structured Delta JSON (must parse and be non-empty)
//! 2. `text/html`, parsed by the host
//! 3. `text/plain`, inserted verbatim

pub mod event;
pub mod host;
mod copy;
mod paste;

pub use event::{ClipboardEvent, ClipboardPayload, MemoryClipboardEvent};
pub use host::{EditorHost, Range, Source};
pub use paste::PendingPaste;

use crate::config::ClipboardConfig;
use crate::delta::Delta;
use crate::html::convert;

/// Inbound representation chosen for a paste
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteFormat {
    Structured,
    Html,
    Plain,
}

/// What a copy/cut handler did with its event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Not intercepted; the browser's default copy runs
    Native,
    /// Intercepted or already handled, nothing written
    Ignored,
    Copied(Range),
    /// Written, then removed from the document
    Cut(Range),
}

/// What a paste handler did with its event
#[derive(Clone, Debug, PartialEq)]
pub enum PasteOutcome {
    /// Not intercepted; the browser's default paste runs
    Native,
    /// Suppressed or already handled, no edit made
    Ignored,
    Applied { format: PasteFormat, caret: usize },
    /// Plain-text paste waiting for [`ClipboardController::resume_paste`]
    Deferred(PendingPaste),
}

/// Copy/cut/paste handling for one editor
pub struct ClipboardController<H: EditorHost> {
    host: H,
    config: ClipboardConfig,
}

impl<H: EditorHost> ClipboardController<H> {
    pub fn new(host: H, config: ClipboardConfig) -> Self {
        log::debug!("Clipboard controller created: {:?}", config);
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &ClipboardConfig {
        &self.config
    }

    /// Semantic HTML for a range
    ///
    /// A range inside a single line is serialized from that line, so the
    /// result carries the line's own tag; anything larger starts at the root.
    pub fn semantic_html(&self, range: Range) -> String {
        if range.length == 0 {
            return String::new();
        }
        if let Some((line, offset)) = self.host.line(range.index) {
            if line.length() >= offset + range.length {
                return convert(line, offset, range.length, false);
            }
        }
        convert(self.host.root(), range.index, range.length, true)
    }

    /// Insert parsed HTML at `index` and put the caret after it
    pub fn paste_html(&mut self, index: usize, html: &str, source: Source) {
        let pasted = self.host.convert_html(html);
        let delta = Delta::new().retain(index).concat(&pasted);
        self.host.update_contents(&delta, source);
        self.host
            .set_selection(Range::caret(index + pasted.insert_length()), Source::Silent);
    }

    /// Replace the whole document with parsed HTML
    pub fn set_html(&mut self, html: &str) {
        let contents = self.host.convert_html(html);
        self.host.set_contents(contents, Source::Api);
        let end = self.host.length();
        self.host.set_selection(Range::caret(end), Source::Silent);
    }
}
