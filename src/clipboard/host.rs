//! Interface to the host editor
//!
//! The host owns the document tree, selection, undo history and scroll
//! state. The clipboard controller only drives it through [`EditorHost`].

use crate::blot::Blot;
use crate::delta::Delta;
use serde::{Deserialize, Serialize};

/// A selection over document positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub index: usize,
    pub length: usize,
}

impl Range {
    pub fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Collapsed selection (caret) at `index`
    pub fn caret(index: usize) -> Self {
        Self { index, length: 0 }
    }

    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

/// Who an edit or selection change is attributed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A user action; recorded in history and announced
    User,
    /// Programmatic change
    Api,
    /// Applied without emitting change events
    Silent,
}

/// Operations the clipboard needs from the editor
pub trait EditorHost {
    /// Current selection; `focus` first gives the editor focus
    fn selection(&mut self, focus: bool) -> Option<Range>;

    /// Document length in positions
    fn length(&self) -> usize;

    /// Plain text of a range
    fn text(&self, range: Range) -> String;

    /// Content of a range as a Delta
    fn contents(&self, range: Range) -> Delta;

    /// Replace the whole document
    fn set_contents(&mut self, contents: Delta, source: Source);

    /// Apply an edit
    fn update_contents(&mut self, delta: &Delta, source: Source);

    fn set_selection(&mut self, range: Range, source: Source);

    fn scroll_into_view(&mut self);

    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&mut self, top: f64);

    fn focus(&mut self);

    /// Close the current undo group so the next edit starts a new one
    fn cutoff_history(&mut self);

    fn is_enabled(&self) -> bool;

    /// Read-only preview rendering
    fn is_preview(&self) -> bool;

    /// Root of the document tree
    fn root(&self) -> &dyn Blot;

    /// Line containing `index`, with the offset inside it
    fn line(&self, index: usize) -> Option<(&dyn Blot, usize)>;

    /// Parse HTML into document content
    fn convert_html(&self, html: &str) -> Delta;
}
