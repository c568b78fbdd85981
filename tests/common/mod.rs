//! Shared test fixtures: an in-memory editor host and a small HTML parser.

#![allow(dead_code)]

use editor_clipboard_wasm::blot::tree::Node;
use editor_clipboard_wasm::blot::Blot;
use editor_clipboard_wasm::{AttributeMap, Delta, EditorHost, Range, Source};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{json, Value};

/// Editor host keeping its document as a Delta and recording every call
pub struct MemoryEditor {
    pub document: Delta,
    tree: Node,
    pub selection: Option<Range>,
    pub enabled: bool,
    pub preview: bool,
    pub focused: bool,
    pub scroll_top: f64,
    pub cutoffs: usize,
    pub scrolls_into_view: usize,
    pub edits: Vec<(Delta, Source)>,
    pub selection_changes: Vec<(Range, Source)>,
}

impl MemoryEditor {
    pub fn new(document: Delta) -> Self {
        let tree = Node::from_delta(&document);
        Self {
            document,
            tree,
            selection: None,
            enabled: true,
            preview: false,
            focused: false,
            scroll_top: 0.0,
            cutoffs: 0,
            scrolls_into_view: 0,
            edits: Vec::new(),
            selection_changes: Vec::new(),
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(Delta::new().insert(text))
    }

    pub fn select(mut self, index: usize, length: usize) -> Self {
        self.selection = Some(Range::new(index, length));
        self
    }

    /// Whole document as plain text
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    fn rebuild(&mut self) {
        self.tree = Node::from_delta(&self.document);
    }
}

impl EditorHost for MemoryEditor {
    fn selection(&mut self, focus: bool) -> Option<Range> {
        if focus {
            self.focused = true;
        }
        self.selection
    }

    fn length(&self) -> usize {
        self.document.length()
    }

    fn text(&self, range: Range) -> String {
        self.document.slice(range.index, range.end()).plain_text()
    }

    fn contents(&self, range: Range) -> Delta {
        self.document.slice(range.index, range.end())
    }

    fn set_contents(&mut self, contents: Delta, source: Source) {
        self.edits.push((contents.clone(), source));
        self.document = contents;
        self.rebuild();
    }

    fn update_contents(&mut self, delta: &Delta, source: Source) {
        self.edits.push((delta.clone(), source));
        self.document = self.document.compose(delta);
        self.rebuild();
    }

    fn set_selection(&mut self, range: Range, source: Source) {
        self.selection = Some(range);
        self.selection_changes.push((range, source));
    }

    fn scroll_into_view(&mut self) {
        self.scrolls_into_view += 1;
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn cutoff_history(&mut self) {
        self.cutoffs += 1;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_preview(&self) -> bool {
        self.preview
    }

    fn root(&self) -> &dyn Blot {
        &self.tree
    }

    fn line(&self, index: usize) -> Option<(&dyn Blot, usize)> {
        self.tree
            .line(index)
            .map(|(line, offset)| (line as &dyn Blot, offset))
    }

    fn convert_html(&self, html: &str) -> Delta {
        parse_html(html)
    }
}

pub fn attrs(value: Value) -> AttributeMap {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// HTML → Delta
// ============================================================================

/// Parse the HTML produced by the converter back into a document Delta
///
/// Understands paragraphs, headers, blockquote, pre, nested ol/ul lists
/// (with `data-list` checklists), inline strong/em/u/s/code/a and `<br>`.
pub fn parse_html(html: &str) -> Delta {
    let source = html.replace("<br>", "<br/>");
    let mut reader = Reader::from_str(&source);

    let mut delta = Delta::new();
    let mut inline: Vec<(String, Value)> = Vec::new();
    let mut block = AttributeMap::new();
    let mut lists: Vec<&'static str> = Vec::new();
    // Open list items: their line formats and whether their line has ended
    let mut items: Vec<(AttributeMap, bool)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(&e);
                match name.as_str() {
                    "p" => block = block_classes(&e),
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                        block = block_classes(&e);
                        let level: u64 = name[1..].parse().unwrap();
                        block.insert("header".into(), json!(level));
                    }
                    "blockquote" => block = attrs(json!({"blockquote": true})),
                    "pre" => block = attrs(json!({"code-block": true})),
                    "ol" | "ul" => {
                        if let Some((formats, ended)) = items.last_mut() {
                            if !*ended {
                                delta = delta.insert_with("\n", formats.clone());
                                *ended = true;
                            }
                        }
                        lists.push(if name == "ol" { "ordered" } else { "bullet" });
                    }
                    "li" => {
                        let list = attribute(&e, "data-list")
                            .unwrap_or_else(|| lists.last().copied().unwrap_or("bullet").to_string());
                        let mut formats = attrs(json!({"list": list}));
                        let indent = lists.len().saturating_sub(1);
                        if indent > 0 {
                            formats.insert("indent".into(), json!(indent));
                        }
                        items.push((formats, false));
                    }
                    "strong" => inline.push(("bold".into(), json!(true))),
                    "em" => inline.push(("italic".into(), json!(true))),
                    "u" => inline.push(("underline".into(), json!(true))),
                    "s" => inline.push(("strike".into(), json!(true))),
                    "code" => inline.push(("code".into(), json!(true))),
                    "a" => inline.push(("link".into(), json!(attribute(&e, "href").unwrap_or_default()))),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre" => {
                        delta = delta.insert_with("\n", std::mem::take(&mut block));
                    }
                    "li" => {
                        if let Some((formats, ended)) = items.pop() {
                            if !ended {
                                delta = delta.insert_with("\n", formats);
                            }
                        }
                    }
                    "ol" | "ul" => {
                        lists.pop();
                    }
                    "strong" | "em" | "u" | "s" | "code" | "a" => {
                        inline.pop();
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().expect("valid text").into_owned();
                let formats: AttributeMap = inline.iter().cloned().collect();
                delta = delta.insert_with(text, formats);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("HTML parse error at {}: {}", reader.buffer_position(), e),
        }
    }
    delta
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key.as_bytes())
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// Line formats carried as `ql-align-*` / `ql-indent-*` classes
fn block_classes(e: &BytesStart<'_>) -> AttributeMap {
    let mut formats = AttributeMap::new();
    if let Some(classes) = attribute(e, "class") {
        for class in classes.split_whitespace() {
            if let Some(align) = class.strip_prefix("ql-align-") {
                formats.insert("align".into(), json!(align));
            } else if let Some(indent) = class.strip_prefix("ql-indent-") {
                if let Ok(indent) = indent.parse::<u64>() {
                    formats.insert("indent".into(), json!(indent));
                }
            }
        }
    }
    formats
}
