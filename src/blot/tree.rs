//! Owned blot tree built from a document Delta
//!
//! Mirrors the structure a block-based rich-text editor renders for a document:
//! one block per line, consecutive list lines grouped under a single list
//! container, inline formats as nested wrapper elements and `<br>` in empty
//! lines. Block elements count their trailing newline in their length.

use super::{Blot, ListType, LIST, LIST_ITEM};
use crate::delta::{text_len, AttributeMap, Delta, Insert, Op};
use serde_json::Value;

/// Inline formats and their tags, innermost first
const INLINE_FORMATS: &[(&str, &str)] = &[
    ("code", "code"),
    ("strike", "s"),
    ("underline", "u"),
    ("italic", "em"),
    ("bold", "strong"),
];

/// A node of the projected document tree
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    /// Placeholder keeping an empty line visible
    Break,
    Embed { name: String, html: String },
    Element(Element),
}

/// Container node: a line, a list, an inline wrapper or the root
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub tag: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub formats: AttributeMap,
    pub children: Vec<Node>,
    /// Block elements own the newline that ends them
    pub block: bool,
}

impl Element {
    fn new(name: &str, tag: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.map(str::to_string),
            attributes: Vec::new(),
            formats: AttributeMap::new(),
            children: Vec::new(),
            block: false,
        }
    }

    fn length(&self) -> usize {
        let inner: usize = self.children.iter().map(|child| child.length()).sum();
        inner + usize::from(self.block)
    }
}

impl Node {
    /// Build the root ("scroll") node for a document delta
    ///
    /// Retains and deletes are ignored; a document is made of inserts only.
    pub fn from_delta(delta: &Delta) -> Node {
        let mut root = Element::new("scroll", None);
        let mut line: Vec<Node> = Vec::new();

        for op in &delta.ops {
            let Op::Insert { insert, attributes } = op else {
                continue;
            };
            match insert {
                Insert::Text(text) => {
                    let mut segments = text.split('\n').peekable();
                    while let Some(segment) = segments.next() {
                        if !segment.is_empty() {
                            line.push(inline(Node::Text(segment.to_string()), attributes));
                        }
                        if segments.peek().is_some() {
                            push_line(&mut root, std::mem::take(&mut line), attributes);
                        }
                    }
                }
                Insert::Embed(embed) => {
                    line.push(inline(embed_node(embed), attributes));
                }
            }
        }

        if !line.is_empty() {
            push_line(&mut root, line, &AttributeMap::new());
        }
        Node::Element(root)
    }

    pub fn length(&self) -> usize {
        match self {
            Node::Text(text) => text_len(text),
            Node::Break => 0,
            Node::Embed { .. } => 1,
            Node::Element(element) => element.length(),
        }
    }

    /// Line (block) containing `index`, with the offset inside that line
    pub fn line(&self, index: usize) -> Option<(&Node, usize)> {
        let Node::Element(element) = self else {
            return None;
        };
        let mut start = 0;
        for child in &element.children {
            let length = child.length();
            if index < start + length {
                return match child {
                    Node::Element(inner) if inner.block => Some((child, index - start)),
                    Node::Element(_) => child.line(index - start),
                    _ => None,
                };
            }
            start += length;
        }
        None
    }
}

impl Blot for Node {
    fn name(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::Break => "break",
            Node::Embed { name, .. } => name.as_str(),
            Node::Element(element) => element.name.as_str(),
        }
    }

    fn length(&self) -> usize {
        Node::length(self)
    }

    fn formats(&self) -> AttributeMap {
        match self {
            Node::Element(element) => element.formats.clone(),
            _ => AttributeMap::new(),
        }
    }

    fn children(&self) -> Option<Vec<&dyn Blot>> {
        match self {
            Node::Element(element) => Some(
                element
                    .children
                    .iter()
                    .map(|child| child as &dyn Blot)
                    .collect(),
            ),
            _ => None,
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => element.tag.as_deref(),
            _ => None,
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match self {
            Node::Element(element) => element.attributes.clone(),
            _ => Vec::new(),
        }
    }

    fn outer_html(&self) -> String {
        match self {
            Node::Text(text) => html_escape::encode_text(text).into_owned(),
            Node::Break => "<br>".to_string(),
            Node::Embed { html, .. } => html.clone(),
            Node::Element(element) => match &element.tag {
                Some(tag) => format!("<{}></{}>", tag, tag),
                None => String::new(),
            },
        }
    }
}

// ============================================================================
// Tree building
// ============================================================================

/// Finish a line and attach it to the root, grouping list lines
fn push_line(root: &mut Element, mut children: Vec<Node>, formats: &AttributeMap) {
    if children.is_empty() {
        children.push(Node::Break);
    }

    if let Some(list) = formats.get(LIST).and_then(Value::as_str) {
        let list_type = ListType::from_format(list);
        let mut item = Element::new(LIST_ITEM, Some("li"));
        item.block = true;
        item.formats.insert(LIST.to_string(), Value::from(list_type.as_str()));
        if let Some(indent) = formats.get("indent").filter(|v| v.is_u64()) {
            item.formats.insert("indent".to_string(), indent.clone());
        }
        item.children = children;

        if let Some(Node::Element(container)) = root.children.last_mut() {
            if container.name == LIST {
                container.children.push(Node::Element(item));
                return;
            }
        }
        let mut container = Element::new(LIST, Some(list_type.tag()));
        container.formats.insert(LIST.to_string(), Value::from(list_type.as_str()));
        container.children.push(Node::Element(item));
        root.children.push(Node::Element(container));
        return;
    }

    let mut block = match formats.get("header").and_then(Value::as_u64) {
        Some(level @ 1..=6) => {
            let mut header = Element::new("header", Some(&format!("h{}", level)));
            header.formats.insert("header".to_string(), Value::from(level));
            header
        }
        _ if is_set(formats, "blockquote") => Element::new("blockquote", Some("blockquote")),
        _ if is_set(formats, "code-block") => Element::new("code-block", Some("pre")),
        _ => Element::new("block", Some("p")),
    };
    block.block = true;

    let mut classes = Vec::new();
    if let Some(align) = formats.get("align").and_then(Value::as_str) {
        classes.push(format!("ql-align-{}", align));
    }
    if let Some(indent) = formats.get("indent").and_then(Value::as_u64) {
        classes.push(format!("ql-indent-{}", indent));
    }
    if !classes.is_empty() {
        block.attributes.push(("class".to_string(), classes.join(" ")));
    }

    block.children = children;
    root.children.push(Node::Element(block));
}

/// Wrap a leaf in one element per inline format it carries
fn inline(leaf: Node, attributes: &AttributeMap) -> Node {
    let mut node = leaf;
    for (format, tag) in INLINE_FORMATS {
        if is_set(attributes, format) {
            let mut wrapper = Element::new(format, Some(tag));
            wrapper.formats.insert(format.to_string(), Value::Bool(true));
            wrapper.children.push(node);
            node = Node::Element(wrapper);
        }
    }
    if let Some(href) = attributes.get("link").and_then(Value::as_str) {
        let mut link = Element::new("link", Some("a"));
        link.formats.insert("link".to_string(), Value::from(href));
        link.attributes.push(("href".to_string(), href.to_string()));
        link.children.push(node);
        node = Node::Element(link);
    }
    node
}

fn embed_node(embed: &serde_json::Map<String, Value>) -> Node {
    let Some((name, value)) = embed.iter().next() else {
        return Node::Embed { name: "embed".to_string(), html: String::new() };
    };
    let source = value.as_str().unwrap_or_default();
    let html = match name.as_str() {
        "image" => format!(
            "<img src=\"{}\">",
            html_escape::encode_double_quoted_attribute(source)
        ),
        "video" => format!(
            "<iframe class=\"ql-video\" frameborder=\"0\" allowfullscreen=\"true\" src=\"{}\"></iframe>",
            html_escape::encode_double_quoted_attribute(source)
        ),
        _ => format!(
            "<span data-embed=\"{}\"></span>",
            html_escape::encode_double_quoted_attribute(name)
        ),
    };
    Node::Embed { name: name.clone(), html }
}

fn is_set(attributes: &AttributeMap, key: &str) -> bool {
    match attributes.get(key) {
        Some(Value::Bool(set)) => *set,
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}
