//! Content blocks ("blots")
//!
//! The host editor owns its document tree; the HTML converter only needs a
//! read-only view of each node, described by the [`Blot`] trait. A concrete
//! tree built from a Delta lives in [`tree`].

pub mod tree;

use crate::delta::AttributeMap;

/// Blot name of a list container
pub const LIST: &str = "list";
/// Blot name of a single list entry
pub const LIST_ITEM: &str = "list-item";

/// Read-only view of a node in the host document tree
pub trait Blot {
    /// Registered blot name ("text", "block", "list", "list-item", "bold", ...)
    fn name(&self) -> &str;

    /// Length in document positions
    fn length(&self) -> usize;

    /// Formats applied by this blot (e.g. `list`, `indent`, `header`)
    fn formats(&self) -> AttributeMap {
        AttributeMap::new()
    }

    /// Child blots in document order, or `None` for a leaf
    fn children(&self) -> Option<Vec<&dyn Blot>> {
        None
    }

    /// Text value of a terminal text blot
    fn value(&self) -> Option<&str> {
        None
    }

    /// Element tag used when wrapping serialized children
    fn tag_name(&self) -> Option<&str> {
        None
    }

    /// DOM attributes serialized into the open tag
    fn attributes(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Raw outer markup, used for leaves without text
    fn outer_html(&self) -> String {
        String::new()
    }

    /// Custom rendering for `[index, index + length)`, returned verbatim
    fn html(&self, _index: usize, _length: usize) -> Option<String> {
        None
    }
}

/// Kind of list a list item belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListType {
    Ordered,
    Bullet,
    Checked,
    Unchecked,
}

impl ListType {
    /// Parse a `list` format value; anything unknown is a bullet list
    pub fn from_format(value: &str) -> Self {
        match value {
            "ordered" => ListType::Ordered,
            "checked" => ListType::Checked,
            "unchecked" => ListType::Unchecked,
            _ => ListType::Bullet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Ordered => "ordered",
            ListType::Bullet => "bullet",
            ListType::Checked => "checked",
            ListType::Unchecked => "unchecked",
        }
    }

    /// List element tag
    pub fn tag(&self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            _ => "ul",
        }
    }

    /// Extra attribute for the `<li>` (with its leading space)
    pub fn item_attribute(&self) -> &'static str {
        match self {
            ListType::Checked => " data-list=\"checked\"",
            ListType::Unchecked => " data-list=\"unchecked\"",
            _ => "",
        }
    }

    /// Whether an item of type `other` can join an open list of this type
    pub fn continues(&self, other: ListType) -> bool {
        self == &other || (self.is_checklist() && other.is_checklist())
    }

    fn is_checklist(&self) -> bool {
        matches!(self, ListType::Checked | ListType::Unchecked)
    }
}
