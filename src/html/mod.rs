//! Semantic HTML serialization of blot trees
//!
//! [`convert`] walks a blot between an offset and a length and produces the
//! HTML a clipboard consumer expects: plain text escaped, containers wrapped
//! in their own tags, lists rebuilt with proper nesting (see [`list`]).

pub mod list;

use crate::blot::tree::Node;
use crate::blot::{Blot, ListType, LIST, LIST_ITEM};
use crate::delta::{text_slice, Delta};
use list::ListItem;

/// Serialize `[index, index + length)` of `blot` as HTML
///
/// `is_root` suppresses the wrapping tag of the outermost container.
/// Ranges outside the blot are a caller error; the result is then
/// truncated, never a panic.
pub fn convert(blot: &dyn Blot, index: usize, length: usize, is_root: bool) -> String {
    if let Some(html) = blot.html(index, length) {
        return html;
    }

    if let Some(text) = blot.value() {
        return html_escape::encode_text(text_slice(text, index, length)).into_owned();
    }

    let Some(children) = blot.children() else {
        return blot.outer_html();
    };

    if blot.name() == LIST {
        let container_type = blot
            .formats()
            .get(LIST)
            .and_then(|value| value.as_str())
            .map(ListType::from_format);
        let mut items = Vec::new();
        for_each_at(&children, index, length, |child, offset, child_length| {
            let formats = child.formats();
            let list_type = formats
                .get(LIST)
                .and_then(|value| value.as_str())
                .map(ListType::from_format)
                .or(container_type)
                .unwrap_or(ListType::Bullet);
            let indent = formats
                .get("indent")
                .and_then(|value| value.as_u64())
                .unwrap_or(0) as usize;
            items.push(ListItem {
                child,
                offset,
                length: child_length,
                indent,
                list_type,
            });
        });
        return list::convert_list(&items, &mut Vec::new());
    }

    let mut parts = String::new();
    for_each_at(&children, index, length, |child, offset, child_length| {
        parts.push_str(&convert(child, offset, child_length, false));
    });

    if is_root || blot.name() == LIST_ITEM {
        return parts;
    }
    match blot.tag_name() {
        Some(tag) => format!("{}{}</{}>", open_tag(tag, &blot.attributes()), parts, tag),
        None => parts,
    }
}

/// Visit every child overlapping `[index, index + length)`
///
/// The callback receives the child, the offset inside the child where the
/// range starts and the overlap length.
pub fn for_each_at<'a, F>(children: &[&'a dyn Blot], index: usize, length: usize, mut f: F)
where
    F: FnMut(&'a dyn Blot, usize, usize),
{
    if length == 0 {
        return;
    }
    let end = index.saturating_add(length);
    let mut start = 0;
    for &child in children {
        if start >= end {
            break;
        }
        let child_length = child.length();
        let child_end = start + child_length;
        if child_end > index || (child_length == 0 && start >= index) {
            let offset = index.saturating_sub(start);
            let overlap = child_end.min(end) - start.max(index);
            f(child, offset, overlap);
        }
        start = child_end;
    }
}

/// Serialize an open tag from its name and attributes
fn open_tag(tag: &str, attributes: &[(String, String)]) -> String {
    let mut html = format!("<{}", tag);
    for (name, value) in attributes {
        html.push_str(&format!(
            " {}=\"{}\"",
            name,
            html_escape::encode_double_quoted_attribute(value)
        ));
    }
    html.push('>');
    html
}

/// Render a whole document delta as semantic HTML
pub fn delta_to_html(delta: &Delta) -> String {
    let root = Node::from_delta(delta);
    convert(&root, 0, root.length(), true)
}
