//! Nested list reconstruction
//!
//! A list container holds a flat run of items, each tagged with an indent
//! level. HTML needs them nested: deeper items live inside the `<li>` of
//! the item above them. [`convert_list`] does this in one left-to-right
//! pass, keeping the open lists on an explicit stack.

use super::convert;
use crate::blot::{Blot, ListType};

/// One list entry to serialize
pub struct ListItem<'a> {
    pub child: &'a dyn Blot,
    pub offset: usize,
    pub length: usize,
    pub indent: usize,
    pub list_type: ListType,
}

/// An open `<ol>`/`<ul>` on the nesting stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListFrame {
    pub indent: usize,
    pub list_type: ListType,
}

/// Serialize `items` as nested list markup
///
/// `stack` holds the lists already opened by earlier items; callers start
/// with an empty stack. Every list opened here is closed before returning.
pub fn convert_list(items: &[ListItem<'_>], stack: &mut Vec<ListFrame>) -> String {
    let Some((item, rest)) = items.split_first() else {
        return match stack.pop() {
            Some(frame) => format!("</li></{}>{}", frame.list_type.tag(), convert_list(&[], stack)),
            None => String::new(),
        };
    };

    let level = stack.last().map(|frame| frame.indent as isize).unwrap_or(-1);
    let indent = item.indent as isize;

    if indent > level {
        stack.push(ListFrame { indent: item.indent, list_type: item.list_type });
        return format!("{}{}", open_item(item), convert_list(rest, stack));
    }

    if indent == level {
        let continues = stack
            .last()
            .map(|frame| frame.list_type.continues(item.list_type))
            .unwrap_or(false);
        if continues {
            return format!(
                "</li><li{}>{}{}",
                item.list_type.item_attribute(),
                item_html(item),
                convert_list(rest, stack)
            );
        }
        // Same depth, different kind of list: close it and start a sibling
        let closed = close_frame(stack);
        stack.push(ListFrame { indent: item.indent, list_type: item.list_type });
        return format!("{}{}{}", closed, open_item(item), convert_list(rest, stack));
    }

    let closed = close_frame(stack);
    format!("{}{}", closed, convert_list(items, stack))
}

fn close_frame(stack: &mut Vec<ListFrame>) -> String {
    match stack.pop() {
        Some(frame) => format!("</li></{}>", frame.list_type.tag()),
        None => String::new(),
    }
}

fn open_item(item: &ListItem<'_>) -> String {
    format!(
        "<{}><li{}>{}",
        item.list_type.tag(),
        item.list_type.item_attribute(),
        item_html(item)
    )
}

fn item_html(item: &ListItem<'_>) -> String {
    convert(item.child, item.offset, item.length, false)
}
