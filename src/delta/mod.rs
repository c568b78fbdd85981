//! Operation-sequence document model ("Delta")
//!
//! A Delta is an ordered list of retain/insert/delete operations. It is used
//! both for document content (inserts only) and for edits against a
//! document. The JSON shape matches the one editors put on the clipboard:
//! `{"ops":[{"insert":"a","attributes":{"bold":true}},{"retain":3},{"delete":2}]}`.
//!
//! Lengths are measured in UTF-16 code units, the unit JavaScript string
//! positions use; an embed insert has length 1.

mod iter;

pub use iter::OpIterator;

use crate::error::PayloadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Formatting attributes attached to an insert or retain
pub type AttributeMap = BTreeMap<String, serde_json::Value>;

/// Length of `text` in UTF-16 code units
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The part of `text` covering UTF-16 units `[start, start + length)`
///
/// A surrogate pair cut by a bound goes with the side holding its first
/// unit, so a non-empty request starting on a character boundary never
/// comes back empty.
pub fn text_slice(text: &str, start: usize, length: usize) -> &str {
    let byte_at = |unit: usize| {
        let mut units = 0;
        for (byte, ch) in text.char_indices() {
            if units >= unit {
                return byte;
            }
            units += ch.len_utf16();
        }
        text.len()
    };
    let from = byte_at(start);
    let to = byte_at(start.saturating_add(length)).max(from);
    &text[from..to]
}

/// Inserted content: a run of text or a single embed (image, video, ...)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(serde_json::Map<String, serde_json::Value>),
}

impl Insert {
    pub fn len(&self) -> usize {
        match self {
            Insert::Text(text) => text_len(text),
            Insert::Embed(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single Delta operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Op {
    Insert {
        insert: Insert,
        #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
        attributes: AttributeMap,
    },
    Retain {
        retain: usize,
        #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
        attributes: AttributeMap,
    },
    Delete {
        delete: usize,
    },
}

/// Operation kind, used when walking two deltas side by side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Insert,
    Retain,
    Delete,
}

impl Op {
    pub fn len(&self) -> usize {
        match self {
            Op::Insert { insert, .. } => insert.len(),
            Op::Retain { retain, .. } => *retain,
            Op::Delete { delete } => *delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Op::Insert { .. } => OpKind::Insert,
            Op::Retain { .. } => OpKind::Retain,
            Op::Delete { .. } => OpKind::Delete,
        }
    }

    /// Attributes of an insert or retain (deletes have none)
    pub fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Op::Insert { attributes, .. } | Op::Retain { attributes, .. } => Some(attributes),
            Op::Delete { .. } => None,
        }
    }
}

/// Accepts both `{"ops":[...]}` and a bare `[...]` on input
#[derive(Deserialize)]
#[serde(untagged)]
enum DeltaRepr {
    Wrapped { ops: Vec<Op> },
    Bare(Vec<Op>),
}

/// Ordered sequence of operations
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Build a delta from raw ops, compacting adjacent mergeable ops
    pub fn from_ops(ops: impl IntoIterator<Item = Op>) -> Self {
        let mut delta = Self::new();
        for op in ops {
            delta.push(op);
        }
        delta
    }

    /// Decode a delta from clipboard JSON
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        if json.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        let repr: DeltaRepr = serde_json::from_str(json)?;
        let ops = match repr {
            DeltaRepr::Wrapped { ops } => ops,
            DeltaRepr::Bare(ops) => ops,
        };
        Ok(Self::from_ops(ops))
    }

    /// Encode as `{"ops":[...]}`
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn insert(self, text: impl Into<String>) -> Self {
        self.insert_with(text, AttributeMap::new())
    }

    pub fn insert_with(mut self, text: impl Into<String>, attributes: AttributeMap) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.push(Op::Insert { insert: Insert::Text(text), attributes });
        }
        self
    }

    pub fn insert_embed(
        mut self,
        embed: serde_json::Map<String, serde_json::Value>,
        attributes: AttributeMap,
    ) -> Self {
        self.push(Op::Insert { insert: Insert::Embed(embed), attributes });
        self
    }

    pub fn retain(self, length: usize) -> Self {
        self.retain_with(length, AttributeMap::new())
    }

    pub fn retain_with(mut self, length: usize, attributes: AttributeMap) -> Self {
        if length > 0 {
            self.push(Op::Retain { retain: length, attributes });
        }
        self
    }

    pub fn delete(mut self, length: usize) -> Self {
        if length > 0 {
            self.push(Op::Delete { delete: length });
        }
        self
    }

    /// Append an op, merging it with the previous one where possible
    ///
    /// An insert pushed right after a delete is placed before the delete:
    /// both orders describe the same edit and this keeps deltas canonical.
    pub fn push(&mut self, op: Op) {
        if op.is_empty() {
            return;
        }
        let mut index = self.ops.len();

        if let Some(Op::Delete { delete: last }) = self.ops.last_mut() {
            if let Op::Delete { delete } = op {
                *last += delete;
                return;
            }
            if matches!(op, Op::Insert { .. }) {
                index -= 1;
            }
        }

        if index > 0 {
            if let Some(merged) = merge(&self.ops[index - 1], &op) {
                self.ops[index - 1] = merged;
                return;
            }
        }
        self.ops.insert(index, op);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Total length of all operations
    pub fn length(&self) -> usize {
        self.ops.iter().map(Op::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Length contributed by inserts alone
    pub fn insert_length(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind() == OpKind::Insert)
            .map(Op::len)
            .sum()
    }

    /// Whether this delta is document content: at least one insert and
    /// nothing else
    pub fn is_document(&self) -> bool {
        !self.ops.is_empty() && self.ops.iter().all(|op| op.kind() == OpKind::Insert)
    }

    /// Concatenated text of all text inserts (embeds contribute nothing)
    pub fn plain_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Insert { insert: Insert::Text(text), .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Append another delta, merging the seam
    pub fn concat(mut self, other: &Delta) -> Self {
        let mut rest = other.ops.iter().cloned();
        if let Some(first) = rest.next() {
            self.push(first);
            self.ops.extend(rest);
        }
        self
    }

    /// Drop a trailing plain retain, which has no effect on a document
    pub fn chop(mut self) -> Self {
        if let Some(Op::Retain { attributes, .. }) = self.ops.last() {
            if attributes.is_empty() {
                self.ops.pop();
            }
        }
        self
    }

    /// The part of this delta covering `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> Delta {
        let mut ops = Vec::new();
        let mut iter = OpIterator::new(&self.ops);
        let mut index = 0;
        while index < end && iter.has_next() {
            let op = if index < start {
                iter.next(start - index)
            } else {
                let op = iter.next(end - index);
                ops.push(op.clone());
                op
            };
            index += op.len();
        }
        Delta { ops }
    }

    /// Apply `other` on top of this delta
    pub fn compose(&self, other: &Delta) -> Delta {
        let mut this_iter = OpIterator::new(&self.ops);
        let mut other_iter = OpIterator::new(&other.ops);
        let mut delta = Delta::new();

        while this_iter.has_next() || other_iter.has_next() {
            if other_iter.peek_kind() == OpKind::Insert {
                delta.push(other_iter.next(usize::MAX));
            } else if this_iter.peek_kind() == OpKind::Delete {
                delta.push(this_iter.next(usize::MAX));
            } else {
                let length = this_iter.peek_len().min(other_iter.peek_len());
                let this_op = this_iter.next(length);
                let other_op = other_iter.next(length);
                match (this_op, other_op) {
                    (Op::Retain { attributes: this_attrs, .. }, Op::Retain { attributes, .. }) => {
                        let attributes = compose_attributes(&this_attrs, &attributes, true);
                        delta.push(Op::Retain { retain: length, attributes });
                    }
                    (Op::Insert { insert, attributes: this_attrs }, Op::Retain { attributes, .. }) => {
                        let attributes = compose_attributes(&this_attrs, &attributes, false);
                        delta.push(Op::Insert { insert, attributes });
                    }
                    (Op::Retain { .. }, Op::Delete { delete }) => {
                        delta.push(Op::Delete { delete });
                    }
                    // An insert deleted by `other` cancels out
                    _ => {}
                }
            }
        }
        delta.chop()
    }
}

/// Merge two adjacent ops of the same kind and attributes
fn merge(prev: &Op, next: &Op) -> Option<Op> {
    match (prev, next) {
        (
            Op::Insert { insert: Insert::Text(a), attributes: prev_attrs },
            Op::Insert { insert: Insert::Text(b), attributes },
        ) if prev_attrs == attributes => Some(Op::Insert {
            insert: Insert::Text(format!("{}{}", a, b)),
            attributes: attributes.clone(),
        }),
        (
            Op::Retain { retain: a, attributes: prev_attrs },
            Op::Retain { retain: b, attributes },
        ) if prev_attrs == attributes => Some(Op::Retain {
            retain: a + b,
            attributes: attributes.clone(),
        }),
        _ => None,
    }
}

/// Layer `b` over `a`; nulls in `b` remove keys unless `keep_null`
pub fn compose_attributes(a: &AttributeMap, b: &AttributeMap, keep_null: bool) -> AttributeMap {
    let mut attributes = a.clone();
    for (key, value) in b {
        attributes.insert(key.clone(), value.clone());
    }
    if !keep_null {
        attributes.retain(|_, value| !value.is_null());
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> AttributeMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_builder_merges_adjacent_inserts() {
        let delta = Delta::new().insert("Hel").insert("lo");
        assert_eq!(delta.ops.len(), 1);
        assert_eq!(delta.length(), 5);
    }

    #[test]
    fn test_insert_after_delete_goes_first() {
        let delta = Delta::new().retain(2).delete(3).insert("x");
        assert_eq!(
            delta.ops,
            vec![
                Op::Retain { retain: 2, attributes: AttributeMap::new() },
                Op::Insert { insert: Insert::Text("x".into()), attributes: AttributeMap::new() },
                Op::Delete { delete: 3 },
            ]
        );
    }

    #[test]
    fn test_zero_length_ops_are_dropped() {
        let delta = Delta::new().retain(0).delete(0).insert("");
        assert!(delta.is_empty());
        assert_eq!(delta.length(), 0);
    }

    #[test]
    fn test_length_counts_utf16_units_and_embeds() {
        let mut image = serde_json::Map::new();
        image.insert("image".into(), json!("a.png"));
        let delta = Delta::new().insert("héllo").insert_embed(image, AttributeMap::new());
        assert_eq!(delta.length(), 6);
        assert_eq!(Delta::new().insert("a😀").length(), 3);
    }

    #[test]
    fn test_text_slice_by_utf16_units() {
        assert_eq!(text_slice("😀ab", 2, 1), "a");
        assert_eq!(text_slice("😀ab", 0, 2), "😀");
        assert_eq!(text_slice("😀ab", 3, 10), "b");
        // A cut pair stays with the side holding its first unit
        assert_eq!(text_slice("a😀b", 0, 2), "a😀");
        assert_eq!(text_slice("a😀b", 2, 1), "");
        assert_eq!(text_slice("a😀b", 2, 2), "b");
        assert_eq!(text_slice("ab", 5, 1), "");
    }

    #[test]
    fn test_document_deltas_are_insert_only() {
        assert!(Delta::new().insert("a").is_document());
        assert!(!Delta::new().is_document());
        assert!(!Delta::new().delete(6).is_document());
        assert!(!Delta::new().insert("a").retain(2).is_document());

        let edit = Delta::new().retain(1).insert("ab").delete(3);
        assert_eq!(edit.insert_length(), 2);
        assert_eq!(edit.length(), 6);
    }

    #[test]
    fn test_slice_with_astral_text() {
        let delta = Delta::new().insert("😀ab\n");
        assert_eq!(delta.slice(2, 4), Delta::new().insert("ab"));
        assert_eq!(delta.slice(0, 2), Delta::new().insert("😀"));
    }

    #[test]
    fn test_from_json_accepts_wrapped_and_bare() {
        let wrapped = Delta::from_json(r#"{"ops":[{"insert":"ab"},{"insert":"c"}]}"#).unwrap();
        let bare = Delta::from_json(r#"[{"insert":"abc"}]"#).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.length(), 3);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Delta::from_json("not json").is_err());
        assert!(Delta::from_json(r#"{"foo":1}"#).is_err());
        assert!(Delta::from_json(r#"[{"bogus":1}]"#).is_err());
        assert!(matches!(Delta::from_json("  "), Err(PayloadError::Empty)));
    }

    #[test]
    fn test_json_shape() {
        let delta = Delta::new()
            .insert_with("bold", attrs(json!({"bold": true})))
            .retain(2)
            .delete(1);
        let value: serde_json::Value = serde_json::from_str(&delta.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"ops": [
                {"insert": "bold", "attributes": {"bold": true}},
                {"retain": 2},
                {"delete": 1}
            ]})
        );
    }

    #[test]
    fn test_concat_merges_seam() {
        let a = Delta::new().insert("ab");
        let b = Delta::new().insert("cd").insert_with("e", attrs(json!({"bold": true})));
        let joined = a.concat(&b);
        assert_eq!(joined.ops.len(), 2);
        assert_eq!(joined.plain_text(), "abcde");
    }

    #[test]
    fn test_slice() {
        let doc = Delta::new()
            .insert("Hello ")
            .insert_with("world", attrs(json!({"bold": true})))
            .insert("\n");
        let slice = doc.slice(4, 8);
        assert_eq!(
            slice,
            Delta::new()
                .insert("o ")
                .insert_with("wo", attrs(json!({"bold": true})))
        );
    }

    #[test]
    fn test_compose_replace_range() {
        let doc = Delta::new().insert("Hello world\n");
        let edit = Delta::new().retain(6).delete(5).insert("there");
        assert_eq!(doc.compose(&edit), Delta::new().insert("Hello there\n"));
    }

    #[test]
    fn test_compose_formats_and_unformats() {
        let doc = Delta::new().insert("abc\n");
        let bold = Delta::new().retain_with(2, attrs(json!({"bold": true})));
        let formatted = doc.compose(&bold);
        assert_eq!(
            formatted,
            Delta::new()
                .insert_with("ab", attrs(json!({"bold": true})))
                .insert("c\n")
        );

        let unbold = Delta::new().retain_with(1, attrs(json!({"bold": null})));
        assert_eq!(
            formatted.compose(&unbold),
            Delta::new()
                .insert("a")
                .insert_with("b", attrs(json!({"bold": true})))
                .insert("c\n")
        );
    }

    #[test]
    fn test_compose_delete_everything() {
        let doc = Delta::new().insert("abc");
        assert!(doc.compose(&Delta::new().delete(3)).is_empty());
    }
}
