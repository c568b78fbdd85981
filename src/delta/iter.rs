//! Cursor over a list of ops that can hand out partial ops

use super::{text_slice, Insert, Op, OpKind};

/// Walks ops, splitting them on demand
///
/// Once exhausted the iterator behaves like an infinite plain retain, which
/// lets `compose` treat the shorter delta as "keep everything else".
pub struct OpIterator<'a> {
    ops: &'a [Op],
    index: usize,
    offset: usize,
}

impl<'a> OpIterator<'a> {
    pub fn new(ops: &'a [Op]) -> Self {
        Self { ops, index: 0, offset: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.peek_len() < usize::MAX
    }

    pub fn peek(&self) -> Option<&'a Op> {
        self.ops.get(self.index)
    }

    pub fn peek_kind(&self) -> OpKind {
        self.peek().map(Op::kind).unwrap_or(OpKind::Retain)
    }

    /// Remaining length of the current op
    pub fn peek_len(&self) -> usize {
        match self.peek() {
            Some(op) => op.len() - self.offset,
            None => usize::MAX,
        }
    }

    /// Take up to `length` from the current op
    pub fn next(&mut self, length: usize) -> Op {
        let Some(op) = self.peek() else {
            return Op::Retain { retain: length, attributes: Default::default() };
        };

        let offset = self.offset;
        let length = length.min(op.len() - offset);
        let piece = match op {
            Op::Delete { .. } => Op::Delete { delete: length },
            Op::Retain { attributes, .. } => Op::Retain {
                retain: length,
                attributes: attributes.clone(),
            },
            Op::Insert { insert: Insert::Text(text), attributes } => Op::Insert {
                insert: Insert::Text(text_slice(text, offset, length).to_string()),
                attributes: attributes.clone(),
            },
            Op::Insert { insert, attributes } => Op::Insert {
                insert: insert.clone(),
                attributes: attributes.clone(),
            },
        };

        // Advance by what was taken; a split surrogate pair makes it longer
        self.offset += piece.len();
        if self.offset >= op.len() {
            self.index += 1;
            self.offset = 0;
        }
        piece
    }
}
