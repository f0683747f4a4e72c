use std::iter::FusedIterator;
use crate::engine::mem::{IndexId, IndexValue};

/// Cursor over the matches for one id in both stores of a `HybridIndex`.
///
/// Holds two half-open index ranges: `[primary_pos, primary_end)` into the
/// primary slice for the id and `[overflow_pos, overflow_end)` into the
/// overflow values for the id. Primary matches come first. Entries holding
/// the empty value are skipped in both ranges. The cursor borrows the index, so it cannot
/// outlive a mutation of either store.
///
/// Comparing cursors only makes sense between cursors produced by the same
/// `get_all` call.
#[derive(Debug, Clone)]
pub struct HybridIterator<'a, I, V> {
    primary: &'a [(I, V)],
    primary_pos: usize,
    primary_end: usize,

    id: I,
    overflow: &'a [V],
    overflow_pos: usize,
    overflow_end: usize,
}

impl<'a, I: IndexId, V: IndexValue> HybridIterator<'a, I, V> {
    pub(crate) fn new(primary: &'a [(I, V)], id: I, overflow: &'a [V]) -> Self {
        let mut it = Self {
            primary,
            primary_pos: 0,
            primary_end: primary.len(),
            id,
            overflow,
            overflow_pos: 0,
            overflow_end: overflow.len(),
        };
        it.skip_removed();
        it
    }

    /// The past-the-end cursor over the same ranges.
    pub fn end(&self) -> Self {
        Self {
            primary_pos: self.primary_end,
            overflow_pos: self.overflow_end,
            ..self.clone()
        }
    }

    fn primary_exhausted(&self) -> bool {
        self.primary_pos == self.primary_end
    }

    fn skip_removed(&mut self) {
        while !self.primary_exhausted() && self.primary[self.primary_pos].1.is_empty_value() {
            self.primary_pos += 1;
        }
        if self.primary_exhausted() {
            while self.overflow_pos != self.overflow_end && self.overflow[self.overflow_pos].is_empty_value() {
                self.overflow_pos += 1;
            }
        }
    }

    pub fn is_end(&self) -> bool {
        self.primary_exhausted() && self.overflow_pos == self.overflow_end
    }

    /// Current entry. Panics at the end position.
    pub fn entry(&self) -> (I, V) {
        if !self.primary_exhausted() {
            self.primary[self.primary_pos]
        } else {
            assert!(self.overflow_pos != self.overflow_end, "dereference of end HybridIterator");
            (self.id, self.overflow[self.overflow_pos])
        }
    }

    pub fn id(&self) -> I {
        self.entry().0
    }

    pub fn value(&self) -> V {
        self.entry().1
    }

    /// Moves to the next live entry. Panics at the end position.
    pub fn advance(&mut self) {
        assert!(!self.is_end(), "advance past end of HybridIterator");
        if self.primary_exhausted() {
            self.overflow_pos += 1;
        } else {
            self.primary_pos += 1;
        }
        self.skip_removed();
    }

    /// Entries left, including removed ones not yet skipped.
    fn remaining_upper(&self) -> usize {
        (self.primary_end - self.primary_pos) + (self.overflow_end - self.overflow_pos)
    }
}

impl<'a, I, V> PartialEq for HybridIterator<'a, I, V> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(
            std::ptr::eq(self.primary, other.primary) && std::ptr::eq(self.overflow, other.overflow),
            "comparing HybridIterators from different get_all calls"
        );
        self.primary_pos == other.primary_pos
            && self.primary_end == other.primary_end
            && self.overflow_pos == other.overflow_pos
            && self.overflow_end == other.overflow_end
    }
}

impl<'a, I, V> Eq for HybridIterator<'a, I, V> {}

impl<'a, I: IndexId, V: IndexValue> Iterator for HybridIterator<'a, I, V> {
    type Item = (I, V);

    fn next(&mut self) -> Option<(I, V)> {
        if self.is_end() {
            return None;
        }
        let entry = self.entry();
        self.advance();
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // the current position is always live
        (usize::from(!self.is_end()), Some(self.remaining_upper()))
    }
}

impl<'a, I: IndexId, V: IndexValue> FusedIterator for HybridIterator<'a, I, V> {}
