use std::io::Write;
use log::{debug, trace};
use crate::engine::io::format::{encode_chunk, DUMP_CHUNK_ENTRIES};
use crate::engine::mem::{IndexId, IndexValue, Multimap};
use crate::error::IndexError;

/// Dense primary store: a flat vector of `(id, value)` pairs.
///
/// Bulk loads push unsorted; lookups binary search on the id and therefore
/// need a `sort()` first. Removal overwrites the value with the empty value
/// (a tombstone) so positions of other entries stay put; `erase_removed`
/// compacts them away.
#[derive(Debug, Clone)]
pub struct SparseMultimapMem<I, V> {
    elements: Vec<(I, V)>,
    /// Elements are ordered by id.
    sorted: bool,
}

impl<I: IndexId, V: IndexValue> SparseMultimapMem<I, V> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            sorted: true,
        }
    }

    pub fn reserve(&mut self, capacity: usize) {
        trace!("primary reserve {} entries", capacity);
        self.elements.reserve(capacity);
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// All stored entries for `id`, tombstones included.
    pub fn range(&self, id: I) -> &[(I, V)] {
        let lo = self.elements.partition_point(|e| e.0 < id);
        let hi = lo + self.elements[lo..].partition_point(|e| e.0 <= id);
        &self.elements[lo..hi]
    }

    /// Drops every tombstone, compacting the vector in place.
    pub fn erase_removed(&mut self) -> usize {
        let before = self.elements.len();
        self.elements.retain(|e| !e.1.is_empty_value());
        before - self.elements.len()
    }

    /// Live entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (I, V)> + '_ {
        self.elements
            .iter()
            .copied()
            .filter(|e| !e.1.is_empty_value())
    }

    /// Writes live entries as crc-framed chunks. Returns the entry count.
    pub fn dump_as_list<W: Write>(&self, mut dst: W) -> Result<usize, IndexError> {
        let mut buf = Vec::new();
        let mut chunk: Vec<(I, V)> = Vec::with_capacity(DUMP_CHUNK_ENTRIES.min(self.elements.len()));
        let mut written = 0usize;

        for entry in self.iter() {
            chunk.push(entry);
            if chunk.len() == DUMP_CHUNK_ENTRIES {
                buf.clear();
                encode_chunk(&chunk, &mut buf);
                dst.write_all(&buf)?;
                written += chunk.len();
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            buf.clear();
            encode_chunk(&chunk, &mut buf);
            dst.write_all(&buf)?;
            written += chunk.len();
        }
        dst.flush()?;

        debug!("primary dumped {} entries", written);
        Ok(written)
    }
}

impl<I: IndexId, V: IndexValue> Default for SparseMultimapMem<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LiveValues<'a, I, V> {
    inner: std::slice::Iter<'a, (I, V)>,
}

impl<'a, I: IndexId, V: IndexValue> Iterator for LiveValues<'a, I, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner
            .by_ref()
            .map(|e| e.1)
            .find(|v| !v.is_empty_value())
    }
}

impl<I: IndexId, V: IndexValue> Multimap<I, V> for SparseMultimapMem<I, V> {
    type Values<'a> = LiveValues<'a, I, V>;

    fn set(&mut self, id: I, value: V) {
        debug_assert!(!value.is_empty_value(), "empty value is reserved for removed entries");
        if let Some(last) = self.elements.last() {
            if last.0 > id {
                self.sorted = false;
            }
        }
        self.elements.push((id, value));
    }

    fn get_all(&self, id: I) -> LiveValues<'_, I, V> {
        LiveValues {
            inner: self.range(id).iter(),
        }
    }

    fn remove(&mut self, id: I, value: V) {
        let slot = if self.sorted {
            let lo = self.elements.partition_point(|e| e.0 < id);
            self.elements[lo..]
                .iter_mut()
                .take_while(|e| e.0 == id)
                .find(|e| e.1 == value)
        } else {
            self.elements
                .iter_mut()
                .find(|e| e.0 == id && e.1 == value)
        };

        if let Some(e) = slot {
            e.1 = V::empty_value();
        }
    }

    fn sort(&mut self) {
        self.elements.sort_unstable();
        self.sorted = true;
    }

    /// Entries held by the vector, tombstones included.
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn used_memory(&self) -> usize {
        self.elements.capacity() * std::mem::size_of::<(I, V)>()
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.elements.shrink_to_fit();
        self.sorted = true;
    }
}
