use std::io::{Read, Write};
use log::{debug, info, trace};
use serde::Serialize;
use crate::engine::io::{InputIterator, ListReader};
use crate::engine::mem::{BTreeMultimap, HybridIterator, IndexId, IndexValue, Multimap, SparseMultimapMem};
use crate::error::IndexError;
use crate::util::IndexOptions;

/// Two-tier multimap: a sorted, vector-backed primary store for bulk loaded
/// data plus a tree-backed overflow store for sparse updates.
///
/// Typical call sequence:
///
/// 1. `unsorted_set` for the initial bulk load,
/// 2. `sort` (or `consolidate`),
/// 3. `set` / `remove` / `get_all` for incremental work,
/// 4. `consolidate` at controlled points, e.g. before `dump_as_list`.
///
/// `get_all` relies on the primary store being sorted. Reading after an
/// `unsorted_set` without sorting is a contract violation, caught by a
/// debug assertion; `try_get_all` reports it as `IndexError::Unsorted`.
#[derive(Debug, Clone)]
pub struct HybridIndex<I, V> {
    primary: SparseMultimapMem<I, V>,
    overflow: BTreeMultimap<I, V>,
    options: IndexOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub size: usize,
    pub primary_size: usize,
    pub overflow_size: usize,
    pub used_memory: usize,
}

impl<I: IndexId, V: IndexValue> HybridIndex<I, V> {
    pub fn new() -> Self {
        Self::with_options(IndexOptions::default())
    }

    pub fn with_options(options: IndexOptions) -> Self {
        let mut index = Self {
            primary: SparseMultimapMem::new(),
            overflow: BTreeMultimap::new(),
            options,
        };
        if index.options.reserve > 0 {
            index.reserve(index.options.reserve);
        }
        index
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub fn primary(&self) -> &SparseMultimapMem<I, V> {
        &self.primary
    }

    pub fn overflow(&self) -> &BTreeMultimap<I, V> {
        &self.overflow
    }

    /// Capacity hint for the primary store only.
    pub fn reserve(&mut self, capacity: usize) {
        self.primary.reserve(capacity);
    }

    /// Bulk-load path: appends straight to the primary store.
    pub fn unsorted_set(&mut self, id: I, value: V) {
        self.primary.set(id, value);
    }

    pub fn try_unsorted_set(&mut self, id: I, value: V) -> Result<(), IndexError> {
        check_value(id, value)?;
        self.unsorted_set(id, value);
        Ok(())
    }

    /// Incremental insert; always goes to the overflow store.
    ///
    /// `value` must not be the empty value. Debug builds assert it; release
    /// builds store it, but lookups never yield it and `consolidate` turns
    /// it into a removed primary entry. `try_set` rejects it instead.
    pub fn set(&mut self, id: I, value: V) {
        self.overflow.set(id, value);
    }

    pub fn try_set(&mut self, id: I, value: V) -> Result<(), IndexError> {
        check_value(id, value)?;
        self.set(id, value);
        Ok(())
    }

    /// `(begin, end)` cursors over every entry for `id`: primary matches
    /// first, then overflow matches in insertion order. An unknown id gives
    /// `begin == end`.
    pub fn get_all(&self, id: I) -> (HybridIterator<'_, I, V>, HybridIterator<'_, I, V>) {
        debug_assert!(
            self.primary.is_sorted(),
            "get_all on unsorted primary store; call sort() or consolidate() first"
        );
        let begin = HybridIterator::new(self.primary.range(id), id, self.overflow.values(id));
        let end = begin.end();
        (begin, end)
    }

    pub fn try_get_all(
        &self,
        id: I,
    ) -> Result<(HybridIterator<'_, I, V>, HybridIterator<'_, I, V>), IndexError> {
        if !self.primary.is_sorted() {
            return Err(IndexError::Unsorted(format!("get_all({:?}) after unsorted_set", id)));
        }
        Ok(self.get_all(id))
    }

    pub fn get_values(&self, id: I) -> impl Iterator<Item = V> + '_ {
        self.get_all(id).0.map(|(_, v)| v)
    }

    /// Removes `(id, value)` from both stores. Primary entries become
    /// tombstones; overflow entries are deleted.
    pub fn remove(&mut self, id: I, value: V) {
        self.primary.remove(id, value);
        self.overflow.remove(id, value);
    }

    /// Folds the overflow store into the primary store: drops tombstones,
    /// moves every overflow entry, clears overflow and sorts primary.
    pub fn consolidate(&mut self) {
        let dropped = self.primary.erase_removed();
        let moved = self.overflow.size();

        self.primary.reserve(moved);
        for (id, value) in self.overflow.iter() {
            self.primary.set(id, value);
        }
        self.overflow.clear();
        self.primary.sort();

        debug!(
            "consolidated: moved {} overflow entries, dropped {} tombstones, primary now {}",
            moved,
            dropped,
            self.primary.size()
        );
    }

    /// Advisory: true once the overflow store reached the configured
    /// consolidation threshold. Never consolidates by itself.
    pub fn should_consolidate(&self) -> bool {
        match self.options.consolidate_threshold {
            Some(threshold) => self.overflow.size() >= threshold,
            None => false,
        }
    }

    /// Consolidates, then writes the primary store as a list.
    pub fn dump_as_list<W: Write>(&mut self, dst: W) -> Result<usize, IndexError> {
        self.consolidate();
        let written = self.primary.dump_as_list(dst)?;
        info!("dumped {} entries", written);
        Ok(written)
    }

    /// Bulk-loads a list written by `dump_as_list` into the primary store
    /// and sorts it.
    ///
    /// The whole list is decoded before the index is touched: on error the
    /// index is left exactly as it was.
    pub fn load_from_list<R: Read>(&mut self, reader: R) -> Result<usize, IndexError> {
        let mut batch = Vec::new();
        for entry in InputIterator::new(ListReader::<R, I, V>::new(reader)) {
            let (id, value) = entry?;
            check_value(id, value)?;
            batch.push((id, value));
        }

        let loaded = batch.len();
        self.primary.reserve(loaded);
        for (id, value) in batch {
            self.primary.set(id, value);
        }
        self.primary.sort();
        info!("loaded {} entries", loaded);
        Ok(loaded)
    }

    pub fn clear(&mut self) {
        trace!("clear index");
        self.primary.clear();
        self.overflow.clear();
    }

    /// Sorts the primary store only.
    pub fn sort(&mut self) {
        self.primary.sort();
    }

    /// Entries in both stores; primary tombstones count until consolidated.
    pub fn size(&self) -> usize {
        self.primary.size() + self.overflow.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn used_memory(&self) -> usize {
        self.primary.used_memory() + self.overflow.used_memory()
    }

    /// Every live entry: primary in storage order, then overflow.
    pub fn iter(&self) -> impl Iterator<Item = (I, V)> + '_ {
        self.primary
            .iter()
            .chain(self.overflow.iter().filter(|(_, v)| !v.is_empty_value()))
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            size: self.size(),
            primary_size: self.primary.size(),
            overflow_size: self.overflow.size(),
            used_memory: self.used_memory(),
        }
    }
}

fn check_value<I: IndexId, V: IndexValue>(id: I, value: V) -> Result<(), IndexError> {
    if value.is_empty_value() {
        return Err(IndexError::InvalidArgument(format!(
            "value {:?} for id {:?} is reserved for removed entries",
            value, id
        )));
    }
    Ok(())
}

impl<I: IndexId, V: IndexValue> Default for HybridIndex<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn value_of<I, V>(entry: (I, V)) -> V {
    entry.1
}

/// Generic view: `get_all` yields values only, `set` targets overflow.
impl<I: IndexId, V: IndexValue> Multimap<I, V> for HybridIndex<I, V> {
    type Values<'a> = std::iter::Map<HybridIterator<'a, I, V>, fn((I, V)) -> V>;

    fn set(&mut self, id: I, value: V) {
        HybridIndex::set(self, id, value)
    }

    fn get_all(&self, id: I) -> Self::Values<'_> {
        HybridIndex::get_all(self, id).0.map(value_of as fn((I, V)) -> V)
    }

    fn remove(&mut self, id: I, value: V) {
        HybridIndex::remove(self, id, value)
    }

    fn sort(&mut self) {
        HybridIndex::sort(self)
    }

    fn size(&self) -> usize {
        HybridIndex::size(self)
    }

    fn used_memory(&self) -> usize {
        HybridIndex::used_memory(self)
    }

    fn clear(&mut self) {
        HybridIndex::clear(self)
    }
}
