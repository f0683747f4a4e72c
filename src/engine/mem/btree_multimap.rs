use std::collections::BTreeMap;
use crate::engine::mem::{IndexId, IndexValue, Multimap};

/// Overflow store: an ordered map from id to the values inserted for it.
///
/// Accepts inserts in any order. Values of one id keep their insertion
/// order, so `values(id)` is a plain slice the hybrid iterator can index.
#[derive(Debug, Clone)]
pub struct BTreeMultimap<I, V> {
    elements: BTreeMap<I, Vec<V>>,
    len: usize,
}

impl<I: IndexId, V: IndexValue> BTreeMultimap<I, V> {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn values(&self, id: I) -> &[V] {
        self.elements
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All entries, ordered by id and then by insertion.
    pub fn iter(&self) -> impl Iterator<Item = (I, V)> + '_ {
        self.elements
            .iter()
            .flat_map(|(&id, values)| values.iter().map(move |&v| (id, v)))
    }

    /// Number of distinct ids.
    pub fn id_count(&self) -> usize {
        self.elements.len()
    }
}

impl<I: IndexId, V: IndexValue> Default for BTreeMultimap<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IndexId, V: IndexValue> Multimap<I, V> for BTreeMultimap<I, V> {
    type Values<'a> = std::iter::Copied<std::slice::Iter<'a, V>>;

    fn set(&mut self, id: I, value: V) {
        debug_assert!(!value.is_empty_value(), "empty value is reserved for removed entries");
        self.elements.entry(id).or_default().push(value);
        self.len += 1;
    }

    fn get_all(&self, id: I) -> Self::Values<'_> {
        self.values(id).iter().copied()
    }

    fn remove(&mut self, id: I, value: V) {
        let Some(values) = self.elements.get_mut(&id) else {
            return;
        };
        let Some(pos) = values.iter().position(|v| *v == value) else {
            return;
        };

        values.remove(pos);
        self.len -= 1;
        if values.is_empty() {
            self.elements.remove(&id);
        }
    }

    /// Always ordered by id.
    fn sort(&mut self) {}

    fn size(&self) -> usize {
        self.len
    }

    fn used_memory(&self) -> usize {
        let nodes = self.elements.len() * (std::mem::size_of::<I>() + std::mem::size_of::<Vec<V>>());
        let values: usize = self
            .elements
            .values()
            .map(|v| v.capacity() * std::mem::size_of::<V>())
            .sum();
        nodes + values
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.len = 0;
    }
}
