use crate::engine::mem::{IndexId, IndexValue};

/// Ordered multimap contract shared by the primary store, the overflow store
/// and the hybrid index composed of both.
pub trait Multimap<I: IndexId, V: IndexValue> {
    /// Live values stored under one id.
    type Values<'a>: Iterator<Item = V>
    where
        Self: 'a;

    fn set(&mut self, id: I, value: V);

    fn get_all(&self, id: I) -> Self::Values<'_>;

    /// Removes one `(id, value)` pair. Removing an absent pair is a no-op.
    fn remove(&mut self, id: I, value: V);

    fn sort(&mut self);

    fn size(&self) -> usize;

    /// Approximate heap bytes held by the container.
    fn used_memory(&self) -> usize;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
