pub mod element;
pub mod multimap;
pub mod sparse_mem;
pub mod btree_multimap;
pub mod hybrid_iter;
pub mod hybrid;

pub use element::{EmptyValue, FixedCodec, IndexId, IndexValue};
pub use multimap::Multimap;
pub use sparse_mem::SparseMultimapMem;
pub use btree_multimap::BTreeMultimap;
pub use hybrid_iter::HybridIterator;
pub use hybrid::{HybridIndex, IndexStats};
