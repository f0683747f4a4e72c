pub mod engine;
pub mod util;
pub mod error;

pub use crate::engine::io::{InputIterator, ListReader, RecordSource};
pub use crate::engine::mem::{
    BTreeMultimap, EmptyValue, FixedCodec, HybridIndex, HybridIterator, IndexId, IndexStats, IndexValue, Multimap,
    SparseMultimapMem,
};
pub use crate::error::IndexError;
pub use crate::util::{IndexOptions, Options};
