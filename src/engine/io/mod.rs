pub mod format;
pub(crate) mod list_reader;
pub(crate) mod input_iterator;

pub use input_iterator::{InputIterator, RecordSource};
pub use list_reader::ListReader;
