pub(crate) mod constants;
mod index_config_file;
mod options;

pub use constants::{DEFAULT_CONSOLIDATE_THRESHOLD, OPTION_CONSOLIDATE_THRESHOLD, OPTION_RESERVE};
pub use index_config_file::{load_index_config, load_index_config_str, IndexConfigFile};
pub use options::{IndexOptions, Options};
