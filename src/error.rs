use std::fmt;
use std::io;

#[derive(Debug)]
pub enum IndexError {
    Io(String),
    Corruption(String),
    InvalidArgument(String),
    /// Order-dependent read against a primary store that was bulk-loaded but not sorted.
    Unsorted(String),
    Config(config::ConfigError),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Io(msg) => write!(f, "io error: {}", msg),
            IndexError::Corruption(msg) => write!(f, "corruption: {}", msg),
            IndexError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            IndexError::Unsorted(msg) => write!(f, "primary store not sorted: {}", msg),
            IndexError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IndexError {
    fn from(e: io::Error) -> Self {
        IndexError::Io(e.to_string())
    }
}

impl From<config::ConfigError> for IndexError {
    fn from(e: config::ConfigError) -> Self {
        IndexError::Config(e)
    }
}
