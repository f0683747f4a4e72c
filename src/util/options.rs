use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::IndexError;
use crate::util::constants::{DEFAULT_CONSOLIDATE_THRESHOLD, OPTION_CONSOLIDATE_THRESHOLD, OPTION_RESERVE};

/// Ordered `key=value` string options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    options: BTreeMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Parses `key=value`, splitting at the first `=`. A bare `key` is stored as `true`.
    pub fn set_pair(&mut self, data: &str) {
        match data.split_once('=') {
            Some((key, value)) => self.set(key, value),
            None => self.set(data, "true"),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn get_or(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value).to_string()
    }

    /// Is this option set to "true" or "yes"?
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.get(key), Some("true") | Some("yes"))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}

/// Typed settings of a `HybridIndex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Primary store capacity reserved up front (0 = none).
    pub reserve: usize,

    /// Overflow size at which `should_consolidate` turns true. `None` disables it.
    pub consolidate_threshold: Option<usize>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            reserve: 0,
            consolidate_threshold: Some(DEFAULT_CONSOLIDATE_THRESHOLD),
        }
    }
}

impl IndexOptions {
    /// Applies `reserve` and `consolidate_threshold` (0 disables) from a
    /// string option bag onto the defaults. Unknown keys are ignored.
    pub fn from_options(options: &Options) -> Result<Self, IndexError> {
        let mut out = IndexOptions::default();
        out.apply(options)?;
        Ok(out)
    }

    pub(crate) fn apply(&mut self, options: &Options) -> Result<(), IndexError> {
        if let Some(v) = options.get(OPTION_RESERVE) {
            self.reserve = parse_usize(OPTION_RESERVE, v)?;
        }
        if let Some(v) = options.get(OPTION_CONSOLIDATE_THRESHOLD) {
            self.consolidate_threshold = match parse_usize(OPTION_CONSOLIDATE_THRESHOLD, v)? {
                0 => None,
                n => Some(n),
            };
        }
        Ok(())
    }

    pub fn to_options(&self) -> Options {
        let mut options = Options::new();
        options.set(OPTION_RESERVE, self.reserve.to_string());
        options.set(
            OPTION_CONSOLIDATE_THRESHOLD,
            self.consolidate_threshold.unwrap_or(0).to_string(),
        );
        options
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, IndexError> {
    value
        .trim()
        .parse()
        .map_err(|e| IndexError::InvalidArgument(format!("option {}={}: {}", key, value, e)))
}
