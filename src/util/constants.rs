pub const OPTION_RESERVE: &str = "reserve";
pub const OPTION_CONSOLIDATE_THRESHOLD: &str = "consolidate_threshold";

/// Overflow entries after which `should_consolidate` reports true.
pub const DEFAULT_CONSOLIDATE_THRESHOLD: usize = 1 << 20;

pub const CONFIG_YAML: &str = "index.yaml";
pub const CONFIG_JSON: &str = "index.json";
pub const CONFIG_INI: &str = "index.ini";
