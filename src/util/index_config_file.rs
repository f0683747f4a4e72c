use std::path::Path;
use config::{Config, File, FileFormat};
use log::debug;
use serde::Deserialize;
use crate::error::IndexError;
use crate::util::constants::{CONFIG_INI, CONFIG_JSON, CONFIG_YAML};
use crate::util::options::{IndexOptions, Options};

/// On-disk overrides for `IndexOptions`. Every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct IndexConfigFile {
    pub reserve: Option<usize>,
    pub consolidate_threshold: Option<usize>,

    // free-form key=value options, applied before the typed fields
    pub options: Option<Options>,
}

/// Loads `index.yaml`, `index.json` or `index.ini` (first one found) from
/// `dir`. A directory with none of them yields an empty config.
pub fn load_index_config(dir: &Path) -> Result<IndexConfigFile, IndexError> {
    let mut cfg = Config::builder();

    let candidates = [
        (CONFIG_YAML, FileFormat::Yaml),
        (CONFIG_JSON, FileFormat::Json),
        (CONFIG_INI, FileFormat::Ini),
    ];
    if let Some((path, format)) = candidates
        .into_iter()
        .map(|(name, format)| (dir.join(name), format))
        .find(|(path, _)| path.exists())
    {
        debug!("loading index config from {}", path.display());
        cfg = cfg.add_source(File::from(path.as_path()).format(format));
    }

    Ok(cfg.build()?.try_deserialize()?)
}

pub fn load_index_config_str(content: &str, format: FileFormat) -> Result<IndexConfigFile, IndexError> {
    let cfg = Config::builder()
        .add_source(File::from_str(content, format))
        .build()?;
    Ok(cfg.try_deserialize()?)
}

impl IndexConfigFile {
    pub fn to_index_options(self) -> Result<IndexOptions, IndexError> {
        let mut out = IndexOptions::default();

        if let Some(opts) = &self.options {
            out.apply(opts)?;
        }
        if let Some(v) = self.reserve {
            out.reserve = v;
        }
        if let Some(v) = self.consolidate_threshold {
            out.consolidate_threshold = if v == 0 { None } else { Some(v) };
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::DEFAULT_CONSOLIDATE_THRESHOLD;

    #[test]
    fn test_yaml_overrides() {
        let cfg = load_index_config_str(
            "reserve: 4096\nconsolidate_threshold: 128\n",
            FileFormat::Yaml,
        )
        .unwrap();
        assert_eq!(cfg.reserve, Some(4096));

        let opts = cfg.to_index_options().unwrap();
        assert_eq!(opts.reserve, 4096);
        assert_eq!(opts.consolidate_threshold, Some(128));
    }

    #[test]
    fn test_json_free_form_options_lose_to_typed_fields() {
        let cfg = load_index_config_str(
            r#"{ "reserve": 10, "options": { "reserve": "99", "consolidate_threshold": "0" } }"#,
            FileFormat::Json,
        )
        .unwrap();

        let opts = cfg.to_index_options().unwrap();
        assert_eq!(opts.reserve, 10);
        assert_eq!(opts.consolidate_threshold, None);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let cfg = load_index_config_str("{}", FileFormat::Json).unwrap();
        let opts = cfg.to_index_options().unwrap();
        assert_eq!(opts, IndexOptions::default());
        assert_eq!(opts.consolidate_threshold, Some(DEFAULT_CONSOLIDATE_THRESHOLD));
    }

    #[test]
    fn test_missing_config_dir_files() {
        let dir = std::env::temp_dir().join("hybridkv-no-config-here");
        let cfg = load_index_config(&dir).unwrap();
        assert!(cfg.reserve.is_none());
        assert!(cfg.options.is_none());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("hybridkv-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_YAML), "consolidate_threshold: 7\n").unwrap();

        let opts = load_index_config(&dir).unwrap().to_index_options().unwrap();
        assert_eq!(opts.consolidate_threshold, Some(7));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
