//! # Configuration
//!
//! Configuration is loaded with [`confique`], layering environment variables
//! over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `LISTED_DATA_DIR`, `LISTED_PRETTY_JSON`, `LISTED_PURGE_ON_LOAD`.
//! 2. **Config file**: the path passed to [`ListedConfig::load`] (skipped if missing).
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Directory holding the collection files |
//! | `pretty_json` | `false` | Pretty-print collection files |
//! | `purge_on_load` | `true` | Purge expired trash whenever lists are loaded |
//! | `default_sort` | `newest` | Sort order used before the user picks one |
//!
//! The trash retention window is not configurable; see [`crate::model::RETENTION_DAYS`].

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ListedError, Result};
use crate::model::SortBy;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListedConfig {
    /// Directory for `lists.json`, `items.json`, ... When absent, the
    /// platform data directory is used.
    #[config(env = "LISTED_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[config(default = false, env = "LISTED_PRETTY_JSON")]
    pub pretty_json: bool,

    /// Run the expired-trash purge whenever lists are loaded.
    #[config(default = true, env = "LISTED_PURGE_ON_LOAD")]
    pub purge_on_load: bool,

    #[config(default = "newest")]
    pub default_sort: SortBy,
}

impl Default for ListedConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            pretty_json: false,
            purge_on_load: true,
            default_sort: SortBy::Newest,
        }
    }
}

impl ListedConfig {
    /// Load configuration from the environment and, if given, a TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ListedConfig::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|err| ListedError::Config(err.to_string()))
    }

    /// The directory collection files live in.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("app", "Listed", "listed")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ListedError::Config("could not determine a data directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = ListedConfig::default();
        assert_eq!(config.data_dir, None);
        assert!(!config.pretty_json);
        assert!(config.purge_on_load);
        assert_eq!(config.default_sort, SortBy::Newest);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = ListedConfig {
            data_dir: Some(PathBuf::from("/tmp/listed-data")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/listed-data")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listed.toml");
        fs::write(
            &path,
            "pretty_json = true\npurge_on_load = false\ndefault_sort = \"oldest\"\n",
        )
        .unwrap();

        let config = ListedConfig::load(Some(&path)).unwrap();
        assert!(config.pretty_json);
        assert!(!config.purge_on_load);
        assert_eq!(config.default_sort, SortBy::Oldest);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listed.toml");
        fs::write(&path, "default_sort = \"sideways\"\n").unwrap();

        let result = ListedConfig::load(Some(&path));
        assert!(matches!(result, Err(ListedError::Config(_))));
    }
}
