//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::rows::RowMode;

/// Main configuration for the scoredist pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreDistConfig {
    /// Input and store locations.
    pub paths: PathsConfig,

    /// Row parsing configuration.
    pub rows: RowConfig,

    /// Category naming configuration.
    pub categories: CategoryConfig,

    /// Merge behaviour.
    pub merge: MergeConfig,
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for candidate PDF files.
    pub data_dir: PathBuf,

    /// JSON store file. Relative paths resolve against `data_dir`.
    pub store_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            store_file: PathBuf::from("score_distributions.json"),
        }
    }
}

/// Row parsing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    /// Line matching mode.
    pub mode: RowMode,
}

/// Category naming configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Filename to category mappings that bypass the substitution rules.
    pub overrides: BTreeMap<String, String>,
}

/// Merge behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Keep going when a single PDF cannot be read.
    pub continue_on_error: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
        }
    }
}

impl ScoreDistConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Full path of the JSON store.
    pub fn store_path(&self) -> PathBuf {
        if self.paths.store_file.is_absolute() {
            self.paths.store_file.clone()
        } else {
            self.paths.data_dir.join(&self.paths.store_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_store_path_relative_to_data_dir() {
        let config = ScoreDistConfig::default();
        assert_eq!(
            config.store_path(),
            PathBuf::from("data").join("score_distributions.json")
        );
    }

    #[test]
    fn test_store_path_absolute() {
        let mut config = ScoreDistConfig::default();
        let absolute = std::env::temp_dir().join("scores.json");
        config.paths.store_file = absolute.clone();
        assert_eq!(config.store_path(), absolute);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ScoreDistConfig =
            serde_json::from_str(r#"{"rows": {"mode": "strict"}}"#).unwrap();

        assert_eq!(config.rows.mode, RowMode::Strict);
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert!(config.merge.continue_on_error);
        assert!(config.categories.overrides.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ScoreDistConfig::default();
        config
            .categories
            .overrides
            .insert("16.书法.pdf".to_string(), "书法类".to_string());
        config.save(&path).unwrap();

        let loaded = ScoreDistConfig::from_file(&path).unwrap();
        assert_eq!(
            loaded.categories.overrides.get("16.书法.pdf").map(String::as_str),
            Some("书法类")
        );
    }
}
