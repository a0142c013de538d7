//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod merge;

use std::path::{Path, PathBuf};

use scoredist_core::ScoreDistConfig;
use tracing::debug;

/// Location used by `config init` and picked up when `--config` is absent.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scoredist")
        .join("config.json")
}

/// Load the config file given with `--config`, then the default location,
/// then the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ScoreDistConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(ScoreDistConfig::default());
            }
            path
        }
    };

    debug!("Loading config from {}", path.display());
    load_config_file(&path)
}

fn load_config_file(path: &Path) -> anyhow::Result<ScoreDistConfig> {
    ScoreDistConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
}
