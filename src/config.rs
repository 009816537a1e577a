//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ordtree/ordtree.toml`
//! 3. Explicit config file (`--config` / `ORDTREE_CONFIG`)
//! 4. Environment variables: `ORDTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{TraversalOrder, TreeError};

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },

    #[error("environment: {0}")]
    Env(#[from] config::ConfigError),
}

/// Unified configuration for ordtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal order used when a command does not name one
    pub order: TraversalOrder,
    /// Upper bound on tree nodes (unbounded when absent)
    pub max_nodes: Option<usize>,
    /// Depth past which inserts warn about a degenerate tree
    pub depth_warning: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            order: TraversalOrder::InOrder,
            max_nodes: None,
            depth_warning: 64,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect
/// "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub order: Option<TraversalOrder>,
    pub max_nodes: Option<usize>,
    pub depth_warning: Option<usize>,
}

/// Get the XDG config directory for ordtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ordtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ordtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            order: overlay.order.unwrap_or(self.order),
            max_nodes: overlay.max_nodes.or(self.max_nodes),
            depth_warning: overlay.depth_warning.unwrap_or(self.depth_warning),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional file layered over the global config; it must
    ///   exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with(global_config_path().as_deref(), config_file)
    }

    /// Like [`load`](Self::load), with the global config location supplied by
    /// the caller.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_with(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_file {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply ORDTREE_* environment variables as explicit overrides.
    #[instrument(level = "trace")]
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORDTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("order") {
            settings.order = val
                .parse()
                .map_err(|e: TreeError| SettingsError::Invalid {
                    key: "ORDTREE_ORDER".into(),
                    message: e.to_string(),
                })?;
        }
        if let Ok(val) = config.get_string("max_nodes") {
            settings.max_nodes = Some(parse_count("ORDTREE_MAX_NODES", &val)?);
        }
        if let Ok(val) = config.get_string("depth_warning") {
            settings.depth_warning = parse_count("ORDTREE_DEPTH_WARNING", &val)?;
        }

        Ok(settings)
    }
}

fn parse_count(key: &str, val: &str) -> Result<usize, SettingsError> {
    val.trim().parse().map_err(|e: std::num::ParseIntError| SettingsError::Invalid {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unspecified_fields() {
        let base = Settings {
            order: TraversalOrder::PreOrder,
            max_nodes: Some(10),
            depth_warning: 8,
        };
        let overlay = RawSettings {
            depth_warning: Some(32),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.order, TraversalOrder::PreOrder);
        assert_eq!(merged.max_nodes, Some(10));
        assert_eq!(merged.depth_warning, 32);
    }

    #[test]
    fn raw_settings_accept_order_aliases() {
        let raw: RawSettings = toml::from_str("order = \"post\"").unwrap();
        assert_eq!(raw.order, Some(TraversalOrder::PostOrder));
    }

    #[test]
    fn parse_count_rejects_garbage() {
        assert_eq!(parse_count("K", " 12 ").unwrap(), 12);
        assert!(matches!(
            parse_count("K", "twelve"),
            Err(SettingsError::Invalid { .. })
        ));
    }

    #[test]
    fn global_path_ends_with_file_name() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("ordtree.toml"));
        }
    }
}
