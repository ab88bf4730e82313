// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration persistence for k8stopo
//!
//! All k8stopo data is stored under ~/.k8stopo/:
//! - ~/.k8stopo/config.json - user configuration
//! - ~/.k8stopo/log/ - rolling log files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sync::{DEFAULT_INITIAL_BACKOFF, SyncConfig};

/// Seconds between reports in watch mode
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 15;

/// Cap on retry delays, in seconds
pub const DEFAULT_MAX_BACKOFF_SECS: u64 = 300;

/// Get the base k8stopo directory (~/.k8stopo/)
pub fn base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".k8stopo"))
        .context("Could not determine home directory")
}

fn default_sync_interval() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

fn default_max_backoff() -> u64 {
    DEFAULT_MAX_BACKOFF_SECS
}

/// k8stopo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Kubeconfig context; the current context when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,

    /// Topology names never mirrored, e.g. `["cstor_pool"]`
    #[serde(default)]
    pub disabled_kinds: Vec<String>,

    /// Only report pods scheduled on this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context: None,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            max_backoff_secs: DEFAULT_MAX_BACKOFF_SECS,
            disabled_kinds: Vec::new(),
            node_name: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get the config file path (~/.k8stopo/config.json)
    pub fn config_path() -> Result<PathBuf> {
        Ok(base_dir()?.join("config.json"))
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    /// Synchronizer settings derived from this config
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: Duration::from_secs(self.max_backoff_secs).max(DEFAULT_INITIAL_BACKOFF),
            node_name: self.node_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.sync_interval_secs, 15);
        assert_eq!(config.max_backoff_secs, 300);
        assert!(config.context.is_none());
        assert!(config.disabled_kinds.is_empty());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"context": "prod", "disabled_kinds": ["cstor_pool", "disk"]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.context.as_deref(), Some("prod"));
        assert_eq!(config.disabled_kinds, vec!["cstor_pool", "disk"]);
        assert_eq!(config.sync_interval_secs, 15);
    }

    #[test]
    fn test_sync_config() {
        let config = Config {
            max_backoff_secs: 60,
            node_name: Some("worker-1".to_string()),
            ..Default::default()
        };
        let sync = config.sync_config();
        assert_eq!(sync.initial_backoff, Duration::from_millis(100));
        assert_eq!(sync.max_backoff, Duration::from_secs(60));
        assert_eq!(sync.node_name.as_deref(), Some("worker-1"));

        let zero = Config {
            max_backoff_secs: 0,
            sync_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(zero.sync_config().max_backoff, Duration::from_millis(100));
        assert_eq!(zero.sync_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = Config {
            context: Some("test-cluster".to_string()),
            disabled_kinds: vec!["disk".to_string()],
            ..Default::default()
        };
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "not json").unwrap();
        assert!(Config::load_from(&config_path).is_err());
    }
}
