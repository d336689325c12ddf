//! Configuration management.
//!
//! Settings live in `.todo/config.yaml` under the project directory. Every
//! field is optional; a missing file means all defaults.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to project root.
pub const CONFIG_FILE_PATH: &str = ".todo/config.yaml";

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "TODO_LOG";

/// Project configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    /// Explicit database location. `None` uses the per-project data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Log filter directive (e.g. `info`, `todo_rpc=debug`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Explicit server log file. `None` uses the per-project data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self { database_path: None, log_level: default_log_level(), log_file: None }
    }
}

impl TodoConfig {
    /// Load config from a project directory, returning defaults if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        Self::load_file(&Self::config_path(base_dir))
    }

    /// Load config from an explicit file, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// The database path to use for a project.
    ///
    /// Relative configured paths are resolved against the project directory.
    pub fn resolve_database_path(&self, base_dir: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_relative() => base_dir.join(path),
            Some(path) => path.clone(),
            None => paths::default_db_path(base_dir),
        }
    }

    /// The server log path to use for a project.
    pub fn resolve_log_path(&self, base_dir: &Path) -> PathBuf {
        match &self.log_file {
            Some(path) if path.is_relative() => base_dir.join(path),
            Some(path) => path.clone(),
            None => paths::project_log_path(base_dir),
        }
    }
}
