//! Configuration handling for the TUI

use crate::state::DEFAULT_COMMENT_LIMIT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Operator name used when none is configured
pub const DEFAULT_OPERATOR: &str = "operator";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Document database base URL
    pub backend_url: Option<String>,
    /// Blob store base URL
    pub storage_url: Option<String>,
    /// Bearer token sent with every request
    pub api_key: Option<String>,
    /// Operator name recorded on submissions and timesheets
    pub operator: Option<String>,
    /// UI language code ("en" or "nl")
    pub language: Option<String>,
    /// Maximum comment length on checklist items
    pub comment_limit: Option<usize>,
    /// Where downloaded reports and exports are written
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "fieldcheck", "fieldcheck-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn operator(&self) -> &str {
        self.operator
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(DEFAULT_OPERATOR)
    }

    pub fn comment_limit(&self) -> usize {
        self.comment_limit.unwrap_or(DEFAULT_COMMENT_LIMIT)
    }

    /// Directory for cached icons
    pub fn icon_cache_dir(&self) -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.cache_dir().join("icons"))
            .unwrap_or_else(|| std::env::temp_dir().join("fieldcheck-tui").join("icons"))
    }

    /// Directory for exported reports and timesheets
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("exports"))
                .unwrap_or_else(|| std::env::temp_dir().join("fieldcheck-tui").join("exports"))
        })
    }
}
