//! Persistent preference storage
//!
//! Stores the user's UI preferences in JSON format. Terminal session state is
//! deliberately absent: it lives only as long as the process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::tui::ThemeMode;

use super::Config;

/// Persistent UI preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Theme chosen with the theme toggle (unset means follow the terminal)
    #[serde(default)]
    pub theme: Option<ThemeMode>,

    /// Application version that last wrote this file
    #[serde(default)]
    pub version: String,

    /// Path to save preferences to (not serialized, set at load time)
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Preferences {
    /// Create empty preferences
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }

    /// Load preferences from the default location
    pub fn load() -> Result<Self> {
        let path = Config::preferences_file_path()?;
        Self::load_from(&path)
    }

    /// Load preferences from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut prefs = Self::new();
            prefs.path = Some(path.to_path_buf());
            return Ok(prefs);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadFailed(format!("Failed to read preferences file: {}", e))
        })?;

        let mut prefs: Preferences = serde_json::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed(format!("Failed to parse preferences file: {}", e))
        })?;

        prefs.version = env!("CARGO_PKG_VERSION").to_string();
        prefs.path = Some(path.to_path_buf());

        Ok(prefs)
    }

    /// Save preferences to the remembered location (or default if none)
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => Config::preferences_file_path()?,
        };
        self.save_to(&path)
    }

    /// Save preferences to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create data directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to serialize preferences: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to write preferences file: {}", e))
        })?;

        Ok(())
    }

    /// Remember a theme choice and persist it
    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<()> {
        self.theme = Some(theme);
        self.save()
    }
}
