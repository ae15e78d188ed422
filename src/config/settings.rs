//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables → CLI args

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::site::Profile;

/// Prompt echoed in front of every submitted line
pub const DEFAULT_PROMPT: &str = "guest@chelun:~$ ";

/// Banner printed when the terminal session starts
pub const DEFAULT_GREETING: &str =
    "你闖入了我的終端機, 你...你...你想幹嘛？ 輸入 'help' 可以看到所有可使用的指令。";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP site settings
    pub site: SiteConfig,

    /// Portfolio content shown on the page and in the TUI
    pub profile: Profile,

    /// Faux terminal behaviour
    pub terminal: TerminalConfig,

    /// UI refresh rate in FPS
    pub ui_refresh_fps: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path used by the TUI (defaults to the data directory)
    pub log_file: Option<PathBuf>,
}

/// HTTP site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical origin used in Open Graph tags, robots.txt and the sitemap
    pub domain: String,

    /// Address the server listens on
    pub bind_addr: String,

    /// Directory with extra static files (favicon, social image)
    pub public_dir: Option<PathBuf>,

    /// `max-age` advertised in `Cache-Control`
    pub cache_max_age_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "https://www.chelunliang.com".to_string(),
            bind_addr: "127.0.0.1:8787".to_string(),
            public_dir: None,
            cache_max_age_secs: 3600,
        }
    }
}

/// Faux terminal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Prompt echoed before each submitted line
    pub prompt: String,

    /// Banner seeded into the output log at startup (empty disables it)
    pub greeting: String,

    /// Number of title taps that open the terminal
    pub tap_count: u32,

    /// Maximum gap between two taps of one streak, in milliseconds
    pub tap_window_ms: u64,

    /// Delay before focusing the input after a tap-opened terminal
    pub tap_focus_delay_ms: u64,

    /// Whether `whoami` may reveal connection info
    pub share_visitor_info: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            tap_count: 5,
            tap_window_ms: 500,
            tap_focus_delay_ms: 100,
            share_visitor_info: true,
        }
    }
}

impl TerminalConfig {
    pub fn tap_window(&self) -> Duration {
        Duration::from_millis(self.tap_window_ms)
    }

    pub fn tap_focus_delay(&self) -> Duration {
        Duration::from_millis(self.tap_focus_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            profile: Profile::default(),
            terminal: TerminalConfig::default(),
            ui_refresh_fps: 30,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration using a specific config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables (CHELUN_SITE__BIND_ADDR, etc.)
            .merge(Env::prefixed("CHELUN_").split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the terminal state machine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.terminal.tap_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "terminal.tap_count".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.ui_refresh_fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ui_refresh_fps".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the preferences file path
    pub fn preferences_file_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("preferences.json"))
    }

    /// Get the TUI log file path
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("chelun-site.log")),
        }
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        let dirs = Self::project_dirs()?;

        std::fs::create_dir_all(dirs.config_dir()).map_err(|_e| {
            Error::Config(ConfigError::DirectoryCreationFailed(
                dirs.config_dir().to_path_buf(),
            ))
        })?;

        std::fs::create_dir_all(dirs.data_dir()).map_err(|_e| {
            Error::Config(ConfigError::DirectoryCreationFailed(
                dirs.data_dir().to_path_buf(),
            ))
        })?;

        Ok(())
    }

    /// Save current configuration to the default file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save current configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(config_path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "chelunliang", "chelun-site").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}
