//! Error types for chelun-site
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.
//!
//! The faux terminal has no error type of its own: an unrecognized command is
//! rendered as an error-styled output line and never leaves the session.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for chelun-site
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// HTTP site errors
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Failed to bind {addr}: {reason}")]
    BindFailed { addr: String, reason: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Server error: {0}")]
    Serve(String),
}

impl From<minijinja::Error> for SiteError {
    fn from(e: minijinja::Error) -> Self {
        SiteError::Template(e.to_string())
    }
}

impl From<minijinja::Error> for Error {
    fn from(e: minijinja::Error) -> Self {
        Error::Site(SiteError::Template(e.to_string()))
    }
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::DirectoryCreationFailed(PathBuf::from("/tmp/foo"));
        assert!(err.to_string().contains("/tmp/foo"));

        let err = SiteError::BindFailed {
            addr: "0.0.0.0:80".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("0.0.0.0:80"));

        let err = TuiError::InitFailed("no tty".to_string());
        assert!(err.to_string().contains("no tty"));
    }

    #[test]
    fn test_error_conversion() {
        let site_err = SiteError::Template("boom".to_string());
        let top_err: Error = site_err.into();
        assert!(top_err.to_string().starts_with("Site error"));

        let config_err = ConfigError::LoadFailed("bad toml".to_string());
        let _top_err: Error = config_err.into();
    }
}
