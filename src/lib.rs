//! chelun-site - A personal portfolio with a hidden faux terminal
//!
//! The same page is available two ways: served over HTTP with the visitor's
//! edge location filled in, or rendered straight into your terminal.
//!
//! # Architecture
//!
//! The faux terminal is a synchronous state machine that knows nothing about
//! its host. Hosts plug in through two traits:
//! - **Display** - where output lines, visibility and focus go
//! - **WindowState** - the profile window that `reboot` restores
//!
//! # Modules
//!
//! - [`terminal`] - Session state, command table and the controller
//! - [`site`] - axum router, page template and security headers
//! - [`tui`] - ratatui rendering of the page and the overlay
//! - [`config`] - Configuration and preference persistence
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod site;
pub mod terminal;
pub mod tui;

pub use config::{Config, Preferences};
pub use error::{Error, Result};
pub use terminal::{TerminalController, TerminalKey, VisitorInfo};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
