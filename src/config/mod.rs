//! Configuration and persistence module
//!
//! Handles:
//! - User configuration (`config.toml` in the platform config directory)
//! - UI preferences (`preferences.json` in the platform data directory)

mod settings;
mod storage;

pub use settings::*;
pub use storage::*;
