//! Terminal UI module using ratatui
//!
//! Renders the portfolio page in the terminal:
//! - Header with the owner's name (tap it to open the terminal)
//! - `profile.json` window with working traffic lights
//! - Footer with the visitor line and a light/dark theme toggle
//! - The faux terminal overlay

mod app;
mod event;
mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use theme::*;
pub use widgets::*;
