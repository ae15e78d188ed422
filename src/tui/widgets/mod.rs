//! TUI widgets
//!
//! Custom ratatui widgets for the application:
//! - `ProfileCard` - The `profile.json` window with its traffic lights
//! - `TerminalOverlay` - The faux terminal drawn over the page

mod profile_card;
mod terminal_overlay;

pub use profile_card::*;
pub use terminal_overlay::*;
