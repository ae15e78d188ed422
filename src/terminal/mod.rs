//! Faux terminal overlay
//!
//! A UI-agnostic interpreter for a handful of canned commands with a
//! conventional line editor around it:
//! - [`TerminalController`] - open/close, line submission, history, Tab completion
//! - [`command`] - the command table and its handlers
//! - [`Display`] - the rendering surface the controller writes to
//! - [`WindowState`] - the profile window `reboot` brings back
//! - [`TapGesture`] - rapid-tap trigger on the page title

pub mod command;
mod controller;
mod display;
mod gesture;
mod output;
mod session;
mod visitor;
mod window;

pub use command::{CommandOutcome, CommandSpec, COMMANDS};
pub use controller::*;
pub use display::*;
pub use gesture::*;
pub use output::*;
pub use session::*;
pub use visitor::*;
pub use window::*;
