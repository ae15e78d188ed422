//! Event handling for the TUI
//!
//! Provides an async event stream that combines:
//! - Terminal input events (keyboard, mouse)
//! - Render ticks, which also drive the tap deadline and deferred focus

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::terminal::TerminalKey;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(InputEvent),
    /// Render tick
    Tick,
}

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(crossterm::event::MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Page-level actions, used while the terminal input does not have focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Switch between the light and dark scheme
    ToggleTheme,
    /// Red traffic light
    PowerOff,
    /// Yellow traffic light
    Minimize,
    /// Scroll the overlay output up
    PageUp,
    /// Scroll the overlay output down
    PageDown,
    /// Quit application
    Quit,
}

impl UserCommand {
    /// Convert a key event to a user command
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('t'), KeyModifiers::NONE) => Some(UserCommand::ToggleTheme),
            (KeyCode::Char('x'), KeyModifiers::NONE) => Some(UserCommand::PowerOff),
            (KeyCode::Char('m'), KeyModifiers::NONE) => Some(UserCommand::Minimize),

            (KeyCode::PageUp, _) => Some(UserCommand::PageUp),
            (KeyCode::PageDown, _) => Some(UserCommand::PageDown),

            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(UserCommand::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(UserCommand::Quit),

            _ => None,
        }
    }
}

/// Ctrl-C quits from anywhere, including the terminal input
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a key event for the terminal controller. The flag is set when
/// Ctrl, Alt or Meta is held (Shift is part of typing `~`).
pub fn terminal_key(key: &KeyEvent) -> Option<(TerminalKey, bool)> {
    let modified = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::META);

    let key = match key.code {
        KeyCode::Enter => TerminalKey::Enter,
        KeyCode::Up => TerminalKey::Up,
        KeyCode::Down => TerminalKey::Down,
        KeyCode::Tab => TerminalKey::Tab,
        KeyCode::Esc => TerminalKey::Escape,
        KeyCode::Backspace => TerminalKey::Backspace,
        KeyCode::Char(c) => TerminalKey::Char(c),
        _ => return None,
    };

    Some((key, modified))
}

/// Event loop handle
pub struct EventLoop {
    /// Sender for events
    tx: mpsc::Sender<AppEvent>,
    /// Receiver for events
    rx: mpsc::Receiver<AppEvent>,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self { tx, rx }
    }

    /// Start the event loop
    ///
    /// This spawns background tasks for:
    /// - Terminal input
    /// - Render ticks
    pub fn start(&mut self, tick_rate: Duration) {
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = reader.next().fuse().await;

                match event {
                    Some(Ok(event)) => {
                        let app_event = match event {
                            CrosstermEvent::Key(key) => AppEvent::Input(InputEvent::Key(key)),
                            CrosstermEvent::Mouse(mouse) => {
                                AppEvent::Input(InputEvent::Mouse(mouse))
                            }
                            CrosstermEvent::Resize(w, h) => {
                                AppEvent::Input(InputEvent::Resize(w, h))
                            }
                            _ => continue,
                        };

                        if tx.send(app_event).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Error reading terminal event: {}", e);
                        continue;
                    }
                    None => break,
                }
            }
        });

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
