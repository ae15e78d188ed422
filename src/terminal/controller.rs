//! Terminal session controller
//!
//! Owns the [`Session`] and turns key events into state transitions, command
//! dispatch and display calls. Every method runs to completion synchronously;
//! the only notion of time is the tap gesture deadline, which callers feed
//! with explicit instants.

use std::time::{Duration, Instant};

use tracing::debug;

use super::command::{self, CommandContext, CommandOutcome};
use super::display::{Display, FocusRequest};
use super::gesture::TapGesture;
use super::output::OutputLine;
use super::session::{History, Session};
use super::visitor::VisitorInfo;
use super::window::WindowState;
use crate::config::TerminalConfig;

/// Keys the terminal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKey {
    Enter,
    Up,
    Down,
    Tab,
    Escape,
    Backspace,
    Char(char),
}

/// Whether the host should still perform the key's default action
/// (cursor movement, focus traversal, the `~` being typed, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHandling {
    Default,
    PreventDefault,
}

pub struct TerminalController<D: Display, W: WindowState> {
    session: Session,
    visitor: Option<VisitorInfo>,
    prompt: String,
    tap: TapGesture,
    tap_focus_delay: Duration,
    display: D,
    window: W,
}

impl<D: Display, W: WindowState> TerminalController<D, W> {
    /// Create a closed terminal with an empty history
    pub fn new(config: &TerminalConfig, visitor: Option<VisitorInfo>, display: D, window: W) -> Self {
        let mut controller = Self {
            session: Session::new(),
            visitor,
            prompt: config.prompt.clone(),
            tap: TapGesture::new(config.tap_count, config.tap_window()),
            tap_focus_delay: config.tap_focus_delay(),
            display,
            window,
        };

        if !config.greeting.is_empty() {
            controller.print(OutputLine::echo(config.greeting.clone()));
            controller.print(OutputLine::echo(""));
        }

        controller
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open
    }

    pub fn input(&self) -> &str {
        &self.session.input
    }

    pub fn history(&self) -> &History {
        &self.session.history
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.session.output
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn visitor(&self) -> Option<&VisitorInfo> {
        self.visitor.as_ref()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Replace the input line
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.session.input = value.into();
    }

    /// Flip visibility. Opening moves focus to the input field.
    pub fn toggle(&mut self) {
        let open = !self.session.is_open;
        self.set_open(open, FocusRequest::Immediate);
    }

    /// Close if open. Never opens.
    pub fn close(&mut self) {
        if self.session.is_open {
            self.toggle();
        }
    }

    fn set_open(&mut self, open: bool, focus: FocusRequest) {
        self.session.is_open = open;
        self.display.set_visible(open);
        if open {
            self.display.focus_input(focus);
        }
        debug!(open, "Terminal visibility changed");
    }

    /// A tap on the page title. Completing the gesture opens the terminal
    /// and asks for a deferred focus; returns whether it completed.
    pub fn tap_title(&mut self, now: Instant) -> bool {
        if !self.tap.tap(now) {
            return false;
        }
        debug!("Tap gesture completed");
        self.set_open(true, FocusRequest::At(now + self.tap_focus_delay));
        true
    }

    /// Let time-based state catch up (the tap streak deadline)
    pub fn tick(&mut self, now: Instant) {
        self.tap.expire(now);
    }

    /// A key pressed while focus is outside the terminal input field.
    /// `modified` is set when Ctrl, Alt or Meta is held.
    pub fn handle_page_key(&mut self, key: TerminalKey, modified: bool) -> KeyHandling {
        match key {
            TerminalKey::Char('`' | '~') if !modified => {
                self.toggle();
                KeyHandling::PreventDefault
            }
            TerminalKey::Escape if self.session.is_open => {
                self.close();
                KeyHandling::Default
            }
            _ => KeyHandling::Default,
        }
    }

    /// A key pressed inside the terminal input field
    pub fn handle_input_key(&mut self, key: TerminalKey) -> KeyHandling {
        match key {
            TerminalKey::Enter => {
                self.submit();
                KeyHandling::Default
            }
            TerminalKey::Up => {
                self.history_up();
                KeyHandling::PreventDefault
            }
            TerminalKey::Down => {
                self.history_down();
                KeyHandling::PreventDefault
            }
            TerminalKey::Tab => {
                self.complete();
                KeyHandling::PreventDefault
            }
            TerminalKey::Escape => {
                self.close();
                KeyHandling::Default
            }
            TerminalKey::Backspace => {
                self.session.input.pop();
                KeyHandling::Default
            }
            TerminalKey::Char(c) => {
                self.session.input.push(c);
                KeyHandling::Default
            }
        }
    }

    /// Enter: echo the raw line, run it if it is not blank, remember it
    pub fn submit(&mut self) {
        let raw = std::mem::take(&mut self.session.input);
        self.print(OutputLine::echo(format!("{}{}", self.prompt, raw)));

        let command = command::normalize(&raw);
        if !command.is_empty() {
            self.run_command(&command);
            self.session.history.push(raw);
        }

        self.display.scroll_to_bottom();
    }

    /// ArrowUp
    pub fn history_up(&mut self) {
        if let Some(entry) = self.session.history.older() {
            self.session.input = entry.to_string();
        }
    }

    /// ArrowDown
    pub fn history_down(&mut self) {
        self.session.input = self.session.history.newer().to_string();
    }

    /// Tab: complete a unique prefix, or list the candidates
    pub fn complete(&mut self) {
        let typed = command::normalize(&self.session.input);
        if typed.is_empty() {
            return;
        }

        match command::completions(&typed).as_slice() {
            [] => {}
            [only] => self.session.input = only.to_string(),
            many => {
                self.print(OutputLine::echo(format!("{}{}", self.prompt, typed)));
                self.print(OutputLine::echo(many.join("  ")));
                self.display.scroll_to_bottom();
            }
        }
    }

    /// Dispatch an already normalized command and apply its outcome
    pub fn run_command(&mut self, command: &str) {
        debug!(command, "Dispatching terminal command");

        let mut ctx = CommandContext {
            visitor: self.visitor.as_ref(),
            window: &mut self.window,
        };
        let outcome = command::dispatch(command, &mut ctx);

        match outcome {
            CommandOutcome::Respond(response) => self.print(response.into()),
            CommandOutcome::ClearOutput => {
                self.session.output.clear();
                self.display.clear_output();
            }
            CommandOutcome::CloseTerminal => self.close(),
        }
    }

    fn print(&mut self, line: OutputLine) {
        self.display.append_line(&line);
        self.session.output.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::display::{DisplayEvent, HeadlessDisplay};
    use crate::terminal::output::{LineKind, ResponseKind};
    use crate::terminal::window::ProfileWindow;
    use pretty_assertions::assert_eq;

    fn quiet_config() -> TerminalConfig {
        TerminalConfig {
            greeting: String::new(),
            ..TerminalConfig::default()
        }
    }

    fn controller() -> TerminalController<HeadlessDisplay, ProfileWindow> {
        TerminalController::new(
            &quiet_config(),
            Some(VisitorInfo::local()),
            HeadlessDisplay::new(),
            ProfileWindow::new(),
        )
    }

    fn type_line(term: &mut TerminalController<HeadlessDisplay, ProfileWindow>, text: &str) {
        for c in text.chars() {
            term.handle_input_key(TerminalKey::Char(c));
        }
    }

    #[test]
    fn test_greeting_is_seeded() {
        let term = TerminalController::new(
            &TerminalConfig::default(),
            None,
            HeadlessDisplay::new(),
            ProfileWindow::new(),
        );
        assert_eq!(term.output().len(), 2);
        assert!(term.output()[0].text.contains("help"));
        assert!(!term.is_open());
    }

    #[test]
    fn test_toggle_focuses_on_open_only() {
        let mut term = controller();
        term.toggle();
        assert!(term.is_open());
        term.toggle();
        assert!(!term.is_open());

        assert_eq!(
            term.display().events,
            vec![
                DisplayEvent::Visible(true),
                DisplayEvent::Focus(FocusRequest::Immediate),
                DisplayEvent::Visible(false),
            ]
        );
    }

    #[test]
    fn test_submit_echoes_raw_and_keeps_raw_history() {
        let mut term = controller();
        type_line(&mut term, "  About ");
        term.handle_input_key(TerminalKey::Enter);

        assert_eq!(term.input(), "");
        assert_eq!(term.output()[0], OutputLine::echo("guest@chelun:~$   About "));
        assert_eq!(term.output()[1].kind, LineKind::Response(ResponseKind::Result));
        assert_eq!(term.history().entries(), &["  About ".to_string()]);
        assert!(term.history().is_at_end());
        assert_eq!(
            term.display().events.last(),
            Some(&DisplayEvent::ScrollToBottom)
        );
    }

    #[test]
    fn test_blank_submit_is_echoed_but_not_recorded() {
        let mut term = controller();
        type_line(&mut term, "   ");
        term.submit();

        assert_eq!(term.output(), &[OutputLine::echo("guest@chelun:~$    ")]);
        assert!(term.history().is_empty());
    }

    #[test]
    fn test_exit_closes_and_never_reopens() {
        let mut term = controller();
        term.toggle();
        term.run_command("exit");
        assert!(!term.is_open());

        term.run_command("exit");
        assert!(!term.is_open());
    }

    #[test]
    fn test_escape_only_closes() {
        let mut term = controller();
        assert_eq!(
            term.handle_page_key(TerminalKey::Escape, false),
            KeyHandling::Default
        );
        assert!(!term.is_open());

        term.toggle();
        term.handle_input_key(TerminalKey::Escape);
        assert!(!term.is_open());
    }

    #[test]
    fn test_backtick_toggles_unless_modified() {
        let mut term = controller();
        assert_eq!(
            term.handle_page_key(TerminalKey::Char('`'), true),
            KeyHandling::Default
        );
        assert!(!term.is_open());

        assert_eq!(
            term.handle_page_key(TerminalKey::Char('~'), false),
            KeyHandling::PreventDefault
        );
        assert!(term.is_open());
    }

    #[test]
    fn test_tilde_inside_input_is_text() {
        let mut term = controller();
        term.toggle();
        term.handle_input_key(TerminalKey::Char('~'));
        assert!(term.is_open());
        assert_eq!(term.input(), "~");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut term = controller();
        term.run_command("help");
        term.run_command("about");
        term.run_command("clear");
        assert!(term.output().is_empty());
        assert!(term.display().visible_lines().is_empty());
    }

    #[test]
    fn test_tap_gesture_opens_with_deferred_focus() {
        let mut term = controller();
        let start = Instant::now();
        for i in 0..4 {
            assert!(!term.tap_title(start + Duration::from_millis(i * 50)));
        }
        assert!(term.tap_title(start + Duration::from_millis(200)));
        assert!(term.is_open());
        assert_eq!(
            term.display().events.last(),
            Some(&DisplayEvent::Focus(FocusRequest::At(start + Duration::from_millis(300))))
        );

        // A completed gesture while open keeps it open
        let later = start + Duration::from_secs(5);
        for i in 0..5 {
            term.tap_title(later + Duration::from_millis(i * 50));
        }
        assert!(term.is_open());
    }

    #[test]
    fn test_tick_expires_tap_streak() {
        let mut term = controller();
        let start = Instant::now();
        for i in 0..4 {
            term.tap_title(start + Duration::from_millis(i * 50));
        }
        term.tick(start + Duration::from_secs(1));
        assert!(!term.tap_title(start + Duration::from_millis(1010)));
        assert!(!term.is_open());
    }

    #[test]
    fn test_navigation_keys_prevent_default() {
        let mut term = controller();
        assert_eq!(term.handle_input_key(TerminalKey::Up), KeyHandling::PreventDefault);
        assert_eq!(term.handle_input_key(TerminalKey::Down), KeyHandling::PreventDefault);
        assert_eq!(term.handle_input_key(TerminalKey::Tab), KeyHandling::PreventDefault);
        assert_eq!(term.handle_input_key(TerminalKey::Enter), KeyHandling::Default);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut term = controller();
        type_line(&mut term, "helpx");
        term.handle_input_key(TerminalKey::Backspace);
        assert_eq!(term.input(), "help");
    }
}
