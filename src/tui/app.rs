//! Main TUI application
//!
//! Event-driven application that coordinates:
//! - Terminal rendering with ratatui
//! - Routing keys between the page and the terminal input
//! - Mouse hits on the title and the traffic lights

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use super::event::{is_interrupt, terminal_key, AppEvent, EventLoop, InputEvent, UserCommand};
use super::theme::{ColorMode, Theme, ThemeMode};
use super::widgets::{OverlayState, ProfileCard, TerminalOverlay, TrafficLight};
use crate::config::{Config, Preferences};
use crate::error::{Result, TuiError};
use crate::terminal::{KeyHandling, ProfileWindow, TerminalController, VisitorInfo};

const KEY_HINTS: &str = "~ terminal · t theme · x/m window · q quit";

/// Screen cells that react to clicks, refreshed on every render
#[derive(Debug, Clone, Copy, Default)]
struct HitAreas {
    title: Rect,
    red_light: Rect,
    yellow_light: Rect,
}

/// Main TUI application
pub struct App {
    /// Configuration
    config: Config,
    /// Persisted UI preferences
    preferences: Preferences,
    /// The faux terminal, rendering into the overlay
    terminal: TerminalController<OverlayState, ProfileWindow>,
    /// `profile.json` body
    profile_lines: Vec<String>,
    theme_mode: ThemeMode,
    color_mode: ColorMode,
    theme: Theme,
    hit_areas: HitAreas,
    should_quit: bool,
    /// Event loop
    event_loop: EventLoop,
}

impl App {
    /// Create a new application
    pub fn new(config: Config, preferences: Preferences) -> Self {
        let visitor = config
            .terminal
            .share_visitor_info
            .then(VisitorInfo::local);
        let terminal = TerminalController::new(
            &config.terminal,
            visitor,
            OverlayState::new(),
            ProfileWindow::new(),
        );

        let theme_mode = ThemeMode::preferred(preferences.theme);
        let color_mode = ColorMode::detect();

        Self {
            profile_lines: config.profile.json_lines(),
            config,
            preferences,
            terminal,
            theme_mode,
            color_mode,
            theme: Theme::new(theme_mode, color_mode),
            hit_areas: HitAreas::default(),
            should_quit: false,
            event_loop: EventLoop::new(),
        }
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(1000 / u64::from(self.config.ui_refresh_fps.max(1)));
        self.event_loop.start(tick_rate);

        let mut terminal = self.setup_terminal()?;

        info!("Entering main loop");
        let result = self.main_loop(&mut terminal).await;

        info!("Restoring terminal");
        self.restore_terminal(&mut terminal)?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal =
            Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        Ok(())
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match self.event_loop.next().await {
                Some(AppEvent::Input(input)) => self.handle_input(input, Instant::now()),
                Some(AppEvent::Tick) => self.on_tick(Instant::now()),
                None => break,
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn terminal(&self) -> &TerminalController<OverlayState, ProfileWindow> {
        &self.terminal
    }

    /// Tap deadline and deferred focus
    fn on_tick(&mut self, now: Instant) {
        self.terminal.tick(now);
        self.terminal.display_mut().apply_pending_focus(now);
    }

    /// Handle input events
    fn handle_input(&mut self, input: InputEvent, now: Instant) {
        match input {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            InputEvent::Resize(_, _) => {
                // Terminal will re-render automatically
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if is_interrupt(&key) {
            self.should_quit = true;
            return;
        }

        // Focus is in the input line: everything but paging is typed
        if self.terminal.display().input_focused() {
            match key.code {
                KeyCode::PageUp => self.terminal.display_mut().page_up(),
                KeyCode::PageDown => self.terminal.display_mut().page_down(),
                _ => {
                    if let Some((key, _)) = terminal_key(&key) {
                        self.terminal.handle_input_key(key);
                    }
                }
            }
            return;
        }

        if let Some((page_key, modified)) = terminal_key(&key) {
            if self.terminal.handle_page_key(page_key, modified) == KeyHandling::PreventDefault {
                return;
            }
        }

        if let Some(cmd) = UserCommand::from_key(key) {
            self.handle_command(cmd);
        }
    }

    /// Handle a page-level command
    fn handle_command(&mut self, cmd: UserCommand) {
        if self.terminal.is_open() {
            // Only paging reaches through an open overlay
            match cmd {
                UserCommand::PageUp => self.terminal.display_mut().page_up(),
                UserCommand::PageDown => self.terminal.display_mut().page_down(),
                _ => {}
            }
            return;
        }

        match cmd {
            UserCommand::ToggleTheme => self.toggle_theme(),
            UserCommand::PowerOff => self.terminal.window_mut().power_off(),
            UserCommand::Minimize => self.terminal.window_mut().minimize(),
            UserCommand::Quit => self.should_quit = true,
            UserCommand::PageUp | UserCommand::PageDown => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.terminal.is_open() {
            return;
        }

        let pos = Position::new(mouse.column, mouse.row);
        if self.hit_areas.title.contains(pos) {
            self.terminal.tap_title(now);
        } else if self.hit_areas.red_light.contains(pos) {
            debug!("Profile window powered off");
            self.terminal.window_mut().power_off();
        } else if self.hit_areas.yellow_light.contains(pos) {
            debug!("Profile window minimized");
            self.terminal.window_mut().minimize();
        }
    }

    fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggle();
        self.theme = Theme::new(self.theme_mode, self.color_mode);
        info!(theme = ?self.theme_mode, "Theme changed");

        if let Err(e) = self.preferences.set_theme(self.theme_mode) {
            warn!("Failed to save theme preference: {}", e);
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        frame.render_widget(Block::default().style(self.theme.page()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(size);

        self.render_theme_indicator(frame, chunks[0]);
        self.render_header(frame, chunks[1]);
        self.render_card(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);

        if self.terminal.is_open() {
            self.render_overlay(frame, size);
        }
    }

    fn render_theme_indicator(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(format!("{} ", self.theme_mode.label()))
            .style(self.theme.secondary())
            .alignment(Alignment::Right);
        frame.render_widget(paragraph, area);
    }

    /// Name, roles and GitHub handle. The name is the tap target.
    fn render_header(&mut self, frame: &mut Frame, area: Rect) {
        let profile = &self.config.profile;

        let name_width = (Line::raw(profile.name.as_str()).width() as u16).min(area.width);
        self.hit_areas.title = Rect::new(
            area.x + (area.width - name_width) / 2,
            area.y,
            name_width,
            area.height.min(1),
        );

        let mut roles = Vec::new();
        for (i, role) in profile.roles.iter().enumerate() {
            if i > 0 {
                roles.push(Span::styled(" / ", self.theme.secondary()));
            }
            roles.push(Span::raw(role.as_str()));
        }
        roles.push(Span::raw("  "));
        roles.push(Span::styled(
            format!("@{}", profile.github_user),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::UNDERLINED),
        ));

        let header = Paragraph::new(vec![
            Line::styled(profile.name.as_str(), self.theme.title()),
            Line::from(roles),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn render_card(&mut self, frame: &mut Frame, area: Rect) {
        let window = *self.terminal.window();
        let (width, height) = ProfileCard::desired_size(&self.profile_lines, &window);
        let width = width.min(area.width);
        let height = height.min(area.height);
        let card_area = Rect::new(area.x + (area.width - width) / 2, area.y, width, height);

        for (light, rect) in ProfileCard::traffic_lights(card_area) {
            match light {
                TrafficLight::Red => self.hit_areas.red_light = rect,
                TrafficLight::Yellow => self.hit_areas.yellow_light = rect,
                TrafficLight::Green => {}
            }
        }

        frame.render_widget(
            ProfileCard::new(&self.profile_lines, &self.theme, window),
            card_area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let visitor = self.terminal.visitor().cloned().unwrap_or_default();
        let footer = Paragraph::new(vec![
            Line::raw(format!(
                ":: CLIENT: {}, {} :: SERVED BY: {} ::",
                visitor.city, visitor.country, visitor.colo
            )),
            Line::styled(KEY_HINTS, self.theme.secondary()),
        ])
        .style(self.theme.secondary())
        .alignment(Alignment::Center);
        frame.render_widget(footer, area);
    }

    fn render_overlay(&mut self, frame: &mut Frame, area: Rect) {
        let overlay_area = centered_rect(80, 70, area);
        self.terminal
            .display_mut()
            .set_viewport(TerminalOverlay::output_height(overlay_area));

        let overlay = TerminalOverlay::new(
            self.terminal.display(),
            self.terminal.prompt(),
            self.terminal.input(),
            &self.theme,
        );
        frame.render_widget(overlay, overlay_area);
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::WindowState;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn app(temp_dir: &TempDir) -> App {
        let prefs = Preferences::load_from(&temp_dir.path().join("preferences.json")).unwrap();
        App::new(Config::default(), prefs)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
    }

    fn click(app: &mut App, rect: Rect, now: Instant) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(mouse, now);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);

        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.width < area.width);
        assert!(centered.height < area.height);
    }

    #[test]
    fn test_tilde_opens_and_keys_go_to_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);

        press(&mut app, KeyCode::Char('~'));
        assert!(app.terminal().is_open());
        assert!(app.terminal().display().input_focused());

        // 'q' is text now, not quit
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(app.terminal().input(), "q");
    }

    #[test]
    fn test_exit_closes_and_q_quits() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);

        press(&mut app, KeyCode::Char('`'));
        type_text(&mut app, "exit");
        press(&mut app, KeyCode::Enter);
        assert!(!app.terminal().is_open());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_from_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        press(&mut app, KeyCode::Char('~'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_window_keys_and_reboot() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.terminal().window().is_visible());

        press(&mut app, KeyCode::Char('~'));
        type_text(&mut app, "reboot");
        press(&mut app, KeyCode::Enter);
        assert!(app.terminal().window().is_visible());
    }

    #[test]
    fn test_theme_toggle_is_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let before = app.theme_mode();

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_mode(), before.toggle());

        let prefs = Preferences::load_from(&temp_dir.path().join("preferences.json")).unwrap();
        assert_eq!(prefs.theme, Some(before.toggle()));
    }

    #[test]
    fn test_render_shows_page() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let terminal = draw(&mut app);

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Che-Lun Liang"));
        assert!(screen.contains("profile.json"));
        assert!(screen.contains(":: CLIENT: Unknown City, Earth :: SERVED BY: DEV ::"));
    }

    #[test]
    fn test_five_taps_on_title_open_with_deferred_focus() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        draw(&mut app);

        let title = app.hit_areas.title;
        let now = Instant::now();
        for _ in 0..5 {
            click(&mut app, title, now);
        }
        assert!(app.terminal().is_open());
        assert!(!app.terminal().display().input_focused());

        app.on_tick(now + Duration::from_millis(99));
        assert!(!app.terminal().display().input_focused());

        app.on_tick(now + Duration::from_millis(100));
        assert!(app.terminal().display().input_focused());
    }

    #[test]
    fn test_traffic_light_clicks() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        draw(&mut app);

        let yellow = app.hit_areas.yellow_light;
        click(&mut app, yellow, Instant::now());
        assert!(app.terminal().window().is_minimized());

        let red = app.hit_areas.red_light;
        click(&mut app, red, Instant::now());
        assert!(app.terminal().window().is_powered_off());
    }
}
