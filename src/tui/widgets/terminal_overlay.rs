//! Terminal overlay widget
//!
//! [`OverlayState`] is the TUI's [`Display`]: it keeps its own copy of the
//! output lines, the overlay visibility, whether the input line has focus,
//! and the scroll position. [`TerminalOverlay`] draws it.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::terminal::{Display, FocusRequest, LineKind, OutputLine, ResponseKind};
use crate::tui::theme::Theme;

const CURSOR: &str = "█";

/// Rendering state of the overlay
#[derive(Debug, Default)]
pub struct OverlayState {
    lines: Vec<OutputLine>,
    visible: bool,
    input_focused: bool,
    /// Focus deferred until the overlay has finished opening
    pending_focus: Option<Instant>,
    /// Current scroll offset (rows from top)
    pub scroll_offset: u16,
    /// Total number of rows in the output
    pub total_rows: usize,
    /// Visible height
    pub visible_height: u16,
    /// Follow new output
    stick_to_bottom: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            stick_to_bottom: true,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether keys go to the terminal input line
    pub fn input_focused(&self) -> bool {
        self.visible && self.input_focused
    }

    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    /// Hand focus to the input once a deferred request is due
    pub fn apply_pending_focus(&mut self, now: Instant) {
        if let Some(due) = self.pending_focus {
            if now >= due {
                self.pending_focus = None;
                self.input_focused = self.visible;
            }
        }
    }

    /// Recount rows for a new viewport height
    pub fn set_viewport(&mut self, visible_height: u16) {
        self.total_rows = self.lines.iter().map(row_count).sum();
        self.visible_height = visible_height;

        if self.stick_to_bottom {
            self.scroll_offset = self.max_scroll();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    pub fn page_up(&mut self) {
        let page = self.visible_height.saturating_sub(2).max(1);
        self.scroll_offset = self.scroll_offset.saturating_sub(page);
        self.stick_to_bottom = self.scroll_offset >= self.max_scroll();
    }

    pub fn page_down(&mut self) {
        let page = self.visible_height.saturating_sub(2).max(1);
        self.scroll_offset = self.scroll_offset.saturating_add(page).min(self.max_scroll());
        self.stick_to_bottom = self.scroll_offset >= self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        self.total_rows
            .saturating_sub(self.visible_height as usize)
            .min(u16::MAX as usize) as u16
    }
}

impl Display for OverlayState {
    fn append_line(&mut self, line: &OutputLine) {
        self.lines.push(line.clone());
    }

    fn clear_output(&mut self) {
        self.lines.clear();
        self.total_rows = 0;
        self.scroll_offset = 0;
        self.stick_to_bottom = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.input_focused = false;
            self.pending_focus = None;
        }
    }

    fn focus_input(&mut self, request: FocusRequest) {
        match request {
            FocusRequest::Immediate => {
                self.input_focused = true;
                self.pending_focus = None;
            }
            FocusRequest::At(due) => {
                self.pending_focus = Some(due);
            }
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_offset = self.max_scroll();
    }
}

/// One output line takes a row per embedded newline
fn row_count(line: &OutputLine) -> usize {
    line.text.split('\n').count()
}

/// Overlay widget: output area above the prompt line
pub struct TerminalOverlay<'a> {
    state: &'a OverlayState,
    prompt: &'a str,
    input: &'a str,
    theme: &'a Theme,
}

impl<'a> TerminalOverlay<'a> {
    pub fn new(state: &'a OverlayState, prompt: &'a str, input: &'a str, theme: &'a Theme) -> Self {
        Self {
            state,
            prompt,
            input,
            theme,
        }
    }

    /// Height of the output area inside an overlay drawn at `area`
    pub fn output_height(area: Rect) -> u16 {
        area.height.saturating_sub(3)
    }

    fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Echo => Style::default().fg(self.theme.overlay_fg),
            LineKind::Response(ResponseKind::Result) => Style::default().fg(self.theme.cmd_result),
            LineKind::Response(ResponseKind::Error) => Style::default()
                .fg(self.theme.cmd_error)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl<'a> Widget for TerminalOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.overlay_fg))
            .style(self.theme.overlay());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Text is never interpreted: each row is a raw span
        let rows: Vec<Line<'_>> = self
            .state
            .lines
            .iter()
            .flat_map(|line| {
                let style = self.line_style(line.kind);
                line.text
                    .split('\n')
                    .map(move |row| Line::styled(row.to_string(), style))
            })
            .collect();

        let output_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        Paragraph::new(rows)
            .scroll((self.state.scroll_offset, 0))
            .render(output_area, buf);

        let mut input_line = vec![
            Span::styled(
                self.prompt.to_string(),
                Style::default()
                    .fg(self.theme.overlay_prompt)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.input.to_string(), Style::default().fg(self.theme.overlay_fg)),
        ];
        if self.state.input_focused() {
            input_line.push(Span::styled(
                CURSOR,
                Style::default()
                    .fg(self.theme.overlay_fg)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let input_area = Rect {
            y: inner.bottom().saturating_sub(1),
            height: 1,
            ..inner
        };
        Paragraph::new(Line::from(input_line)).render(input_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::RenderedResponse;
    use crate::tui::theme::ColorMode;
    use std::time::Duration;

    fn filled(count: usize) -> OverlayState {
        let mut state = OverlayState::new();
        for i in 0..count {
            state.append_line(&OutputLine::echo(format!("line {}", i)));
        }
        state
    }

    #[test]
    fn test_sticks_to_bottom_on_new_output() {
        let mut state = filled(30);
        state.set_viewport(10);
        assert_eq!(state.scroll_offset, 20);

        state.append_line(&OutputLine::echo("more"));
        state.set_viewport(10);
        assert_eq!(state.scroll_offset, 21);
    }

    #[test]
    fn test_paging_detaches_and_reattaches() {
        let mut state = filled(30);
        state.set_viewport(10);

        state.page_up();
        assert_eq!(state.scroll_offset, 12);
        state.append_line(&OutputLine::echo("more"));
        state.set_viewport(10);
        assert_eq!(state.scroll_offset, 12);

        state.page_down();
        state.page_down();
        assert_eq!(state.scroll_offset, 21);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset, 21);
    }

    #[test]
    fn test_multiline_text_counts_rows() {
        let mut state = OverlayState::new();
        state.append_line(&RenderedResponse::result("a\nb\nc").into());
        state.append_line(&OutputLine::echo(""));
        state.set_viewport(2);
        assert_eq!(state.total_rows, 4);
        assert_eq!(state.scroll_offset, 2);
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut state = filled(30);
        state.set_viewport(10);
        state.clear_output();
        assert!(state.lines().is_empty());
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_deferred_focus() {
        let mut state = OverlayState::new();
        state.set_visible(true);
        let opened = Instant::now();
        state.focus_input(FocusRequest::At(opened + Duration::from_millis(100)));
        assert!(!state.input_focused());
        assert!(state.has_pending_focus());

        state.apply_pending_focus(opened + Duration::from_millis(99));
        assert!(!state.input_focused());

        state.apply_pending_focus(opened + Duration::from_millis(100));
        assert!(state.input_focused());
        assert!(!state.has_pending_focus());
    }

    #[test]
    fn test_hiding_drops_focus() {
        let mut state = OverlayState::new();
        state.set_visible(true);
        state.focus_input(FocusRequest::Immediate);
        assert!(state.input_focused());
        state.set_visible(false);
        assert!(!state.input_focused());
    }

    #[test]
    fn test_renders_prompt_and_markup_verbatim() {
        let mut state = OverlayState::new();
        state.set_visible(true);
        state.focus_input(FocusRequest::Immediate);
        state.append_line(&OutputLine::echo("<b>hi</b>"));
        state.set_viewport(TerminalOverlay::output_height(Rect::new(0, 0, 40, 6)));

        let theme = Theme::dark(ColorMode::Basic);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        TerminalOverlay::new(&state, "guest@chelun:~$ ", "hel", &theme).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(1).contains("<b>hi</b>"));
        assert!(row(4).contains("guest@chelun:~$ hel█"));
    }
}
