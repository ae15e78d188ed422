//! `profile.json` code window
//!
//! A bordered window with traffic lights in its title bar. Its body depends
//! on the window state: the JSON lines, a dead screen after the red light,
//! or nothing at all after the yellow one.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::terminal::{ProfileWindow, WindowState};
use crate::tui::theme::Theme;

const TITLE: &str = " profile.json ";
const LIGHT: &str = "●";
const NO_SIGNAL: &str = "NO SIGNAL";

/// Horizontal padding inside the border
const PADDING: u16 = 2;

/// Which traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLight {
    Red,
    Yellow,
    Green,
}

pub struct ProfileCard<'a> {
    lines: &'a [String],
    theme: &'a Theme,
    window: ProfileWindow,
}

impl<'a> ProfileCard<'a> {
    pub fn new(lines: &'a [String], theme: &'a Theme, window: ProfileWindow) -> Self {
        Self {
            lines,
            theme,
            window,
        }
    }

    /// Width and height the window wants, like a `fit-content` box
    pub fn desired_size(lines: &[String], window: &ProfileWindow) -> (u16, u16) {
        let content_width = lines
            .iter()
            .map(|line| Line::raw(line.as_str()).width())
            .max()
            .unwrap_or(0);
        let width = (content_width as u16)
            .max(TITLE.len() as u16 + 8)
            .saturating_add(2 + PADDING * 2);

        let height = if window.is_minimized() {
            2
        } else {
            (lines.len() as u16).saturating_add(2)
        };

        (width, height)
    }

    /// Cells the traffic lights occupy in a window drawn at `area`
    pub fn traffic_lights(area: Rect) -> [(TrafficLight, Rect); 3] {
        let at = |offset: u16| Rect::new(area.x.saturating_add(offset), area.y, 1, 1);
        [
            (TrafficLight::Red, at(2)),
            (TrafficLight::Yellow, at(4)),
            (TrafficLight::Green, at(6)),
        ]
    }

    fn body(&self) -> Vec<Line<'a>> {
        if self.window.is_powered_off() {
            return vec![Line::styled(
                NO_SIGNAL,
                Style::default()
                    .fg(self.theme.json_comment)
                    .add_modifier(Modifier::DIM),
            )
            .alignment(Alignment::Center)];
        }

        self.lines
            .iter()
            .map(|line| highlight_json_line(line, self.theme))
            .collect()
    }
}

impl<'a> Widget for ProfileCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Line::styled(TITLE, self.theme.secondary()))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        for (light, rect) in Self::traffic_lights(area) {
            if rect.x >= area.right() {
                continue;
            }
            let color = match light {
                TrafficLight::Red => self.theme.light_red,
                TrafficLight::Yellow => self.theme.light_yellow,
                TrafficLight::Green => self.theme.light_green,
            };
            buf.set_string(rect.x, rect.y, LIGHT, Style::default().fg(color));
        }

        if self.window.is_minimized() || inner.height == 0 {
            return;
        }

        let padded = Rect {
            x: inner.x.saturating_add(PADDING),
            width: inner.width.saturating_sub(PADDING * 2),
            ..inner
        };
        Paragraph::new(self.body())
            .style(Style::default().fg(self.theme.text_primary))
            .render(padded, buf);
    }
}

/// Colour one line of the JSON body: keys, string values and the trailing
/// `//` comment
fn highlight_json_line<'a>(line: &str, theme: &Theme) -> Line<'a> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    if trimmed.starts_with("//") {
        return Line::from(vec![
            Span::raw(indent.to_string()),
            Span::styled(
                trimmed.to_string(),
                Style::default()
                    .fg(theme.json_comment)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
    }

    if let Some((key, value)) = trimmed.split_once("\": ") {
        let key = format!("{}\"", key);
        let value_style = if value.starts_with('"') {
            Style::default().fg(theme.json_string)
        } else {
            Style::default().fg(theme.text_primary)
        };
        return Line::from(vec![
            Span::raw(indent.to_string()),
            Span::styled(key, Style::default().fg(theme.json_key)),
            Span::raw(": "),
            Span::styled(value.to_string(), value_style),
        ]);
    }

    if trimmed.starts_with('"') {
        return Line::from(vec![
            Span::raw(indent.to_string()),
            Span::styled(trimmed.to_string(), Style::default().fg(theme.json_string)),
        ]);
    }

    Line::raw(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::ColorMode;

    fn lines() -> Vec<String> {
        vec![
            "{".to_string(),
            "  \"Status\": \"Online\",".to_string(),
            "  // tap the title".to_string(),
            "}".to_string(),
        ]
    }

    fn render(window: ProfileWindow) -> Buffer {
        let lines = lines();
        let theme = Theme::dark(ColorMode::Basic);
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        ProfileCard::new(&lines, &theme, window).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_title_bar_has_lights_and_name() {
        let buf = render(ProfileWindow::new());
        let top = row(&buf, 0);
        assert!(top.contains("profile.json"));
        assert_eq!(buf[(2, 0)].symbol(), "●");
        assert_eq!(buf[(4, 0)].symbol(), "●");
        assert_eq!(buf[(6, 0)].symbol(), "●");
    }

    #[test]
    fn test_body_shows_json() {
        let buf = render(ProfileWindow::new());
        assert!(row(&buf, 2).contains("\"Status\": \"Online\","));
    }

    #[test]
    fn test_powered_off_shows_no_signal() {
        let mut window = ProfileWindow::new();
        window.power_off();
        let buf = render(window);
        assert!(row(&buf, 1).contains(NO_SIGNAL));
        assert!(!row(&buf, 2).contains("Status"));
    }

    #[test]
    fn test_minimized_height() {
        let mut window = ProfileWindow::new();
        assert_eq!(ProfileCard::desired_size(&lines(), &window).1, 6);
        window.minimize();
        assert_eq!(ProfileCard::desired_size(&lines(), &window).1, 2);
    }

    #[test]
    fn test_traffic_light_cells() {
        let lights = ProfileCard::traffic_lights(Rect::new(10, 3, 30, 10));
        assert_eq!(lights[0], (TrafficLight::Red, Rect::new(12, 3, 1, 1)));
        assert_eq!(lights[1], (TrafficLight::Yellow, Rect::new(14, 3, 1, 1)));
    }

    #[test]
    fn test_highlight_splits_key_and_value() {
        let theme = Theme::dark(ColorMode::Basic);
        let line = highlight_json_line("  \"Status\": \"Online\",", &theme);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[1].content, "\"Status\"");
        assert_eq!(line.spans[3].content, "\"Online\",");
    }
}
