//! Display surface the controller renders into

use std::time::Instant;

use super::output::OutputLine;

/// How the input field should receive focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Focus right away
    Immediate,
    /// Focus at this instant, once the overlay's open transition has had
    /// time to finish
    At(Instant),
}

/// Minimal rendering surface: an append-only text area, an overlay that can
/// be shown or hidden, and an input field that can take focus.
pub trait Display {
    /// Append a text line (never interpreted as markup)
    fn append_line(&mut self, line: &OutputLine);

    /// Remove every line from the output area
    fn clear_output(&mut self);

    /// Show or hide the overlay
    fn set_visible(&mut self, visible: bool);

    /// Move input focus to the terminal input field
    fn focus_input(&mut self, request: FocusRequest);

    /// Scroll the output area to its newest line
    fn scroll_to_bottom(&mut self);
}

/// Everything a display was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Append(OutputLine),
    Clear,
    Visible(bool),
    Focus(FocusRequest),
    ScrollToBottom,
}

/// Display without a screen. Records every call in order, which makes it
/// the surface of choice for headless drivers and tests.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    pub events: Vec<DisplayEvent>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently on screen, replaying appends and clears
    pub fn visible_lines(&self) -> Vec<&OutputLine> {
        let mut lines = Vec::new();
        for event in &self.events {
            match event {
                DisplayEvent::Append(line) => lines.push(line),
                DisplayEvent::Clear => lines.clear(),
                _ => {}
            }
        }
        lines
    }

    /// Most recent visibility, `false` if never set
    pub fn is_visible(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                DisplayEvent::Visible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Display for HeadlessDisplay {
    fn append_line(&mut self, line: &OutputLine) {
        self.events.push(DisplayEvent::Append(line.clone()));
    }

    fn clear_output(&mut self) {
        self.events.push(DisplayEvent::Clear);
    }

    fn set_visible(&mut self, visible: bool) {
        self.events.push(DisplayEvent::Visible(visible));
    }

    fn focus_input(&mut self, request: FocusRequest) {
        self.events.push(DisplayEvent::Focus(request));
    }

    fn scroll_to_bottom(&mut self) {
        self.events.push(DisplayEvent::ScrollToBottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_lines_replays_clear() {
        let mut display = HeadlessDisplay::new();
        display.append_line(&OutputLine::echo("one"));
        display.clear_output();
        display.append_line(&OutputLine::echo("two"));

        let lines = display.visible_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "two");
    }

    #[test]
    fn test_visibility_tracks_last_call() {
        let mut display = HeadlessDisplay::new();
        assert!(!display.is_visible());
        display.set_visible(true);
        assert!(display.is_visible());
        display.set_visible(false);
        assert!(!display.is_visible());
    }
}
