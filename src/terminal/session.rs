//! In-memory state of one terminal overlay

use super::output::OutputLine;

/// Submitted lines with a navigation cursor.
///
/// The cursor ranges over `0..=len`; `len` is the "at end" position, one
/// past the newest entry, where the input line is blank.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw line and park the cursor at the end
    pub fn push(&mut self, raw: impl Into<String>) {
        self.entries.push(raw.into());
        self.cursor = self.entries.len();
    }

    /// Step towards older entries. `None` when there is nothing older,
    /// in which case the input line stays as it is.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step towards newer entries. Stepping past the newest one lands on
    /// the blank line at the end and stays there.
    pub fn newer(&mut self) -> &str {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            &self.entries[self.cursor]
        } else {
            self.cursor = self.entries.len();
            ""
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One terminal session. Lives until the process exits and is never saved.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) is_open: bool,
    pub(crate) input: String,
    pub(crate) history: History,
    pub(crate) output: Vec<OutputLine>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Current contents of the input line
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Output log, oldest line first
    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> History {
        let mut history = History::new();
        for line in lines {
            history.push(*line);
        }
        history
    }

    #[test]
    fn test_older_walks_back_and_stops_at_oldest() {
        let mut history = history_of(&["help", "whoami", "about"]);
        assert!(history.is_at_end());

        assert_eq!(history.older(), Some("about"));
        assert_eq!(history.older(), Some("whoami"));
        assert_eq!(history.older(), Some("help"));
        assert_eq!(history.older(), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_newer_returns_to_blank_line() {
        let mut history = history_of(&["help", "whoami"]);
        history.older();
        history.older();

        assert_eq!(history.newer(), "whoami");
        assert_eq!(history.newer(), "");
        assert!(history.is_at_end());
        assert_eq!(history.newer(), "");
        assert!(history.is_at_end());
    }

    #[test]
    fn test_empty_history_navigation() {
        let mut history = History::new();
        assert_eq!(history.older(), None);
        assert_eq!(history.newer(), "");
        assert!(history.is_at_end());
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut history = history_of(&["help", "about"]);
        history.older();
        history.older();
        history.push("clear");
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.older(), Some("clear"));
    }
}
