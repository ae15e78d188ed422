//! Rendered output lines

use serde::{Deserialize, Serialize};

/// Styling class of a command response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Result,
    Error,
}

/// Text produced by a command, with the class it is displayed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub text: String,
    pub kind: ResponseKind,
}

impl RenderedResponse {
    pub fn result(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ResponseKind::Result,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ResponseKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }
}

/// Kind of a line in the output log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Prompt echoes and completion hints, unstyled
    Echo,
    /// Command response
    Response(ResponseKind),
}

impl LineKind {
    /// CSS class the line is tagged with, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            LineKind::Echo => None,
            LineKind::Response(ResponseKind::Result) => Some("cmd-result"),
            LineKind::Response(ResponseKind::Error) => Some("cmd-error"),
        }
    }
}

/// One entry of the output log. The text is never interpreted as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub kind: LineKind,
}

impl OutputLine {
    pub fn echo(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LineKind::Echo,
        }
    }
}

impl From<RenderedResponse> for OutputLine {
    fn from(response: RenderedResponse) -> Self {
        Self {
            text: response.text,
            kind: LineKind::Response(response.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_classes() {
        assert_eq!(LineKind::Echo.css_class(), None);
        assert_eq!(
            LineKind::Response(ResponseKind::Result).css_class(),
            Some("cmd-result")
        );
        assert_eq!(
            LineKind::Response(ResponseKind::Error).css_class(),
            Some("cmd-error")
        );
    }

    #[test]
    fn test_response_into_line_keeps_kind() {
        let line: OutputLine = RenderedResponse::error("nope").into();
        assert_eq!(line.text, "nope");
        assert_eq!(line.kind, LineKind::Response(ResponseKind::Error));
    }
}
