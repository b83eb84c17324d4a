//! Status line composition from pluggable providers.

use crate::core::output::{Color, COLOR_RESET};
use crate::runtime::session::Focus;

/// A small labeled status segment. Implementations are rebuilt fresh each
/// tick from current session state.
pub trait Status {
    fn text(&self) -> String;
    fn color(&self) -> Color;
}

/// Joins colored segments with `" | "`, dropping empty ones.
///
/// The key-legend suffix is appended by the session, not here.
#[derive(Default)]
pub struct StatusBar {
    statuses: Vec<Box<dyn Status>>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_status(&mut self, status: Box<dyn Status>) {
        self.statuses.push(status);
    }

    pub fn set_statuses(&mut self, statuses: Vec<Box<dyn Status>>) {
        self.statuses = statuses;
    }

    pub fn render(&self) -> String {
        let segments: Vec<String> = self
            .statuses
            .iter()
            .filter_map(|status| {
                let text = status.text();
                if text.is_empty() {
                    return None;
                }
                Some(format!("{}{}{}", status.color().code(), text, COLOR_RESET))
            })
            .collect();
        segments.join(" | ")
    }
}

/// Current focus mode label.
pub struct ModeStatus {
    focus: Focus,
}

impl ModeStatus {
    pub fn new(focus: Focus) -> Self {
        Self { focus }
    }
}

impl Status for ModeStatus {
    fn text(&self) -> String {
        match self.focus {
            Focus::Input => "INPUT".to_string(),
            Focus::Output => "VIEW".to_string(),
        }
    }

    fn color(&self) -> Color {
        Color::Yellow
    }
}

/// 1-based cursor position inside the input panel.
pub struct CursorPositionStatus {
    row: usize,
    col: usize,
}

impl CursorPositionStatus {
    /// Takes the 0-based cursor as stored by the edit buffer.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Status for CursorPositionStatus {
    fn text(&self) -> String {
        format!("Ln {}, Col {}", self.row + 1, self.col + 1)
    }

    fn color(&self) -> Color {
        Color::Green
    }
}

/// Number of messages in the history.
pub struct MessageCountStatus {
    count: usize,
}

impl MessageCountStatus {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Status for MessageCountStatus {
    fn text(&self) -> String {
        format!("Messages: {}", self.count)
    }

    fn color(&self) -> Color {
        Color::Blue
    }
}

/// Renders nothing; a placeholder for disabling a slot.
pub struct EmptyStatus;

impl Status for EmptyStatus {
    fn text(&self) -> String {
        String::new()
    }

    fn color(&self) -> Color {
        Color::Reset
    }
}
