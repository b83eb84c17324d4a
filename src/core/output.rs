//! Typed terminal commands and a single output gate.
//!
//! Invariant: all terminal writes flow through `OutputGate::flush(..)`.
//! The variants pin the exact control sequences the dashboard emits; the
//! renderer and session never format escape bytes themselves.

use crate::core::terminal::Terminal;

/// Foreground color reset.
pub const COLOR_RESET: &str = "\x1b[0m";

/// The fixed four-color palette, plus the neutral reset tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Gray,
    Yellow,
    Blue,
    /// No color: emits the reset sequence.
    Reset,
}

impl Color {
    pub fn code(&self) -> &'static str {
        match self {
            Color::Green => "\x1b[92m",
            Color::Gray => "\x1b[90m",
            Color::Yellow => "\x1b[93m",
            Color::Blue => "\x1b[94m",
            Color::Reset => COLOR_RESET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Pre-composed content (text plus inline color codes).
    Bytes(String),

    EnterAltScreen,
    LeaveAltScreen,
    HideCursor,
    ShowCursor,
    /// Clear the screen and home the cursor.
    ClearAndHome,
    /// Absolute cursor position, 1-based row and column.
    MoveTo(u16, u16),
    SetColor(Color),
    ResetColor,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }
}

/// Buffers commands for one repaint and writes them in a single pass.
#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Flush buffered commands to the terminal.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be
    /// called from anywhere else. The whole repaint goes out as one write
    /// to keep partial frames off the wire.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) {
        if self.cmds.is_empty() {
            return;
        }
        let mut buffer = String::new();
        for cmd in self.cmds.drain(..) {
            match cmd {
                TerminalCmd::Bytes(data) => buffer.push_str(&data),
                TerminalCmd::EnterAltScreen => buffer.push_str("\x1b[?1049h"),
                TerminalCmd::LeaveAltScreen => buffer.push_str("\x1b[?1049l"),
                TerminalCmd::HideCursor => buffer.push_str("\x1b[?25l"),
                TerminalCmd::ShowCursor => buffer.push_str("\x1b[?25h"),
                TerminalCmd::ClearAndHome => buffer.push_str("\x1b[2J\x1b[H"),
                TerminalCmd::MoveTo(row, col) => {
                    buffer.push_str(&format!("\x1b[{row};{col}H"));
                }
                TerminalCmd::SetColor(color) => buffer.push_str(color.code()),
                TerminalCmd::ResetColor => buffer.push_str(COLOR_RESET),
            }
        }
        term.write(&buffer);
    }
}
