//! Panel and status drawing with full/partial repaint modes.
//!
//! The renderer keeps the previously painted input lines and status text
//! as its diff snapshot. Output-panel content is never diffed: scroll,
//! focus, resize, and submission changes all force a full repaint, so the
//! partial path only touches the status row and changed input rows.

use crate::core::editor::INPUT_LINES;
use crate::core::geometry::Layout;
use crate::core::output::{Color, OutputGate, TerminalCmd};
use crate::core::text::{clip_to_width, clip_visible_to_width, pad_to_width, visible_width};
use crate::runtime::session::Focus;

const BORDER_H: char = '─';
const BORDER_V: char = '│';
const CORNER_TL: char = '┌';
const CORNER_TR: char = '┐';
const CORNER_BL: char = '└';
const CORNER_BR: char = '┘';

/// Everything one repaint needs, borrowed from session state.
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub focus: Focus,
    pub input_lines: &'a [String; INPUT_LINES],
    /// 0-based (row, col) of the edit cursor, col in code points.
    pub cursor: (usize, usize),
    /// Wrapped history lines, already clamped scroll offset.
    pub display_lines: &'a [String],
    pub scroll_offset: usize,
    /// Composed status segments plus the key legend.
    pub status_line: &'a str,
}

/// Draws frames and remembers what it drew for incremental repaints.
#[derive(Debug)]
pub struct Renderer {
    active_color: Color,
    dim_color: Color,
    prev_input_lines: [String; INPUT_LINES],
    prev_status_line: String,
}

impl Renderer {
    pub fn new(active_color: Color, dim_color: Color) -> Self {
        Self {
            active_color,
            dim_color,
            prev_input_lines: Default::default(),
            prev_status_line: String::new(),
        }
    }

    fn border_color(&self, frame: &Frame<'_>, panel: Focus) -> Color {
        if frame.focus == panel {
            self.active_color
        } else {
            self.dim_color
        }
    }

    /// Full repaint: clear, both panels, status row, cursor, snapshot.
    pub fn render_full(&mut self, gate: &mut OutputGate, frame: &Frame<'_>) {
        gate.push(TerminalCmd::ClearAndHome);

        self.draw_output_panel(gate, frame);
        self.draw_input_panel(gate, frame);
        self.draw_status_line(gate, frame);

        self.prev_input_lines = frame.input_lines.clone();
        self.prev_status_line = frame.status_line.to_string();

        self.position_cursor(gate, frame);
    }

    /// Partial repaint: status row and input rows only when changed; the
    /// cursor is always repositioned.
    pub fn render_partial(&mut self, gate: &mut OutputGate, frame: &Frame<'_>) {
        if frame.status_line != self.prev_status_line {
            self.draw_status_line(gate, frame);
            self.prev_status_line = frame.status_line.to_string();
        }

        for row in 0..INPUT_LINES {
            if frame.input_lines[row] != self.prev_input_lines[row] {
                let abs_row = frame.layout.input_content.top + row as u16;
                self.draw_input_row(gate, frame, abs_row, &frame.input_lines[row]);
                self.prev_input_lines[row] = frame.input_lines[row].clone();
            }
        }

        self.position_cursor(gate, frame);
    }

    fn draw_output_panel(&self, gate: &mut OutputGate, frame: &Frame<'_>) {
        let layout = frame.layout;
        let color = self.border_color(frame, Focus::Output);
        let inner = layout.inner_width();

        self.draw_border_row(gate, color, layout.output_top_border, CORNER_TL, CORNER_TR, inner);

        let visible = layout.visible_lines();
        let total = frame.display_lines.len();
        let start = frame.scroll_offset.min(total);
        let end = (start + visible).min(total);

        let mut abs_row = layout.output_content.top;
        for line in &frame.display_lines[start..end] {
            self.draw_content_row(gate, color, abs_row, line, inner);
            abs_row += 1;
        }
        // Blank fill below short content.
        while abs_row <= layout.output_content.bottom {
            self.draw_content_row(gate, color, abs_row, "", inner);
            abs_row += 1;
        }

        self.draw_border_row(gate, color, layout.output_bottom_border, CORNER_BL, CORNER_BR, inner);
    }

    fn draw_input_panel(&self, gate: &mut OutputGate, frame: &Frame<'_>) {
        let layout = frame.layout;
        let color = self.border_color(frame, Focus::Input);
        let inner = layout.inner_width();

        self.draw_border_row(gate, color, layout.input_top_border, CORNER_TL, CORNER_TR, inner);
        for row in 0..INPUT_LINES {
            let abs_row = layout.input_content.top + row as u16;
            self.draw_content_row(gate, color, abs_row, &frame.input_lines[row], inner);
        }
        self.draw_border_row(gate, color, layout.input_bottom_border, CORNER_BL, CORNER_BR, inner);
    }

    fn draw_input_row(&self, gate: &mut OutputGate, frame: &Frame<'_>, abs_row: u16, line: &str) {
        let color = self.border_color(frame, Focus::Input);
        self.draw_content_row(gate, color, abs_row, line, frame.layout.inner_width());
    }

    fn draw_border_row(
        &self,
        gate: &mut OutputGate,
        color: Color,
        row: u16,
        left: char,
        right: char,
        inner: usize,
    ) {
        let mut line = String::with_capacity(inner + 2);
        line.push(left);
        for _ in 0..inner {
            line.push(BORDER_H);
        }
        line.push(right);

        gate.push(TerminalCmd::MoveTo(row, 1));
        gate.push(TerminalCmd::SetColor(color));
        gate.push(TerminalCmd::bytes(line));
        gate.push(TerminalCmd::ResetColor);
    }

    fn draw_content_row(
        &self,
        gate: &mut OutputGate,
        border_color: Color,
        row: u16,
        content: &str,
        inner: usize,
    ) {
        let clipped = clip_to_width(content, inner);
        gate.push(TerminalCmd::MoveTo(row, 1));
        gate.push(TerminalCmd::SetColor(border_color));
        gate.push(TerminalCmd::bytes(BORDER_V.to_string()));
        gate.push(TerminalCmd::ResetColor);
        gate.push(TerminalCmd::bytes(pad_to_width(clipped, inner)));
        gate.push(TerminalCmd::SetColor(border_color));
        gate.push(TerminalCmd::bytes(BORDER_V.to_string()));
        gate.push(TerminalCmd::ResetColor);
    }

    fn draw_status_line(&self, gate: &mut OutputGate, frame: &Frame<'_>) {
        let layout = frame.layout;
        let width = usize::from(layout.size.columns);

        // Clip to the terminal width so a long status line cannot wrap,
        // then pad with spaces to erase stale text; color codes take no
        // columns either way.
        let mut content = clip_visible_to_width(frame.status_line, width);
        let clipped = content.len() != frame.status_line.len();
        let shown = visible_width(&content);
        if shown < width {
            for _ in shown..width {
                content.push(' ');
            }
        }

        gate.push(TerminalCmd::MoveTo(layout.status_row, 1));
        gate.push(TerminalCmd::bytes(content));
        // A cut can land inside a colored segment and lose its reset.
        if clipped {
            gate.push(TerminalCmd::ResetColor);
        }
    }

    fn position_cursor(&self, gate: &mut OutputGate, frame: &Frame<'_>) {
        let layout = frame.layout;
        match frame.focus {
            Focus::Input => {
                let (row, col) = frame.cursor;
                let abs_row = layout.input_content.top + row as u16;
                let abs_col = 1 + col as u16;
                gate.push(TerminalCmd::MoveTo(abs_row, abs_col));
            }
            // Park the cursor at the bottom-right so it stays out of the way.
            Focus::Output => {
                gate.push(TerminalCmd::MoveTo(layout.status_row, layout.size.columns));
            }
        }
    }
}
