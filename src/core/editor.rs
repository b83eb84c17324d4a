//! Fixed three-line edit buffer with a code-point cursor.

/// Number of input lines; the input panel height is fixed.
pub const INPUT_LINES: usize = 3;

/// Multi-line composer state. Columns are counted in code points, not
/// rendered columns.
///
/// Vertical movement deliberately does not reclamp the column: after
/// moving to a shorter line the column may exceed its length, and splice
/// positions then clamp to the line end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    lines: [String; INPUT_LINES],
    cursor_row: usize,
    cursor_col: usize,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            lines: Default::default(),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub fn lines(&self) -> &[String; INPUT_LINES] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> &str {
        &self.lines[row]
    }

    /// Cursor position as (row, col), 0-based.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor_row].chars().count()
    }

    /// Byte offset of code-point index `col`, clamped to the line end.
    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    /// Splices `ch` at the cursor and advances one column.
    pub fn insert(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor_row];
        let at = Self::byte_index(line, self.cursor_col);
        line.insert(at, ch);
        self.cursor_col += 1;
    }

    /// Deletes the code point left of the cursor. No-op at column 0.
    pub fn backspace(&mut self) {
        if self.cursor_col == 0 {
            return;
        }
        let line = &mut self.lines[self.cursor_row];
        if let Some((idx, ch)) = line.char_indices().nth(self.cursor_col - 1) {
            let removed_len = ch.len_utf8();
            line.replace_range(idx..idx + removed_len, "");
        }
        self.cursor_col -= 1;
    }

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.cursor_row = (self.cursor_row + 1).min(INPUT_LINES - 1);
    }

    /// Joins the three lines into one committed message and resets the
    /// buffer. Used on Enter.
    pub fn take_and_clear(&mut self) -> String {
        let message = self.lines.join("\n");
        for line in &mut self.lines {
            line.clear();
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        message
    }
}
