//! Fixed-region screen geometry derived from the terminal size.

use crate::error::DashError;

/// Minimum terminal height able to hold both bordered panels plus the
/// status row: 2 output rows (border + 1 content line), 5 input rows, the
/// status row, and the output bottom border.
pub const MIN_HEIGHT: u16 = 9;

/// Terminal dimensions sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

/// Inclusive run of absolute terminal rows (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: u16,
    pub bottom: u16,
}

impl RowSpan {
    pub fn height(&self) -> u16 {
        self.bottom.saturating_sub(self.top).saturating_add(1)
    }
}

/// Absolute row assignments for every fixed region, top to bottom.
///
/// All rows are 1-based to match the terminal's `ESC[r;cH` addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub size: TerminalSize,
    pub output_top_border: u16,
    pub output_content: RowSpan,
    pub output_bottom_border: u16,
    pub input_top_border: u16,
    pub input_content: RowSpan,
    pub input_bottom_border: u16,
    pub status_row: u16,
}

impl Layout {
    /// Computes the region rows for `size`.
    ///
    /// Fails with [`DashError::TerminalTooSmall`] below [`MIN_HEIGHT`]; the
    /// session refuses to start rather than degrade.
    pub fn compute(size: TerminalSize) -> Result<Self, DashError> {
        if size.rows < MIN_HEIGHT {
            return Err(DashError::TerminalTooSmall {
                rows: size.rows,
                min: MIN_HEIGHT,
            });
        }
        let rows = size.rows;
        Ok(Self {
            size,
            output_top_border: 1,
            output_content: RowSpan {
                top: 2,
                bottom: rows - 7,
            },
            output_bottom_border: rows - 6,
            input_top_border: rows - 5,
            input_content: RowSpan {
                top: rows - 4,
                bottom: rows - 2,
            },
            input_bottom_border: rows - 1,
            status_row: rows,
        })
    }

    /// Content columns inside either panel's vertical borders.
    pub fn inner_width(&self) -> usize {
        usize::from(self.size.columns).saturating_sub(2)
    }

    /// Output content lines visible at the current height.
    pub fn visible_lines(&self) -> usize {
        usize::from(self.output_content.height())
    }

    /// Scroll step for PageUp/PageDown.
    pub fn page_size(&self) -> usize {
        self.visible_lines().saturating_sub(1).max(1)
    }
}
