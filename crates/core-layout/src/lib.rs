//! Pane geometry for the three-pane screen.
//!
//! The terminal is split top to bottom into a scrollback pane, a one-row
//! separator and a one-row input pane. Coordinates are terminal cells (`u16`),
//! matching the display APIs.
//!
//! Invariants:
//! * `rows >= 3`: scrollback rows + separator rows + input rows == terminal rows,
//!   panes are stacked without gaps starting at row 0.
//! * `rows < 3`: every pane collapses to one full-width row at (0, 0). The panes
//!   overlap; drawing stays in bounds, layout correctness is given up.
//! * Every pane spans the full terminal width and starts at column 0.

/// Minimum terminal height that fits all three panes.
pub const MIN_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneGeometry {
    pub rows: u16,
    pub cols: u16,
    pub origin_row: u16,
}

impl PaneGeometry {
    pub fn new(rows: u16, cols: u16, origin_row: u16) -> Self {
        Self {
            rows,
            cols,
            origin_row,
        }
    }

    /// Origin column; panes always start at the left edge.
    pub fn origin_col(&self) -> u16 {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub scrollback: PaneGeometry,
    pub separator: PaneGeometry,
    pub input: PaneGeometry,
}

impl PaneLayout {
    /// Compute geometry for a terminal of `total_rows` x `total_cols`.
    pub fn compute(total_rows: u16, total_cols: u16) -> Self {
        if total_rows >= MIN_ROWS {
            Self {
                scrollback: PaneGeometry::new(total_rows - 2, total_cols, 0),
                separator: PaneGeometry::new(1, total_cols, total_rows - 2),
                input: PaneGeometry::new(1, total_cols, total_rows - 1),
            }
        } else {
            let collapsed = PaneGeometry::new(1, total_cols, 0);
            Self {
                scrollback: collapsed,
                separator: collapsed,
                input: collapsed,
            }
        }
    }

    /// True when the terminal is too short for a real split.
    pub fn is_degenerate(&self) -> bool {
        self.scrollback.origin_row == self.input.origin_row
    }

    pub fn total_rows(&self) -> u16 {
        self.scrollback.rows + self.separator.rows + self.input.rows
    }
}
