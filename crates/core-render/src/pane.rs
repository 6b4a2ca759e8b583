//! Panes: independently drawn rectangles of the screen.
//!
//! A pane owns its own grid and cursor. Nothing a pane does reaches the
//! terminal until the screen stages and commits it.
//!
//! Writing follows terminal conventions: text wraps at the right edge; at the
//! bottom edge a scrolling pane scrolls up one row while a non-scrolling pane
//! stops with [`DisplayError::Overflow`]. TAB expands to the next tab stop,
//! control characters are drawn in caret notation, zero-width characters join
//! the preceding glyph and invalid UTF-8 bytes draw as U+FFFD.

use core_layout::PaneGeometry;
use core_text::{caret_notation, next_tab_stop};
use unicode_width::UnicodeWidthChar;

use crate::DisplayError;
use crate::grid::Grid;
use crate::style::CellStyle;

const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Clone)]
pub struct Pane {
    geometry: PaneGeometry,
    grid: Grid,
    cursor_row: u16,
    cursor_col: u16,
    background: CellStyle,
    scroll_on_overflow: bool,
    leave_cursor: bool,
}

impl Pane {
    pub fn new(geometry: PaneGeometry) -> Result<Self, DisplayError> {
        if geometry.rows == 0 {
            return Err(DisplayError::EmptyPane);
        }
        Ok(Self {
            geometry,
            grid: Grid::new(geometry.rows, geometry.cols, CellStyle::PLAIN),
            cursor_row: 0,
            cursor_col: 0,
            background: CellStyle::PLAIN,
            scroll_on_overflow: false,
            leave_cursor: false,
        })
    }

    pub fn geometry(&self) -> PaneGeometry {
        self.geometry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_row, self.cursor_col)
    }

    /// Scroll instead of failing when text runs past the bottom row.
    pub fn set_scroll_on_overflow(&mut self, enabled: bool) {
        self.scroll_on_overflow = enabled;
    }

    /// When set, staging this pane leaves the terminal cursor where it is.
    pub fn set_leave_cursor(&mut self, enabled: bool) {
        self.leave_cursor = enabled;
    }

    pub fn leaves_cursor(&self) -> bool {
        self.leave_cursor
    }

    /// Change the background style and repaint the pane blank in it.
    pub fn set_background(&mut self, style: CellStyle) {
        self.background = style;
        self.erase();
    }

    /// Blank every cell and home the cursor.
    pub fn erase(&mut self) {
        self.grid.fill(self.background);
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<(), DisplayError> {
        if row >= self.geometry.rows || col >= self.geometry.cols {
            return Err(DisplayError::CursorOutOfBounds {
                row,
                col,
                rows: self.geometry.rows,
                cols: self.geometry.cols,
            });
        }
        self.cursor_row = row;
        self.cursor_col = col;
        Ok(())
    }

    /// Change the pane's size, keeping the overlapping content.
    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<(), DisplayError> {
        if rows == 0 {
            return Err(DisplayError::EmptyPane);
        }
        self.grid = self.grid.resized(rows, cols, self.background);
        self.geometry.rows = rows;
        self.geometry.cols = cols;
        self.cursor_row = self.cursor_row.min(rows - 1);
        self.cursor_col = self.cursor_col.min(cols.saturating_sub(1));
        Ok(())
    }

    /// Place the pane's top-left corner at `origin_row` on the screen.
    pub fn move_to(&mut self, origin_row: u16) {
        self.geometry.origin_row = origin_row;
    }

    /// Move the cursor to `(row, col)` and write `bytes` from there.
    pub fn write_str_at(&mut self, row: u16, col: u16, bytes: &[u8]) -> Result<(), DisplayError> {
        self.move_cursor(row, col)?;
        self.write_bytes(bytes)
    }

    /// Write `bytes` at the cursor, advancing it.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        for chunk in bytes.utf8_chunks() {
            for ch in chunk.valid().chars() {
                self.put_char(ch)?;
            }
            for _ in chunk.invalid() {
                self.put_glyph(REPLACEMENT.encode_utf8(&mut [0; 4]), 1)?;
            }
        }
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> Result<(), DisplayError> {
        match ch {
            '\n' => {
                self.grid
                    .clear_to_eol(self.cursor_row, self.cursor_col, self.background);
                self.new_line()
            }
            '\r' => {
                self.cursor_col = 0;
                Ok(())
            }
            '\t' => {
                let stop = next_tab_stop(self.cursor_col as usize);
                let spaces = stop.min(self.geometry.cols as usize) - self.cursor_col as usize;
                for _ in 0..spaces {
                    self.put_glyph(" ", 1)?;
                }
                Ok(())
            }
            _ => {
                if let Some(caret) = caret_notation(ch) {
                    for glyph in caret {
                        self.put_glyph(glyph.encode_utf8(&mut [0; 4]), 1)?;
                    }
                    return Ok(());
                }
                match ch.width().unwrap_or(0) {
                    0 => {
                        self.attach_zero_width(ch);
                        Ok(())
                    }
                    w => self.put_glyph(ch.encode_utf8(&mut [0; 4]), w as u16),
                }
            }
        }
    }

    fn put_glyph(&mut self, symbol: &str, width: u16) -> Result<(), DisplayError> {
        let cols = self.geometry.cols;
        if cols == 0 {
            return Err(DisplayError::Overflow);
        }
        let (symbol, width) = if width > cols { ("?", 1) } else { (symbol, width) };
        if width > cols - self.cursor_col {
            self.grid
                .clear_to_eol(self.cursor_row, self.cursor_col, self.background);
            self.new_line()?;
        }
        self.grid
            .put(self.cursor_row, self.cursor_col, symbol, width, self.background);
        self.cursor_col += width;
        if self.cursor_col >= cols {
            if let Err(err) = self.new_line() {
                // The glyph is drawn; only the cursor could not follow it.
                self.cursor_col = cols - 1;
                return Err(err);
            }
        }
        Ok(())
    }

    fn attach_zero_width(&mut self, ch: char) {
        if self.cursor_col > 0 {
            self.grid.attach(self.cursor_row, self.cursor_col - 1, ch);
        } else if self.cursor_row > 0 {
            self.grid
                .attach(self.cursor_row - 1, self.geometry.cols.saturating_sub(1), ch);
        }
    }

    fn new_line(&mut self) -> Result<(), DisplayError> {
        if self.cursor_row + 1 < self.geometry.rows {
            self.cursor_row += 1;
        } else if self.scroll_on_overflow {
            self.grid.scroll_up(self.background);
        } else {
            return Err(DisplayError::Overflow);
        }
        self.cursor_col = 0;
        Ok(())
    }

    /// Text of one row, for diagnostics and tests.
    pub fn row_text(&self, row: u16) -> String {
        self.grid.row_text(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(rows: u16, cols: u16) -> Pane {
        Pane::new(PaneGeometry::new(rows, cols, 0)).unwrap()
    }

    #[test]
    fn zero_row_pane_is_rejected() {
        assert!(matches!(
            Pane::new(PaneGeometry::new(0, 10, 0)),
            Err(DisplayError::EmptyPane)
        ));
    }

    #[test]
    fn plain_write_advances_cursor() {
        let mut p = pane(1, 10);
        p.write_str_at(0, 0, b"> hi").unwrap();
        assert_eq!(p.row_text(0), "> hi      ");
        assert_eq!(p.cursor(), (0, 4));
    }

    #[test]
    fn tab_expands_to_stop() {
        let mut p = pane(1, 20);
        p.write_str_at(0, 0, b"ab\tc").unwrap();
        assert_eq!(p.row_text(0), "ab      c           ");
        assert_eq!(p.cursor(), (0, 9));
    }

    #[test]
    fn control_chars_use_caret_notation() {
        let mut p = pane(1, 6);
        p.write_str_at(0, 0, b"a\x01b").unwrap();
        assert_eq!(p.row_text(0), "a^Ab  ");
    }

    #[test]
    fn invalid_bytes_draw_replacement() {
        let mut p = pane(1, 4);
        p.write_str_at(0, 0, b"a\xffb").unwrap();
        assert_eq!(p.row_text(0), "a\u{FFFD}b ");
    }

    #[test]
    fn non_scrolling_pane_overflows_but_keeps_visible_part() {
        let mut p = pane(1, 4);
        let err = p.write_str_at(0, 0, b"abcdef").unwrap_err();
        assert!(matches!(err, DisplayError::Overflow));
        assert_eq!(p.row_text(0), "abcd");
    }

    #[test]
    fn scrolling_pane_shows_tail_of_long_text() {
        let mut p = pane(2, 3);
        p.set_scroll_on_overflow(true);
        p.write_str_at(0, 0, b"abcdefgh").unwrap();
        assert_eq!(p.row_text(0), "def");
        assert_eq!(p.row_text(1), "gh ");
    }

    #[test]
    fn wide_glyph_wraps_instead_of_splitting() {
        let mut p = pane(2, 3);
        p.write_str_at(0, 0, "ab界".as_bytes()).unwrap();
        assert_eq!(p.row_text(0), "ab ");
        assert_eq!(p.row_text(1), "界 ");
    }

    #[test]
    fn combining_mark_joins_previous_glyph() {
        let mut p = pane(1, 3);
        p.write_str_at(0, 0, "e\u{0301}x".as_bytes()).unwrap();
        assert_eq!(p.row_text(0), "e\u{0301}x ");
        assert_eq!(p.cursor(), (0, 2));
    }

    #[test]
    fn cursor_moves_are_bounds_checked() {
        let mut p = pane(1, 5);
        assert!(p.move_cursor(0, 4).is_ok());
        assert!(matches!(
            p.move_cursor(0, 5),
            Err(DisplayError::CursorOutOfBounds { col: 5, .. })
        ));
        assert!(p.move_cursor(1, 0).is_err());
    }

    #[test]
    fn zero_width_pane_never_loops() {
        let mut p = pane(1, 0);
        p.set_scroll_on_overflow(true);
        assert!(p.write_bytes(b"abc").is_err());
    }

    #[test]
    fn background_fills_blank_cells() {
        let mut p = pane(1, 3);
        p.set_background(CellStyle::reverse());
        assert_eq!(p.grid().get(0, 2).unwrap().style, CellStyle::reverse());
        p.resize(1, 5).unwrap();
        assert_eq!(p.grid().get(0, 4).unwrap().style, CellStyle::reverse());
    }

    #[test]
    fn resize_clamps_cursor_and_rejects_zero_rows() {
        let mut p = pane(3, 10);
        p.move_cursor(2, 9).unwrap();
        p.resize(1, 4).unwrap();
        assert_eq!(p.cursor(), (0, 3));
        assert!(p.resize(0, 4).is_err());
    }
}
