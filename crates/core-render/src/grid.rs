//! Character grid shared by panes and the screen.
//!
//! Invariants:
//! - Leader cells have `width >= 1` and a non-empty `symbol`.
//! - Continuation cells have `width == 0` and an empty `symbol`; they follow
//!   their leader on the same row with no gap.
//! - A wide leader is never placed where its continuation would fall off the row.

use crate::style::CellStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub symbol: String,
    pub width: u8,
    pub style: CellStyle,
}

impl Cell {
    pub fn blank(style: CellStyle) -> Self {
        Self {
            symbol: " ".to_string(),
            width: 1,
            style,
        }
    }

    pub fn leader(symbol: &str, width: u16, style: CellStyle) -> Self {
        Self {
            symbol: symbol.to_string(),
            width: width.clamp(1, 2) as u8,
            style,
        }
    }

    pub fn continuation(style: CellStyle) -> Self {
        Self {
            symbol: String::new(),
            width: 0,
            style,
        }
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(CellStyle::PLAIN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: u16, cols: u16, fill: CellStyle) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::blank(fill); rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    pub fn get(&self, row: u16, col: u16) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Overwrite one cell. Out-of-bounds writes are dropped.
    pub fn set(&mut self, row: u16, col: u16, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    /// Place a glyph and its continuation cells. Any wide glyph whose cells
    /// are partially overwritten is blanked so no orphan halves remain.
    pub fn put(&mut self, row: u16, col: u16, symbol: &str, width: u16, style: CellStyle) {
        let width = width.clamp(1, 2);
        if col.saturating_add(width) > self.cols || row >= self.rows {
            return;
        }
        for c in col..col + width {
            self.split_wide_at(row, c, style);
        }
        self.set(row, col, Cell::leader(symbol, width, style));
        for c in col + 1..col + width {
            self.set(row, c, Cell::continuation(style));
        }
    }

    fn split_wide_at(&mut self, row: u16, col: u16, style: CellStyle) {
        let Some(cell) = self.get(row, col) else {
            return;
        };
        if cell.width == 2 {
            self.set(row, col + 1, Cell::blank(style));
        } else if cell.width == 0 && col > 0 {
            self.set(row, col - 1, Cell::blank(style));
        }
    }

    /// Append a zero-width character to the leader covering `(row, col)`.
    pub fn attach(&mut self, row: u16, col: u16, ch: char) {
        let mut c = col;
        loop {
            match self.index(row, c) {
                Some(i) if self.cells[i].is_leader() => {
                    self.cells[i].symbol.push(ch);
                    return;
                }
                Some(_) if c > 0 => c -= 1,
                _ => return,
            }
        }
    }

    pub fn fill(&mut self, style: CellStyle) {
        for cell in &mut self.cells {
            *cell = Cell::blank(style);
        }
    }

    /// Blank `row` from `col` to the right edge.
    pub fn clear_to_eol(&mut self, row: u16, col: u16, style: CellStyle) {
        if col < self.cols {
            self.split_wide_at(row, col, style);
        }
        for c in col..self.cols {
            self.set(row, c, Cell::blank(style));
        }
    }

    /// Drop the top row, shift everything up and blank the bottom row.
    pub fn scroll_up(&mut self, style: CellStyle) {
        let cols = self.cols as usize;
        if self.rows == 0 || cols == 0 {
            return;
        }
        self.cells.drain(..cols);
        self.cells
            .extend(std::iter::repeat_n(Cell::blank(style), cols));
    }

    /// New grid of the given size keeping the overlapping top-left region.
    pub fn resized(&self, rows: u16, cols: u16, fill: CellStyle) -> Grid {
        let mut out = Grid::new(rows, cols, fill);
        for r in 0..rows.min(self.rows) {
            for c in 0..cols.min(self.cols) {
                if let Some(cell) = self.get(r, c) {
                    out.set(r, c, cell.clone());
                }
            }
            // A wide glyph cut at the new right edge loses its continuation.
            if cols > 0 && cols < self.cols {
                if let Some(last) = out.get(r, cols - 1) {
                    if last.width == 2 {
                        let style = last.style;
                        out.set(r, cols - 1, Cell::blank(style));
                    }
                }
            }
        }
        out
    }

    /// Concatenated leader symbols of `row`; blank cells read as spaces.
    pub fn row_text(&self, row: u16) -> String {
        let mut out = String::new();
        for c in 0..self.cols {
            if let Some(cell) = self.get(row, c) {
                if cell.is_leader() {
                    out.push_str(&cell.symbol);
                }
            }
        }
        out
    }
}
