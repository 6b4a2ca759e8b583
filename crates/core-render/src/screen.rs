//! Virtual/physical screen with batched commits.
//!
//! `stage` copies a pane into the virtual grid; `commit` sends the difference
//! between the virtual and physical grids to the output in one flush. After
//! `invalidate` the next commit clears the terminal and repaints every cell,
//! whatever the physical grid claims.

use std::io::Write;

use core_layout::PaneGeometry;

use crate::DisplayError;
use crate::grid::{Cell, Grid};
use crate::pane::Pane;
use crate::style::CellStyle;
use crate::writer::Writer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(usize);

/// Terminal cursor as the next commit will leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub visible: bool,
    pub row: u16,
    pub col: u16,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            visible: true,
            row: 0,
            col: 0,
        }
    }
}

pub struct Screen<W: Write> {
    out: W,
    rows: u16,
    cols: u16,
    virtual_grid: Grid,
    physical_grid: Grid,
    panes: Vec<Pane>,
    pending_cursor: CursorState,
    physical_cursor: CursorState,
    invalidated: bool,
}

impl<W: Write> Screen<W> {
    /// A screen over `out`. The first commit always repaints in full.
    pub fn new(out: W, rows: u16, cols: u16) -> Self {
        Self {
            out,
            rows,
            cols,
            virtual_grid: Grid::new(rows, cols, CellStyle::PLAIN),
            physical_grid: Grid::new(rows, cols, CellStyle::PLAIN),
            panes: Vec::new(),
            pending_cursor: CursorState::default(),
            physical_cursor: CursorState::default(),
            invalidated: true,
        }
    }

    /// `(rows, cols)` of the terminal as last reported.
    pub fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    pub fn create_pane(&mut self, geometry: PaneGeometry) -> Result<PaneId, DisplayError> {
        let pane = Pane::new(geometry)?;
        self.panes.push(pane);
        Ok(PaneId(self.panes.len() - 1))
    }

    pub fn pane(&self, id: PaneId) -> Result<&Pane, DisplayError> {
        self.panes.get(id.0).ok_or(DisplayError::UnknownPane(id))
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Result<&mut Pane, DisplayError> {
        self.panes.get_mut(id.0).ok_or(DisplayError::UnknownPane(id))
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.pending_cursor.visible = visible;
    }

    /// Cursor the next commit will produce.
    pub fn cursor(&self) -> CursorState {
        self.pending_cursor
    }

    /// Cursor as of the last successful commit.
    pub fn physical_cursor(&self) -> CursorState {
        self.physical_cursor
    }

    /// Copy `id` into the virtual grid without touching the terminal.
    pub fn stage(&mut self, id: PaneId) -> Result<(), DisplayError> {
        let pane = self.panes.get(id.0).ok_or(DisplayError::UnknownPane(id))?;
        let geometry = pane.geometry();
        let grid = pane.grid();
        for r in 0..grid.rows() {
            let screen_row = geometry.origin_row.saturating_add(r);
            if screen_row >= self.rows {
                break;
            }
            for c in 0..grid.cols().min(self.cols) {
                let Some(cell) = grid.get(r, c) else { continue };
                // A wide glyph clipped by the screen edge shows as blank.
                let cell = if cell.width == 2 && c + 1 >= self.cols {
                    Cell::blank(cell.style)
                } else {
                    cell.clone()
                };
                self.virtual_grid.set(screen_row, c, cell);
            }
        }
        if !pane.leaves_cursor() {
            let (row, col) = pane.cursor();
            self.pending_cursor.row = geometry
                .origin_row
                .saturating_add(row)
                .min(self.rows.saturating_sub(1));
            self.pending_cursor.col = col.min(self.cols.saturating_sub(1));
        }
        Ok(())
    }

    /// Send every staged change to the terminal in one flush.
    pub fn commit(&mut self) -> Result<(), DisplayError> {
        let mut w = Writer::new();
        let full = self.invalidated;
        let baseline = if full {
            w.clear_all();
            Grid::new(self.rows, self.cols, CellStyle::PLAIN)
        } else {
            self.physical_grid.clone()
        };

        let mut at: Option<(u16, u16)> = None;
        let mut style = CellStyle::PLAIN;
        let mut printed = false;
        for r in 0..self.rows {
            let mut c = 0;
            while c < self.cols {
                let Some(cell) = self.virtual_grid.get(r, c) else { break };
                if !cell.is_leader() {
                    c += 1;
                    continue;
                }
                let width = u16::from(cell.width);
                let changed = (c..c + width)
                    .any(|k| self.virtual_grid.get(r, k) != baseline.get(r, k));
                if changed {
                    if at != Some((r, c)) {
                        w.move_to(c, r);
                    }
                    if cell.style != style {
                        w.set_style(cell.style);
                        style = cell.style;
                    }
                    w.print(&cell.symbol);
                    at = Some((r, c + width));
                    printed = true;
                }
                c += width;
            }
        }
        if !style.is_plain() {
            w.set_style(CellStyle::PLAIN);
        }

        let cursor = self.pending_cursor;
        if full || printed || cursor != self.physical_cursor {
            if cursor.visible {
                w.move_to(cursor.col, cursor.row);
                w.show_cursor();
            } else {
                w.hide_cursor();
            }
        }

        let stats = w.flush(&mut self.out)?;
        tracing::trace!(
            target: "render",
            full,
            commands = stats.commands,
            prints = stats.print_commands,
            cells = stats.cells_printed,
            "commit"
        );
        self.physical_grid = self.virtual_grid.clone();
        self.physical_cursor = cursor;
        self.invalidated = false;
        Ok(())
    }

    /// Stage `id` and commit immediately.
    pub fn refresh(&mut self, id: PaneId) -> Result<(), DisplayError> {
        self.stage(id)?;
        self.commit()
    }

    /// Distrust the physical grid; the next commit repaints from scratch.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Adopt new terminal dimensions. Implies `invalidate`; the virtual grid
    /// starts blank, so every pane must be staged again.
    pub fn resize_screen(&mut self, rows: u16, cols: u16) {
        self.rows = rows;
        self.cols = cols;
        self.virtual_grid = Grid::new(rows, cols, CellStyle::PLAIN);
        self.physical_grid = Grid::new(rows, cols, CellStyle::PLAIN);
        self.pending_cursor.row = self.pending_cursor.row.min(rows.saturating_sub(1));
        self.pending_cursor.col = self.pending_cursor.col.min(cols.saturating_sub(1));
        self.invalidated = true;
    }

    /// Text the terminal is believed to show on `row`.
    pub fn physical_row_text(&self, row: u16) -> String {
        self.physical_grid.row_text(row)
    }

    pub fn physical_cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.physical_grid.get(row, col)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }
}
