//! The terminal session: one screen, three panes, the last committed line.
//!
//! All drawing goes through `&mut Session`, which makes it the single writer
//! of pane contents and of the physical cursor. The session also answers the
//! line editor's notifications, so the editor never touches the screen
//! directly.

use std::io::Write;

use anyhow::Result;
use core_layout::PaneLayout;
use core_line::{EditorHooks, LineView};

use crate::DisplayError;
use crate::redisplay::{render_input_pane, render_scrollback_pane};
use crate::screen::{PaneId, Screen};
use crate::style::CellStyle;

/// Handles of the three panes, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSet {
    pub scrollback: PaneId,
    pub separator: PaneId,
    pub input: PaneId,
}

pub struct Session<W: Write> {
    screen: Screen<W>,
    panes: PaneSet,
    layout: PaneLayout,
    committed: Option<Vec<u8>>,
}

impl<W: Write> Session<W> {
    /// Create the panes for the screen's current size and paint the separator.
    pub fn new(mut screen: Screen<W>, separator_style: CellStyle) -> Result<Self, DisplayError> {
        let (rows, cols) = screen.size();
        let layout = PaneLayout::compute(rows, cols);
        let panes = PaneSet {
            scrollback: screen.create_pane(layout.scrollback)?,
            separator: screen.create_pane(layout.separator)?,
            input: screen.create_pane(layout.input)?,
        };

        let scrollback = screen.pane_mut(panes.scrollback)?;
        scrollback.set_scroll_on_overflow(true);
        scrollback.set_leave_cursor(true);

        let separator = screen.pane_mut(panes.separator)?;
        separator.set_background(separator_style);
        separator.set_leave_cursor(true);
        screen.refresh(panes.separator)?;

        tracing::debug!(target: "render", rows, cols, "session_created");
        Ok(Self {
            screen,
            panes,
            layout,
            committed: None,
        })
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen<W> {
        &mut self.screen
    }

    pub fn panes(&self) -> PaneSet {
        self.panes
    }

    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    /// Last accepted line, if any.
    pub fn committed(&self) -> Option<&[u8]> {
        self.committed.as_deref()
    }

    /// Redraw the input pane for `view`.
    pub fn render_input(&mut self, view: LineView<'_>, batched: bool) -> Result<(), DisplayError> {
        let column = core_text::cursor_column(view.prompt, view.buffer, view.point);
        render_input_pane(
            &mut self.screen,
            self.panes.input,
            view.prompt,
            view.buffer,
            column,
            batched,
        )
    }

    pub fn render_scrollback(&mut self, batched: bool) -> Result<(), DisplayError> {
        render_scrollback_pane(
            &mut self.screen,
            self.panes.scrollback,
            self.committed.as_deref(),
            batched,
        )
    }

    /// Record an accepted line (`None` on cancellation keeps the old one) and
    /// show it immediately.
    pub fn commit_line(&mut self, line: Option<&[u8]>) -> Result<(), DisplayError> {
        if let Some(line) = line {
            self.committed = Some(line.to_vec());
        }
        self.render_scrollback(false)
    }

    /// Lay the panes out for a `rows` x `cols` terminal and repaint all three
    /// in a single commit.
    pub fn handle_resize(
        &mut self,
        rows: u16,
        cols: u16,
        view: LineView<'_>,
    ) -> Result<(), DisplayError> {
        if self.screen.size() != (rows, cols) {
            self.screen.resize_screen(rows, cols);
        }
        self.layout = PaneLayout::compute(rows, cols);
        let geometry = [
            (self.panes.scrollback, self.layout.scrollback),
            (self.panes.separator, self.layout.separator),
            (self.panes.input, self.layout.input),
        ];
        for (id, g) in geometry {
            let pane = self.screen.pane_mut(id)?;
            pane.resize(g.rows, g.cols)?;
            pane.move_to(g.origin_row);
        }
        self.screen.pane_mut(self.panes.separator)?.erase();
        tracing::info!(
            target: "render.resize",
            rows,
            cols,
            degenerate = self.layout.is_degenerate(),
            "resize"
        );

        self.render_scrollback(true)?;
        self.screen.stage(self.panes.separator)?;
        // Input last: it owns the cursor.
        self.render_input(view, true)?;
        self.screen.commit()
    }

    /// Repaint everything from scratch at the current size.
    pub fn request_redraw(&mut self, view: LineView<'_>) -> Result<(), DisplayError> {
        tracing::debug!(target: "render", "redraw_requested");
        self.screen.invalidate();
        let (rows, cols) = self.screen.size();
        self.handle_resize(rows, cols, view)
    }
}

impl<W: Write> EditorHooks for Session<W> {
    fn redisplay(&mut self, view: LineView<'_>) -> Result<()> {
        self.render_input(view, false)?;
        Ok(())
    }

    fn line_completed(&mut self, line: Option<&[u8]>) -> Result<()> {
        self.commit_line(line)?;
        Ok(())
    }
}
