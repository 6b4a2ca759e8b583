//! Terminal command buffer.
//!
//! The screen records one commit's worth of primitive operations here and
//! emits them with a single flush, so the terminal never shows a half-applied
//! update. Consecutive prints with no intervening move or style change are
//! merged into one `Print`.
//!
//! Positions are absolute `(x, y)` with a (0, 0) origin; callers ensure bounds.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::style::{CellFlags, CellStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearAll,
    SetStyle(CellStyle),
    Print(String),
    ShowCursor,
    HideCursor,
}

/// Counters describing one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub commands: usize,
    pub print_commands: usize,
    pub cells_printed: usize,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
    pending_plain: String,
    cells_printed: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn flush_pending(&mut self) {
        if self.pending_plain.is_empty() {
            return;
        }
        let s = std::mem::take(&mut self.pending_plain);
        self.cmds.push(Command::Print(s));
    }

    fn push(&mut self, cmd: Command) {
        self.flush_pending();
        self.cmds.push(cmd);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.push(Command::MoveTo(x, y));
    }

    pub fn clear_all(&mut self) {
        self.push(Command::ClearAll);
    }

    pub fn set_style(&mut self, style: CellStyle) {
        self.push(Command::SetStyle(style));
    }

    pub fn show_cursor(&mut self) {
        self.push(Command::ShowCursor);
    }

    pub fn hide_cursor(&mut self) {
        self.push(Command::HideCursor);
    }

    /// Queue one cell's symbol.
    pub fn print(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.pending_plain.push_str(s);
        self.cells_printed += 1;
    }

    /// Finish batching and return the command list (for inspection).
    pub fn into_commands(mut self) -> Vec<Command> {
        self.flush_pending();
        self.cmds
    }

    pub fn flush<W: Write>(mut self, out: &mut W) -> io::Result<WriterStats> {
        self.flush_pending();
        let mut stats = WriterStats {
            commands: self.cmds.len(),
            print_commands: 0,
            cells_printed: self.cells_printed,
        };
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::ClearAll => {
                    queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
                }
                Command::SetStyle(style) => {
                    queue_style(out, style)?;
                }
                Command::Print(s) => {
                    stats.print_commands += 1;
                    queue!(out, Print(s))?;
                }
                Command::ShowCursor => {
                    queue!(out, Show)?;
                }
                Command::HideCursor => {
                    queue!(out, Hide)?;
                }
            }
        }
        out.flush()?;
        Ok(stats)
    }
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    // Reset first so attributes from the previous run never leak.
    queue!(out, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.flags.contains(CellFlags::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}
