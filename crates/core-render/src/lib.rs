//! Character-grid display, pane renderers and the session event loop.
//!
//! Layers, bottom up:
//! - `grid` / `style`: cells (leader + continuation for wide glyphs) and their
//!   colours.
//! - `pane`: an independently written rectangle with its own cursor.
//! - `screen`: virtual and physical grids over one output stream. Panes are
//!   *staged* into the virtual grid and a *commit* diffs it against the
//!   physical grid, emitting only changed cells through `writer` in one flush.
//!   `refresh` is stage + commit.
//! - `redisplay`: the input and scrollback pane renderers.
//! - `session`: the single owner of the screen and the three pane handles;
//!   implements the resize coordinator and the editor notification hooks.
//! - `controller`: the blocking event loop tying input, bridge and session.
//!
//! Invariants:
//! - Exactly one `Screen` per session; every pane mutation goes through
//!   `&mut Session`.
//! - The physical cursor position and visibility are decided by the most
//!   recently staged pane that does not leave the cursor alone.
//! - A commit writes the terminal once; a failed flush leaves the physical grid
//!   unchanged so the next commit retries the same cells.

pub mod controller;
pub mod grid;
pub mod pane;
pub mod redisplay;
pub mod screen;
pub mod session;
pub mod style;
pub mod writer;

pub use controller::Controller;
pub use grid::{Cell, Grid};
pub use pane::Pane;
pub use redisplay::{render_input_pane, render_scrollback_pane};
pub use screen::{CursorState, PaneId, Screen};
pub use session::{PaneSet, Session};
pub use style::{CellFlags, CellStyle};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("no pane with id {0:?}")]
    UnknownPane(PaneId),
    #[error("cursor ({row}, {col}) is outside the {rows}x{cols} pane")]
    CursorOutOfBounds { row: u16, col: u16, rows: u16, cols: u16 },
    #[error("a pane needs at least one row")]
    EmptyPane,
    #[error("text ran past the end of the pane")]
    Overflow,
    #[error("terminal write failed")]
    Io(#[from] std::io::Error),
}
