//! Line-editing boundary.
//!
//! The editor owns the edit buffer, the cursor byte offset and the prompt. It
//! pulls input through a [`ByteSource`] and reports back through
//! [`EditorHooks`]: a redisplay after every edit and a notification when a line
//! is accepted or input is cancelled. Nothing here touches the terminal.
//!
//! [`InputBridge`] is the glue the event loop talks to: it feeds one byte at a
//! time, records accepted lines in [`History`], and tracks whether the session
//! is shutting down.

pub mod bridge;
pub mod editor;
pub mod history;

pub use bridge::{BridgeState, InputBridge};
pub use editor::BasicEditor;
pub use history::History;

use anyhow::Result;

/// Read-only snapshot of the editor as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineView<'a> {
    pub prompt: &'a [u8],
    pub buffer: &'a [u8],
    /// Cursor position as a byte offset into `buffer`.
    pub point: usize,
}

/// Outcome of an editing step that ended a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A finished line (possibly empty).
    Completed(Vec<u8>),
    /// End of input on an empty line.
    Cancelled,
}

/// Pull-side input supply for the editor.
pub trait ByteSource {
    /// Take the next byte, marking it consumed.
    fn supply_byte(&mut self) -> Option<u8>;
    /// Whether another byte can be taken without blocking.
    fn has_more(&self) -> bool;
}

/// Notifications the editor sends while processing input.
pub trait EditorHooks {
    /// The visible state changed; repaint it.
    fn redisplay(&mut self, view: LineView<'_>) -> Result<()>;
    /// A line was accepted (`Some`) or input was cancelled (`None`).
    fn line_completed(&mut self, line: Option<&[u8]>) -> Result<()>;
}

/// A stateful line editor driven one input step at a time.
pub trait LineEditor {
    fn view(&self) -> LineView<'_>;

    /// Consume every byte `input` currently has, calling `hooks` as edits happen.
    fn read_step(
        &mut self,
        input: &mut dyn ByteSource,
        hooks: &mut dyn EditorHooks,
    ) -> Result<()>;
}
