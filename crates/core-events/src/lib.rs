//! Input events consumed by the blocking event loop.
//!
//! The loop reads exactly one event per iteration. A key press arrives as the
//! raw bytes a terminal in raw mode would send, one byte per event, so the
//! line editor sees an unadulterated byte stream. Resizes and explicit redraw
//! requests are surfaced as their own variants and dispatched by pattern match;
//! there are no signal handlers.

use std::collections::VecDeque;

use anyhow::Result;

/// Byte that requests a full repaint (Ctrl-L).
pub const REDRAW_KEY: u8 = 0x0C;

/// One unit returned by a blocking read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A single input byte, forwarded verbatim to the line editor.
    Key(u8),
    /// The terminal now has `rows` x `cols` cells.
    Resize { rows: u16, cols: u16 },
    /// Repaint everything from scratch.
    RedrawRequest,
}

impl InputEvent {
    /// Classify a raw input byte. [`REDRAW_KEY`] never reaches the editor.
    pub fn from_byte(byte: u8) -> Self {
        if byte == REDRAW_KEY {
            InputEvent::RedrawRequest
        } else {
            InputEvent::Key(byte)
        }
    }
}

/// Blocking producer of [`InputEvent`]s.
///
/// `next_event` parks the caller until an event is available. `Ok(None)`
/// means the source is exhausted and no further events will ever arrive.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Replays a fixed sequence of events. Used to drive the loop without a terminal.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    events: VecDeque<InputEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Script that types `bytes` one key at a time.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(InputEvent::from_byte))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}
