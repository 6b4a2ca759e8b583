//! Blocking terminal input backed by `crossterm::event::read`.
//!
//! Key presses are re-encoded into the raw bytes a terminal would deliver and
//! handed out one byte per event. Resizes pass through as
//! [`InputEvent::Resize`]. Releases, mouse and focus events are dropped.

mod key_bytes;

use std::collections::VecDeque;

use anyhow::Result;
use core_events::{EventSource, InputEvent};
use crossterm::event::{self, Event as CEvent, KeyEventKind as CKind};

#[derive(Debug, Default)]
pub struct CrosstermInput {
    pending: VecDeque<u8>,
}

impl CrosstermInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one terminal event into the byte queue. Returns an event that must
    /// be delivered immediately (resize), otherwise `None`.
    fn absorb(&mut self, ev: CEvent) -> Option<InputEvent> {
        match ev {
            CEvent::Key(key) if matches!(key.kind, CKind::Press | CKind::Repeat) => {
                match key_bytes::encode_key(&key) {
                    Some(bytes) => {
                        tracing::trace!(target: "input", len = bytes.len(), "key_encoded");
                        self.pending.extend(bytes);
                    }
                    None => {
                        tracing::trace!(target: "input", code = ?key.code, "key_unmapped");
                    }
                }
                None
            }
            CEvent::Paste(text) => {
                tracing::debug!(target: "input", size_bytes = text.len(), "paste");
                self.pending.extend(text.into_bytes());
                None
            }
            CEvent::Resize(cols, rows) => {
                tracing::debug!(target: "input", rows, cols, "resize");
                Some(InputEvent::Resize { rows, cols })
            }
            _ => None,
        }
    }

    fn pop_pending(&mut self) -> Option<InputEvent> {
        self.pending.pop_front().map(InputEvent::from_byte)
    }
}

impl EventSource for CrosstermInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            if let Some(ev) = self.pop_pending() {
                return Ok(Some(ev));
            }
            let raw = event::read()?;
            if let Some(ev) = self.absorb(raw) {
                return Ok(Some(ev));
            }
        }
    }
}
