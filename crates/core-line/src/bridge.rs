//! Synchronous byte feed between the event loop and the editor.
//!
//! The editor pulls its input; the bridge hands it exactly one byte per
//! [`InputBridge::feed_byte`] call and then reports "no more input" so the
//! editing step returns instead of blocking.
//!
//! State machine, per session:
//! `WaitingForInput -> EditingStepInProgress -> WaitingForInput`, or
//! `-> ShuttingDown` once input is cancelled on an empty line. `ShuttingDown`
//! is terminal; later bytes are dropped.

use anyhow::Result;

use crate::{ByteSource, EditorHooks, History, LineEditor, LineEvent, LineView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    WaitingForInput,
    EditingStepInProgress,
    ShuttingDown,
}

#[derive(Debug, Clone, Copy, Default)]
struct PendingByte {
    byte: u8,
    available: bool,
}

impl ByteSource for PendingByte {
    fn supply_byte(&mut self) -> Option<u8> {
        if !self.available {
            return None;
        }
        self.available = false;
        Some(self.byte)
    }

    fn has_more(&self) -> bool {
        self.available
    }
}

/// Forwards editor notifications, recording accepted lines on the way.
struct CompletionRelay<'a, H: ?Sized> {
    inner: &'a mut H,
    history: &'a mut History,
    outcome: Option<LineEvent>,
}

impl<H: EditorHooks + ?Sized> EditorHooks for CompletionRelay<'_, H> {
    fn redisplay(&mut self, view: LineView<'_>) -> Result<()> {
        self.inner.redisplay(view)
    }

    fn line_completed(&mut self, line: Option<&[u8]>) -> Result<()> {
        match line {
            Some(line) => {
                if self.history.add(line) {
                    tracing::debug!(
                        target: "line",
                        len = line.len(),
                        history = self.history.len(),
                        "history_append"
                    );
                }
                self.outcome = Some(LineEvent::Completed(line.to_vec()));
            }
            None => self.outcome = Some(LineEvent::Cancelled),
        }
        self.inner.line_completed(line)
    }
}

#[derive(Debug)]
pub struct InputBridge<E> {
    editor: E,
    pending: PendingByte,
    history: History,
    state: BridgeState,
}

impl<E: LineEditor> InputBridge<E> {
    pub fn new(editor: E, history: History) -> Self {
        Self {
            editor,
            pending: PendingByte::default(),
            history,
            state: BridgeState::WaitingForInput,
        }
    }

    /// Hand `byte` to the editor and run one editing step.
    ///
    /// Returns the line event the step produced, if any. Accepted non-empty
    /// lines are appended to the history before `hooks` sees them.
    pub fn feed_byte<H>(&mut self, byte: u8, hooks: &mut H) -> Result<Option<LineEvent>>
    where
        H: EditorHooks + ?Sized,
    {
        if self.state == BridgeState::ShuttingDown {
            tracing::trace!(target: "line", "byte_after_shutdown_dropped");
            return Ok(None);
        }
        self.pending = PendingByte {
            byte,
            available: true,
        };
        self.state = BridgeState::EditingStepInProgress;

        let mut relay = CompletionRelay {
            inner: hooks,
            history: &mut self.history,
            outcome: None,
        };
        let step = self.editor.read_step(&mut self.pending, &mut relay);
        let outcome = relay.outcome;

        self.state = match outcome {
            Some(LineEvent::Cancelled) => {
                tracing::info!(target: "line", "input_cancelled");
                BridgeState::ShuttingDown
            }
            _ => BridgeState::WaitingForInput,
        };
        step?;
        Ok(outcome)
    }

    pub fn view(&self) -> LineView<'_> {
        self.editor.view()
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state == BridgeState::ShuttingDown
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
