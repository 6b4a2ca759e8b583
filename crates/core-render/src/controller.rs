//! Blocking event loop.
//!
//! One event is read and fully handled per iteration; a resize that arrives
//! while a render is running is seen at the next read. Nothing is rendered
//! concurrently, so pane geometry is always consistent when the editor's next
//! redisplay computes a cursor column.

use std::io::Write;

use anyhow::Result;
use core_events::{EventSource, InputEvent};
use core_line::{InputBridge, LineEditor, LineEvent};

use crate::session::Session;

pub struct Controller<W: Write, E> {
    session: Session<W>,
    bridge: InputBridge<E>,
}

impl<W: Write, E: LineEditor> Controller<W, E> {
    pub fn new(session: Session<W>, bridge: InputBridge<E>) -> Self {
        Self { session, bridge }
    }

    /// Paint the first full frame.
    pub fn start(&mut self) -> Result<()> {
        let (rows, cols) = self.session.screen().size();
        self.session.handle_resize(rows, cols, self.bridge.view())?;
        Ok(())
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Key(byte) => {
                match self.bridge.feed_byte(byte, &mut self.session)? {
                    Some(LineEvent::Completed(line)) => {
                        tracing::debug!(target: "runtime", len = line.len(), "line_completed");
                    }
                    Some(LineEvent::Cancelled) => {
                        tracing::debug!(target: "runtime", "line_cancelled");
                    }
                    None => {}
                }
            }
            InputEvent::Resize { rows, cols } => {
                self.session.handle_resize(rows, cols, self.bridge.view())?;
            }
            InputEvent::RedrawRequest => {
                self.session.request_redraw(self.bridge.view())?;
            }
        }
        Ok(())
    }

    /// True once input was cancelled on an empty line.
    pub fn should_exit(&self) -> bool {
        self.bridge.is_shutting_down()
    }

    /// Handle events from `source` until shutdown or until it runs dry.
    pub fn run(&mut self, source: &mut dyn EventSource) -> Result<()> {
        while !self.should_exit() {
            match source.next_event()? {
                Some(event) => self.handle(event)?,
                None => {
                    tracing::info!(target: "runtime", "input_exhausted");
                    break;
                }
            }
        }
        tracing::info!(target: "runtime", shutting_down = self.should_exit(), "loop_exit");
        Ok(())
    }

    pub fn session(&self) -> &Session<W> {
        &self.session
    }

    pub fn bridge(&self) -> &InputBridge<E> {
        &self.bridge
    }
}
