//! A small Emacs-style single-line editor.
//!
//! Bindings: printable input inserts; TAB inserts a literal tab; `C-v` inserts
//! the next byte verbatim; `C-a`/`C-e`/Home/End jump; `C-b`/`C-f`/arrows move;
//! Backspace/`C-h` delete backward; `C-d`/Delete delete forward (`C-d` on an
//! empty line cancels); `C-u`/`C-k` kill to start/end; CR or LF accepts.
//! Unbound bytes are ignored.
//!
//! The buffer is a byte string. Multibyte UTF-8 input is held back until the
//! sequence is complete so a redisplay never shows half a character. Cursor
//! motion steps over whole code points; stray bytes move one at a time.

use anyhow::Result;

use crate::{ByteSource, EditorHooks, LineEditor, LineView};

const CTRL_A: u8 = 0x01;
const CTRL_B: u8 = 0x02;
const CTRL_D: u8 = 0x04;
const CTRL_E: u8 = 0x05;
const CTRL_F: u8 = 0x06;
const CTRL_H: u8 = 0x08;
const CTRL_K: u8 = 0x0B;
const CTRL_U: u8 = 0x15;
const CTRL_V: u8 = 0x16;
const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyState {
    Ground,
    Escape,
    Csi(Vec<u8>),
    Ss3,
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Insert(u8),
    Accept,
    DeleteForwardOrCancel,
    DeleteBackward,
    DeleteForward,
    Home,
    End,
    Left,
    Right,
    KillToStart,
    KillToEnd,
}

#[derive(Debug, Clone)]
pub struct BasicEditor {
    prompt: Vec<u8>,
    buffer: Vec<u8>,
    point: usize,
    keys: KeyState,
    partial: Vec<u8>,
}

impl BasicEditor {
    pub fn new(prompt: impl Into<Vec<u8>>) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: Vec::new(),
            point: 0,
            keys: KeyState::Ground,
            partial: Vec::new(),
        }
    }

    fn process(&mut self, byte: u8, hooks: &mut dyn EditorHooks) -> Result<()> {
        match std::mem::replace(&mut self.keys, KeyState::Ground) {
            KeyState::Quoted => self.apply(Edit::Insert(byte), hooks),
            KeyState::Escape => {
                match byte {
                    b'[' => self.keys = KeyState::Csi(Vec::new()),
                    b'O' => self.keys = KeyState::Ss3,
                    _ => {}
                }
                Ok(())
            }
            KeyState::Csi(mut params) => {
                if (0x30..=0x3F).contains(&byte) {
                    params.push(byte);
                    self.keys = KeyState::Csi(params);
                    return Ok(());
                }
                match csi_edit(&params, byte) {
                    Some(edit) => self.apply(edit, hooks),
                    None => Ok(()),
                }
            }
            KeyState::Ss3 => match csi_edit(&[], byte) {
                Some(edit) => self.apply(edit, hooks),
                None => Ok(()),
            },
            KeyState::Ground => self.ground(byte, hooks),
        }
    }

    fn ground(&mut self, byte: u8, hooks: &mut dyn EditorHooks) -> Result<()> {
        if !self.partial.is_empty() {
            if is_continuation(byte) {
                self.partial.push(byte);
                if self.partial.len() == utf8_len(self.partial[0]) {
                    self.insert_partial();
                    return self.redisplay(hooks);
                }
                return Ok(());
            }
            // Broken sequence: keep what arrived as raw bytes, then handle `byte` on its own.
            self.insert_partial();
            self.redisplay(hooks)?;
        }

        if utf8_len(byte) > 1 {
            self.partial.push(byte);
            return Ok(());
        }

        let edit = match byte {
            b'\r' | b'\n' => Edit::Accept,
            CTRL_D => Edit::DeleteForwardOrCancel,
            DEL | CTRL_H => Edit::DeleteBackward,
            CTRL_A => Edit::Home,
            CTRL_E => Edit::End,
            CTRL_B => Edit::Left,
            CTRL_F => Edit::Right,
            CTRL_K => Edit::KillToEnd,
            CTRL_U => Edit::KillToStart,
            CTRL_V => {
                self.keys = KeyState::Quoted;
                return Ok(());
            }
            ESC => {
                self.keys = KeyState::Escape;
                return Ok(());
            }
            b'\t' => Edit::Insert(byte),
            0x00..=0x1F => return Ok(()),
            _ => Edit::Insert(byte),
        };
        self.apply(edit, hooks)
    }

    fn apply(&mut self, edit: Edit, hooks: &mut dyn EditorHooks) -> Result<()> {
        match edit {
            Edit::Insert(byte) => {
                self.buffer.insert(self.point, byte);
                self.point += 1;
            }
            Edit::Accept => {
                let line = std::mem::take(&mut self.buffer);
                self.point = 0;
                tracing::trace!(target: "line", len = line.len(), "accept");
                hooks.line_completed(Some(&line))?;
            }
            Edit::DeleteForwardOrCancel if self.buffer.is_empty() => {
                tracing::trace!(target: "line", "cancel");
                return hooks.line_completed(None);
            }
            Edit::DeleteForwardOrCancel | Edit::DeleteForward => {
                let end = next_boundary(&self.buffer, self.point);
                self.buffer.drain(self.point..end);
            }
            Edit::DeleteBackward => {
                let start = prev_boundary(&self.buffer, self.point);
                self.buffer.drain(start..self.point);
                self.point = start;
            }
            Edit::Home => self.point = 0,
            Edit::End => self.point = self.buffer.len(),
            Edit::Left => self.point = prev_boundary(&self.buffer, self.point),
            Edit::Right => self.point = next_boundary(&self.buffer, self.point),
            Edit::KillToStart => {
                self.buffer.drain(..self.point);
                self.point = 0;
            }
            Edit::KillToEnd => self.buffer.truncate(self.point),
        }
        self.redisplay(hooks)
    }

    fn insert_partial(&mut self) {
        let bytes = std::mem::take(&mut self.partial);
        let n = bytes.len();
        self.buffer.splice(self.point..self.point, bytes);
        self.point += n;
    }

    fn redisplay(&self, hooks: &mut dyn EditorHooks) -> Result<()> {
        hooks.redisplay(self.view())
    }
}

impl LineEditor for BasicEditor {
    fn view(&self) -> LineView<'_> {
        LineView {
            prompt: &self.prompt,
            buffer: &self.buffer,
            point: self.point,
        }
    }

    fn read_step(
        &mut self,
        input: &mut dyn ByteSource,
        hooks: &mut dyn EditorHooks,
    ) -> Result<()> {
        while input.has_more() {
            let Some(byte) = input.supply_byte() else {
                break;
            };
            self.process(byte, hooks)?;
        }
        Ok(())
    }
}

/// Edits reachable through `ESC [ <params> <final>` and `ESC O <final>`.
fn csi_edit(params: &[u8], final_byte: u8) -> Option<Edit> {
    match (params, final_byte) {
        (_, b'C') => Some(Edit::Right),
        (_, b'D') => Some(Edit::Left),
        (_, b'H') | (b"1" | b"7", b'~') => Some(Edit::Home),
        (_, b'F') | (b"4" | b"8", b'~') => Some(Edit::End),
        (b"3", b'~') => Some(Edit::DeleteForward),
        _ => None,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Sequence length announced by a UTF-8 lead byte; 1 for ASCII and anything
/// that cannot start a multibyte sequence.
#[inline]
fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

fn prev_boundary(buf: &[u8], point: usize) -> usize {
    if point == 0 {
        return 0;
    }
    let mut i = point - 1;
    while i > 0 && is_continuation(buf[i]) && point - i < 4 {
        i -= 1;
    }
    if utf8_len(buf[i]) == point - i { i } else { point - 1 }
}

fn next_boundary(buf: &[u8], point: usize) -> usize {
    if point >= buf.len() {
        return buf.len();
    }
    let len = utf8_len(buf[point]);
    let end = point + len;
    if len > 1 && end <= buf.len() && buf[point + 1..end].iter().all(|b| is_continuation(*b)) {
        end
    } else {
        point + 1
    }
}
