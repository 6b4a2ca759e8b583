//! Input and scrollback pane renderers.
//!
//! Both erase their pane and redraw it from scratch, so rendering twice with
//! the same inputs leaves the screen unchanged. With `batched` set the pane is
//! only staged and the caller owns the commit; otherwise it is refreshed now.

use std::io::Write;

use crate::DisplayError;
use crate::screen::{PaneId, Screen};

/// Redraw the input pane as `prompt` followed by `buffer`, with the terminal
/// cursor at `cursor_column`.
///
/// Text running past the pane's right edge is clipped. A cursor column at or
/// beyond the pane width cannot be shown, so the terminal cursor is hidden.
pub fn render_input_pane<W: Write>(
    screen: &mut Screen<W>,
    pane: PaneId,
    prompt: &[u8],
    buffer: &[u8],
    cursor_column: usize,
    batched: bool,
) -> Result<(), DisplayError> {
    let p = screen.pane_mut(pane)?;
    p.erase();
    match p.write_bytes(prompt).and_then(|()| p.write_bytes(buffer)) {
        Ok(()) | Err(DisplayError::Overflow) => {}
        Err(err) => return Err(err),
    }

    let pane_width = usize::from(p.geometry().cols);
    let visible = match u16::try_from(cursor_column) {
        Ok(col) if cursor_column < pane_width => {
            p.move_cursor(0, col)?;
            true
        }
        _ => false,
    };
    screen.set_cursor_visible(visible);
    tracing::trace!(
        target: "render",
        prompt_len = prompt.len(),
        buffer_len = buffer.len(),
        cursor_column,
        visible,
        batched,
        "input_pane"
    );

    if batched {
        screen.stage(pane)
    } else {
        screen.refresh(pane)
    }
}

/// Redraw the scrollback pane showing `committed` (or nothing).
///
/// The pane scrolls, so a line longer than the pane keeps its tail visible.
pub fn render_scrollback_pane<W: Write>(
    screen: &mut Screen<W>,
    pane: PaneId,
    committed: Option<&[u8]>,
    batched: bool,
) -> Result<(), DisplayError> {
    let p = screen.pane_mut(pane)?;
    p.erase();
    let line = committed.unwrap_or_default();
    if let Err(err) = p.write_str_at(0, 0, line) {
        // Zero-width panes cannot hold text; nothing else can go wrong here.
        tracing::debug!(
            target: "render",
            error = %err,
            len = line.len(),
            "scrollback_write_clipped"
        );
    }
    if batched {
        screen.stage(pane)
    } else {
        screen.refresh(pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_layout::PaneGeometry;

    fn setup(cols: u16) -> (Screen<Vec<u8>>, PaneId) {
        let mut s = Screen::new(Vec::new(), 1, cols);
        let id = s.create_pane(PaneGeometry::new(1, cols, 0)).unwrap();
        (s, id)
    }

    #[test]
    fn overlong_input_is_clipped_not_an_error() {
        let (mut s, id) = setup(4);
        render_input_pane(&mut s, id, b"> ", b"abcdef", 8, false).unwrap();
        assert_eq!(s.physical_row_text(0), "> ab");
        assert!(!s.physical_cursor().visible);
    }

    #[test]
    fn batched_render_waits_for_commit() {
        let (mut s, id) = setup(6);
        render_input_pane(&mut s, id, b"> ", b"x", 3, true).unwrap();
        assert_eq!(s.physical_row_text(0), "      ");
        s.commit().unwrap();
        assert_eq!(s.physical_row_text(0), "> x   ");
    }

    #[test]
    fn scrollback_shows_empty_when_nothing_committed() {
        let (mut s, id) = setup(3);
        s.pane_mut(id).unwrap().write_bytes(b"old").ok();
        render_scrollback_pane(&mut s, id, None, false).unwrap();
        assert_eq!(s.physical_row_text(0), "   ");
    }
}
