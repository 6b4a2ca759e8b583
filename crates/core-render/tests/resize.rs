use core_line::LineView;
use core_render::{CellStyle, Screen, Session};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PROMPT: &[u8] = b"> ";

fn view(buffer: &[u8]) -> LineView<'_> {
    LineView {
        prompt: PROMPT,
        buffer,
        point: buffer.len(),
    }
}

fn session(rows: u16, cols: u16) -> Session<Vec<u8>> {
    Session::new(Screen::new(Vec::new(), rows, cols), CellStyle::reverse()).unwrap()
}

#[test]
fn resize_repaints_all_panes_in_one_flush() {
    let mut s = session(6, 10);
    s.commit_line(Some(b"done")).unwrap();
    s.screen_mut().output_mut().clear();

    s.handle_resize(4, 8, view(b"ab")).unwrap();
    let out = String::from_utf8(s.screen().output().clone()).unwrap();
    // Exactly one clear and every pane's text in the same burst.
    assert_eq!(out.matches("\x1b[2J").count(), 1);
    assert!(out.contains("done"));
    assert!(out.contains("ab"));

    let screen = s.screen();
    assert_eq!(screen.physical_row_text(0), "done    ");
    assert_eq!(screen.physical_cell(2, 0).unwrap().style, CellStyle::reverse());
    assert_eq!(screen.physical_row_text(3), "> ab    ");
    let cursor = screen.physical_cursor();
    assert_eq!((cursor.row, cursor.col), (3, 4));
}

#[test]
fn degenerate_terminal_collapses_without_error() {
    let mut s = session(6, 10);
    s.commit_line(Some(b"older")).unwrap();
    for rows in [2, 1, 0] {
        s.handle_resize(rows, 10, view(b"x")).unwrap();
        let layout = s.layout();
        assert!(layout.is_degenerate());
        assert_eq!(layout.scrollback.rows, 1);
        assert_eq!(layout.input.rows, 1);
    }
    s.handle_resize(2, 10, view(b"x")).unwrap();
    // Input is staged last, so it is what shows on the shared row.
    assert_eq!(s.screen().physical_row_text(0), "> x       ");
}

#[test]
fn shrinking_below_three_rows_blanks_stale_rows() {
    let mut s = session(6, 10);
    s.commit_line(Some(b"0123456789abc")).unwrap();
    assert_eq!(s.screen().physical_row_text(1), "abc       ");
    s.handle_resize(2, 10, view(b"x")).unwrap();
    assert_eq!(s.screen().physical_row_text(0), "> x       ");
    assert_eq!(s.screen().physical_row_text(1), "          ");
}

#[test]
fn zero_column_terminal_never_fails() {
    let mut s = session(4, 5);
    s.handle_resize(4, 0, view(b"abc")).unwrap();
    s.commit_line(Some(b"line")).unwrap();
    s.render_input(view(b"abcd"), false).unwrap();
    assert!(!s.screen().physical_cursor().visible);
}

#[test]
fn redraw_request_forces_full_repaint_at_same_size() {
    let mut s = session(4, 6);
    s.handle_resize(4, 6, view(b"")).unwrap();
    s.screen_mut().output_mut().clear();
    s.request_redraw(view(b"q")).unwrap();
    let out = String::from_utf8(s.screen().output().clone()).unwrap();
    assert!(out.contains("\x1b[2J"));
    assert_eq!(s.screen().size(), (4, 6));
    assert_eq!(s.screen().physical_row_text(3), "> q   ");
}

#[test]
fn growing_keeps_scrollback_line() {
    let mut s = session(3, 4);
    s.commit_line(Some(b"abcdef")).unwrap();
    // A one-row scrollback scrolls, leaving the tail.
    assert_eq!(s.screen().physical_row_text(0), "ef  ");
    s.handle_resize(5, 10, view(b"")).unwrap();
    assert_eq!(s.screen().physical_row_text(0), "abcdef    ");
}

proptest! {
    #[test]
    fn any_resize_leaves_consistent_geometry(rows in 0u16..60, cols in 0u16..200) {
        let mut s = session(10, 40);
        s.handle_resize(rows, cols, view(b"hello")).unwrap();
        let layout = s.layout();
        for id in [s.panes().scrollback, s.panes().separator, s.panes().input] {
            let pane = s.screen().pane(id).unwrap();
            prop_assert_eq!(pane.geometry().cols, cols);
        }
        if rows >= 3 {
            prop_assert_eq!(layout.total_rows(), rows);
            let input = s.screen().pane(s.panes().input).unwrap().geometry();
            prop_assert_eq!(input.origin_row, rows - 1);
        } else {
            prop_assert!(layout.is_degenerate());
        }
        prop_assert_eq!(s.screen().size(), (rows, cols));
    }
}
