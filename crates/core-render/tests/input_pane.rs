use core_layout::PaneGeometry;
use core_line::LineView;
use core_render::{CellStyle, PaneId, Screen, Session, render_input_pane};
use pretty_assertions::assert_eq;

fn input_screen(cols: u16) -> (Screen<Vec<u8>>, PaneId) {
    let mut screen = Screen::new(Vec::new(), 1, cols);
    let id = screen.create_pane(PaneGeometry::new(1, cols, 0)).unwrap();
    (screen, id)
}

#[test]
fn rendering_twice_is_idempotent() {
    let (mut s, id) = input_screen(10);
    render_input_pane(&mut s, id, b"> ", b"hello", 7, false).unwrap();
    let row = s.physical_row_text(0);
    let cursor = s.physical_cursor();
    s.output_mut().clear();

    render_input_pane(&mut s, id, b"> ", b"hello", 7, false).unwrap();
    assert_eq!(s.physical_row_text(0), row);
    assert_eq!(s.physical_cursor(), cursor);
    assert!(s.output().is_empty(), "second render must not repaint");
}

#[test]
fn cursor_in_last_column_is_visible() {
    let (mut s, id) = input_screen(10);
    render_input_pane(&mut s, id, b"> ", b"abcdefg", 9, false).unwrap();
    let cursor = s.physical_cursor();
    assert!(cursor.visible);
    assert_eq!(cursor.col, 9);
}

#[test]
fn cursor_past_last_column_is_hidden() {
    let (mut s, id) = input_screen(10);
    render_input_pane(&mut s, id, b"> ", b"abcdefgh", 10, false).unwrap();
    assert!(!s.physical_cursor().visible);
    assert_eq!(s.physical_row_text(0), "> abcdefgh");
}

#[test]
fn hidden_cursor_comes_back_when_line_shrinks() {
    let (mut s, id) = input_screen(4);
    render_input_pane(&mut s, id, b"> ", b"abcd", 6, false).unwrap();
    assert!(!s.physical_cursor().visible);
    render_input_pane(&mut s, id, b"> ", b"a", 3, false).unwrap();
    assert!(s.physical_cursor().visible);
    assert_eq!(s.physical_row_text(0), "> a ");
}

fn session(cols: u16) -> Session<Vec<u8>> {
    Session::new(Screen::new(Vec::new(), 3, cols), CellStyle::reverse()).unwrap()
}

#[test]
fn tab_in_buffer_aligns_to_absolute_column() {
    let mut s = session(20);
    let view = LineView {
        prompt: b"> ",
        buffer: b"\tx",
        point: 2,
    };
    s.render_input(view, false).unwrap();
    assert_eq!(s.screen().physical_row_text(2), ">       x           ");
    assert_eq!(s.screen().physical_cursor().col, 9);
}

#[test]
fn wide_characters_move_cursor_two_columns() {
    let mut s = session(10);
    let buffer = "界界".as_bytes();
    let view = LineView {
        prompt: b"> ",
        buffer,
        point: 3,
    };
    s.render_input(view, false).unwrap();
    assert_eq!(s.screen().physical_cursor().col, 4);
}

#[test]
fn control_bytes_occupy_two_columns() {
    let mut s = session(10);
    let view = LineView {
        prompt: b"> ",
        buffer: b"\x01z",
        point: 2,
    };
    s.render_input(view, false).unwrap();
    assert_eq!(s.screen().physical_row_text(2), "> ^Az     ");
    assert_eq!(s.screen().physical_cursor().col, 5);
}
