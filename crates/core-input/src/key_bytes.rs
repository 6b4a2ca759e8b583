use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CKeyModifiers};

const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

/// Encode a key press as the bytes a raw-mode terminal would send.
///
/// Returns `None` for keys with no conventional byte encoding (function keys,
/// media keys, lone modifiers).
pub(crate) fn encode_key(key: &CKeyEvent) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(4);
    if key.modifiers.contains(CKeyModifiers::ALT) {
        out.push(ESC);
    }
    match key.code {
        CKeyCode::Char(c) if key.modifiers.contains(CKeyModifiers::CONTROL) => {
            out.push(control_byte(c)?);
        }
        CKeyCode::Char(c) => {
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
        CKeyCode::Enter => out.push(b'\r'),
        CKeyCode::Tab => out.push(b'\t'),
        CKeyCode::BackTab => out.extend_from_slice(b"\x1b[Z"),
        CKeyCode::Backspace => out.push(DEL),
        CKeyCode::Esc => out.push(ESC),
        CKeyCode::Up => out.extend_from_slice(b"\x1b[A"),
        CKeyCode::Down => out.extend_from_slice(b"\x1b[B"),
        CKeyCode::Right => out.extend_from_slice(b"\x1b[C"),
        CKeyCode::Left => out.extend_from_slice(b"\x1b[D"),
        CKeyCode::Home => out.extend_from_slice(b"\x1b[H"),
        CKeyCode::End => out.extend_from_slice(b"\x1b[F"),
        CKeyCode::Insert => out.extend_from_slice(b"\x1b[2~"),
        CKeyCode::Delete => out.extend_from_slice(b"\x1b[3~"),
        CKeyCode::PageUp => out.extend_from_slice(b"\x1b[5~"),
        CKeyCode::PageDown => out.extend_from_slice(b"\x1b[6~"),
        _ => return None,
    }
    Some(out)
}

/// `Ctrl-<c>` maps the key's ASCII code into the C0 range (`Ctrl-A` -> 0x01).
fn control_byte(c: char) -> Option<u8> {
    match c {
        ' ' | '@' | '2' => Some(0x00),
        'a'..='z' | 'A'..='Z' => Some(c.to_ascii_uppercase() as u8 & 0x1F),
        '[' | '\\' | ']' | '^' | '_' => Some(c as u8 & 0x1F),
        '?' => Some(DEL),
        _ => None,
    }
}
