//! Column width of byte strings as the input pane draws them.
//!
//! Widths follow the drawing rules of the pane writer:
//! - TAB advances to the next multiple of [`TAB_WIDTH`], measured from the
//!   absolute terminal column (`column_offset + width so far`).
//! - Any other control character occupies two cells (caret notation, `^A`).
//! - Everything else takes its `unicode_width` width; zero-width and combining
//!   marks contribute nothing.
//!
//! Bytes are decoded as UTF-8 with a fresh decoder on every call, so the
//! functions are pure and re-entrant. The first invalid or truncated sequence
//! ends decoding: each remaining byte inside the prefix bound is then counted
//! as one column. That is a guess for malformed input and can be wrong for
//! wide garbage, but it never fails and never loops.

use unicode_width::UnicodeWidthChar;

/// Distance between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Width in columns of the characters that start within the first
/// `prefix_len` bytes of `bytes`.
///
/// `prefix_len` larger than the string measures the whole string. A character
/// that starts before the bound but ends after it is counted in full.
/// `column_offset` is the absolute column the string starts at; it only
/// matters for tab stops.
pub fn width_of_prefix(bytes: &[u8], prefix_len: usize, column_offset: usize) -> usize {
    let bound = prefix_len.min(bytes.len());
    let mut width = 0usize;
    let mut pos = 0usize;

    for chunk in bytes.utf8_chunks() {
        for ch in chunk.valid().chars() {
            if pos >= bound {
                return width;
            }
            width += char_advance(ch, column_offset + width);
            pos += ch.len_utf8();
        }
        if !chunk.invalid().is_empty() {
            return width + bound.saturating_sub(pos);
        }
    }
    width
}

/// Width of the whole string starting at `column_offset`.
pub fn width_of_str(bytes: &[u8], column_offset: usize) -> usize {
    width_of_prefix(bytes, usize::MAX, column_offset)
}

/// Columns `ch` advances when drawn at absolute `column`.
pub fn char_advance(ch: char, column: usize) -> usize {
    if ch == '\t' {
        next_tab_stop(column) - column
    } else if ch.is_control() {
        2
    } else {
        ch.width().unwrap_or(0)
    }
}

/// First tab stop strictly to the right of `column`.
#[inline]
pub fn next_tab_stop(column: usize) -> usize {
    (column / TAB_WIDTH + 1) * TAB_WIDTH
}

/// Two-glyph caret notation for a control character.
///
/// C0 controls and DEL use `^` (`^A`, `^[`, `^?`); C1 controls use `~` with
/// the same letter mapping. Returns `None` for non-control characters and TAB,
/// which is expanded rather than escaped.
pub fn caret_notation(ch: char) -> Option<[char; 2]> {
    let code = ch as u32;
    match code {
        0x09 => None,
        0x00..=0x1F => char::from_u32(code + 0x40).map(|c| ['^', c]),
        0x7F => Some(['^', '?']),
        0x80..=0x9F => char::from_u32(code - 0x80 + 0x40).map(|c| ['~', c]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_one_per_byte() {
        assert_eq!(width_of_prefix(b"hello", 5, 0), 5);
        assert_eq!(width_of_prefix(b"hello", 3, 0), 3);
        assert_eq!(width_of_prefix(b"hello", 0, 0), 0);
    }

    #[test]
    fn prefix_larger_than_string_measures_all() {
        assert_eq!(width_of_prefix(b"abc", 100, 0), 3);
        assert_eq!(width_of_str(b"abc", 7), 3);
    }

    #[test]
    fn tab_aligns_to_absolute_column() {
        assert_eq!(width_of_prefix(b"\t", 1, 0), 8);
        assert_eq!(width_of_prefix(b"\t", 1, 3), 5);
        assert_eq!(width_of_prefix(b"\t", 1, 8), 8);
        assert_eq!(width_of_prefix(b"ab\tc", 4, 0), 9);
        assert_eq!(width_of_prefix(b"ab\tc", 4, 2), 7);
    }

    #[test]
    fn control_characters_take_two_cells() {
        assert_eq!(width_of_prefix(b"\x01", 1, 0), 2);
        assert_eq!(width_of_prefix(b"\x7f", 1, 0), 2);
        assert_eq!(width_of_prefix(b"a\x1bb", 3, 0), 4);
    }

    #[test]
    fn wide_and_combining_characters() {
        let cjk = "界a".as_bytes();
        assert_eq!(width_of_str(cjk, 0), 3);
        let combining = "e\u{0301}x".as_bytes();
        assert_eq!(width_of_str(combining, 0), 2);
    }

    #[test]
    fn character_straddling_bound_counts_fully() {
        let s = "界".as_bytes();
        assert_eq!(width_of_prefix(s, 1, 0), 2);
    }

    #[test]
    fn invalid_byte_falls_back_to_one_column_each() {
        // 'a', lone continuation byte, then "bc": fallback counts 3 remaining bytes.
        assert_eq!(width_of_prefix(b"a\x80bc", 4, 0), 4);
        // Bound applies to the fallback count too.
        assert_eq!(width_of_prefix(b"a\x80bc", 2, 0), 2);
    }

    #[test]
    fn truncated_trailing_sequence_falls_back() {
        // First two bytes of a three-byte sequence.
        let bytes = [b'x', 0xE7, 0x95];
        assert_eq!(width_of_prefix(&bytes, 3, 0), 3);
    }

    #[test]
    fn fallback_after_valid_wide_prefix() {
        let mut bytes = "界".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        assert_eq!(width_of_str(&bytes, 0), 4);
    }

    #[test]
    fn caret_notation_letters() {
        assert_eq!(caret_notation('\u{1}'), Some(['^', 'A']));
        assert_eq!(caret_notation('\u{1b}'), Some(['^', '[']));
        assert_eq!(caret_notation('\u{7f}'), Some(['^', '?']));
        assert_eq!(caret_notation('\u{85}'), Some(['~', 'E']));
        assert_eq!(caret_notation('\t'), None);
        assert_eq!(caret_notation('a'), None);
    }
}
