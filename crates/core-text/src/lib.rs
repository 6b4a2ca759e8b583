//! Text measurement for the input line.
//!
//! Everything here is pure over its inputs and never consults terminal state.

pub mod width;

pub use width::{
    TAB_WIDTH, caret_notation, char_advance, next_tab_stop, width_of_prefix, width_of_str,
};

/// Absolute screen column of the edit cursor.
///
/// The buffer is measured starting at the prompt's width so tabs inside the
/// buffer land on the terminal's tab stops rather than the buffer's own.
pub fn cursor_column(prompt: &[u8], buffer: &[u8], point: usize) -> usize {
    let prompt_width = width_of_str(prompt, 0);
    prompt_width + width_of_prefix(buffer, point, prompt_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_after_prompt_on_empty_buffer() {
        assert_eq!(cursor_column(b"> ", b"", 0), 2);
    }

    #[test]
    fn cursor_counts_buffer_prefix_only() {
        assert_eq!(cursor_column(b"> ", b"hello", 3), 5);
        assert_eq!(cursor_column(b"> ", b"hello", 5), 7);
    }

    #[test]
    fn tab_in_buffer_aligns_to_terminal_column() {
        // Prompt ends at column 3; the tab reaches column 8, not 3 + 8.
        assert_eq!(cursor_column(b"ab>", b"\tx", 1), 8);
        assert_eq!(cursor_column(b"ab>", b"\tx", 2), 9);
    }

    #[test]
    fn wide_prompt_and_buffer() {
        let prompt = "界> ".as_bytes();
        let buffer = "日本".as_bytes();
        assert_eq!(cursor_column(prompt, buffer, 3), 4 + 2);
        assert_eq!(cursor_column(prompt, buffer, buffer.len()), 4 + 4);
    }
}
