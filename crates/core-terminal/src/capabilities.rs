//! Terminal capability probing.
//!
//! Detection runs once at startup. Only colour support is recorded: the
//! separator uses its configured colours when at least the eight basic ANSI
//! colours are available and falls back to reverse video otherwise.

/// Fewest colours for which the separator is drawn in colour.
pub const MIN_COLORS: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub colors: u16,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let caps = Self::from_color_count(crossterm::style::available_color_count());
        tracing::debug!(target: "runtime", colors = caps.colors, "terminal_capabilities");
        caps
    }

    pub fn from_color_count(colors: u16) -> Self {
        Self { colors }
    }

    pub fn has_colors(&self) -> bool {
        self.colors >= MIN_COLORS
    }
}
