//! Cell styling.
//!
//! A style is an optional foreground/background colour pair plus attribute
//! flags. `None` colours mean "terminal default", so a blank cell with
//! [`CellStyle::PLAIN`] matches what a cleared terminal shows.

use bitflags::bitflags;
use crossterm::style::Color;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub flags: CellFlags,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        fg: None,
        bg: None,
        flags: CellFlags::empty(),
    };

    pub fn colors(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            flags: CellFlags::empty(),
        }
    }

    /// Reverse video, the fallback highlight on terminals without colour.
    pub fn reverse() -> Self {
        Self {
            flags: CellFlags::REVERSE,
            ..Self::PLAIN
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}
