//! Terminal backend and crossterm implementation.
//!
//! Entering switches the terminal to raw mode on the alternate screen;
//! leaving restores it. Whether the terminal is currently entered is tracked
//! process-wide, so teardown runs at most once per enter no matter how many
//! paths (guard drop, panic hook, explicit `leave`) attempt it.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    style::{Attribute, SetAttribute},
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

static ENTERED: AtomicBool = AtomicBool::new(false);

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current `(rows, cols)`.
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    _private: (),
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

/// Whether raw mode / alternate screen are currently active.
pub fn is_entered() -> bool {
    ENTERED.load(Ordering::SeqCst)
}

/// Restore the terminal if it is still entered. Safe to call repeatedly and
/// from a panic hook.
pub fn restore() -> Result<()> {
    if ENTERED.swap(false, Ordering::SeqCst) {
        execute!(
            stdout(),
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;
        tracing::debug!(target: "runtime", "terminal_restored");
    }
    Ok(())
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !ENTERED.load(Ordering::SeqCst) {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            ENTERED.store(true, Ordering::SeqCst);
            tracing::debug!(target: "runtime", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        restore()
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }
}

impl<'a> TerminalGuard<'a> {
    pub fn backend(&self) -> &CrosstermBackend {
        self.backend
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
