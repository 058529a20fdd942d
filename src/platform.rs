//! Startup check that the process can host the interactive card surface.

use std::fmt;
use std::io::IsTerminal;

/// Smallest terminal the review screen lays out in
pub const MIN_COLUMNS: u16 = 60;
pub const MIN_ROWS: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformVerdict {
    Supported,
    /// Stdout is redirected; nothing can be drawn
    NotATerminal,
    /// Terminal is there but smaller than the minimum
    TooSmall { columns: u16, rows: u16 },
}

impl PlatformVerdict {
    pub fn is_supported(&self) -> bool {
        matches!(self, PlatformVerdict::Supported)
    }
}

impl fmt::Display for PlatformVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformVerdict::Supported => write!(f, "terminal supported"),
            PlatformVerdict::NotATerminal => write!(
                f,
                "pswp needs an interactive terminal. Run it directly in a terminal window, not through a pipe."
            ),
            PlatformVerdict::TooSmall { columns, rows } => write!(
                f,
                "Your terminal is {}x{}. pswp needs at least {}x{} to show the photo card.",
                columns, rows, MIN_COLUMNS, MIN_ROWS
            ),
        }
    }
}

/// Judges a terminal from its tty-ness and size
pub fn evaluate(is_terminal: bool, size: Option<(u16, u16)>) -> PlatformVerdict {
    if !is_terminal {
        return PlatformVerdict::NotATerminal;
    }
    match size {
        Some((columns, rows)) if columns >= MIN_COLUMNS && rows >= MIN_ROWS => {
            PlatformVerdict::Supported
        }
        Some((columns, rows)) => PlatformVerdict::TooSmall { columns, rows },
        None => PlatformVerdict::NotATerminal,
    }
}

/// Evaluated once at startup against the real stdout
pub fn detect() -> PlatformVerdict {
    let verdict = evaluate(
        std::io::stdout().is_terminal(),
        crossterm::terminal::size().ok(),
    );
    tracing::debug!(%verdict, "platform check");
    verdict
}
