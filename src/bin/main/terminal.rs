use std::{
    env,
    io::{self, Write},
};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};

const FALLBACK_COLUMNS: usize = 80;

/// Terminal in raw mode on the alternate screen with the cursor hidden.
/// Dropping it restores all three.
pub(super) struct RawTerminal {
    _private: (),
}

impl RawTerminal {
    pub(super) fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        out.flush()?;

        debug!("terminal: raw mode on");
        Ok(guard)
    }

    /// Current width in columns.
    pub(super) fn columns(&self) -> usize {
        match terminal::size() {
            Ok((columns, _)) if columns > 0 => usize::from(columns),
            _ => env_columns(),
        }
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("terminal: leaving raw mode failed: {}", err);
        }
    }
}

/// Width when no terminal is attached.
pub(super) fn env_columns() -> usize {
    parse_columns(env::var("COLUMNS").ok().as_deref()).unwrap_or(FALLBACK_COLUMNS)
}

fn parse_columns(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok().filter(|columns| *columns > 0)
}
