#![forbid(unsafe_code)]

//! Raw-mode terminal session with guaranteed restore.
//!
//! [`Session`] owns raw mode and (optionally) the alternate screen for its
//! lifetime. Drop restores the terminal even on early returns; cleanup
//! errors are swallowed because there is nowhere sensible to report them
//! once the screen is being torn down.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{cursor, event, execute, terminal};

use enclave_core::event::Event;

/// RAII guard over raw mode, the alternate screen, and cursor visibility.
pub struct Session {
    alt_screen: bool,
}

impl Session {
    /// Enter raw mode (and the alternate screen when `alt_screen` is set),
    /// hide the cursor.
    pub fn new(alt_screen: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // The guard must exist before any screen setup: a failure below
        // returns through `?`, dropping it, which restores the terminal.
        let session = Self { alt_screen };
        setup_screen(&mut io::stdout(), alt_screen)?;
        Ok(session)
    }

    /// Wait up to `timeout` for an input event.
    ///
    /// Returns `None` on timeout and for event kinds the demo drops.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            return Ok(Event::from_crossterm(event::read()?));
        }
        Ok(None)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alt_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

fn setup_screen(out: &mut impl Write, alt_screen: bool) -> io::Result<()> {
    if alt_screen {
        execute!(out, terminal::EnterAlternateScreen)?;
    }
    execute!(out, cursor::Hide)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("screen gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("screen gone"))
        }
    }

    #[test]
    fn setup_failure_propagates_as_error() {
        // `Session::new` relies on this `Err` reaching its `?` so the
        // already-constructed guard drops and restores raw mode.
        assert!(setup_screen(&mut FailingWriter, true).is_err());
        assert!(setup_screen(&mut FailingWriter, false).is_err());
    }

    #[test]
    fn setup_hides_the_cursor() {
        let mut out = Vec::new();
        setup_screen(&mut out, false).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?25l"));
        assert!(!written.contains("\x1b[?1049h"));
    }

    #[test]
    fn setup_enters_alt_screen_when_requested() {
        let mut out = Vec::new();
        setup_screen(&mut out, true).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\x1b[?1049h"));
    }
}
