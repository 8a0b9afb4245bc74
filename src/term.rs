use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::warn;

/// Everything the game needs from the screen and keyboard.
pub trait Surface {
    fn set_size(&mut self, width: TermInt, height: TermInt) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Writes a single glyph at `(x, y)` in the given foreground color.
    fn put(&mut self, x: TermInt, y: TermInt, color: Color, glyph: char) -> Result<()>;
    fn print_at(&mut self, x: TermInt, y: TermInt, color: Color, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Waits up to `timeout` for a key press and consumes it if one arrives.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
    /// Blocks until a key is pressed.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Owns the terminal between `setup` and `restore`. Dropping it restores the
/// terminal too, so early returns and panics don't leave it in raw mode.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    // Size before the game resized the window
    original_size: Option<(TermInt, TermInt)>,
    active: bool,
}

impl TermManager<Stdout> {
    pub fn new() -> Self {
        TermManager::with_writer(stdout())
    }
}

impl Default for TermManager<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W) -> Self {
        TermManager { out, original_size: None, active: false }
    }

    /// Switches to the alternate screen in raw mode. If any step fails, the
    /// steps already taken are undone before the error is returned.
    pub fn setup(&mut self) -> Result<()> {
        self.original_size = terminal::size().ok();
        self.active = true;

        let res = self.enter();
        if res.is_err() {
            if let Err(e) = self.restore() {
                warn!("could not undo partial setup: {:#}", e);
            }
        }

        res
    }

    /// Undoes `setup`. Every step is attempted even if an earlier one fails;
    /// the first error is returned. Does nothing when already restored.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = self.set_raw_mode(false);
        let screen = execute!(self.out, style::ResetColor, cursor::Show, LeaveAlternateScreen)
            .context("Error leaving alt screen");
        let size = match self.original_size {
            Some((width, height)) => execute!(self.out, terminal::SetSize(width, height))
                .context("Error restoring terminal size"),
            None => Ok(()),
        };

        raw.and(screen).and(size)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn enter(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        execute!(self.out, cursor::Hide).context("Error hiding cursor.")
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode.")
    }
}

impl<W: Write> Drop for TermManager<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("could not restore terminal: {:#}", e);
        }
    }
}

impl<W: Write> Surface for TermManager<W> {
    fn set_size(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        execute!(self.out, terminal::SetSize(width, height)).context("Error resizing terminal.")
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All)).context("Error clearing.")
    }

    fn put(&mut self, x: TermInt, y: TermInt, color: Color, glyph: char) -> Result<()> {
        queue!(self.out, cursor::MoveTo(x, y), style::SetForegroundColor(color), style::Print(glyph))?;
        Ok(())
    }

    fn print_at(&mut self, x: TermInt, y: TermInt, color: Color, text: &str) -> Result<()> {
        queue!(self.out, cursor::MoveTo(x, y), style::SetForegroundColor(color), style::Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Error flushing.")
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            // Resize and mouse events are dropped here
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}

#[cfg(test)]
pub use scripted::{key, ScriptedSurface};


#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, io, rc::Rc};

    const ENTER_ALT: &str = "\x1b[?1049h";
    const LEAVE_ALT: &str = "\x1b[?1049l";
    const SHOW_CURSOR: &str = "\x1b[?25h";

    /// Writer whose bytes stay readable after the manager is dropped
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_setup_leaves_alt_screen() {
        let buf = SharedBuf::default();
        let mut term = TermManager::with_writer(buf.clone());

        // Without a controlling tty, raw mode fails after the alt screen is entered
        match term.setup() {
            Err(_) => {
                let out = buf.contents();
                assert!(out.contains(ENTER_ALT));
                assert!(out.contains(LEAVE_ALT), "alt screen left on: {:?}", out);
                assert!(!term.active);
            },
            Ok(()) => {
                term.restore().unwrap();
                assert!(buf.contents().contains(LEAVE_ALT));
            },
        }
    }

    #[test]
    fn restore_undoes_setup_once() {
        let buf = SharedBuf::default();
        let mut term = TermManager::with_writer(buf.clone());
        let _ = term.setup();
        let _ = term.restore();

        let out = buf.contents();
        assert!(out.contains(LEAVE_ALT));
        assert!(out.contains(SHOW_CURSOR));

        assert!(term.restore().is_ok());
        assert_eq!(buf.contents(), out);
    }

    #[test]
    fn restore_without_setup_writes_nothing() {
        let buf = SharedBuf::default();
        let mut term = TermManager::with_writer(buf.clone());

        assert!(term.restore().is_ok());
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn default_manager_starts_inactive() {
        let mut term = TermManager::default();
        assert!(!term.active);
        assert!(term.original_size.is_none());
        assert!(term.restore().is_ok());
    }

    #[test]
    fn dropping_restores_the_terminal() {
        let buf = SharedBuf::default();
        {
            let mut term = TermManager::with_writer(buf.clone());
            let _ = term.setup();
            term.set_size(32, 16).unwrap();
        }

        let out = buf.contents();
        let entered = out.rfind(ENTER_ALT).unwrap();
        assert!(out.rfind(LEAVE_ALT).unwrap() > entered);
    }

    #[test]
    fn restore_puts_back_original_size() {
        let buf = SharedBuf::default();
        let mut term = TermManager::with_writer(buf.clone());
        term.original_size = Some((80, 24));
        term.active = true;

        let _ = term.restore();
        assert!(buf.contents().ends_with("\x1b[8;24;80t"));
    }
}
