//! Terminal seam used by the controller

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::core::{Result, UiError};
use crate::ui::input::{decode_key_event, Key, LineBuffer, LineEdit};

/// Spinner frames using braille dots
const SPINNER_FRAMES: &[&str] = &[
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];

const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Everything the controller needs from a terminal
pub trait Console {
    fn clear(&mut self) -> Result<()>;

    /// Print one line of output
    fn print(&mut self, line: &str) -> Result<()>;

    /// Block for a single keystroke
    fn read_key(&mut self) -> Result<Key>;

    /// Read a line of text. `None` means the user cancelled.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Block until any key is pressed
    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.print(prompt)?;
        self.read_key()?;
        Ok(())
    }

    /// Show a busy indicator while a slow engine call runs
    fn busy(&mut self, _message: &str) {}

    fn idle(&mut self) {}
}

/// Leaves raw mode when dropped, even on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|e| {
            UiError::Terminal(format!("Cannot switch the terminal to raw mode: {}", e))
        })?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// `Console` on the real terminal
///
/// Raw mode is held only while a key or line is being read, so engine output
/// and interactive exec sessions see a normal cooked terminal.
#[derive(Default)]
pub struct TerminalConsole {
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_key() -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(decode_key_event(key));
                }
            }
        }
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) -> Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn print(&mut self, line: &str) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        let key = {
            let _raw = RawModeGuard::enable()?;
            Self::next_key()?
        };
        debug!("Read key {:?}", key);
        Ok(key)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let _raw = RawModeGuard::enable()?;
        let mut buffer = LineBuffer::new();
        loop {
            match buffer.apply(Self::next_key()?) {
                LineEdit::Echo(c) => write!(stdout, "{}", c)?,
                LineEdit::Erase => write!(stdout, "\x08 \x08")?,
                LineEdit::Ignored => continue,
                LineEdit::Submit(text) => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(Some(text));
                }
                LineEdit::Cancel => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(None);
                }
            }
            stdout.flush()?;
        }
    }

    fn busy(&mut self, message: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(SPINNER_INTERVAL);
        self.spinner = Some(pb);
    }

    fn idle(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}
