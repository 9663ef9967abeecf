//! Decode terminal key events into session keystrokes

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keystroke as the controller sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    /// Ctrl-C read while the terminal is in raw mode
    Interrupt,
    Other,
}

/// Map a crossterm key event to a `Key`.
pub fn decode_key_event(key: KeyEvent) -> Key {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Key::Interrupt,
            _ => Key::Other,
        };
    }

    match key.code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Result of feeding one key to a `LineBuffer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Character appended; echo it
    Echo(char),
    /// Last character removed; erase it on screen
    Erase,
    Ignored,
    Submit(String),
    Cancel,
}

/// Single-line input editor driven by raw keystrokes
#[derive(Debug, Default)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, key: Key) -> LineEdit {
        match key {
            Key::Char(c) if !c.is_control() => {
                self.text.push(c);
                LineEdit::Echo(c)
            }
            Key::Backspace => match self.text.pop() {
                Some(_) => LineEdit::Erase,
                None => LineEdit::Ignored,
            },
            Key::Enter => LineEdit::Submit(std::mem::take(&mut self.text)),
            Key::Escape | Key::Interrupt => LineEdit::Cancel,
            _ => LineEdit::Ignored,
        }
    }
}
