//! Keyboard input for the terminal user interface.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Where the menu loop gets its keys from.
pub trait KeySource {
    /// Block until the next key press.
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

/// Key presses from the real terminal.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            // Some platforms also report releases and repeats.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// A single-line text field that only grows or shrinks at the end.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character.
    pub fn handle_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Delete the last character.
    pub fn handle_backspace(&mut self) {
        self.value.pop();
    }

    /// Apply one key. Returns true when the field was submitted.
    ///
    /// Characters typed with Ctrl or Alt held are control keys, not text.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => return true,
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Char(c) if (KeyModifiers::SHIFT).contains(key.modifiers) => self.handle_char(c),
            _ => {}
        }
        false
    }
}

/// Canned key presses for driving the menu loop in tests.
#[cfg(test)]
pub struct ScriptedKeys {
    keys: std::collections::VecDeque<KeyEvent>,
}

#[cfg(test)]
impl ScriptedKeys {
    pub fn new(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::from_events(codes.into_iter().map(|code| KeyEvent::new(code, KeyModifiers::NONE)))
    }

    pub fn from_events(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        ScriptedKeys {
            keys: events.into_iter().collect(),
        }
    }

    /// Type `text` followed by Enter.
    pub fn line(text: &str) -> Vec<KeyCode> {
        text.chars().map(KeyCode::Char).chain([KeyCode::Enter]).collect()
    }
}

#[cfg(test)]
impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }
}
