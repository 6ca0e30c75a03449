//! Keyboard mapping for the recall field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a digit to the recall field.
    Digit(char),
    /// Delete the last character of the recall field.
    Backspace,
    /// Abandon the round and start a fresh one.
    Restart,
    /// Leave the trainer.
    Quit,
    /// Nothing.
    None,
}

/// Maps a key event to an action.
pub fn map_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Restart,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) if c.is_ascii_digit() => KeyAction::Digit(c),
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_digit() {
        assert_eq!(map_key(key(KeyCode::Char('7'))), KeyAction::Digit('7'));
        assert_eq!(map_key(key(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key(key(KeyCode::Enter)), KeyAction::Restart);
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Backspace)), KeyAction::Backspace);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }
}
