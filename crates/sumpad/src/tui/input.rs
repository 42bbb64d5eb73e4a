//! Keyboard input mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::MULTIPLY_GLYPH;

/// Actions the calculator understands, from keyboard or keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a token to the display.
    Append(char),
    /// Send the expression to the evaluation service.
    Evaluate,
    /// Clear the display.
    Clear,
    /// Delete the last character.
    DeleteLast,
    /// Quit the application.
    Quit,
    /// No action (ignored input).
    None,
}

/// Maps key events to calculator actions.
///
/// The `*` key appends the display multiplication glyph, so the buffer
/// always shows `×` and the canonical operator only appears on the wire.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => KeyAction::Append(c),
            KeyCode::Char('*') => KeyAction::Append(MULTIPLY_GLYPH),
            KeyCode::Char(c @ ('+' | '-' | '/' | '.')) => KeyAction::Append(c),
            KeyCode::Char('=') | KeyCode::Enter => KeyAction::Evaluate,
            KeyCode::Char('c' | 'C') | KeyCode::Esc => KeyAction::Clear,
            KeyCode::Backspace => KeyAction::DeleteLast,
            _ => KeyAction::None,
        }
    }
}
