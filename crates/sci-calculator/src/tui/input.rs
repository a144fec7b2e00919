//! Keyboard input handling
//!
//! Keys shared with the browser go through [`Keypad::key_to_action`] so both
//! shells read the keyboard identically. The terminal adds letter shortcuts for
//! the function row, since it has no mouse-free way to reach them otherwise.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::ScientificFunction;
use crate::keypad::{Keypad, KeypadAction};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// A calculator action
    Key(KeypadAction),
    /// Switch between degrees and radians
    ToggleAngle,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> InputAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => InputAction::Quit,
                KeyCode::Char('l') => InputAction::Key(KeypadAction::ClearAll),
                _ => InputAction::None,
            };
        }

        match code {
            KeyCode::Tab => InputAction::ToggleAngle,
            KeyCode::Delete => InputAction::Key(KeypadAction::ClearEntry),
            KeyCode::Char(c) => Self::char_action(c),
            other => key_name(other)
                .and_then(Keypad::key_to_action)
                .map_or(InputAction::None, InputAction::Key),
        }
    }

    fn char_action(c: char) -> InputAction {
        let mut buf = [0u8; 4];
        if let Some(action) = Keypad::key_to_action(c.encode_utf8(&mut buf)) {
            return InputAction::Key(action);
        }
        Self::shortcut(c).map_or(InputAction::None, InputAction::Key)
    }

    /// Terminal-only letter shortcuts
    #[must_use]
    pub fn shortcut(c: char) -> Option<KeypadAction> {
        let function = match c {
            's' => ScientificFunction::Sin,
            'o' => ScientificFunction::Cos,
            't' => ScientificFunction::Tan,
            'l' => ScientificFunction::Ln,
            'g' => ScientificFunction::Log10,
            'r' => ScientificFunction::Sqrt,
            'b' => ScientificFunction::Cbrt,
            '!' => ScientificFunction::Factorial,
            'p' => ScientificFunction::Pi,
            'e' => ScientificFunction::E,
            'i' => return Some(KeypadAction::Reciprocal),
            'n' => return Some(KeypadAction::ToggleSign),
            _ => return None,
        };
        Some(KeypadAction::Function(function))
    }
}

/// Browser-style key name for a non-character key
fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Enter => Some("Enter"),
        KeyCode::Esc => Some("Escape"),
        KeyCode::Backspace => Some("Backspace"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                InputAction::Key(KeypadAction::Digit(i as u8))
            );
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for op in Operation::ALL {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(op.symbol()))),
                InputAction::Key(KeypadAction::Operator(op))
            );
        }
    }

    #[test]
    fn test_handle_named_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            InputAction::Key(KeypadAction::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Esc)),
            InputAction::Key(KeypadAction::ClearAll)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            InputAction::Key(KeypadAction::Backspace)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Delete)),
            InputAction::Key(KeypadAction::ClearEntry)
        );
    }

    #[test]
    fn test_handle_clear_letters() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('c'))),
            InputAction::Key(KeypadAction::ClearAll)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('C'))),
            InputAction::Key(KeypadAction::ClearAll)
        );
    }

    #[test]
    fn test_handle_tab_toggles_angle() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Tab)),
            InputAction::ToggleAngle
        );
    }

    #[test]
    fn test_handle_function_shortcuts() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('s'))),
            InputAction::Key(KeypadAction::Function(ScientificFunction::Sin))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('!'))),
            InputAction::Key(KeypadAction::Function(ScientificFunction::Factorial))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('i'))),
            InputAction::Key(KeypadAction::Reciprocal)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('n'))),
            InputAction::Key(KeypadAction::ToggleSign)
        );
    }

    #[test]
    fn test_handle_ctrl_quit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            InputAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            InputAction::Quit
        );
    }

    #[test]
    fn test_handle_ctrl_l_clears() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('l'))),
            InputAction::Key(KeypadAction::ClearAll)
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x'))),
            InputAction::None
        );
    }

    #[test]
    fn test_handle_unmapped_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('z'))),
            InputAction::None
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::F(1))),
            InputAction::None
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Left)),
            InputAction::None
        );
    }
}
