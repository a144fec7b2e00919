//! Keypad layout, keyboard mapping and action dispatch
//!
//! Both shells share this module: a button click and the equivalent key press
//! resolve to the same [`KeypadAction`], and [`dispatch`] is the only place
//! actions reach the engine.
//!
//! Layout:
//! ```text
//! [DEG] [RAD] [ π ] [ e ] [n! ]
//! [sin] [cos] [tan] [ln ] [log]
//! [ √ ] [ ∛ ] [1/x] [ ± ] [ ^ ]
//! [ C ] [CE ] [ ⌫ ] [ % ] [ / ]
//! [ 7 ] [ 8 ] [ 9 ] [ * ] [ - ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ] [ . ]
//! [ 1 ] [ 2 ] [ 3 ] [ 0 ] [ = ]
//! ```

use tracing::debug;

use crate::core::{AngleMode, CalcResult, CalculatorEngine, Operation, ScientificFunction};

/// Everything a user can ask the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Record a binary operator
    Operator(Operation),
    /// Resolve the pending operator
    Equals,
    /// Reset everything but the angle mode
    ClearAll,
    /// Reset the current operand
    ClearEntry,
    /// Delete the last character
    Backspace,
    /// Apply a function or constant
    Function(ScientificFunction),
    /// Replace the operand with 1/x
    Reciprocal,
    /// Flip the operand's sign
    ToggleSign,
    /// Switch trig interpretation
    SetAngle(AngleMode),
}

impl KeypadAction {
    /// Returns the character this action enters on the display, if any
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
            _ => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Function(f) => f.label().to_string(),
            Self::Reciprocal => "1/x".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::SetAngle(mode) => mode.label().to_string(),
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            action,
            id: element_id(action),
            row,
            col,
        }
    }
}

/// Stable element id for an action, e.g. `btn-7` or `btn-sin`
#[must_use]
pub fn element_id(action: KeypadAction) -> String {
    match action {
        KeypadAction::Digit(d) => format!("btn-{d}"),
        KeypadAction::Decimal => "btn-decimal".to_string(),
        KeypadAction::Operator(op) => format!("btn-{}", op_name(op)),
        KeypadAction::Equals => "btn-equals".to_string(),
        KeypadAction::ClearAll => "btn-clear".to_string(),
        KeypadAction::ClearEntry => "btn-clear-entry".to_string(),
        KeypadAction::Backspace => "btn-backspace".to_string(),
        KeypadAction::Function(f) => format!("btn-{}", function_name(f)),
        KeypadAction::Reciprocal => "btn-reciprocal".to_string(),
        KeypadAction::ToggleSign => "btn-sign".to_string(),
        KeypadAction::SetAngle(mode) => format!("btn-{mode}"),
    }
}

/// Returns a name for an operator (for element IDs)
fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
        Operation::Modulo => "mod",
        Operation::Power => "power",
    }
}

/// Returns a name for a function (for element IDs)
fn function_name(function: ScientificFunction) -> &'static str {
    match function {
        ScientificFunction::Ln => "ln",
        ScientificFunction::Log10 => "log",
        ScientificFunction::Pi => "pi",
        ScientificFunction::E => "e",
        other => other.name(),
    }
}

/// Keypad layout definition
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard scientific keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction as A;
        use ScientificFunction as F;

        let grid: [[KeypadAction; 5]; 7] = [
            [
                A::SetAngle(AngleMode::Deg),
                A::SetAngle(AngleMode::Rad),
                A::Function(F::Pi),
                A::Function(F::E),
                A::Function(F::Factorial),
            ],
            [
                A::Function(F::Sin),
                A::Function(F::Cos),
                A::Function(F::Tan),
                A::Function(F::Ln),
                A::Function(F::Log10),
            ],
            [
                A::Function(F::Sqrt),
                A::Function(F::Cbrt),
                A::Reciprocal,
                A::ToggleSign,
                A::Operator(Operation::Power),
            ],
            [
                A::ClearAll,
                A::ClearEntry,
                A::Backspace,
                A::Operator(Operation::Modulo),
                A::Operator(Operation::Divide),
            ],
            [
                A::Digit(7),
                A::Digit(8),
                A::Digit(9),
                A::Operator(Operation::Multiply),
                A::Operator(Operation::Subtract),
            ],
            [
                A::Digit(4),
                A::Digit(5),
                A::Digit(6),
                A::Operator(Operation::Add),
                A::Decimal,
            ],
            [A::Digit(1), A::Digit(2), A::Digit(3), A::Digit(0), A::Equals],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 5,
            rows: 7,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing an action
    #[must_use]
    pub fn find_button_by_action(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Processes a button click and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key name to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "c" | "C" => Some(KeypadAction::ClearAll),
            "Backspace" => Some(KeypadAction::Backspace),
            "." => Some(KeypadAction::Decimal),
            _ => {
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if let Some(d) = ch.to_digit(10) {
                    // to_digit(10) is always < 10
                    #[allow(clippy::cast_possible_truncation)]
                    return Some(KeypadAction::Digit(d as u8));
                }
                Operation::from_symbol(ch).map(KeypadAction::Operator)
            }
        }
    }

    /// Resolves a textual token: a key name, a button id or a function name
    #[must_use]
    pub fn resolve_token(&self, token: &str) -> Option<KeypadAction> {
        Self::key_to_action(token)
            .or_else(|| self.handle_click(token))
            .or_else(|| ScientificFunction::from_name(token).map(KeypadAction::Function))
    }
}

/// Applies an action to the engine
///
/// A decimal point is only forwarded when the displayed operand does not
/// already contain one, even if the next digit would start a fresh operand.
pub fn dispatch(engine: &mut CalculatorEngine, action: KeypadAction) -> CalcResult<()> {
    debug!(?action, "dispatch");
    match action {
        KeypadAction::Digit(_) => {
            if let Some(ch) = action.to_char() {
                engine.input_number(ch);
            }
        }
        KeypadAction::Decimal => {
            if !engine.current_input().contains('.') {
                engine.input_number('.');
            }
        }
        KeypadAction::Operator(op) => engine.input_operator(op)?,
        KeypadAction::Equals => engine.calculate()?,
        KeypadAction::ClearAll => engine.clear_all(),
        KeypadAction::ClearEntry => engine.clear_entry(),
        KeypadAction::Backspace => engine.backspace(),
        KeypadAction::Function(f) => engine.input_function(f)?,
        KeypadAction::Reciprocal => engine.reciprocal()?,
        KeypadAction::ToggleSign => engine.toggle_sign(),
        KeypadAction::SetAngle(mode) => engine.toggle_mode(mode),
    }
    Ok(())
}

/// Dispatches a sequence of actions, stopping at nothing
///
/// Errors are display state; the last one (if any) is returned.
pub fn dispatch_all(
    engine: &mut CalculatorEngine,
    actions: impl IntoIterator<Item = KeypadAction>,
) -> CalcResult<()> {
    let mut last = Ok(());
    for action in actions {
        if let Err(err) = dispatch(engine, action) {
            last = Err(err);
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    fn press(engine: &mut CalculatorEngine, keys: &[&str]) {
        for key in keys {
            if let Some(action) = Keypad::key_to_action(key) {
                let _ = dispatch(engine, action);
            }
        }
    }

    // ===== KeypadAction tests =====

    #[test]
    fn test_action_to_char() {
        assert_eq!(KeypadAction::Digit(5).to_char(), Some('5'));
        assert_eq!(KeypadAction::Decimal.to_char(), Some('.'));
        assert_eq!(
            KeypadAction::Operator(Operation::Modulo).to_char(),
            Some('%')
        );
        assert_eq!(KeypadAction::Equals.to_char(), None);
        assert_eq!(KeypadAction::Reciprocal.to_char(), None);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(KeypadAction::ClearEntry.label(), "CE");
        assert_eq!(KeypadAction::Backspace.label(), "⌫");
        assert_eq!(
            KeypadAction::Function(ScientificFunction::Sqrt).label(),
            "√"
        );
        assert_eq!(KeypadAction::SetAngle(AngleMode::Rad).label(), "RAD");
    }

    // ===== Button id tests =====

    #[test]
    fn test_element_ids() {
        assert_eq!(element_id(KeypadAction::Digit(7)), "btn-7");
        assert_eq!(
            element_id(KeypadAction::Operator(Operation::Add)),
            "btn-plus"
        );
        assert_eq!(
            element_id(KeypadAction::Function(ScientificFunction::Sin)),
            "btn-sin"
        );
        assert_eq!(
            element_id(KeypadAction::Function(ScientificFunction::Log10)),
            "btn-log"
        );
        assert_eq!(element_id(KeypadAction::SetAngle(AngleMode::Deg)), "btn-deg");
        assert_eq!(element_id(KeypadAction::ToggleSign), "btn-sign");
    }

    #[test]
    fn test_element_ids_unique() {
        let keypad = Keypad::new();
        let mut ids: Vec<_> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    // ===== Layout tests =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.dimensions(), (7, 5));
        assert_eq!(keypad.button_count(), 35);
    }

    #[test]
    fn test_keypad_positions() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.get_button_at(0, 0).unwrap().action,
            KeypadAction::SetAngle(AngleMode::Deg)
        );
        assert_eq!(
            keypad.get_button_at(4, 0).unwrap().action,
            KeypadAction::Digit(7)
        );
        assert_eq!(
            keypad.get_button_at(6, 4).unwrap().action,
            KeypadAction::Equals
        );
        assert!(keypad.get_button_at(7, 0).is_none());
        assert!(keypad.get_button_at(0, 5).is_none());
    }

    #[test]
    fn test_keypad_positions_match_defs() {
        let keypad = Keypad::new();
        for btn in keypad.buttons() {
            assert_eq!(keypad.get_button_at(btn.row, btn.col), Some(btn));
        }
    }

    #[test]
    fn test_every_function_has_a_button() {
        let keypad = Keypad::new();
        for f in ScientificFunction::ALL {
            assert!(keypad
                .find_button_by_action(KeypadAction::Function(f))
                .is_some());
        }
        for op in Operation::ALL {
            assert!(keypad
                .find_button_by_action(KeypadAction::Operator(op))
                .is_some());
        }
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.handle_click("btn-reciprocal"),
            Some(KeypadAction::Reciprocal)
        );
        assert_eq!(keypad.handle_click("btn-unknown"), None);
    }

    // ===== Keyboard mapping tests =====

    #[test]
    fn test_key_to_action_digits() {
        for d in 0..=9u8 {
            assert_eq!(
                Keypad::key_to_action(&d.to_string()),
                Some(KeypadAction::Digit(d))
            );
        }
    }

    #[test]
    fn test_key_to_action_operators() {
        for op in Operation::ALL {
            assert_eq!(
                Keypad::key_to_action(&op.symbol().to_string()),
                Some(KeypadAction::Operator(op))
            );
        }
    }

    #[test]
    fn test_key_to_action_named_keys() {
        assert_eq!(Keypad::key_to_action("Enter"), Some(KeypadAction::Equals));
        assert_eq!(Keypad::key_to_action("="), Some(KeypadAction::Equals));
        assert_eq!(
            Keypad::key_to_action("Escape"),
            Some(KeypadAction::ClearAll)
        );
        assert_eq!(Keypad::key_to_action("c"), Some(KeypadAction::ClearAll));
        assert_eq!(Keypad::key_to_action("C"), Some(KeypadAction::ClearAll));
        assert_eq!(
            Keypad::key_to_action("Backspace"),
            Some(KeypadAction::Backspace)
        );
    }

    #[test]
    fn test_key_to_action_unknown() {
        assert_eq!(Keypad::key_to_action("x"), None);
        assert_eq!(Keypad::key_to_action("Tab"), None);
        assert_eq!(Keypad::key_to_action(""), None);
        assert_eq!(Keypad::key_to_action("12"), None);
    }

    #[test]
    fn test_resolve_token() {
        let keypad = Keypad::new();
        assert_eq!(keypad.resolve_token("7"), Some(KeypadAction::Digit(7)));
        assert_eq!(
            keypad.resolve_token("btn-sqrt"),
            Some(KeypadAction::Function(ScientificFunction::Sqrt))
        );
        assert_eq!(
            keypad.resolve_token("cos"),
            Some(KeypadAction::Function(ScientificFunction::Cos))
        );
        assert_eq!(
            keypad.resolve_token("btn-rad"),
            Some(KeypadAction::SetAngle(AngleMode::Rad))
        );
        assert_eq!(keypad.resolve_token("nope"), None);
    }

    // ===== Dispatch tests =====

    #[test]
    fn test_dispatch_expression() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["1", "2", "+", "3", "Enter"]);
        assert_eq!(engine.current_input(), "15");
        assert_eq!(engine.history(), "12 + 3 =");
    }

    #[test]
    fn test_dispatch_duplicate_decimal_ignored() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["1", ".", "5", ".", "2"]);
        assert_eq!(engine.current_input(), "1.52");
    }

    #[test]
    fn test_dispatch_decimal_after_integer_result_starts_fresh() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["1", ".", "5", "*", "2", "="]);
        assert_eq!(engine.current_input(), "3");
        press(&mut engine, &[".", "5"]);
        assert_eq!(engine.current_input(), "0.5");
    }

    #[test]
    fn test_dispatch_decimal_after_fractional_result_ignored() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["9", "/", "4", "="]);
        assert_eq!(engine.current_input(), "2.25");
        press(&mut engine, &[".", "5"]);
        assert_eq!(engine.current_input(), "5");
    }

    #[test]
    fn test_dispatch_returns_error_kind() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["5", "/", "0"]);
        assert_eq!(
            dispatch(&mut engine, KeypadAction::Equals),
            Err(CalcError::DivisionByZero)
        );
        assert!(engine.is_error());
    }

    #[test]
    fn test_dispatch_angle_and_function() {
        let mut engine = CalculatorEngine::new();
        dispatch(&mut engine, KeypadAction::SetAngle(AngleMode::Rad)).unwrap();
        dispatch(&mut engine, KeypadAction::Function(ScientificFunction::Pi)).unwrap();
        dispatch(&mut engine, KeypadAction::Function(ScientificFunction::Cos)).unwrap();
        assert_eq!(engine.current_input(), "-1");
    }

    #[test]
    fn test_dispatch_all_reports_last_error() {
        let mut engine = CalculatorEngine::new();
        let result = dispatch_all(
            &mut engine,
            [
                KeypadAction::Digit(0),
                KeypadAction::Reciprocal,
                KeypadAction::Digit(8),
            ],
        );
        assert_eq!(result, Err(CalcError::DivisionByZero));
        assert_eq!(engine.current_input(), "8");
    }
}
