//! Unified calculator driver
//!
//! Both shells implement [`CalculatorDriver`], so the `verify_*` checks below
//! are written once and run against the terminal app and the mock DOM alike.

use crate::core::history::TapeEntry;
use crate::core::{AngleMode, CalcError, CalcResult};
use crate::display::DisplayFrame;

/// Abstract driver over a calculator shell
///
/// Keys use the keyboard names accepted by
/// [`Keypad::key_to_action`](crate::keypad::Keypad::key_to_action); clicks use
/// button element ids such as `btn-sin`.
pub trait CalculatorDriver {
    /// Presses a single keyboard key
    fn press_key(&mut self, key: &str) -> CalcResult<()>;

    /// Clicks a keypad button by element id
    fn click(&mut self, element_id: &str) -> CalcResult<()>;

    /// Primary display text
    fn display(&self) -> String;

    /// History line text
    fn history(&self) -> String;

    /// Whether the display shows the error style
    fn is_error(&self) -> bool;

    /// Active angle mode
    fn angle_mode(&self) -> AngleMode;

    /// Tape entries, newest first
    fn tape(&self) -> Vec<TapeEntry>;

    /// Full clear
    fn clear(&mut self);

    /// Advances the shell clock, firing any due error clear
    fn advance_clock(&mut self, ms: u64);

    /// Presses keys in order; returns the last error raised, if any
    fn press_keys(&mut self, keys: &[&str]) -> CalcResult<()> {
        let mut last = Ok(());
        for key in keys {
            if let Err(err) = self.press_key(key) {
                last = Err(err);
            }
        }
        last
    }

    /// Clicks buttons in order; returns the last error raised, if any
    fn click_all(&mut self, element_ids: &[&str]) -> CalcResult<()> {
        let mut last = Ok(());
        for id in element_ids {
            if let Err(err) = self.click(id) {
                last = Err(err);
            }
        }
        last
    }

    /// Snapshot of what the shell shows
    fn frame(&self) -> DisplayFrame {
        DisplayFrame {
            primary: self.display(),
            history: self.history(),
            error: self.is_error(),
            angle_mode: self.angle_mode(),
        }
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{AngleMode, CalcResult, CalculatorDriver, TapeEntry};
    use crate::keypad::Keypad;
    use crate::tui::CalculatorApp;

    /// Driver wrapping the terminal calculator app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) -> CalcResult<()> {
            match Keypad::key_to_action(key) {
                Some(action) => self.app.press(action),
                None => Ok(()),
            }
        }

        fn click(&mut self, element_id: &str) -> CalcResult<()> {
            match self.app.keypad().handle_click(element_id) {
                Some(action) => self.app.press(action),
                None => Ok(()),
            }
        }

        fn display(&self) -> String {
            self.app.engine().current_input().to_string()
        }

        fn history(&self) -> String {
            self.app.engine().history().to_string()
        }

        fn is_error(&self) -> bool {
            self.app.engine().is_error()
        }

        fn angle_mode(&self) -> AngleMode {
            self.app.engine().angle_mode()
        }

        fn tape(&self) -> Vec<TapeEntry> {
            self.app.engine().tape().iter_rev().cloned().collect()
        }

        fn clear(&mut self) {
            self.app.clear();
        }

        fn advance_clock(&mut self, ms: u64) {
            let now = self.app.clock_ms().saturating_add(ms);
            self.app.tick(now);
        }
    }
}

// ===== Unified Driver Checks =====
// These checks work with ANY CalculatorDriver implementation

/// Verifies the four basic operators plus `%` and `^`
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases: [(&[&str], &str); 6] = [
        (&["2", "+", "3", "Enter"], "5"),
        (&["1", "0", "-", "4", "="], "6"),
        (&["6", "*", "7", "="], "42"),
        (&["2", "0", "/", "8", "="], "2.5"),
        (&["1", "7", "%", "5", "="], "2"),
        (&["2", "^", "1", "0", "="], "1024"),
    ];
    for (keys, expected) in cases {
        driver.clear();
        driver.press_keys(keys).unwrap();
        assert_eq!(driver.display(), expected, "keys {keys:?}");
    }
    driver.clear();
}

/// Verifies strict left-to-right chaining
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["2", "+", "3", "*"]).unwrap();
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.history(), "5 *");
    driver.press_keys(&["4", "="]).unwrap();
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.history(), "5 * 4 =");
    driver.clear();
}

/// Verifies digit entry rules
pub fn verify_number_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["0", "5"]).unwrap();
    assert_eq!(driver.display(), "5");

    driver.press_keys(&[".", "2", ".", "5"]).unwrap();
    assert_eq!(driver.display(), "5.25");

    driver.press_keys(&["Backspace", "Backspace", "Backspace"]).unwrap();
    assert_eq!(driver.display(), "5");
    driver.press_key("Backspace").unwrap();
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Verifies functions, constants and angle modes through the buttons
pub fn verify_scientific_functions<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.click_all(&["btn-9", "btn-0", "btn-sin"]).unwrap();
    assert_eq!(driver.display(), "1");
    assert_eq!(driver.history(), "sin(90)");

    driver.click("btn-rad").unwrap();
    assert_eq!(driver.angle_mode(), AngleMode::Rad);
    driver.click_all(&["btn-pi", "btn-cos"]).unwrap();
    assert_eq!(driver.display(), "-1");

    driver.click("btn-deg").unwrap();
    driver.clear();
    driver.click_all(&["btn-1", "btn-6", "btn-sqrt"]).unwrap();
    assert_eq!(driver.display(), "4");

    driver.click_all(&["btn-5", "btn-factorial"]).unwrap();
    assert_eq!(driver.display(), "120");

    driver.click_all(&["btn-4", "btn-reciprocal"]).unwrap();
    assert_eq!(driver.display(), "0.25");
    assert_eq!(driver.history(), "1/4");

    driver.click("btn-sign").unwrap();
    assert_eq!(driver.display(), "-0.25");
    driver.clear();
}

/// Verifies the Error state and its delayed clear
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let result = driver.press_keys(&["5", "/", "0", "="]);
    assert!(matches!(result, Err(CalcError::DivisionByZero)));
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.history(), "");
    assert!(driver.is_error());

    driver.advance_clock(1999);
    assert!(driver.is_error());
    driver.advance_clock(1);
    assert!(!driver.is_error());
    assert_eq!(driver.display(), "0");

    // Leaving the error by typing cancels the clear
    driver.click_all(&["btn-1", "btn-7", "btn-1", "btn-factorial"]).unwrap_err();
    assert!(driver.is_error());
    driver.press_key("8").unwrap();
    driver.advance_clock(5000);
    assert_eq!(driver.display(), "8");
    driver.clear();
}

/// Verifies the clear keys
pub fn verify_clearing<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["9", "-", "5", "5"]).unwrap();
    driver.click("btn-clear-entry").unwrap();
    assert_eq!(driver.display(), "0");
    driver.press_keys(&["4", "="]).unwrap();
    assert_eq!(driver.display(), "5");

    driver.press_keys(&["+", "1", "Escape"]).unwrap();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.history(), "");
    driver.clear();
}

/// Verifies keyboard and buttons produce the same frames
pub fn verify_keyboard_matches_buttons<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["1", "2", ".", "5", "*", "4", "="]).unwrap();
    let by_keys = driver.frame();

    driver.clear();
    driver
        .click_all(&[
            "btn-1",
            "btn-2",
            "btn-decimal",
            "btn-5",
            "btn-times",
            "btn-4",
            "btn-equals",
        ])
        .unwrap();
    assert_eq!(driver.frame(), by_keys);
    assert_eq!(by_keys.primary, "50");
    driver.clear();
}

/// Verifies the tape records completed calculations
pub fn verify_tape<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["1", "+", "1", "="]).unwrap();
    driver.press_keys(&["2", "*", "3", "="]).unwrap();

    let tape = driver.tape();
    assert!(tape.len() >= 2);
    assert_eq!(tape[0].expression, "2 * 3 =");
    assert_eq!(tape[0].result, "6");
    assert_eq!(tape[1].result, "2");
    driver.clear();
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_left_to_right(driver);
    verify_number_entry(driver);
    verify_scientific_functions(driver);
    verify_error_handling(driver);
    verify_clearing(driver);
    verify_keyboard_matches_buttons(driver);
    verify_tape(driver);
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::super::tui_driver::TuiDriver;
        use super::super::*;
        use crate::tui::CalculatorApp;

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert_eq!(driver.display(), "0");
            assert!(!driver.is_error());
        }

        #[test]
        fn test_tui_driver_with_app() {
            let mut app = CalculatorApp::new();
            app.press(crate::keypad::KeypadAction::Digit(4)).unwrap();
            let driver = TuiDriver::with_app(app);
            assert_eq!(driver.display(), "4");
        }

        #[test]
        fn test_tui_driver_unknown_key_ignored() {
            let mut driver = TuiDriver::new();
            driver.press_keys(&["x", "F1", "3"]).unwrap();
            assert_eq!(driver.display(), "3");
            driver.click("btn-nope").unwrap();
            assert_eq!(driver.display(), "3");
        }

        #[test]
        fn test_tui_driver_frame() {
            let mut driver = TuiDriver::new();
            driver.press_keys(&["7", "+"]).unwrap();
            let frame = driver.frame();
            assert_eq!(frame.primary, "7");
            assert_eq!(frame.history, "7 +");
            assert_eq!(frame.angle_mode, AngleMode::Deg);
        }

        #[test]
        fn test_tui_driver_app_access() {
            let mut driver = TuiDriver::new();
            driver.app_mut().quit();
            assert!(driver.app().should_quit());
        }

        #[test]
        fn test_unified_basic_arithmetic() {
            verify_basic_arithmetic(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_left_to_right() {
            verify_left_to_right(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_scientific_functions() {
            verify_scientific_functions(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_error_handling() {
            verify_error_handling(&mut TuiDriver::new());
        }

        #[test]
        fn test_full_suite() {
            run_full_suite(&mut TuiDriver::new());
        }
    }
}
