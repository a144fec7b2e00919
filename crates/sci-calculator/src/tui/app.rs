//! TUI application state
//!
//! Wraps the engine with what the terminal needs around it: the keypad layout,
//! the last pressed button for highlighting, the error auto-clear timer and a
//! quit flag. Time comes in through [`CalculatorApp::tick`], in milliseconds
//! since the app started.

use ratatui::layout::Rect;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::core::{CalcResult, CalculatorEngine};
use crate::display::{DisplayFrame, ErrorClearTimer};
use crate::keypad::{dispatch, Keypad, KeypadAction};

use super::input::InputAction;
use super::keypad::hit_test;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: CalculatorEngine,
    keypad: Keypad,
    timer: ErrorClearTimer,
    clock_ms: u64,
    last_pressed: Option<KeypadAction>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a calculator app from configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            engine: config.build_engine(),
            keypad: Keypad::new(),
            timer: config.build_error_timer(),
            clock_ms: 0,
            last_pressed: None,
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the error timer
    #[must_use]
    pub fn timer(&self) -> &ErrorClearTimer {
        &self.timer
    }

    /// Returns the last time passed to [`tick`](Self::tick)
    #[must_use]
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Returns the most recently pressed button's action
    #[must_use]
    pub fn last_pressed(&self) -> Option<KeypadAction> {
        self.last_pressed
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Current display snapshot
    #[must_use]
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::from_engine(&self.engine)
    }

    /// Applies a keypad action and updates the error timer
    pub fn press(&mut self, action: KeypadAction) -> CalcResult<()> {
        self.last_pressed = Some(action);
        let result = dispatch(&mut self.engine, action);
        self.timer.sync(self.clock_ms, &self.engine);
        result
    }

    /// Handles a mapped keyboard input
    pub fn handle_input(&mut self, input: InputAction) {
        match input {
            InputAction::Key(action) => {
                if let Err(err) = self.press(action) {
                    debug!(error = %err, "action ended in error state");
                }
            }
            InputAction::ToggleAngle => {
                let mode = self.engine.angle_mode().toggled();
                // Result is always Ok for an angle change
                let _ = self.press(KeypadAction::SetAngle(mode));
            }
            InputAction::Quit => self.quit(),
            InputAction::None => {}
        }
    }

    /// Handles a mouse click at terminal coordinates
    ///
    /// Returns true if the click landed on a button.
    pub fn click_at(&mut self, keypad_area: Rect, x: u16, y: u16) -> bool {
        match hit_test(&self.keypad, keypad_area, x, y) {
            Some(action) => {
                self.handle_input(InputAction::Key(action));
                true
            }
            None => false,
        }
    }

    /// Advances the clock, firing a due error clear
    ///
    /// Returns true if the display was cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.clock_ms = self.clock_ms.max(now_ms);
        let cleared = self.timer.fire_if_due(self.clock_ms, &mut self.engine);
        if cleared {
            self.last_pressed = None;
        }
        cleared
    }

    /// Milliseconds until the next scheduled clear, if any
    #[must_use]
    pub fn time_until_due(&self) -> Option<u64> {
        self.timer
            .deadline()
            .map(|deadline| deadline.saturating_sub(self.clock_ms))
    }

    /// Full clear, also dropping the highlight and any pending error clear
    pub fn clear(&mut self) {
        self.engine.clear_all();
        self.timer.disarm();
        self.last_pressed = None;
    }
}
