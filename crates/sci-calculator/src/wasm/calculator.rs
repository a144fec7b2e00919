//! Browser-shell calculator
//!
//! Owns the engine, the keypad layout and the error auto-clear timer. Page
//! events come in as [`DomEvent`]s; after each one the caller renders
//! [`WasmCalculator::frame`] into its [`DisplaySink`].

use tracing::debug;

use super::dom::DomEvent;
use crate::config::CalculatorConfig;
use crate::core::{CalcResult, CalculatorEngine};
use crate::display::{DisplayFrame, DisplaySink, ErrorClearTimer};
use crate::keypad::{dispatch, Keypad, KeypadAction};

/// Browser-ready calculator
#[derive(Debug)]
pub struct WasmCalculator {
    engine: CalculatorEngine,
    keypad: Keypad,
    timer: ErrorClearTimer,
    clock_ms: u64,
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmCalculator {
    /// Creates a calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a calculator from configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            engine: config.build_engine(),
            keypad: Keypad::new(),
            timer: config.build_error_timer(),
            clock_ms: 0,
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

    /// Returns the current clock value
    #[must_use]
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Current display snapshot
    #[must_use]
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::from_engine(&self.engine)
    }

    /// Renders the current frame into a sink
    pub fn render_to(&self, sink: &mut impl DisplaySink) {
        sink.render(&self.frame());
    }

    /// Handles a page event; unknown buttons and keys are ignored
    pub fn handle_event(&mut self, event: &DomEvent) -> CalcResult<()> {
        let action = match event {
            DomEvent::Click { element_id } => self.keypad.handle_click(element_id),
            DomEvent::KeyPress { key } => Keypad::key_to_action(key),
        };
        match action {
            Some(action) => self.press(action),
            None => {
                debug!(?event, "event ignored");
                Ok(())
            }
        }
    }

    /// Handles a button click by element id
    pub fn handle_click(&mut self, element_id: &str) -> CalcResult<()> {
        self.handle_event(&DomEvent::click(element_id))
    }

    /// Handles a keyboard key
    pub fn handle_key(&mut self, key: &str) -> CalcResult<()> {
        self.handle_event(&DomEvent::key_press(key))
    }

    /// Applies a keypad action and updates the error timer
    pub fn press(&mut self, action: KeypadAction) -> CalcResult<()> {
        let result = dispatch(&mut self.engine, action);
        self.timer.sync(self.clock_ms, &self.engine);
        result
    }

    /// Advances the clock, firing a due error clear
    ///
    /// Returns true if the display was cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.clock_ms = self.clock_ms.max(now_ms);
        self.timer.fire_if_due(self.clock_ms, &mut self.engine)
    }

    /// Clears the engine if it still shows an error, regardless of the clock
    ///
    /// This is the callback for a page-side `setTimeout`.
    pub fn expire_error(&mut self) -> bool {
        self.timer.disarm();
        if self.engine.is_error() {
            self.engine.clear_all();
            true
        } else {
            false
        }
    }

    /// Full clear
    pub fn clear(&mut self) {
        self.engine.clear_all();
        self.timer.disarm();
    }
}
