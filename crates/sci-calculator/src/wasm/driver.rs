//! WASM driver - runs the shared driver checks against the mock DOM
//!
//! Every interaction goes through the page: the event is recorded on the
//! [`MockDom`], handled by the [`WasmCalculator`], and the resulting frame and
//! tape are rendered back into the DOM. Reads come from the DOM elements, so a
//! check only passes if the page actually shows the expected state.

use super::calculator::WasmCalculator;
use super::dom::{DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, ERROR_CLASS, HISTORY_ID};
use crate::config::CalculatorConfig;
use crate::core::history::TapeEntry;
use crate::core::{AngleMode, CalcResult};
use crate::display::DisplaySink;
use crate::driver::CalculatorDriver;

/// WASM driver wrapping calculator and mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    calculator: WasmCalculator,
    dom: MockDom,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a new WASM driver
    #[must_use]
    pub fn new() -> Self {
        Self::with_calculator(WasmCalculator::new())
    }

    /// Creates a WASM driver from configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self::with_calculator(WasmCalculator::with_config(config))
    }

    /// Creates a WASM driver around an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: WasmCalculator) -> Self {
        let dom = MockDom::calculator(calculator.keypad());
        let mut driver = Self { calculator, dom };
        driver.sync_dom();
        driver
    }

    /// Returns a reference to the calculator
    #[must_use]
    pub fn calculator(&self) -> &WasmCalculator {
        &self.calculator
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Dispatches a page event and re-renders
    pub fn dispatch(&mut self, event: DomEvent) -> CalcResult<()> {
        let result = self.calculator.handle_event(&event);
        self.dom.dispatch_event(event);
        self.sync_dom();
        result
    }

    /// Renders calculator state into the DOM
    fn sync_dom(&mut self) {
        self.dom.render(&self.calculator.frame());
        self.dom.render_tape(self.calculator.engine().tape().iter_rev());
    }
}

impl CalculatorDriver for WasmDriver {
    fn press_key(&mut self, key: &str) -> CalcResult<()> {
        self.dispatch(DomEvent::key_press(key))
    }

    fn click(&mut self, element_id: &str) -> CalcResult<()> {
        self.dispatch(DomEvent::click(element_id))
    }

    fn display(&self) -> String {
        self.dom
            .get_element_text(DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn history(&self) -> String {
        self.dom
            .get_element_text(HISTORY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn is_error(&self) -> bool {
        self.dom.has_class(DISPLAY_ID, ERROR_CLASS)
    }

    fn angle_mode(&self) -> AngleMode {
        if self.dom.has_class("btn-rad", ACTIVE_CLASS) {
            AngleMode::Rad
        } else {
            AngleMode::Deg
        }
    }

    fn tape(&self) -> Vec<TapeEntry> {
        self.calculator.engine().tape().iter_rev().cloned().collect()
    }

    fn clear(&mut self) {
        self.calculator.clear();
        self.sync_dom();
    }

    fn advance_clock(&mut self, ms: u64) {
        let now = self.calculator.clock_ms().saturating_add(ms);
        if self.calculator.tick(now) {
            self.sync_dom();
        }
    }
}
