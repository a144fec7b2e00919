//! Browser WASM bindings for the calculator
//!
//! The page owns the DOM: after every call it reads `display`, `history` and
//! `is_error` back and updates its elements. When `is_error` turns true the page
//! schedules `expire_error` after `error_clear_delay_ms`.

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::calculator::WasmCalculator;

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    inner: WasmCalculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            inner: WasmCalculator::new(),
        }
    }

    /// Handle a keypad button click by element ID
    ///
    /// Returns false if the click put the calculator into the Error state.
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        self.inner.handle_click(button_id).is_ok()
    }

    /// Handle a keyboard key press
    ///
    /// Returns false if the key put the calculator into the Error state.
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.inner.handle_key(key).is_ok()
    }

    /// Primary display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.engine().current_input().to_string()
    }

    /// History line text
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> String {
        self.inner.engine().history().to_string()
    }

    /// Whether the display shows the error token
    #[wasm_bindgen(getter)]
    pub fn is_error(&self) -> bool {
        self.inner.engine().is_error()
    }

    /// Active angle mode label, `DEG` or `RAD`
    #[wasm_bindgen(getter)]
    pub fn angle_mode(&self) -> String {
        self.inner.engine().angle_mode().label().to_string()
    }

    /// Delay the page should wait before calling `expire_error`
    #[wasm_bindgen(getter)]
    pub fn error_clear_delay_ms(&self) -> u32 {
        u32::try_from(self.inner.timer().delay_ms()).unwrap_or(u32::MAX)
    }

    /// Clears a lingering error; returns true if the display changed
    pub fn expire_error(&mut self) -> bool {
        self.inner.expire_error()
    }

    /// Full clear
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Completed calculations as JSON, oldest first
    pub fn tape_json(&self) -> String {
        self.inner
            .engine()
            .tape()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Scientific calculator WASM initialized".into());
}
