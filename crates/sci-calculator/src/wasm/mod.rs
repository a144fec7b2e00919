//! Browser shell for the calculator
//!
//! The calculator and mock DOM build on every target so the browser behaviour
//! can be tested natively; the `wasm-bindgen` bindings need the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use calculator::WasmCalculator;
pub use dom::{
    DomElement, DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, ERROR_CLASS, HISTORY_ID, TAPE_ID,
};
pub use driver::WasmDriver;
