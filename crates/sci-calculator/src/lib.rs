//! Scientific Calculator - keypad-driven engine with browser and terminal shells
//!
//! The engine is an immediate-execution state machine: operands are typed
//! digit by digit, binary operators evaluate strictly left to right, and unary
//! functions apply to the displayed value at once. Shells feed it
//! [`KeypadAction`](keypad::KeypadAction)s and render
//! [`DisplayFrame`](display::DisplayFrame)s.
//!
//! # Example
//!
//! ```rust
//! use sci_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//!
//! // 2 + 3 * 4 evaluates left to right
//! for key in ["2", "+", "3", "*", "4", "="] {
//!     let action = Keypad::key_to_action(key).unwrap();
//!     dispatch(&mut engine, action).unwrap();
//! }
//! assert_eq!(engine.current_input(), "20");
//! assert_eq!(engine.history(), "5 * 4 =");
//!
//! // Division by zero puts the display into the error state
//! engine.clear_all();
//! for key in ["7", "/", "0"] {
//!     dispatch(&mut engine, Keypad::key_to_action(key).unwrap()).unwrap();
//! }
//! assert_eq!(engine.calculate(), Err(CalcError::DivisionByZero));
//! assert_eq!(engine.current_input(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser shell - always available for testing
/// (the mock DOM runs without actual browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::history::{Tape, TapeEntry};
    pub use crate::core::{
        AngleMode, CalcError, CalcResult, CalculatorEngine, EngineState, Operation,
        ScientificFunction,
    };
    pub use crate::display::{DisplayFrame, DisplaySink, ErrorClearTimer};
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{dispatch, dispatch_all, Keypad, KeypadAction};

    #[cfg(feature = "tui")]
    pub use crate::driver::tui_driver::TuiDriver;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmCalculator, WasmDriver};
}
