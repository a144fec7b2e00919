//! Terminal frontend for the calculator

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputAction, InputHandler};
pub use keypad::{hit_test, KeypadWidget};
pub use ui::{render, CalculatorUI, UiAreas};
