//! Calculator core: engine state machine, operations and formatting
//!
//! Everything in here is platform independent. The shells in `wasm` and `tui`
//! only translate input into [`KeypadAction`](crate::keypad::KeypadAction)s and
//! render [`DisplayFrame`](crate::display::DisplayFrame)s.

pub mod engine;
pub mod format;
pub mod functions;
pub mod history;
mod operations;

pub use engine::{CalculatorEngine, EngineState, ERROR_TOKEN};
pub use functions::{AngleMode, ScientificFunction};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error kinds
///
/// Both kinds end up as the same `"Error"` token on the display; the kind is
/// only reported back to the caller of the failing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division (or reciprocal) with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,
    /// Computation produced NaN/infinity or left a function's domain
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl CalcError {
    /// Creates an invalid operation error
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidOperation(reason.into())
    }
}

/// Rejects NaN and infinite results
pub fn validate_result(value: f64) -> CalcResult<f64> {
    if value.is_nan() {
        Err(CalcError::invalid("result is not a number"))
    } else if value.is_infinite() {
        Err(CalcError::invalid("result is infinite"))
    } else {
        Ok(value)
    }
}
