//! Calculator engine - the input state machine
//!
//! The engine accumulates discrete user actions (digits, operators, functions,
//! clears) into a display string and a history line. Binary operators are
//! resolved strictly left to right: `2 + 3 * 4 =` is `20`.
//!
//! Every fallible operation converts its failure into the Error state before
//! returning the error kind to the caller, so the engine is always left in a
//! well-defined state.

use tracing::{debug, warn};

use crate::core::format::{format_result, history_number, parse_operand};
use crate::core::history::Tape;
use crate::core::{
    validate_result, AngleMode, CalcError, CalcResult, Operation, ScientificFunction,
};

/// Display token shown while the engine is in the Error state
pub const ERROR_TOKEN: &str = "Error";

/// Coarse view of the engine's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Showing the initial zero or a finished result
    Idle,
    /// Typing an operand with no operator pending
    EnteringOperand,
    /// An operator is waiting for (or receiving) its right operand
    OperatorPending,
    /// A computation failed; waits for a clear or a fresh digit
    Error,
}

/// Keypad calculator engine
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    current_input: String,
    previous_input: String,
    operator: Option<Operation>,
    waiting_for_new_number: bool,
    angle_mode: AngleMode,
    history: String,
    tape: Tape,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine showing `0` in degree mode
    #[must_use]
    pub fn new() -> Self {
        Self::with_tape(AngleMode::default(), Tape::new())
    }

    /// Creates an engine with the given angle mode and tape
    #[must_use]
    pub fn with_tape(angle_mode: AngleMode, tape: Tape) -> Self {
        Self {
            current_input: "0".to_string(),
            previous_input: String::new(),
            operator: None,
            waiting_for_new_number: false,
            angle_mode,
            history: String::new(),
            tape,
        }
    }

    // ===== Accessors =====

    /// Primary display text: the operand being edited, the last result or `Error`
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Left operand of the pending operator (empty if none)
    #[must_use]
    pub fn previous_input(&self) -> &str {
        &self.previous_input
    }

    /// Pending binary operator
    #[must_use]
    pub fn operator(&self) -> Option<Operation> {
        self.operator
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub fn is_waiting_for_new_number(&self) -> bool {
        self.waiting_for_new_number
    }

    /// Current trig interpretation
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// History line describing the last operation
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Tape of completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns true while the display shows the error token
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current_input == ERROR_TOKEN
    }

    /// Derives the coarse state from the fields
    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.is_error() {
            EngineState::Error
        } else if self.operator.is_some() {
            EngineState::OperatorPending
        } else if !self.waiting_for_new_number && self.current_input != "0" {
            EngineState::EnteringOperand
        } else {
            EngineState::Idle
        }
    }

    // ===== Entry =====

    /// Enters a digit or decimal point
    ///
    /// Replaces the operand when waiting for a new number or when it is a lone
    /// `0`, appends otherwise. A decimal point starting a fresh operand becomes
    /// `0.`. Duplicate decimal points are filtered by the dispatcher, not here.
    /// Any other token is ignored.
    pub fn input_number(&mut self, token: char) {
        if !(token.is_ascii_digit() || token == '.') {
            return;
        }

        let fresh = if token == '.' {
            "0.".to_string()
        } else {
            token.to_string()
        };

        if self.waiting_for_new_number {
            self.current_input = fresh;
            self.waiting_for_new_number = false;
        } else if self.current_input == "0" {
            self.current_input = fresh;
        } else {
            self.current_input.push(token);
        }
    }

    /// Records a binary operator, resolving any pending one first
    ///
    /// Ignored in the Error state. If the chained resolution fails the engine
    /// stays in the Error state and the operator is dropped.
    pub fn input_operator(&mut self, op: Operation) -> CalcResult<()> {
        if self.is_error() {
            return Ok(());
        }

        if self.operator.is_some() && !self.waiting_for_new_number {
            self.calculate()?;
        }

        self.previous_input = self.current_input.clone();
        self.operator = Some(op);
        self.waiting_for_new_number = true;
        self.history = format!("{} {}", self.previous_input, op);
        debug!(operator = %op, left = %self.previous_input, "operator pending");
        Ok(())
    }

    /// Resolves the pending operator against the current operand
    ///
    /// No-op unless an operator is pending, its left operand exists and the
    /// right operand has been started.
    pub fn calculate(&mut self) -> CalcResult<()> {
        let Some(op) = self.operator else {
            return Ok(());
        };
        if self.previous_input.is_empty() || self.waiting_for_new_number {
            return Ok(());
        }

        let prev = parse_operand(&self.previous_input);
        let curr = parse_operand(&self.current_input);
        let value = self.guard(op.apply(prev, curr))?;

        self.history = format!("{} {} {} =", self.previous_input, op, self.current_input);
        self.current_input = format_result(value);
        self.operator = None;
        self.previous_input.clear();
        self.waiting_for_new_number = true;
        self.tape.record(&self.history, &self.current_input);
        debug!(history = %self.history, result = %self.current_input, "calculated");
        Ok(())
    }

    /// Applies a scientific function or constant to the current operand
    pub fn input_function(&mut self, function: ScientificFunction) -> CalcResult<()> {
        let value = parse_operand(&self.current_input);
        let result = self.guard(function.apply(value, self.angle_mode))?;

        self.current_input = format_result(result);
        self.waiting_for_new_number = true;
        self.history = format!("{}({})", function.name(), history_number(value));
        self.tape.record(&self.history, &self.current_input);
        debug!(function = %function, mode = %self.angle_mode, result = %self.current_input, "function applied");
        Ok(())
    }

    /// Replaces the operand with its reciprocal
    pub fn reciprocal(&mut self) -> CalcResult<()> {
        let value = parse_operand(&self.current_input);
        let result = if value == 0.0 {
            Err(CalcError::DivisionByZero)
        } else {
            validate_result(1.0 / value)
        };
        let result = self.guard(result)?;

        self.current_input = format_result(result);
        self.waiting_for_new_number = true;
        self.history = format!("1/{}", history_number(value));
        self.tape.record(&self.history, &self.current_input);
        Ok(())
    }

    /// Flips the operand's sign; no-op on `0` and on the error token
    pub fn toggle_sign(&mut self) {
        if self.current_input == "0" || self.is_error() {
            return;
        }
        self.current_input = match self.current_input.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", self.current_input),
        };
    }

    // ===== Clearing =====

    /// Resets operands, operator and history; the angle mode and tape survive
    pub fn clear_all(&mut self) {
        self.current_input = "0".to_string();
        self.previous_input.clear();
        self.operator = None;
        self.waiting_for_new_number = false;
        self.history.clear();
    }

    /// Resets only the current operand
    pub fn clear_entry(&mut self) {
        self.current_input = "0".to_string();
    }

    /// Drops the last character of the operand, never leaving it empty
    ///
    /// An exponent marker left without digits goes with it, so
    /// `1.5e+2` becomes `1.5` rather than `1.5e+`.
    pub fn backspace(&mut self) {
        if self.is_error() {
            self.current_input = "0".to_string();
            return;
        }
        self.current_input.pop();
        let mantissa_len = self
            .current_input
            .trim_end_matches(['+', '-'])
            .strip_suffix('e')
            .map(str::len);
        if let Some(len) = mantissa_len {
            self.current_input.truncate(len);
        }
        if self.current_input.is_empty() || self.current_input == "-" {
            self.current_input = "0".to_string();
        }
    }

    /// Switches the trig interpretation; pending operations are untouched
    pub fn toggle_mode(&mut self, mode: AngleMode) {
        if self.angle_mode != mode {
            debug!(from = %self.angle_mode, to = %mode, "angle mode changed");
        }
        self.angle_mode = mode;
    }

    // ===== Error state =====

    /// Enters the Error state on failure and passes the result through
    fn guard<T>(&mut self, result: CalcResult<T>) -> CalcResult<T> {
        if let Err(err) = &result {
            warn!(error = %err, operand = %self.current_input, "calculation failed");
            self.enter_error();
        }
        result
    }

    fn enter_error(&mut self) {
        self.current_input = ERROR_TOKEN.to_string();
        self.history.clear();
        self.operator = None;
        self.previous_input.clear();
        self.waiting_for_new_number = true;
    }
}
