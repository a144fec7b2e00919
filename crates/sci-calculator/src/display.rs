//! Display frames and the error auto-clear timer
//!
//! The engine never pushes anything itself. After each action a shell takes a
//! [`DisplayFrame`] snapshot and hands it to its [`DisplaySink`], and it owns an
//! [`ErrorClearTimer`] that it polls from its own clock.

use serde::Serialize;
use tracing::info;

use crate::core::{AngleMode, CalculatorEngine};

/// Default delay before an error is cleared automatically
pub const DEFAULT_ERROR_CLEAR_DELAY_MS: u64 = 2000;

/// Snapshot of everything a shell renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFrame {
    /// Primary display text
    pub primary: String,
    /// History line
    pub history: String,
    /// Whether the display should use its error style
    pub error: bool,
    /// Active angle mode
    pub angle_mode: AngleMode,
}

impl DisplayFrame {
    /// Captures the engine's visible state
    #[must_use]
    pub fn from_engine(engine: &CalculatorEngine) -> Self {
        Self {
            primary: engine.current_input().to_string(),
            history: engine.history().to_string(),
            error: engine.is_error(),
            angle_mode: engine.angle_mode(),
        }
    }
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self::from_engine(&CalculatorEngine::new())
    }
}

/// Passive output surface a shell renders frames into
pub trait DisplaySink {
    /// Renders a frame, replacing whatever was shown before
    fn render(&mut self, frame: &DisplayFrame);
}

/// Delayed full clear for the Error state
///
/// Time is whatever millisecond clock the shell supplies; the timer never reads
/// a clock itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClearTimer {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Default for ErrorClearTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_CLEAR_DELAY_MS)
    }
}

impl ErrorClearTimer {
    /// Creates a disarmed timer with the given delay
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Returns the configured delay
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Returns the pending deadline, if armed
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns true while a clear is scheduled
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedules a clear `delay_ms` after `now_ms`, replacing any earlier one
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// Cancels the scheduled clear
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Arms on entering the Error state and disarms on leaving it
    pub fn sync(&mut self, now_ms: u64, engine: &CalculatorEngine) {
        match (engine.is_error(), self.is_armed()) {
            (true, false) => self.arm(now_ms),
            (false, true) => self.disarm(),
            _ => {}
        }
    }

    /// Clears the engine if the deadline has passed and it still shows an error
    ///
    /// Returns true if the engine was cleared. The timer disarms once due
    /// whether or not it cleared anything.
    pub fn fire_if_due(&mut self, now_ms: u64, engine: &mut CalculatorEngine) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                if engine.is_error() {
                    info!(delay_ms = self.delay_ms, "error display cleared");
                    engine.clear_all();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}
