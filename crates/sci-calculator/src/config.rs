//! Calculator configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.
//!
//! ```yaml
//! angle_mode: rad
//! error_clear_delay_ms: 1500
//! tape_capacity: 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::history::Tape;
use crate::core::{AngleMode, CalculatorEngine};
use crate::display::{ErrorClearTimer, DEFAULT_ERROR_CLEAR_DELAY_MS};

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Calculator settings shared by every shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Angle mode at startup
    pub angle_mode: AngleMode,
    /// Delay before the Error state clears itself
    pub error_clear_delay_ms: u64,
    /// Maximum number of tape entries (0 disables the tape)
    pub tape_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Deg,
            error_clear_delay_ms: DEFAULT_ERROR_CLEAR_DELAY_MS,
            tape_capacity: Tape::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Loads configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Serializes the configuration to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set startup angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    /// Set error auto-clear delay
    #[must_use]
    pub const fn with_error_clear_delay_ms(mut self, delay_ms: u64) -> Self {
        self.error_clear_delay_ms = delay_ms;
        self
    }

    /// Set tape capacity
    #[must_use]
    pub const fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// Builds an engine with these settings
    #[must_use]
    pub fn build_engine(&self) -> CalculatorEngine {
        CalculatorEngine::with_tape(self.angle_mode, Tape::with_capacity(self.tape_capacity))
    }

    /// Builds the shell-side error timer
    #[must_use]
    pub fn build_error_timer(&self) -> ErrorClearTimer {
        ErrorClearTimer::new(self.error_clear_delay_ms)
    }
}
