//! Scientific functions and angle mode

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{validate_result, CalcError, CalcResult};

/// Largest n whose factorial is finite in f64
pub const MAX_FACTORIAL: f64 = 170.0;

/// Interpretation of trigonometric arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Degrees
    #[default]
    Deg,
    /// Radians
    Rad,
}

impl AngleMode {
    /// Badge text shown by the shells
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
        }
    }

    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Deg,
        }
    }

    /// Converts a trig argument to radians
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Deg => value * PI / 180.0,
            Self::Rad => value,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deg => write!(f, "deg"),
            Self::Rad => write!(f, "rad"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(Self::Deg),
            "rad" | "radians" => Ok(Self::Rad),
            other => Err(format!("unknown angle mode '{other}' (expected deg or rad)")),
        }
    }
}

/// Single-operand functions and constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScientificFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log10,
    /// Square root
    Sqrt,
    /// Cube root
    Cbrt,
    /// Factorial of the floored operand
    Factorial,
    /// The constant π
    Pi,
    /// The constant e
    E,
}

impl ScientificFunction {
    /// All functions in keypad order
    pub const ALL: [ScientificFunction; 10] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
        Self::Log10,
        Self::Sqrt,
        Self::Cbrt,
        Self::Factorial,
        Self::Pi,
        Self::E,
    ];

    /// Name used in the history line, e.g. `sqrt(16)` or `Math.PI(5)`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "log",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Factorial => "factorial",
            Self::Pi => "Math.PI",
            Self::E => "Math.E",
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log10 => "log",
            Self::Sqrt => "√",
            Self::Cbrt => "∛",
            Self::Factorial => "n!",
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Looks up a function by name; unknown names yield `None`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log" | "ln" => Some(Self::Ln),
            "log10" => Some(Self::Log10),
            "sqrt" => Some(Self::Sqrt),
            "cbrt" => Some(Self::Cbrt),
            "factorial" | "fact" => Some(Self::Factorial),
            "pi" | "Math.PI" => Some(Self::Pi),
            "e" | "Math.E" => Some(Self::E),
            _ => None,
        }
    }

    /// Returns true for sin/cos/tan
    #[must_use]
    pub const fn is_trig(&self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Returns true for constants, which ignore their operand
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }

    /// Applies the function and validates the result
    pub fn apply(&self, value: f64, mode: AngleMode) -> CalcResult<f64> {
        let angle = if self.is_trig() {
            mode.to_radians(value)
        } else {
            value
        };
        let raw = match self {
            Self::Sin => angle.sin(),
            Self::Cos => angle.cos(),
            Self::Tan => angle.tan(),
            Self::Ln => value.ln(),
            Self::Log10 => value.log10(),
            Self::Sqrt => value.sqrt(),
            Self::Cbrt => value.cbrt(),
            Self::Factorial => factorial(value.floor())?,
            Self::Pi => PI,
            Self::E => E,
        };
        validate_result(raw)
    }
}

impl fmt::Display for ScientificFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Factorial of a non-negative integer-valued f64
pub fn factorial(n: f64) -> CalcResult<f64> {
    if n.is_nan() {
        return Err(CalcError::invalid("factorial of a non-number"));
    }
    if n < 0.0 {
        return Err(CalcError::invalid("factorial of negative number"));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::invalid("number too large for factorial"));
    }

    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}
