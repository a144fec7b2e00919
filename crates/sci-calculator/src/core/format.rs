//! Number formatting and operand parsing
//!
//! The display band is `1e-10 <= |x| <= 1e15`: inside it results are rounded to
//! ten decimal places and printed as plain decimals, outside it they switch to
//! scientific notation with eight fractional digits.

/// Magnitude above which results switch to scientific notation
pub const LARGE_MAGNITUDE: f64 = 1e15;

/// Magnitude below which non-zero results switch to scientific notation
pub const SMALL_MAGNITUDE: f64 = 1e-10;

/// Decimal places kept for plain results
const ROUNDING_SCALE: f64 = 1e10;

/// 2^53, the end of the contiguous integer range of f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Fractional digits in scientific notation
const EXPONENT_DIGITS: usize = 8;

/// History operands at or above this magnitude use exponent notation
const HISTORY_LARGE_MAGNITUDE: f64 = 1e21;

/// Non-zero history operands below this magnitude use exponent notation
const HISTORY_SMALL_MAGNITUDE: f64 = 1e-6;

/// Formats a validated result for the display
#[must_use]
pub fn format_result(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > LARGE_MAGNITUDE || (magnitude < SMALL_MAGNITUDE && value != 0.0) {
        return to_exponential(value, EXPONENT_DIGITS);
    }

    let scaled = value * ROUNDING_SCALE;
    // Past 2^53 the value has no fractional digits left to round
    let rounded = if scaled.abs() < MAX_EXACT_INTEGER {
        scaled.round() / ROUNDING_SCALE
    } else {
        value
    };
    plain_number(rounded)
}

/// Renders a number without exponent notation; negative zero prints as `0`
#[must_use]
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Renders an operand echoed into the history line
///
/// Uses the shortest round-trip digits and, like the browser's number to
/// string conversion, exponent notation at or above `1e21` and below `1e-6`.
#[must_use]
pub fn history_number(value: f64) -> String {
    let magnitude = value.abs();
    let outside = magnitude >= HISTORY_LARGE_MAGNITUDE || magnitude < HISTORY_SMALL_MAGNITUDE;
    if value != 0.0 && outside {
        return signed_exponent(format!("{value:e}"));
    }
    plain_number(value)
}

/// Scientific notation with an explicit exponent sign, e.g. `1.23456789e+20`
#[must_use]
pub fn to_exponential(value: f64, digits: usize) -> String {
    signed_exponent(format!("{value:.digits$e}"))
}

fn signed_exponent(formatted: String) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Reads an operand string as a number
///
/// Anything that is not a numeral (including the error token) reads as NaN,
/// which then fails result validation downstream.
#[must_use]
pub fn parse_operand(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns true if the text uses exponent notation
#[must_use]
pub fn is_scientific(text: &str) -> bool {
    text.contains('e') && text.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '-')
}
