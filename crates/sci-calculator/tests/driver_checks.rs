//! Shell-independent behaviour checks
//!
//! The same `verify_*` suite runs against every shell, so the terminal app and
//! the browser page cannot drift apart.

#![allow(clippy::unwrap_used)]

use sci_calculator::config::CalculatorConfig;
use sci_calculator::core::AngleMode;
use sci_calculator::driver::{run_full_suite, verify_clearing, CalculatorDriver};
use sci_calculator::wasm::WasmDriver;

fn scenario<D: CalculatorDriver>(driver: &mut D) -> Vec<(String, String, bool)> {
    let steps: [&[&str]; 6] = [
        &["3", ".", "5", "*", "2"],
        &["="],
        &["+", "1", "0", "/", "0", "="],
        &["4", "^", "2", "="],
        &["Backspace", "7", "-", "2", "Enter"],
        &["Escape"],
    ];
    steps
        .iter()
        .map(|keys| {
            let _ = driver.press_keys(keys);
            (driver.display(), driver.history(), driver.is_error())
        })
        .collect()
}

#[test]
fn wasm_driver_full_suite() {
    run_full_suite(&mut WasmDriver::new());
}

#[test]
fn wasm_driver_suite_in_radians() {
    let config = CalculatorConfig::new().with_angle_mode(AngleMode::Rad);
    let mut driver = WasmDriver::with_config(&config);
    verify_clearing(&mut driver);
    assert_eq!(driver.angle_mode(), AngleMode::Rad);
}

#[test]
fn wasm_scenario_frames() {
    let frames = scenario(&mut WasmDriver::new());
    assert_eq!(frames[0].0, "2");
    assert_eq!(frames[1], ("7".to_string(), "3.5 * 2 =".to_string(), false));
    assert_eq!(frames[2], ("Error".to_string(), String::new(), true));
    assert_eq!(frames[5], ("0".to_string(), String::new(), false));
}

#[cfg(feature = "tui")]
mod tui {
    use super::*;
    use sci_calculator::driver::tui_driver::TuiDriver;

    #[test]
    fn tui_driver_full_suite() {
        run_full_suite(&mut TuiDriver::new());
    }

    #[test]
    fn shells_agree_on_scenario() {
        let wasm = scenario(&mut WasmDriver::new());
        let tui = scenario(&mut TuiDriver::new());
        assert_eq!(wasm, tui);
    }

    #[test]
    fn shells_agree_on_tape() {
        let mut wasm = WasmDriver::new();
        let mut tui = TuiDriver::new();
        for driver in [&mut wasm as &mut dyn CalculatorDriver, &mut tui] {
            driver.press_keys(&["1", "2", "+", "3", "0", "="]).unwrap();
            driver.press_keys(&["9", "%", "4", "="]).unwrap();
        }
        assert_eq!(wasm.tape(), tui.tape());
        assert_eq!(wasm.tape().len(), 2);
    }
}
