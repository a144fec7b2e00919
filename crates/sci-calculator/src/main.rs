//! sci-calc: scientific calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! sci-calc tui                          # Interactive keypad
//! sci-calc keys 2 + 3 '*' 4 =           # Feed keys, print the display
//! sci-calc --angle-mode rad keys 1 sin  # Override the startup angle mode
//! sci-calc keys 9 / 0 = --json          # Frame and tape as JSON
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sci_calculator::config::{CalculatorConfig, ConfigError};
use sci_calculator::core::history::TapeEntry;
use sci_calculator::core::AngleMode;
use sci_calculator::display::DisplayFrame;
use sci_calculator::keypad::{dispatch, Keypad};

/// Scientific calculator
#[derive(Debug, Parser)]
#[command(name = "sci-calc", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "SCI_CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Startup angle mode (deg or rad), overrides the config file
    #[arg(long, global = true)]
    angle_mode: Option<AngleMode>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive terminal calculator
    #[cfg(feature = "tui")]
    Tui,

    /// Feed a key sequence and print the resulting display
    Keys {
        /// Keys, button ids (btn-sqrt) or function names (sin, log10)
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Print the frame and tape as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Errors that end the process with a failure exit code
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown key '{0}'")]
    UnknownToken(String),
}

type CliResult<T> = Result<T, CliError>;

/// Output of `keys --json`
#[derive(Debug, Serialize)]
struct KeysReport<'a> {
    frame: DisplayFrame,
    tape: Vec<&'a TapeEntry>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let log_to_stderr = match cli.command {
        #[cfg(feature = "tui")]
        Command::Tui => cli.verbose > 0,
        Command::Keys { .. } => true,
    };
    if log_to_stderr {
        init_tracing(cli.verbose);
    }

    let config = build_config(&cli)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        #[cfg(feature = "tui")]
        Command::Tui => terminal::run(&config),
        Command::Keys { tokens, json } => run_keys(&config, &tokens, json),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> CliResult<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(mode) = cli.angle_mode {
        config = config.with_angle_mode(mode);
    }
    Ok(config)
}

fn run_keys(config: &CalculatorConfig, tokens: &[String], json: bool) -> CliResult<()> {
    println!("{}", keys_output(config, tokens, json)?);
    Ok(())
}

/// Runs a key sequence and renders the final frame
///
/// Unknown tokens fail before any key is applied. A failed calculation is
/// part of the output, not an error.
fn keys_output(config: &CalculatorConfig, tokens: &[String], json: bool) -> CliResult<String> {
    let keypad = Keypad::new();
    let actions = tokens
        .iter()
        .map(|token| {
            keypad
                .resolve_token(token)
                .ok_or_else(|| CliError::UnknownToken(token.clone()))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let mut engine = config.build_engine();
    for action in actions {
        if let Err(err) = dispatch(&mut engine, action) {
            info!(error = %err, ?action, "calculation failed");
        }
    }

    let frame = DisplayFrame::from_engine(&engine);
    if json {
        let report = KeysReport {
            frame,
            tape: engine.tape().iter().collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(format!(
            "display: {}\nhistory: {}\nmode:    {}",
            frame.primary,
            frame.history,
            frame.angle_mode.label()
        ))
    }
}

#[cfg(feature = "tui")]
mod terminal {
    use std::io;
    use std::time::{Duration, Instant};

    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
            MouseEvent, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::Rect,
        Terminal,
    };
    use tracing::info;

    use super::CliResult;
    use sci_calculator::config::CalculatorConfig;
    use sci_calculator::tui::{render, CalculatorApp, InputHandler, UiAreas};

    /// Poll interval while no error clear is pending
    const IDLE_POLL: Duration = Duration::from_millis(250);

    pub(super) fn run(config: &CalculatorConfig) -> CliResult<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = run_app(&mut terminal, CalculatorApp::with_config(config));

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: CalculatorApp) -> CliResult<()> {
        let input = InputHandler::new();
        let start = Instant::now();

        loop {
            if app.tick(elapsed_ms(start)) {
                info!("error cleared");
            }
            terminal.draw(|f| render(&app, f))?;

            if app.should_quit() {
                break;
            }

            let timeout = app
                .time_until_due()
                .map_or(IDLE_POLL, |ms| Duration::from_millis(ms).min(IDLE_POLL));
            if !event::poll(timeout)? {
                continue;
            }

            let event = event::read()?;
            app.tick(elapsed_ms(start));
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_input(input.handle_key(key));
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let size = terminal.size()?;
                    let areas = UiAreas::new(Rect::new(0, 0, size.width, size.height));
                    app.click_at(areas.keypad, column, row);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn elapsed_ms(start: Instant) -> u64 {
        u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn tokens(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    fn keys_cli(cli: Cli) -> (Vec<String>, bool) {
        match cli.command {
            Command::Keys { tokens, json } => (tokens, json),
            #[cfg(feature = "tui")]
            Command::Tui => panic!("expected the keys command"),
        }
    }

    // ===== Argument parsing tests =====

    #[test]
    fn test_json_flag_after_tokens() {
        let cli = Cli::try_parse_from(["sci-calc", "keys", "9", "/", "0", "=", "--json"]).unwrap();
        let (tokens, json) = keys_cli(cli);
        assert!(json);
        assert_eq!(tokens, ["9", "/", "0", "="]);
    }

    #[test]
    fn test_minus_is_a_token() {
        let cli = Cli::try_parse_from(["sci-calc", "keys", "5", "-", "3", "="]).unwrap();
        let (tokens, json) = keys_cli(cli);
        assert!(!json);
        assert_eq!(tokens, ["5", "-", "3", "="]);
    }

    #[test]
    fn test_keys_requires_tokens() {
        assert!(Cli::try_parse_from(["sci-calc", "keys"]).is_err());
    }

    #[test]
    fn test_global_angle_mode_override() {
        let cli = Cli::try_parse_from(["sci-calc", "--angle-mode", "rad", "keys", "1"]).unwrap();
        assert_eq!(cli.angle_mode, Some(AngleMode::Rad));
    }

    // ===== keys output tests =====

    #[test]
    fn test_keys_text_output() {
        let config = CalculatorConfig::default();
        let out = keys_output(&config, &tokens(&["2", "+", "3", "*", "4", "="]), false).unwrap();
        assert_eq!(out, "display: 20\nhistory: 5 * 4 =\nmode:    DEG");
    }

    #[test]
    fn test_keys_function_names_and_mode() {
        let config = CalculatorConfig::default().with_angle_mode(AngleMode::Rad);
        let out = keys_output(&config, &tokens(&["9", "btn-sqrt"]), false).unwrap();
        assert_eq!(out, "display: 3\nhistory: sqrt(9)\nmode:    RAD");
    }

    #[test]
    fn test_keys_calculation_error_is_output() {
        let config = CalculatorConfig::default();
        let out = keys_output(&config, &tokens(&["9", "/", "0", "="]), false).unwrap();
        assert_eq!(out, "display: Error\nhistory: \nmode:    DEG");
    }

    #[test]
    fn test_keys_unknown_token_fails() {
        let config = CalculatorConfig::default();
        let err = keys_output(&config, &tokens(&["1", "asin"]), false).unwrap_err();
        assert!(matches!(err, CliError::UnknownToken(ref t) if t == "asin"));
        assert_eq!(err.to_string(), "Unknown key 'asin'");
    }

    #[test]
    fn test_keys_json_report() {
        let config = CalculatorConfig::default();
        let out = keys_output(&config, &tokens(&["9", "-", "3", "=", "4", "sqrt"]), true).unwrap();
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(report["frame"]["primary"], "2");
        assert_eq!(report["frame"]["history"], "sqrt(4)");
        assert_eq!(report["frame"]["error"], false);
        assert_eq!(report["frame"]["angle_mode"], "deg");
        let tape = report["tape"].as_array().unwrap();
        assert_eq!(tape.len(), 2);
        assert_eq!(tape[0]["expression"], "9 - 3 =");
        assert_eq!(tape[0]["result"], "6");
        assert_eq!(tape[1]["expression"], "sqrt(4)");
    }

    #[test]
    fn test_keys_json_error_frame() {
        let config = CalculatorConfig::default();
        let out = keys_output(&config, &tokens(&["9", "/", "0", "="]), true).unwrap();
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["frame"]["primary"], "Error");
        assert_eq!(report["frame"]["error"], true);
        assert!(report["tape"].as_array().unwrap().is_empty());
    }
}
