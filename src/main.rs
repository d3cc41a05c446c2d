//! plycalc - Main entry point
//!
//! Interactive ply calculator plus one-shot CLI commands over the same engine.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::Path;
use tracing::{debug, error, info};

use plycalc::app::App;
use plycalc::cli::{Cli, Commands};
use plycalc::config_file::CalculatorConfig;
use plycalc::engine::{calculate, CalculationResponse};
use plycalc::error::PlyCalcError;

/// Log file used while the TUI owns the terminal
const TUI_LOG_FILE: &str = "plycalc.log";

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = CalculatorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
        config.logging.validate()?;
    }

    let command = cli.into_command();
    if let Commands::Tui = command {
        let log_path = std::env::temp_dir().join(TUI_LOG_FILE);
        config.logging.init_to_file(&log_path)?;
        info!("plycalc starting up, logging to {}", log_path.display());
    } else {
        config.logging.init();
        debug!("CLI arguments parsed");
    }

    run_command(command, &config)
}

/// Run the interactive calculator
fn run_tui(config: &CalculatorConfig) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| PlyCalcError::terminal(format!("Failed to enable raw mode: {e}")))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| PlyCalcError::terminal(format!("Failed to enter alternate screen: {e}")))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PlyCalcError::terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(config);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!("plycalc shutting down");
    result
}

fn run_command(command: Commands, config: &CalculatorConfig) -> Result<()> {
    match command {
        Commands::Tui => run_tui(config),
        Commands::Solve {
            target,
            exclude,
            caps,
            catalog,
            json,
        } => {
            let request = config
                .request_with(target, catalog, exclude, caps)
                .context("Invalid --catalog")?;
            let response = calculate(&request);
            print_response(&response, json)?;
            if !response.is_ok() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Validate { file } => {
            validate_file(&file);
            Ok(())
        }
        Commands::Catalog => {
            for unit in config.catalog.units() {
                let marker = if config.excluded.contains(unit) { " (excluded)" } else { "" };
                match config.max_multipliers.get(unit) {
                    Some(&max) if max > 0 => println!("{unit}  max {max}{marker}"),
                    _ => println!("{unit}{marker}"),
                }
            }
            Ok(())
        }
        Commands::Init { path, force } => {
            if path.exists() && !force {
                error!("Refusing to overwrite {}", path.display());
                eprintln!(
                    "✗ {} already exists (use --force to overwrite)",
                    path.display()
                );
                std::process::exit(1);
            }
            CalculatorConfig::default().save_to_file(&path)?;
            info!("Wrote default configuration to {}", path.display());
            println!("✓ Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

fn print_response(response: &CalculationResponse, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(response).context("Failed to serialize response")?
        );
        return Ok(());
    }

    match response {
        CalculationResponse::Ok { allocations } => {
            for allocation in allocations {
                println!("{allocation}");
            }
            println!("Total: {}", response.total());
        }
        CalculationResponse::Err { message } => eprintln!("✗ {message}"),
    }
    Ok(())
}

fn validate_file(path: &Path) {
    info!("Validating configuration file: {}", path.display());
    let outcome = CalculatorConfig::load_from_file(path)
        .and_then(|config| config.validate().map_err(anyhow::Error::from));
    match outcome {
        Ok(()) => {
            info!("Configuration validation successful");
            println!("✓ Configuration file is valid: {}", path.display());
        }
        Err(e) => {
            error!("Configuration validation failed: {e:#}");
            eprintln!("✗ Configuration validation failed: {e:#}");
            std::process::exit(1);
        }
    }
}
