use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plycalc - Ply combination calculator
#[derive(Parser, Debug)]
#[command(name = "plycalc")]
#[command(about = "Combine ply units to reach a target GSM")]
#[command(version)]
pub struct Cli {
    /// Configuration file with the catalog, exclusions and caps to start from
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (overrides the config file; RUST_LOG overrides both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive calculator (default)
    Tui,
    /// Run a single calculation and print the result
    Solve {
        /// Target value (e.g. a ply GSM)
        #[arg(short, long, allow_hyphen_values = true)]
        target: String,

        /// Unit to leave out; repeat for several
        #[arg(short, long)]
        exclude: Vec<u32>,

        /// Maximum multiplier as UNIT=MAX; repeat for several
        #[arg(long = "cap", value_parser = parse_cap)]
        caps: Vec<(u32, u32)>,

        /// Comma-separated catalog replacing the configured one
        #[arg(long, value_delimiter = ',')]
        catalog: Option<Vec<u32>>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        file: PathBuf,
    },
    /// Print the effective unit catalog
    Catalog,
    /// Write the default configuration to a file
    Init {
        /// Where to write the configuration
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run. No subcommand means the interactive calculator.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Tui)
    }
}

/// Parse a `UNIT=MAX` pair.
pub fn parse_cap(s: &str) -> Result<(u32, u32), String> {
    let (unit, max) = s
        .split_once('=')
        .ok_or_else(|| format!("expected UNIT=MAX, got '{s}'"))?;
    let unit = unit
        .trim()
        .parse()
        .map_err(|_| format!("invalid unit '{}'", unit.trim()))?;
    let max = max
        .trim()
        .parse()
        .map_err(|_| format!("invalid max multiplier '{}'", max.trim()))?;
    Ok((unit, max))
}
