//! Logging configuration and initialization.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use strum::{Display, EnumString};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Check that `level` is a usable filter.
    ///
    /// Every comma-separated directive must be a bare level (`debug`) or
    /// name its level explicitly (`plycalc=trace`). A bare word such as
    /// `loud` is a target name to `EnvFilter` and is rejected here.
    pub fn validate(&self) -> Result<()> {
        for directive in self.level.split(',').map(str::trim) {
            if directive.is_empty()
                || directive.contains('=')
                || directive.parse::<LevelFilter>().is_ok()
            {
                continue;
            }
            bail!(
                "Invalid log level '{}': '{directive}' is neither a level nor TARGET=LEVEL",
                self.level
            );
        }
        EnvFilter::try_new(&self.level)
            .with_context(|| format!("Invalid log level '{}'", self.level))?;
        Ok(())
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Initialize the tracing subscriber writing to stderr.
    pub fn init(&self) {
        let filter = self.filter();

        match self.format {
            LogFormat::Json => {
                fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
            LogFormat::Pretty => {
                fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
        }
    }

    /// Initialize the tracing subscriber writing to `path`.
    ///
    /// Used while the TUI owns the terminal.
    pub fn init_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        let filter = self.filter();
        let writer = Mutex::new(file);

        match self.format {
            LogFormat::Json => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
            }
            LogFormat::Pretty => {
                fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
            }
        }
        Ok(())
    }
}
