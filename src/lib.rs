//! Ply combination calculator library
//!
//! Combines ply units (GSM weights) into a multiset whose sum approaches a
//! target from below, with per-unit caps and exclusions. The engine is pure;
//! the TUI, CLI and config layers sit on top of it.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, DEFAULT_UNITS};
pub use config_file::CalculatorConfig;
pub use engine::{
    calculate, solve, Allocation, CalculationError, CalculationRequest, CalculationResponse,
    Combination, MaxMultipliers, Unit,
};
pub use error::PlyCalcError;
pub use logging::{LogFormat, LoggingConfig};
