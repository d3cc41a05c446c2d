//! Error handling module for plycalc
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Catalog rejections keep their own narrow `CatalogError` and convert into
//! `PlyCalcError`. Calculation failures never leave the engine as errors; they
//! become the error side of `CalculationResponse`.

use crate::catalog::CatalogError;
use thiserror::Error;

/// Main error type for plycalc
#[derive(Error, Debug)]
pub enum PlyCalcError {
    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input, config values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Catalog add/remove rejections
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type alias for plycalc operations
pub type Result<T> = std::result::Result<T, PlyCalcError>;

// Convenient error constructors
impl PlyCalcError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
