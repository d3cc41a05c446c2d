//! Configuration file handling for loading calculator defaults.
//!
//! The file only seeds the starting state (catalog, exclusions, caps, logging).
//! Nothing entered in the calculator is written back to it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::engine::{CalculationRequest, MaxMultipliers, Unit};
use crate::error::{self, PlyCalcError};
use crate::logging::LoggingConfig;

/// Calculator configuration that can be loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Units offered by the calculator, in solve order
    pub catalog: Catalog,
    /// Units left out of every calculation until re-enabled
    pub excluded: BTreeSet<Unit>,
    /// Starting caps; 0 means uncapped
    pub max_multipliers: MaxMultipliers,
    pub logging: LoggingConfig,
}

impl CalculatorConfig {
    /// Create a configuration with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::load_from_file(path)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    ///
    /// Catalog entries are checked while parsing; this covers the cross-field
    /// rules.
    pub fn validate(&self) -> error::Result<()> {
        if let Some(unit) = self
            .max_multipliers
            .keys()
            .find(|unit| !self.catalog.contains(**unit))
        {
            return Err(PlyCalcError::validation(format!(
                "Max multiplier given for {unit}, which is not in the catalog"
            )));
        }

        if let Some(unit) = self.excluded.iter().find(|unit| !self.catalog.contains(**unit)) {
            return Err(PlyCalcError::validation(format!(
                "Excluded unit {unit} is not in the catalog"
            )));
        }

        self.logging
            .validate()
            .map_err(|e| PlyCalcError::config(format!("{e:#}")))?;

        Ok(())
    }

    /// Build a calculation request for `target` using this configuration
    pub fn request(&self, target: impl Into<String>) -> CalculationRequest {
        CalculationRequest::new(target, self.catalog.units().to_vec())
            .with_excluded(self.excluded.iter().copied())
            .with_max_multipliers(self.max_multipliers.clone())
    }

    /// Build a request with one-off overrides layered on top of this
    /// configuration. A replacement catalog follows the usual catalog rules.
    pub fn request_with(
        &self,
        target: impl Into<String>,
        catalog: Option<Vec<Unit>>,
        excluded: impl IntoIterator<Item = Unit>,
        caps: impl IntoIterator<Item = (Unit, u32)>,
    ) -> error::Result<CalculationRequest> {
        let mut request = self.request(target);
        if let Some(units) = catalog {
            request.catalog = Catalog::new(units)?.into();
        }
        request.excluded.extend(excluded);
        request.max_multipliers.extend(caps);
        Ok(request)
    }
}
