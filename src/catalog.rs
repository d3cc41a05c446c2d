//! Unit catalog
//!
//! The ordered list of unit sizes the calculator may combine. Entries are
//! positive and unique; insertion order is the order the solver visits them.

use crate::engine::Unit;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Units offered out of the box.
pub const DEFAULT_UNITS: [Unit; 5] = [200, 230, 250, 350, 450];

/// Reasons a unit cannot enter (or leave) the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("units must be greater than zero")]
    NotPositive,

    #[error("{0} is already in the catalog")]
    Duplicate(Unit),

    #[error("{0} is not in the catalog")]
    Unknown(Unit),
}

/// Ordered set of unique, positive units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Unit>", into = "Vec<Unit>")]
pub struct Catalog {
    units: Vec<Unit>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            units: DEFAULT_UNITS.to_vec(),
        }
    }
}

impl Catalog {
    /// Build a catalog, rejecting zeros and duplicates.
    pub fn new(units: impl IntoIterator<Item = Unit>) -> Result<Self, CatalogError> {
        let mut catalog = Self { units: Vec::new() };
        for unit in units {
            catalog.add(unit)?;
        }
        Ok(catalog)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, unit: Unit) -> bool {
        self.units.contains(&unit)
    }

    /// Append a unit at the end of the catalog.
    pub fn add(&mut self, unit: Unit) -> Result<(), CatalogError> {
        if unit == 0 {
            return Err(CatalogError::NotPositive);
        }
        if self.contains(unit) {
            return Err(CatalogError::Duplicate(unit));
        }
        self.units.push(unit);
        debug!(unit, "Unit added to catalog");
        Ok(())
    }

    /// Parse user text and append it. Returns the unit that was added.
    pub fn add_from_input(&mut self, input: &str) -> Result<Unit, CatalogError> {
        let trimmed = input.trim();
        let unit: Unit = trimmed
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| trimmed.parse().ok())
            .flatten()
            .ok_or_else(|| CatalogError::NotANumber(trimmed.to_string()))?;
        self.add(unit)?;
        info!(unit, "New unit added");
        Ok(unit)
    }

    /// Remove a unit. Returns its former position.
    pub fn remove(&mut self, unit: Unit) -> Result<usize, CatalogError> {
        let index = self
            .units
            .iter()
            .position(|&u| u == unit)
            .ok_or(CatalogError::Unknown(unit))?;
        self.units.remove(index);
        info!(unit, "Unit removed from catalog");
        Ok(index)
    }
}

impl TryFrom<Vec<Unit>> for Catalog {
    type Error = CatalogError;

    fn try_from(units: Vec<Unit>) -> Result<Self, Self::Error> {
        Self::new(units)
    }
}

impl From<Catalog> for Vec<Unit> {
    fn from(catalog: Catalog) -> Self {
        catalog.units
    }
}
