//! Calculation boundary
//!
//! Everything a caller needs to go from raw user input to a renderable
//! result: target parsing, exclusion filtering, and the tagged response.

use super::combination::{solve, Allocation, Combination, MaxMultipliers, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{info, warn};

/// Message shown to the user when the target cannot be used.
pub const INVALID_TARGET_MESSAGE: &str = "Please enter a valid number";

/// Errors raised at the calculation boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// The target text is not a non-negative integer.
    #[error("Please enter a valid number")]
    InvalidTarget { input: String },
}

/// Parse the user's target text.
///
/// Leading and trailing whitespace is ignored. Signs, decimals, trailing
/// garbage and values above `u32::MAX` are all rejected.
pub fn parse_target(input: &str) -> Result<u32, CalculationError> {
    let trimmed = input.trim();
    // `u32::from_str` would accept a leading '+'
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalculationError::InvalidTarget {
            input: input.to_string(),
        });
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| CalculationError::InvalidTarget {
            input: input.to_string(),
        })
}

/// Drop excluded units, keeping catalog order.
pub fn filter_units(catalog: &[Unit], excluded: &BTreeSet<Unit>) -> Vec<Unit> {
    catalog
        .iter()
        .copied()
        .filter(|unit| !excluded.contains(unit))
        .collect()
}

/// A single calculation as submitted by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Raw target text, parsed by [`parse_target`].
    pub target: String,
    pub catalog: Vec<Unit>,
    #[serde(default)]
    pub excluded: BTreeSet<Unit>,
    #[serde(default)]
    pub max_multipliers: MaxMultipliers,
}

impl CalculationRequest {
    pub fn new(target: impl Into<String>, catalog: Vec<Unit>) -> Self {
        Self {
            target: target.into(),
            catalog,
            ..Self::default()
        }
    }

    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = Unit>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    pub fn with_max_multipliers(mut self, caps: MaxMultipliers) -> Self {
        self.max_multipliers = caps;
        self
    }
}

/// Result of [`calculate`].
///
/// Serializes as `{"ok": true, "allocations": [...]}` or
/// `{"ok": false, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ResponseWire", try_from = "ResponseWire")]
pub enum CalculationResponse {
    Ok { allocations: Vec<Allocation> },
    Err { message: String },
}

impl CalculationResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Allocations on success, empty on error.
    pub fn allocations(&self) -> &[Allocation] {
        match self {
            Self::Ok { allocations } => allocations,
            Self::Err { .. } => &[],
        }
    }

    /// Weighted sum of the allocations (0 on error).
    pub fn total(&self) -> u64 {
        self.allocations().iter().map(Allocation::contribution).sum()
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { message } => Some(message),
        }
    }
}

impl From<Combination> for CalculationResponse {
    fn from(combination: Combination) -> Self {
        Self::Ok {
            allocations: combination.into_allocations(),
        }
    }
}

impl From<CalculationError> for CalculationResponse {
    fn from(err: CalculationError) -> Self {
        Self::Err {
            message: err.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ResponseWire {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allocations: Option<Vec<Allocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<CalculationResponse> for ResponseWire {
    fn from(response: CalculationResponse) -> Self {
        match response {
            CalculationResponse::Ok { allocations } => Self {
                ok: true,
                allocations: Some(allocations),
                message: None,
            },
            CalculationResponse::Err { message } => Self {
                ok: false,
                allocations: None,
                message: Some(message),
            },
        }
    }
}

impl TryFrom<ResponseWire> for CalculationResponse {
    type Error = String;

    fn try_from(wire: ResponseWire) -> Result<Self, Self::Error> {
        match (wire.ok, wire.allocations, wire.message) {
            (true, allocations, _) => Ok(Self::Ok {
                allocations: allocations.unwrap_or_default(),
            }),
            (false, _, Some(message)) => Ok(Self::Err { message }),
            (false, _, None) => Err("error response is missing `message`".to_string()),
        }
    }
}

/// Run one calculation: parse the target, filter exclusions, solve.
///
/// Never fails outright; an unusable target comes back as
/// [`CalculationResponse::Err`] with no allocations.
pub fn calculate(request: &CalculationRequest) -> CalculationResponse {
    let target = match parse_target(&request.target) {
        Ok(target) => target,
        Err(e) => {
            warn!(input = %request.target, "Rejected calculation target");
            return e.into();
        }
    };

    let units = filter_units(&request.catalog, &request.excluded);
    let combination = solve(target, &units, &request.max_multipliers);

    info!(
        target,
        units = units.len(),
        total = combination.total(),
        remaining = combination.remaining(),
        "Calculation complete"
    );

    combination.into()
}
