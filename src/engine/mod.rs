//! Engine modules: the pure calculation core.
//!
//! The engine sits between the front ends (TUI, CLI) and the numbers. It takes
//! a target and a filtered unit list and produces an allocation per unit. No
//! module in here performs I/O.

pub mod combination;
pub mod request;

pub use combination::{solve, Allocation, Combination, MaxMultipliers, Unit};
pub use request::{
    calculate, filter_units, parse_target, CalculationError, CalculationRequest,
    CalculationResponse, INVALID_TARGET_MESSAGE,
};
