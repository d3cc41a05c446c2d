//! Combination Solver
//!
//! Splits a target quantity into a multiplier per catalog unit so that the
//! weighted sum approaches the target without exceeding it.
//!
//! # Algorithm
//!
//! | Phase | Behavior |
//! |-------|----------|
//! | 1. Capped pre-allocation | Each capped unit takes its cap, or as many as still fit |
//! | 2. Greedy distribution   | Repeated catalog-order passes add one of every unit that fits |
//!
//! Phase 2 stops when the remainder reaches zero or a full pass adds nothing.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects. Inputs are borrowed, never mutated
//! - **Catalog order**: Output has one entry per input unit, in input order
//! - **Not optimal**: A remainder may be left even when an exact packing exists
//!
//! The pass order is load-bearing: results must match the catalog-order greedy
//! exactly, so this module must not be swapped for a dynamic-programming solver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// A catalog entry: a positive weight/size such as 200 or 230.
pub type Unit = u32;

/// Per-unit multiplier caps. A missing entry or a cap of 0 means uncapped.
pub type MaxMultipliers = BTreeMap<Unit, u32>;

/// One unit and how many of it the combination uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub unit: Unit,
    pub multiplier: u32,
}

impl Allocation {
    /// Weighted contribution of this entry (`unit * multiplier`).
    pub fn contribution(&self) -> u64 {
        u64::from(self.unit) * u64::from(self.multiplier)
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.unit, self.multiplier)
    }
}

/// The outcome of a solve: allocations in catalog order plus the target they
/// were solved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    target: u32,
    allocations: Vec<Allocation>,
    passes: u64,
}

impl Combination {
    /// Allocations in catalog order, one per unit passed to [`solve`].
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Consumes the combination, returning the allocation list.
    pub fn into_allocations(self) -> Vec<Allocation> {
        self.allocations
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Distribution passes that added at least one unit, batched passes
    /// counted one by one. Never more than `target / min(units)`.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Weighted sum of all allocations. Never exceeds the target.
    pub fn total(&self) -> u64 {
        self.allocations.iter().map(Allocation::contribution).sum()
    }

    /// Part of the target no unit could absorb.
    pub fn remaining(&self) -> u64 {
        u64::from(self.target).saturating_sub(self.total())
    }

    /// Returns true if the allocations add up to the target exactly.
    pub fn is_exact(&self) -> bool {
        self.remaining() == 0
    }

    /// Multiplier chosen for `unit`, if the unit took part in the solve.
    pub fn multiplier_for(&self, unit: Unit) -> Option<u32> {
        self.allocations
            .iter()
            .find(|a| a.unit == unit)
            .map(|a| a.multiplier)
    }
}

/// Positive cap for `unit`, treating absent and zero as uncapped.
fn cap_for(max_multipliers: &MaxMultipliers, unit: Unit) -> Option<u32> {
    max_multipliers.get(&unit).copied().filter(|&m| m > 0)
}

/// Solve the combination for `target` over `units` (already filtered for
/// exclusions) under `max_multipliers`.
///
/// Units are visited in the order given. Zero-valued units are never
/// incremented; the catalog rejects them before they get here.
pub fn solve(target: u32, units: &[Unit], max_multipliers: &MaxMultipliers) -> Combination {
    let mut allocations: Vec<Allocation> = units
        .iter()
        .map(|&unit| Allocation { unit, multiplier: 0 })
        .collect();
    let mut remaining = u64::from(target);

    debug!(target, units = units.len(), caps = max_multipliers.len(), "Solving combination");

    // Phase 1: apply the specified maximum multipliers first
    for alloc in allocations.iter_mut() {
        let Some(cap) = cap_for(max_multipliers, alloc.unit) else {
            continue;
        };
        if alloc.unit == 0 {
            continue;
        }
        let unit = u64::from(alloc.unit);
        let max_contribution = unit.saturating_mul(u64::from(cap));
        if remaining >= max_contribution {
            alloc.multiplier = cap;
            remaining -= max_contribution;
        } else {
            // remaining < unit * cap, so the quotient is below the cap
            let fits = remaining / unit;
            alloc.multiplier = fits as u32;
            remaining -= unit * fits;
        }
    }

    trace!(remaining, "Capped pre-allocation done");

    // Phase 2: distribute the remainder in catalog-order passes
    let mut passes: u64 = 0;
    while remaining > 0 {
        let eligible: Vec<usize> = allocations
            .iter()
            .enumerate()
            .filter(|(_, a)| is_eligible(a, remaining, max_multipliers))
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            break;
        }

        let pass_sum: u64 = eligible.iter().map(|&i| u64::from(allocations[i].unit)).sum();
        let repeat =
            repeatable_passes(&allocations, &eligible, remaining, pass_sum, max_multipliers);

        if repeat > 0 {
            // Every eligible unit fits in each of the next `repeat` passes,
            // and no other unit can start fitting while the remainder shrinks.
            for &i in &eligible {
                allocations[i].multiplier += repeat as u32;
            }
            remaining -= pass_sum * repeat;
            passes += repeat;
        } else {
            single_pass(&mut allocations, &mut remaining, max_multipliers);
            passes += 1;
        }
    }

    debug!(passes, remaining, "Combination solved");

    Combination {
        target,
        allocations,
        passes,
    }
}

/// A unit can take one more if it fits in the remainder and is below its cap.
fn is_eligible(alloc: &Allocation, remaining: u64, max_multipliers: &MaxMultipliers) -> bool {
    alloc.unit > 0
        && remaining >= u64::from(alloc.unit)
        && cap_for(max_multipliers, alloc.unit).is_none_or(|cap| alloc.multiplier < cap)
}

/// How many consecutive passes will increment exactly the `eligible` set.
///
/// Holds while the remainder at the start of a pass covers the whole set and
/// no capped member runs out of headroom.
fn repeatable_passes(
    allocations: &[Allocation],
    eligible: &[usize],
    remaining: u64,
    pass_sum: u64,
    max_multipliers: &MaxMultipliers,
) -> u64 {
    let by_remainder = remaining / pass_sum;
    eligible
        .iter()
        .filter_map(|&i| {
            let alloc = &allocations[i];
            cap_for(max_multipliers, alloc.unit).map(|cap| u64::from(cap - alloc.multiplier))
        })
        .fold(by_remainder, u64::min)
}

/// One catalog-order pass. Returns true if any multiplier changed.
fn single_pass(
    allocations: &mut [Allocation],
    remaining: &mut u64,
    max_multipliers: &MaxMultipliers,
) -> bool {
    let mut distributed = false;
    for alloc in allocations.iter_mut() {
        if is_eligible(alloc, *remaining, max_multipliers) {
            alloc.multiplier += 1;
            *remaining -= u64::from(alloc.unit);
            distributed = true;
        }
    }
    distributed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(pairs: &[(Unit, u32)]) -> MaxMultipliers {
        pairs.iter().copied().collect()
    }

    fn multipliers(combination: &Combination) -> Vec<u32> {
        combination.allocations().iter().map(|a| a.multiplier).collect()
    }

    #[test]
    fn test_default_catalog_thousand() {
        let result = solve(1000, &[200, 230, 250, 350, 450], &MaxMultipliers::new());
        // Pass 1: 200, 230, 250 fit (320 left); pass 2: 200 (120 left); pass 3: nothing
        assert_eq!(multipliers(&result), vec![2, 1, 1, 0, 0]);
        assert_eq!(result.passes(), 2);
        assert_eq!(result.total(), 880);
        assert_eq!(result.remaining(), 120);
        assert!(!result.is_exact());
    }

    #[test]
    fn test_cap_reached_leaves_remainder() {
        let result = solve(250, &[200, 230], &caps(&[(200, 1)]));
        assert_eq!(
            result.allocations(),
            &[
                Allocation { unit: 200, multiplier: 1 },
                Allocation { unit: 230, multiplier: 0 },
            ]
        );
        assert_eq!(result.remaining(), 50);
    }

    #[test]
    fn test_cap_larger_than_target_floors() {
        let result = solve(1000, &[300, 100], &caps(&[(300, 10)]));
        // floor(1000 / 300) = 3, remaining 100 goes to the uncapped 100
        assert_eq!(multipliers(&result), vec![3, 1]);
        assert!(result.is_exact());
    }

    #[test]
    fn test_zero_cap_is_uncapped() {
        let result = solve(600, &[200], &caps(&[(200, 0)]));
        assert_eq!(multipliers(&result), vec![3]);
    }

    #[test]
    fn test_cap_limits_phase_two() {
        let result = solve(1000, &[100, 300], &caps(&[(100, 2)]));
        // Phase 1: 100 x 2 (800 left); phase 2: 300 x 2 (200 left), 100 is capped
        assert_eq!(multipliers(&result), vec![2, 2]);
        assert_eq!(result.remaining(), 200);
    }

    #[test]
    fn test_zero_target() {
        let result = solve(0, &[200, 230], &MaxMultipliers::new());
        assert_eq!(multipliers(&result), vec![0, 0]);
        assert!(result.is_exact());
    }

    #[test]
    fn test_empty_units() {
        let result = solve(5000, &[], &MaxMultipliers::new());
        assert!(result.allocations().is_empty());
        assert_eq!(result.remaining(), 5000);
    }

    #[test]
    fn test_huge_cap_does_not_overflow() {
        let result = solve(u32::MAX, &[u32::MAX], &caps(&[(u32::MAX, u32::MAX)]));
        assert_eq!(multipliers(&result), vec![1]);
        assert!(result.is_exact());
    }

    #[test]
    fn test_repeated_passes_match_single_steps() {
        let units = [7, 3, 5];
        let limits = caps(&[(3, 4)]);
        let batched = solve(1_000, &units, &limits);

        let mut allocations: Vec<Allocation> = units
            .iter()
            .map(|&unit| Allocation { unit, multiplier: 0 })
            .collect();
        let mut remaining = 1_000u64;
        while remaining > 0 && single_pass(&mut allocations, &mut remaining, &limits) {}

        assert_eq!(batched.allocations(), allocations.as_slice());
        assert_eq!(batched.remaining(), remaining);
    }

    #[test]
    fn test_batched_passes_are_counted_individually() {
        // 200 alone fits five times in 1000, applied as one batch
        let result = solve(1000, &[200], &MaxMultipliers::new());
        assert_eq!(multipliers(&result), vec![5]);
        assert_eq!(result.passes(), 5);
    }

    #[test]
    fn test_no_passes_when_nothing_fits() {
        let result = solve(150, &[200, 230], &MaxMultipliers::new());
        assert_eq!(result.passes(), 0);
    }

    #[test]
    fn test_multiplier_for() {
        let result = solve(460, &[230, 300], &MaxMultipliers::new());
        assert_eq!(result.multiplier_for(230), Some(2));
        assert_eq!(result.multiplier_for(300), Some(0));
        assert_eq!(result.multiplier_for(999), None);
    }

    #[test]
    fn test_allocation_display() {
        let alloc = Allocation { unit: 250, multiplier: 3 };
        assert_eq!(alloc.to_string(), "250 x 3");
        assert_eq!(alloc.contribution(), 750);
    }
}
