//! Property-Based Tests for plycalc
//!
//! Uses proptest for testing invariants and edge cases
//!
//! These tests verify:
//! - The solver never overshoots and respects every positive cap
//! - Results match a plain pass-by-pass greedy
//! - Exclusions and ordering survive the calculation boundary
//! - The calculation is deterministic

use plycalc::engine::{
    calculate, solve, Allocation, CalculationRequest, CalculationResponse, MaxMultipliers, Unit,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies
// =============================================================================

/// Distinct positive units in arbitrary order
fn units_strategy() -> impl Strategy<Value = Vec<Unit>> {
    prop::collection::btree_set(1u32..=600, 0..8)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Units together with caps on some of them (0 included)
fn units_and_caps() -> impl Strategy<Value = (Vec<Unit>, MaxMultipliers)> {
    units_strategy().prop_flat_map(|units| {
        let len = units.len();
        (
            Just(units),
            prop::collection::vec(prop::option::of(0u32..6), len),
        )
            .prop_map(|(units, caps)| {
                let caps = units
                    .iter()
                    .zip(caps)
                    .filter_map(|(&unit, cap)| cap.map(|c| (unit, c)))
                    .collect();
                (units, caps)
            })
    })
}

/// Pass-by-pass greedy, one unit at a time
fn reference_solve(target: u32, units: &[Unit], caps: &MaxMultipliers) -> Vec<Allocation> {
    let cap = |unit: Unit| caps.get(&unit).copied().filter(|&c| c > 0);
    let mut remaining = u64::from(target);
    let mut allocations: Vec<Allocation> = units
        .iter()
        .map(|&unit| Allocation { unit, multiplier: 0 })
        .collect();

    for alloc in allocations.iter_mut() {
        if let Some(max) = cap(alloc.unit) {
            let unit = u64::from(alloc.unit);
            let take = u64::from(max).min(remaining / unit);
            alloc.multiplier = take as u32;
            remaining -= unit * take;
        }
    }

    loop {
        let mut progressed = false;
        for alloc in allocations.iter_mut() {
            let unit = u64::from(alloc.unit);
            let below_cap = cap(alloc.unit).is_none_or(|max| alloc.multiplier < max);
            if remaining >= unit && below_cap {
                alloc.multiplier += 1;
                remaining -= unit;
                progressed = true;
            }
        }
        if remaining == 0 || !progressed {
            break;
        }
    }

    allocations
}

// =============================================================================
// Solver properties
// =============================================================================

proptest! {
    /// The weighted sum never exceeds the target
    #[test]
    fn solve_never_overshoots(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        prop_assert!(combination.total() <= u64::from(target));
        prop_assert_eq!(combination.total() + combination.remaining(), u64::from(target));
    }

    /// Positive caps are upper bounds
    #[test]
    fn solve_respects_caps(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        for alloc in combination.allocations() {
            if let Some(&max) = caps.get(&alloc.unit).filter(|&&m| m > 0) {
                prop_assert!(alloc.multiplier <= max, "{} over cap {}", alloc, max);
            }
        }
    }

    /// One entry per unit, in input order
    #[test]
    fn solve_keeps_order(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        let order: Vec<Unit> = combination.allocations().iter().map(|a| a.unit).collect();
        prop_assert_eq!(order, units);
    }

    /// Batched passes give exactly what single passes give
    #[test]
    fn solve_matches_reference(target in 0u32..50_000, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        let expected = reference_solve(target, &units, &caps);
        prop_assert_eq!(combination.allocations(), expected.as_slice());
    }

    /// When the solver stops short, nothing else could have been added
    #[test]
    fn solve_stops_only_when_stuck(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        let remaining = combination.remaining();
        for alloc in combination.allocations() {
            let below_cap = caps
                .get(&alloc.unit)
                .copied()
                .filter(|&m| m > 0)
                .is_none_or(|max| alloc.multiplier < max);
            prop_assert!(!(below_cap && remaining >= u64::from(alloc.unit)));
        }
    }

    /// Every pass adds at least the smallest unit, so the work is bounded
    #[test]
    fn solve_pass_count_is_bounded(
        target in 0u32..=u32::MAX,
        (units, caps) in units_and_caps(),
    ) {
        let combination = solve(target, &units, &caps);
        let Some(&min) = units.iter().min() else {
            prop_assert_eq!(combination.passes(), 0);
            return Ok(());
        };
        let target = u64::from(target);
        let min = u64::from(min);
        let bound = target.div_ceil(min) + units.len() as u64;

        prop_assert!(combination.passes() <= target / min);
        let increments: u64 = combination
            .allocations()
            .iter()
            .map(|a| u64::from(a.multiplier))
            .sum();
        prop_assert!(increments <= bound, "{} increments over bound {}", increments, bound);
    }

    /// Same input, same output
    #[test]
    fn solve_is_deterministic(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        prop_assert_eq!(solve(target, &units, &caps), solve(target, &units, &caps));
    }

    /// Large targets against small units stay exact and fast
    #[test]
    fn solve_large_targets(target in 1_000_000u32..=u32::MAX, (units, caps) in units_and_caps()) {
        let combination = solve(target, &units, &caps);
        prop_assert!(combination.total() <= u64::from(target));
        let uncapped_min = units
            .iter()
            .copied()
            .filter(|unit| caps.get(unit).copied().unwrap_or(0) == 0)
            .min();
        if let Some(min) = uncapped_min {
            prop_assert!(combination.remaining() < u64::from(min));
        }
    }
}

// =============================================================================
// Calculation boundary properties
// =============================================================================

proptest! {
    /// Excluded units never show up in the response
    #[test]
    fn calculate_drops_excluded(
        target in 0u32..20_000,
        (units, caps) in units_and_caps(),
        mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let excluded: BTreeSet<Unit> = units
            .iter()
            .zip(&mask)
            .filter(|(_, skip)| **skip)
            .map(|(&unit, _)| unit)
            .collect();
        let request = CalculationRequest::new(target.to_string(), units.clone())
            .with_excluded(excluded.iter().copied())
            .with_max_multipliers(caps);
        let response = calculate(&request);

        let expected: Vec<Unit> = units.into_iter().filter(|u| !excluded.contains(u)).collect();
        let got: Vec<Unit> = response.allocations().iter().map(|a| a.unit).collect();
        prop_assert_eq!(got, expected);
    }

    /// Any decimal rendering of a u32 is accepted
    #[test]
    fn calculate_accepts_any_u32(target in any::<u32>()) {
        let response = calculate(&CalculationRequest::new(format!(" {target} "), vec![]));
        prop_assert_eq!(response, CalculationResponse::Ok { allocations: vec![] });
    }

    /// Text with a non-digit character is always rejected
    #[test]
    fn calculate_rejects_non_digits(input in "[0-9]{0,4}[^0-9\\s][0-9]{0,4}") {
        let response = calculate(&CalculationRequest::new(input, vec![200]));
        prop_assert!(!response.is_ok());
        prop_assert!(response.allocations().is_empty());
    }

    /// The wire format round-trips
    #[test]
    fn response_json_roundtrip(target in 0u32..20_000, (units, caps) in units_and_caps()) {
        let response: CalculationResponse = solve(target, &units, &caps).into();
        let json = serde_json::to_string(&response).expect("Should serialize");
        let parsed: CalculationResponse = serde_json::from_str(&json).expect("Should parse");
        prop_assert_eq!(response, parsed);
    }
}
