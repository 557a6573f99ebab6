//! Planning helpers shared by the built-in policies.
//!
//! Everything here is a pure function of its inputs.  Gift names that are
//! missing from the catalog are skipped rather than reported: planners work
//! on best effort and the simulator is the final judge.

use std::cmp::Ordering;

use sleigh_core::{Coordinate, Velocity, distance, stopping_distance};
use sleigh_physics::{Action, Direction, Simulator, SleighState};
use sleigh_problem::{Gift, GiftCatalog};

/// Score density floor so weightless gifts do not divide by zero.
const MIN_RATIO_WEIGHT: f64 = 0.1;

// ── Batch selection ───────────────────────────────────────────────────────────

/// Choose the gifts to load for one trip, nearest destination first.
///
/// Walks `available` in order of distance from `base` and takes gifts while
/// the running weight stays within `weight_budget`; stops at the first gift
/// that does not fit so the batch stays geographically tight.
pub fn plan_delivery_batch(
    available:      &[String],
    catalog:        &GiftCatalog,
    base:           Coordinate,
    current_weight: u64,
    weight_budget:  u64,
) -> Vec<String> {
    let mut candidates: Vec<&Gift> = available.iter().filter_map(|n| catalog.get(n)).collect();
    candidates.sort_by(|a, b| {
        distance(base, a.destination).total_cmp(&distance(base, b.destination))
    });

    let mut weight = current_weight;
    let mut batch = Vec::new();
    for gift in candidates {
        if weight.saturating_add(gift.weight) > weight_budget {
            break;
        }
        weight += gift.weight;
        batch.push(gift.name.clone());
    }
    batch
}

/// Choose gifts by score per unit weight, filling `weight_budget` greedily.
///
/// Ties on density prefer the lighter gift.  Unlike
/// [`plan_delivery_batch`], a gift that does not fit is skipped and the scan
/// continues.
pub fn knapsack_greedy(
    available:      &[String],
    catalog:        &GiftCatalog,
    current_weight: u64,
    weight_budget:  u64,
) -> Vec<String> {
    let Some(mut capacity) = weight_budget.checked_sub(current_weight).filter(|&c| c > 0) else {
        return Vec::new();
    };

    let density = |g: &Gift| g.score as f64 / (g.weight as f64).max(MIN_RATIO_WEIGHT);
    let mut candidates: Vec<&Gift> = available
        .iter()
        .filter_map(|n| catalog.get(n))
        .filter(|g| g.weight <= capacity)
        .collect();
    candidates.sort_by(|a, b| match density(b).total_cmp(&density(a)) {
        Ordering::Equal => a.weight.cmp(&b.weight),
        other => other,
    });

    let mut batch = Vec::new();
    for gift in candidates {
        if gift.weight <= capacity {
            capacity -= gift.weight;
            batch.push(gift.name.clone());
        }
    }
    batch
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Order `gifts` as a nearest-neighbour tour starting from `start`.
pub fn sort_route_nearest(gifts: &[String], catalog: &GiftCatalog, start: Coordinate) -> Vec<String> {
    let mut remaining: Vec<&Gift> = gifts.iter().filter_map(|n| catalog.get(n)).collect();
    let mut route = Vec::with_capacity(remaining.len());
    let mut here = start;

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, gift) in remaining.iter().enumerate() {
            let d = distance(here, gift.destination);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        let gift = remaining.remove(best);
        here = gift.destination;
        route.push(gift.name.clone());
    }
    route
}

// ── Refuelling ────────────────────────────────────────────────────────────────

/// How many of `wanted` carrots to load without grounding the sleigh.
///
/// The load is capped at the headroom below the table's payload limit, less
/// the lightest gift still at the base so it can be loaded afterwards.  When
/// that reserve leaves nothing, the full headroom is used instead.  `None`
/// means no carrot fits at all.
pub fn refuel_amount(simulator: &Simulator, state: &SleighState, wanted: u64) -> Option<u64> {
    let room = simulator.table().max_payload().saturating_sub(state.sleigh_weight);
    let reserve = state
        .available_gifts
        .iter()
        .filter_map(|n| simulator.catalog().get(n))
        .map(|g| g.weight)
        .min()
        .unwrap_or(0);

    let amount = match wanted.min(room.saturating_sub(reserve)) {
        0 => wanted.min(room),
        n => n,
    };
    (amount > 0).then_some(amount)
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Unit-acceleration direction that brings the sleigh to rest on `target`.
///
/// Each axis is solved independently: accelerate toward the target while the
/// unit-braking stopping distance is shorter than what remains, brake once it
/// is not, and cancel any drift on an axis already aligned.  Braking on
/// either axis takes priority; otherwise the axis with the larger gap wins.
///
/// `None` means "coast": both axes are on course.
pub fn move_toward(position: Coordinate, velocity: Velocity, target: Coordinate) -> Option<Direction> {
    let dc = target.c.saturating_sub(position.c);
    let dr = target.r.saturating_sub(position.r);

    let ac = axis_correction(dc, velocity.vc);
    let ar = axis_correction(dr, velocity.vr);

    let horizontal = |a: i64| if a > 0 { Direction::Right } else { Direction::Left };
    let vertical = |a: i64| if a > 0 { Direction::Up } else { Direction::Down };

    if ac.signum() * velocity.vc.signum() < 0 {
        Some(horizontal(ac))
    } else if ar.signum() * velocity.vr.signum() < 0 {
        Some(vertical(ar))
    } else if ac != 0 && (dc.unsigned_abs() >= dr.unsigned_abs() || ar == 0) {
        Some(horizontal(ac))
    } else if ar != 0 {
        Some(vertical(ar))
    } else {
        None
    }
}

/// `+1`, `-1`, or `0`: the unit correction for one axis.
fn axis_correction(gap: i64, velocity: i64) -> i64 {
    if gap == 0 {
        return -velocity.signum();
    }
    if gap.signum() == velocity.signum() {
        // Closing in: brake once the stopping distance covers the gap.
        if gap.unsigned_abs() <= stopping_distance(velocity).unsigned_abs() { -velocity.signum() } else { 0 }
    } else {
        gap.signum()
    }
}

/// Turn a steering suggestion into a proposal the simulator will accept.
///
/// Falls back to `Float(1)` when there is no direction, the sleigh must
/// float, has no carrots, or is too heavy to accelerate.
pub fn thrust(simulator: &Simulator, state: &SleighState, direction: Option<Direction>) -> Action {
    match direction {
        Some(d)
            if !state.must_float()
                && state.carrot_count > 0
                && simulator.max_acceleration(state) >= 1 =>
        {
            Action::accelerate(d, 1)
        }
        _ => Action::FLOAT_ONE,
    }
}
