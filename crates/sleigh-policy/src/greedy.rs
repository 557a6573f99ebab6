//! The greedy baseline: load what fits, head for the first destination.

use sleigh_core::{Coordinate, braking_signal, distance};
use sleigh_physics::{Action, Direction, SleighState};

use crate::{Policy, PolicyContext, PolicyError, PolicyResult, refuel_amount, thrust};

/// Simple rule-based policy.
///
/// In priority order, each decision:
///
/// 1. floats if the previous action was an acceleration;
/// 2. delivers any loaded gift whose destination is in range;
/// 3. at the base, refuels when below `refuel_below` carrots (never past the
///    payload limit, see [`refuel_amount`]), then loads the next available
///    gift if the sleigh could still accelerate with it;
/// 4. otherwise nudges velocity by one unit toward the first loaded gift's
///    destination (or back to the base when empty), column axis first,
///    coasting instead once [`braking_signal`] fires.
///
/// It never decelerates, so the sleigh tends to overshoot and oscillate
/// around its target.  [`MissionPolicy`][crate::MissionPolicy] does better.
pub struct GreedyPolicy {
    refuel_below:  u64,
    refuel_amount: u64,
}

impl GreedyPolicy {
    pub const DEFAULT_REFUEL_BELOW: u64 = 10;
    pub const DEFAULT_REFUEL_AMOUNT: u64 = 50;

    pub fn new() -> Self {
        Self {
            refuel_below:  Self::DEFAULT_REFUEL_BELOW,
            refuel_amount: Self::DEFAULT_REFUEL_AMOUNT,
        }
    }

    /// Override the refuelling rule.
    ///
    /// `amount` must be at least 1 whenever refuelling can trigger.
    pub fn with_refuel(below: u64, amount: u64) -> PolicyResult<Self> {
        if below > 0 && amount == 0 {
            return Err(PolicyError::Config(format!(
                "refuel amount must be at least 1 when refuelling below {below} carrots"
            )));
        }
        Ok(Self { refuel_below: below, refuel_amount: amount })
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(&mut self, state: &SleighState, ctx: &PolicyContext<'_>) -> Action {
        let sim = ctx.simulator;

        if state.must_float() {
            return Action::FLOAT_ONE;
        }

        if let Some(i) = (0..state.loaded_gifts.len()).find(|&i| sim.can_deliver(state, i)) {
            return Action::DeliverGift(i);
        }

        if sim.in_base_range(state) {
            if state.carrot_count < self.refuel_below {
                if let Some(n) = refuel_amount(sim, state, self.refuel_amount) {
                    return Action::LoadCarrots(n);
                }
            }
            if let Some(next) = state.available_gifts.first().and_then(|n| sim.catalog().get(n)) {
                if sim.table().max_acceleration_for_weight(state.sleigh_weight.saturating_add(next.weight)) > 0 {
                    return Action::LoadGift(0);
                }
            }
        }

        let target = state
            .loaded_gifts
            .first()
            .and_then(|n| sim.catalog().get(n))
            .map_or(sim.base(), |g| g.destination);

        let closing = state.velocity.towards(state.position, target);
        if braking_signal(distance(state.position, target), closing, sim.max_acceleration(state)) == 1 {
            return Action::FLOAT_ONE;
        }

        thrust(sim, state, axis_first_direction(state.position, target))
    }
}

/// Column axis first, then row; `None` when already on the target.
fn axis_first_direction(from: Coordinate, to: Coordinate) -> Option<Direction> {
    if to.c > from.c {
        Some(Direction::Right)
    } else if to.c < from.c {
        Some(Direction::Left)
    } else if to.r > from.r {
        Some(Direction::Up)
    } else if to.r < from.r {
        Some(Direction::Down)
    } else {
        None
    }
}
