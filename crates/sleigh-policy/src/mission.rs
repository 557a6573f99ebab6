//! Trip-based policy: load a batch, deliver it along a route, come home.

use std::collections::VecDeque;

use log::debug;
use sleigh_physics::{Action, Simulator, SleighState};

use crate::{
    Policy, PolicyContext, PolicyError, PolicyResult, knapsack_greedy, move_toward,
    plan_delivery_batch, refuel_amount, sort_route_nearest, thrust,
};

/// Upper bound on phase changes inside a single decision.
const MAX_PHASE_HOPS: usize = 4;

// ── Configuration ─────────────────────────────────────────────────────────────

/// How [`MissionPolicy`] picks the gifts for one trip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BatchStrategy {
    /// Nearest destinations first; see [`plan_delivery_batch`].
    #[default]
    Nearest,
    /// Best score per weight first; see [`knapsack_greedy`].
    ScoreDensity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionConfig {
    /// Refuel at the base whenever fewer carrots than this are on board.
    pub refuel_below: u64,

    /// Carrots taken on per refuel, capped at the payload headroom.
    pub refuel_amount: u64,

    /// Heaviest total sleigh weight a batch may reach.  `None` uses the
    /// acceleration table's [`max_payload`][sleigh_physics::AccelerationTable::max_payload].
    pub weight_budget: Option<u64>,

    pub batch: BatchStrategy,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            refuel_below:  10,
            refuel_amount: 20,
            weight_budget: None,
            batch:         BatchStrategy::Nearest,
        }
    }
}

/// Where the sleigh is in its trip cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissionPhase {
    /// Refuelling and loading the next batch.
    AtBase,
    /// Working through the delivery route.
    Delivering,
    /// Heading back to the base.
    Returning,
}

// ── MissionPolicy ─────────────────────────────────────────────────────────────

/// Three-phase trip policy.
///
/// ```text
///   AtBase ──batch loaded──▶ Delivering ──route empty──▶ Returning
///     ▲                                                     │
///     └───────────────────── base in range ─────────────────┘
/// ```
///
/// Movement uses [`move_toward`] so the sleigh brakes onto each destination
/// instead of overshooting it.
pub struct MissionPolicy {
    config: MissionConfig,
    phase:  MissionPhase,
    /// Gifts still to load for the current trip.
    batch:  VecDeque<String>,
    /// Loaded gifts in delivery order.
    route:  VecDeque<String>,
}

impl MissionPolicy {
    pub fn new() -> Self {
        Self {
            config: MissionConfig::default(),
            phase:  MissionPhase::AtBase,
            batch:  VecDeque::new(),
            route:  VecDeque::new(),
        }
    }

    pub fn with_config(config: MissionConfig) -> PolicyResult<Self> {
        if config.refuel_below > 0 && config.refuel_amount == 0 {
            return Err(PolicyError::Config("refuel amount must be at least 1".into()));
        }
        if config.weight_budget == Some(0) {
            return Err(PolicyError::Config("weight budget must be at least 1".into()));
        }
        Ok(Self { config, ..Self::new() })
    }

    #[inline]
    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    fn enter(&mut self, phase: MissionPhase) {
        debug!("mission: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn plan_batch(&self, sim: &Simulator, state: &SleighState) -> Vec<String> {
        let budget = self.config.weight_budget.unwrap_or_else(|| sim.table().max_payload());
        match self.config.batch {
            BatchStrategy::Nearest => plan_delivery_batch(
                &state.available_gifts,
                sim.catalog(),
                sim.base(),
                state.sleigh_weight,
                budget,
            ),
            BatchStrategy::ScoreDensity => {
                knapsack_greedy(&state.available_gifts, sim.catalog(), state.sleigh_weight, budget)
            }
        }
    }

    /// One step of the `AtBase` phase; `None` means the batch is aboard.
    fn at_base(&mut self, sim: &Simulator, state: &SleighState) -> Option<Action> {
        if state.carrot_count < self.config.refuel_below {
            if let Some(n) = refuel_amount(sim, state, self.config.refuel_amount) {
                return Some(Action::LoadCarrots(n));
            }
        }

        if self.batch.is_empty() && state.loaded_gifts.is_empty() {
            if state.available_gifts.is_empty() {
                return Some(Action::FLOAT_ONE);
            }
            self.batch = self.plan_batch(sim, state).into();
            if self.batch.is_empty() {
                return Some(Action::FLOAT_ONE);
            }
        }

        while let Some(name) = self.batch.pop_front() {
            if let Some(i) = state.available_index(&name) {
                return Some(Action::LoadGift(i));
            }
        }
        None
    }
}

impl Default for MissionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for MissionPolicy {
    fn name(&self) -> &str {
        "mission"
    }

    fn decide(&mut self, state: &SleighState, ctx: &PolicyContext<'_>) -> Action {
        let sim = ctx.simulator;

        if state.must_float() {
            return Action::FLOAT_ONE;
        }

        for _ in 0..MAX_PHASE_HOPS {
            match self.phase {
                MissionPhase::AtBase => {
                    if !sim.in_base_range(state) {
                        self.enter(MissionPhase::Returning);
                        continue;
                    }
                    if let Some(action) = self.at_base(sim, state) {
                        return action;
                    }
                    if state.loaded_gifts.is_empty() {
                        return Action::FLOAT_ONE;
                    }
                    self.route = sort_route_nearest(&state.loaded_gifts, sim.catalog(), state.position).into();
                    self.enter(MissionPhase::Delivering);
                }

                MissionPhase::Delivering => {
                    // Opportunistic: anything in range goes first.
                    if let Some(i) = (0..state.loaded_gifts.len()).find(|&i| sim.can_deliver(state, i)) {
                        let name = &state.loaded_gifts[i];
                        self.route.retain(|g| g != name);
                        return Action::DeliverGift(i);
                    }

                    self.route.retain(|g| state.loaded_index(g).is_some());
                    let target = self
                        .route
                        .front()
                        .and_then(|n| sim.catalog().get(n))
                        .map(|g| g.destination);
                    match target {
                        Some(dest) => {
                            return thrust(sim, state, move_toward(state.position, state.velocity, dest));
                        }
                        None => self.enter(MissionPhase::Returning),
                    }
                }

                MissionPhase::Returning => {
                    if sim.in_base_range(state) {
                        self.batch.clear();
                        self.route.clear();
                        self.enter(MissionPhase::AtBase);
                        continue;
                    }
                    return thrust(sim, state, move_toward(state.position, state.velocity, sim.base()));
                }
            }
        }
        Action::FLOAT_ONE
    }

    fn reset(&mut self) {
        self.phase = MissionPhase::AtBase;
        self.batch.clear();
        self.route.clear();
    }
}
