//! The simulator: validates actions against a state and applies them.

use std::collections::HashSet;

use sleigh_core::{Coordinate, Tick, distance};
use sleigh_problem::{AccelerationRange, GiftCatalog, Problem};

use crate::{AccelerationTable, Action, Command, Rejection, SimError, SimResult, SleighState};

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Fixed environment of one problem plus the transition function over
/// [`SleighState`].
///
/// A `Simulator` holds no per-episode data and is never mutated after
/// construction, so one instance can be shared by reference across any number
/// of concurrent episodes.  Each episode owns its own state.
///
/// Create via [`SimulatorBuilder`] or [`Simulator::new`].
#[derive(Clone, Debug)]
pub struct Simulator {
    time_limit:  Tick,
    range:       u64,
    table:       AccelerationTable,
    catalog:     GiftCatalog,
    base:        Coordinate,
    hull_weight: u64,
}

impl Simulator {
    /// A simulator with the base at the origin and a weightless hull.
    pub fn new(time_limit: Tick, range: u64, table: AccelerationTable, catalog: GiftCatalog) -> Self {
        Self {
            time_limit,
            range,
            table,
            catalog,
            base: Coordinate::ORIGIN,
            hull_weight: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn time_limit(&self) -> Tick {
        self.time_limit
    }

    /// Interaction range `D`.
    #[inline]
    pub fn range(&self) -> u64 {
        self.range
    }

    #[inline]
    pub fn table(&self) -> &AccelerationTable {
        &self.table
    }

    #[inline]
    pub fn catalog(&self) -> &GiftCatalog {
        &self.catalog
    }

    #[inline]
    pub fn base(&self) -> Coordinate {
        self.base
    }

    #[inline]
    pub fn hull_weight(&self) -> u64 {
        self.hull_weight
    }

    // ── Episode helpers ───────────────────────────────────────────────────

    /// Start-of-episode state with no carrots on board.
    pub fn initial_state(&self) -> SleighState {
        self.initial_state_with_fuel(0)
    }

    /// Start-of-episode state with `carrots` already loaded (and weighed).
    pub fn initial_state_with_fuel(&self, carrots: u64) -> SleighState {
        SleighState::initial(&self.catalog, self.base, self.hull_weight, carrots)
    }

    /// Acceleration cap at the state's current weight.
    #[inline]
    pub fn max_acceleration(&self, state: &SleighState) -> u64 {
        self.table.max_acceleration_for_weight(state.sleigh_weight)
    }

    /// `true` if the sleigh may load gifts or carrots where it is.
    #[inline]
    pub fn in_base_range(&self, state: &SleighState) -> bool {
        self.within_range(state.position, self.base)
    }

    /// `true` if `loaded_gifts[index]` could be delivered right now.
    pub fn can_deliver(&self, state: &SleighState, index: usize) -> bool {
        state
            .loaded_gifts
            .get(index)
            .and_then(|name| self.catalog.get(name))
            .is_some_and(|gift| self.within_range(state.position, gift.destination))
    }

    /// Sum of the scores of every delivered gift.
    pub fn score(&self, state: &SleighState) -> u64 {
        state
            .delivered_gifts
            .iter()
            .filter_map(|name| self.catalog.get(name))
            .map(|gift| gift.score)
            .sum()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Validate `action` against `state` and return the resulting state.
    ///
    /// `state` is never modified.  Fails with [`SimError::InvalidAction`] if
    /// any precondition does not hold.
    pub fn apply_action(&self, state: &SleighState, action: Action) -> SimResult<SleighState> {
        let mut next = state.clone();
        self.apply_action_in_place(&mut next, action)?;
        Ok(next)
    }

    /// Like [`apply_action`][Self::apply_action] but updates an exclusively
    /// owned state without cloning.
    ///
    /// All preconditions are checked before the first write, so on error
    /// `state` is left exactly as it was.
    pub fn apply_action_in_place(&self, state: &mut SleighState, action: Action) -> SimResult<()> {
        self.transition(state, action)
            .map_err(|reason| SimError::InvalidAction { action, reason })
    }

    /// Check whether `action` would succeed without producing a new state.
    pub fn validate(&self, state: &SleighState, action: Action) -> SimResult<()> {
        self.apply_action(state, action).map(|_| ())
    }

    fn transition(&self, state: &mut SleighState, action: Action) -> Result<(), Rejection> {
        match action {
            // ── Accelerate: velocity change, burns one carrot ──────────────
            Action::Accelerate { direction, magnitude } => {
                if state.last_action_was_acceleration {
                    return Err(Rejection::MustFloat);
                }
                if magnitude == 0 {
                    return Err(Rejection::NonPositive("acceleration magnitude"));
                }
                if state.carrot_count == 0 {
                    return Err(Rejection::OutOfCarrots);
                }
                let max = self.table.max_acceleration_for_weight(state.sleigh_weight);
                if magnitude > max {
                    return Err(Rejection::OverCap {
                        requested: magnitude,
                        max,
                        weight:    state.sleigh_weight,
                    });
                }

                let velocity = direction
                    .apply(state.velocity, magnitude)
                    .ok_or(Rejection::Overflow("velocity"))?;

                state.velocity = velocity;
                state.carrot_count -= 1;
                state.sleigh_weight = state.sleigh_weight.saturating_sub(1);
                state.last_action_was_acceleration = true;
            }

            // ── Float: drift and advance the clock ─────────────────────────
            Action::Float(ticks) => {
                if ticks == 0 {
                    return Err(Rejection::NonPositive("float duration"));
                }
                let end = state
                    .current_time
                    .checked_offset(ticks)
                    .filter(|&end| end <= self.time_limit)
                    .ok_or(Rejection::TimeBudget {
                        now:   state.current_time,
                        ticks,
                        limit: self.time_limit,
                    })?;
                let position = state
                    .position
                    .checked_drift(state.velocity, ticks)
                    .ok_or(Rejection::Overflow("position"))?;

                state.position = position;
                state.current_time = end;
                state.last_action_was_acceleration = false;
            }

            // ── LoadGift: base only ────────────────────────────────────────
            Action::LoadGift(index) => {
                self.require_in_range(state.position, self.base)?;
                let name = state.available_gifts.get(index).ok_or(Rejection::IndexOutOfRange {
                    index,
                    len: state.available_gifts.len(),
                })?;
                let weight = self.gift_weight(name)?;
                let loaded_weight = state
                    .sleigh_weight
                    .checked_add(weight)
                    .ok_or(Rejection::Overflow("sleigh weight"))?;

                let name = state.available_gifts.remove(index);
                state.loaded_gifts.push(name);
                state.sleigh_weight = loaded_weight;
            }

            // ── DeliverGift: within range of the gift's destination ────────
            Action::DeliverGift(index) => {
                let name = state.loaded_gifts.get(index).ok_or(Rejection::IndexOutOfRange {
                    index,
                    len: state.loaded_gifts.len(),
                })?;
                let gift = self
                    .catalog
                    .get(name)
                    .ok_or_else(|| Rejection::UnknownGift(name.clone()))?;
                self.require_in_range(state.position, gift.destination)?;
                let weight = gift.weight;

                let name = state.loaded_gifts.remove(index);
                state.delivered_gifts.push(name);
                state.sleigh_weight = state.sleigh_weight.saturating_sub(weight);
            }

            // ── LoadCarrots: base only, fuel has mass ──────────────────────
            Action::LoadCarrots(n) => {
                self.require_in_range(state.position, self.base)?;
                if n == 0 {
                    return Err(Rejection::NonPositive("carrot count"));
                }
                let carrots = state.carrot_count.checked_add(n).ok_or(Rejection::Overflow("carrot count"))?;
                let weight = state.sleigh_weight.checked_add(n).ok_or(Rejection::Overflow("sleigh weight"))?;

                state.carrot_count = carrots;
                state.sleigh_weight = weight;
            }
        }
        Ok(())
    }

    // ── Command-log bridging ──────────────────────────────────────────────

    /// Translate a name-addressed log command into an index-addressed action
    /// valid for `state`'s current gift lists.
    ///
    /// Only gift lookups are checked here; the action's physics is checked
    /// when it is applied.
    pub fn resolve(&self, state: &SleighState, command: &Command) -> SimResult<Action> {
        let invalid = |reason| SimError::InvalidCommand { command: command.clone(), reason };
        match command {
            Command::Accelerate { direction, magnitude } => {
                Ok(Action::Accelerate { direction: *direction, magnitude: *magnitude })
            }
            Command::Float(ticks)   => Ok(Action::Float(*ticks)),
            Command::LoadCarrots(n) => Ok(Action::LoadCarrots(*n)),
            Command::LoadGift(name) => state.available_index(name).map(Action::LoadGift).ok_or_else(|| {
                invalid(if self.catalog.contains(name) {
                    Rejection::NotAvailable(name.clone())
                } else {
                    Rejection::UnknownGift(name.clone())
                })
            }),
            Command::DeliverGift(name) => state.loaded_index(name).map(Action::DeliverGift).ok_or_else(|| {
                invalid(if self.catalog.contains(name) {
                    Rejection::NotLoaded(name.clone())
                } else {
                    Rejection::UnknownGift(name.clone())
                })
            }),
        }
    }

    /// The log command recording `action` taken from `state`.
    ///
    /// Must be called with the state *before* the action is applied, since
    /// gift indices refer to its lists.
    pub fn to_command(&self, state: &SleighState, action: Action) -> SimResult<Command> {
        let gift_name = |list: &[String], index: usize| {
            list.get(index).cloned().ok_or(SimError::InvalidAction {
                action,
                reason: Rejection::IndexOutOfRange { index, len: list.len() },
            })
        };
        Ok(match action {
            Action::Accelerate { direction, magnitude } => Command::Accelerate { direction, magnitude },
            Action::Float(ticks)       => Command::Float(ticks),
            Action::LoadCarrots(n)     => Command::LoadCarrots(n),
            Action::LoadGift(index)    => Command::LoadGift(gift_name(&state.available_gifts, index)?),
            Action::DeliverGift(index) => Command::DeliverGift(gift_name(&state.loaded_gifts, index)?),
        })
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Verify the gift-partition, weight, and time invariants of `state`.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self, state: &SleighState) -> Result<(), String> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.catalog.len());
        let all = state
            .available_gifts
            .iter()
            .chain(&state.loaded_gifts)
            .chain(&state.delivered_gifts);
        for name in all {
            if !self.catalog.contains(name) {
                return Err(format!("gift {name:?} is not in the catalog"));
            }
            if !seen.insert(name) {
                return Err(format!("gift {name:?} appears in more than one place"));
            }
        }
        if seen.len() != self.catalog.len() {
            return Err(format!("{} of {} gifts are tracked", seen.len(), self.catalog.len()));
        }

        let loaded = state
            .loaded_gifts
            .iter()
            .try_fold(0u64, |sum, n| sum.checked_add(self.catalog[n.as_str()].weight));
        let expected = loaded
            .and_then(|l| l.checked_add(self.hull_weight))
            .and_then(|w| w.checked_add(state.carrot_count));
        if expected != Some(state.sleigh_weight) {
            let loaded = loaded.map_or_else(|| "overflow".to_owned(), |l| l.to_string());
            return Err(format!(
                "sleigh weight {} != hull {} + gifts {loaded} + carrots {}",
                state.sleigh_weight, self.hull_weight, state.carrot_count
            ));
        }

        if state.current_time > self.time_limit {
            return Err(format!("time {} is past the limit {}", state.current_time, self.time_limit));
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn within_range(&self, a: Coordinate, b: Coordinate) -> bool {
        a.within(b, self.range as f64)
    }

    fn require_in_range(&self, from: Coordinate, target: Coordinate) -> Result<(), Rejection> {
        let d = distance(from, target);
        if d <= self.range as f64 {
            Ok(())
        } else {
            Err(Rejection::OutOfRange { distance: d, range: self.range })
        }
    }

    fn gift_weight(&self, name: &str) -> Result<u64, Rejection> {
        self.catalog
            .get(name)
            .map(|gift| gift.weight)
            .ok_or_else(|| Rejection::UnknownGift(name.to_owned()))
    }
}

// ── SimulatorBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Simulator`].
///
/// # Required inputs
///
/// - time limit `T` and interaction range `D`
/// - acceleration bands (validated into an [`AccelerationTable`] on build)
/// - the [`GiftCatalog`]
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default            |
/// |--------------------|--------------------|
/// | `.base(c)`         | `Coordinate::ORIGIN` |
/// | `.hull_weight(w)`  | `0`                |
///
/// # Example
///
/// ```rust,ignore
/// let problem = load_problem(Path::new("a_example.in"))?;
/// let sim = SimulatorBuilder::from_problem(problem).build()?;
/// let state = sim.apply_action(&sim.initial_state(), Action::LoadCarrots(5))?;
/// ```
pub struct SimulatorBuilder {
    time_limit:  Tick,
    range:       u64,
    ranges:      Vec<AccelerationRange>,
    catalog:     GiftCatalog,
    base:        Coordinate,
    hull_weight: u64,
}

impl SimulatorBuilder {
    /// Create a builder with all required inputs.
    pub fn new(
        time_limit: Tick,
        range:      u64,
        ranges:     Vec<AccelerationRange>,
        catalog:    GiftCatalog,
    ) -> Self {
        Self {
            time_limit,
            range,
            ranges,
            catalog,
            base:        Coordinate::ORIGIN,
            hull_weight: 0,
        }
    }

    /// Take every required input from a loaded [`Problem`].
    pub fn from_problem(problem: Problem) -> Self {
        Self::new(problem.time_limit, problem.range, problem.ranges, problem.catalog)
    }

    /// Where loading and refuelling are allowed.
    pub fn base(mut self, base: Coordinate) -> Self {
        self.base = base;
        self
    }

    /// Weight of the empty sleigh, counted toward the acceleration band.
    pub fn hull_weight(mut self, weight: u64) -> Self {
        self.hull_weight = weight;
        self
    }

    /// Validate the bands and return a ready simulator.
    pub fn build(self) -> SimResult<Simulator> {
        let table = AccelerationTable::from_ranges(self.ranges)?;
        Ok(Simulator {
            time_limit:  self.time_limit,
            range:       self.range,
            table,
            catalog:     self.catalog,
            base:        self.base,
            hull_weight: self.hull_weight,
        })
    }
}
