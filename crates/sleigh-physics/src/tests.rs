//! Unit tests for sleigh-physics.

use sleigh_core::{Coordinate, Tick};
use sleigh_problem::{Gift, GiftCatalog, ranges_from_limits};

use crate::{Action, Simulator, SimulatorBuilder, SleighState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Four bands up to weight 60, range 3, 15 ticks, four gifts.
fn reference_sim() -> Simulator {
    let catalog = GiftCatalog::new(vec![
        Gift::new("Kacper", 1, 10, Coordinate::new(5, 1)),
        Gift::new("Alek", 2, 10, Coordinate::new(-10, 1)),
        Gift::new("John", 5, 10, Coordinate::new(8, 4)),
        Gift::new("Bob", 10, 15, Coordinate::new(0, -100)),
    ])
    .unwrap();
    SimulatorBuilder::new(
        Tick(15),
        3,
        ranges_from_limits(&[(15, 8), (30, 6), (45, 4), (60, 2)]),
        catalog,
    )
    .build()
    .unwrap()
}

/// One band `(0, 15] → 8`, one gift of weight 5 at `(10, 0)`.
fn single_gift_sim() -> Simulator {
    let catalog = GiftCatalog::new(vec![Gift::new("Tom", 7, 5, Coordinate::new(10, 0))]).unwrap();
    SimulatorBuilder::new(Tick(100), 3, ranges_from_limits(&[(15, 8)]), catalog)
        .build()
        .unwrap()
}

/// One unlimited band, so any magnitude up to `u64::MAX` is under the cap.
fn unbounded_sim(time_limit: Tick) -> Simulator {
    let catalog = GiftCatalog::new(vec![Gift::new("Tom", 7, 5, Coordinate::new(10, 0))]).unwrap();
    SimulatorBuilder::new(time_limit, 3, ranges_from_limits(&[(u64::MAX, u64::MAX)]), catalog)
        .build()
        .unwrap()
}

fn apply_all(sim: &Simulator, mut state: SleighState, actions: &[Action]) -> SleighState {
    for &action in actions {
        state = sim.apply_action(&state, action).unwrap();
    }
    state
}

// ── AccelerationTable ─────────────────────────────────────────────────────────

#[cfg(test)]
mod accel {
    use sleigh_problem::{AccelerationRange, ranges_from_limits};

    use crate::{AccelerationTable, SimError};

    fn table() -> AccelerationTable {
        AccelerationTable::from_ranges(ranges_from_limits(&[(15, 8), (30, 6), (45, 4), (60, 2)])).unwrap()
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        let t = table();
        assert_eq!(t.max_acceleration_for_weight(15), 8);
        assert_eq!(t.max_acceleration_for_weight(16), 6);
        assert_eq!(t.max_acceleration_for_weight(30), 6);
        assert_eq!(t.max_acceleration_for_weight(31), 4);
        assert_eq!(t.max_acceleration_for_weight(60), 2);
    }

    #[test]
    fn zero_weight_is_in_first_band() {
        assert_eq!(table().max_acceleration_for_weight(0), 8);
        assert_eq!(table().max_acceleration_for_weight(1), 8);
    }

    #[test]
    fn above_last_band_is_grounded() {
        assert_eq!(table().max_acceleration_for_weight(61), 0);
        assert_eq!(table().max_acceleration_for_weight(u64::MAX), 0);
    }

    #[test]
    fn max_payload_is_last_moving_band() {
        assert_eq!(table().max_payload(), 60);
        let t = AccelerationTable::from_ranges(ranges_from_limits(&[(10, 3), (20, 0)])).unwrap();
        assert_eq!(t.max_payload(), 10);
    }

    #[test]
    fn rejects_gapped_bands() {
        let gapped = vec![AccelerationRange::new(0, 10, 5), AccelerationRange::new(12, 20, 3)];
        assert!(matches!(AccelerationTable::from_ranges(gapped), Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_empty_bands() {
        assert!(AccelerationTable::from_ranges(Vec::new()).is_err());
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command {
    use crate::{Command, Direction};

    #[test]
    fn parses_every_keyword() {
        assert_eq!(
            "AccUp 3".parse::<Command>().unwrap(),
            Command::Accelerate { direction: Direction::Up, magnitude: 3 }
        );
        assert_eq!(
            "AccLeft 1".parse::<Command>().unwrap(),
            Command::Accelerate { direction: Direction::Left, magnitude: 1 }
        );
        assert_eq!("Float 5".parse::<Command>().unwrap(), Command::Float(5));
        assert_eq!("LoadCarrots 20".parse::<Command>().unwrap(), Command::LoadCarrots(20));
        assert_eq!("LoadGift Alice".parse::<Command>().unwrap(), Command::LoadGift("Alice".into()));
        assert_eq!("DeliverGift Bob".parse::<Command>().unwrap(), Command::DeliverGift("Bob".into()));
    }

    #[test]
    fn display_matches_log_format() {
        let cmd = Command::Accelerate { direction: Direction::Right, magnitude: 8 };
        assert_eq!(cmd.to_string(), "AccRight 8");
        assert_eq!(Command::LoadGift("Tom".into()).to_string(), "LoadGift Tom");
        assert_eq!(Command::Float(2).to_string().parse::<Command>().unwrap(), Command::Float(2));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("".parse::<Command>().is_err());
        assert!("Float".parse::<Command>().is_err());
        assert!("Float -1".parse::<Command>().is_err());
        assert!("Float 1 2".parse::<Command>().is_err());
        assert!("Teleport 4".parse::<Command>().is_err());
        assert!("AccUp x".parse::<Command>().is_err());
    }

    #[test]
    fn direction_names_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_command_name(d.command_name()), Some(d));
        }
    }
}

// ── Acceleration ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod accelerate {
    use sleigh_core::{Tick, Velocity};

    use super::{reference_sim, single_gift_sim};
    use crate::{Action, Direction, Rejection};

    #[test]
    fn changes_exactly_one_component() {
        let sim = reference_sim();
        let s0 = sim.initial_state_with_fuel(5);
        for (direction, expected) in [
            (Direction::Up, Velocity::new(0, 2)),
            (Direction::Down, Velocity::new(0, -2)),
            (Direction::Left, Velocity::new(-2, 0)),
            (Direction::Right, Velocity::new(2, 0)),
        ] {
            let s1 = sim.apply_action(&s0, Action::accelerate(direction, 2)).unwrap();
            assert_eq!(s1.velocity, expected);
            assert_eq!(s1.position, s0.position);
            assert_eq!(s1.current_time, s0.current_time);
        }
    }

    #[test]
    fn burns_one_carrot_and_one_weight() {
        let sim = reference_sim();
        let s0 = sim.initial_state_with_fuel(5);
        let s1 = sim.apply_action(&s0, Action::accelerate(Direction::Up, 8)).unwrap();
        assert_eq!(s1.carrot_count, 4);
        assert_eq!(s1.sleigh_weight, s0.sleigh_weight - 1);
        assert!(s1.last_action_was_acceleration);
    }

    #[test]
    fn twice_in_a_row_fails() {
        let sim = reference_sim();
        let s1 = sim
            .apply_action(&sim.initial_state_with_fuel(5), Action::accelerate(Direction::Up, 1))
            .unwrap();
        let err = sim.apply_action(&s1, Action::accelerate(Direction::Left, 1)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::MustFloat));
        let err = sim.apply_action(&s1, Action::accelerate(Direction::Down, 2)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::MustFloat));

        let s2 = sim.apply_action(&s1, Action::Float(1)).unwrap();
        let s3 = sim.apply_action(&s2, Action::accelerate(Direction::Left, 1)).unwrap();
        assert_eq!(s3.velocity, Velocity::new(-1, 1));
        assert_eq!(s3.carrot_count, 3);
    }

    #[test]
    fn without_carrots_fails() {
        let sim = reference_sim();
        let err = sim
            .apply_action(&sim.initial_state(), Action::accelerate(Direction::Up, 1))
            .unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::OutOfCarrots));
    }

    #[test]
    fn zero_magnitude_fails() {
        let sim = reference_sim();
        let err = sim
            .apply_action(&sim.initial_state_with_fuel(3), Action::accelerate(Direction::Up, 0))
            .unwrap_err();
        assert!(matches!(err.rejection(), Some(Rejection::NonPositive(_))));
    }

    #[test]
    fn above_band_cap_fails() {
        let sim = reference_sim();
        let err = sim
            .apply_action(&sim.initial_state_with_fuel(3), Action::accelerate(Direction::Up, 9))
            .unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::OverCap { requested: 9, max: 8, weight: 3 })
        );
    }

    #[test]
    fn velocity_overflow_is_rejected() {
        let sim = super::unbounded_sim(Tick(100));
        let s0 = sim.initial_state_with_fuel(3);

        let err = sim.apply_action(&s0, Action::accelerate(Direction::Right, u64::MAX)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::Overflow("velocity")));

        let step = i64::MAX as u64;
        let mut s = sim.apply_action(&s0, Action::accelerate(Direction::Down, step)).unwrap();
        s = sim.apply_action(&s, Action::Float(1)).unwrap();
        let before = s.clone();
        let err = sim
            .apply_action_in_place(&mut s, Action::accelerate(Direction::Down, step))
            .unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::Overflow("velocity")));
        assert_eq!(s, before);
    }

    #[test]
    fn overloaded_sleigh_cannot_accelerate() {
        // 20 carrots + a weight-5 gift puts the single-band sleigh above 15.
        let sim = single_gift_sim();
        let mut s = sim.initial_state_with_fuel(20);
        s = sim.apply_action(&s, Action::LoadGift(0)).unwrap();
        assert_eq!(sim.max_acceleration(&s), 0);
        for d in Direction::ALL {
            for m in 1..=8 {
                assert!(sim.apply_action(&s, Action::accelerate(d, m)).is_err());
            }
        }
    }
}

// ── Float ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod float {
    use sleigh_core::{Coordinate, Tick, Velocity};

    use super::reference_sim;
    use crate::{Action, Direction, Rejection};

    #[test]
    fn drifts_by_velocity_times_ticks() {
        let sim = reference_sim();
        let mut s = sim.initial_state_with_fuel(2);
        s = sim.apply_action(&s, Action::accelerate(Direction::Right, 2)).unwrap();
        s = sim.apply_action(&s, Action::Float(3)).unwrap();
        assert_eq!(s.position, Coordinate::new(6, 0));
        assert_eq!(s.velocity, Velocity::new(2, 0));
        assert_eq!(s.current_time, Tick(3));
        assert!(!s.last_action_was_acceleration);
    }

    #[test]
    fn at_rest_only_advances_time() {
        let sim = reference_sim();
        let s = sim.apply_action(&sim.initial_state(), Action::Float(4)).unwrap();
        assert_eq!(s.position, Coordinate::ORIGIN);
        assert_eq!(s.current_time, Tick(4));
    }

    #[test]
    fn may_end_exactly_at_limit() {
        let sim = reference_sim();
        let s = sim.apply_action(&sim.initial_state(), Action::Float(15)).unwrap();
        assert_eq!(s.current_time, sim.time_limit());
    }

    #[test]
    fn past_limit_fails() {
        let sim = reference_sim();
        let s = sim.apply_action(&sim.initial_state(), Action::Float(10)).unwrap();
        let err = sim.apply_action(&s, Action::Float(6)).unwrap_err();
        assert!(matches!(err.rejection(), Some(Rejection::TimeBudget { .. })));
    }

    #[test]
    fn zero_ticks_fails() {
        let sim = reference_sim();
        assert!(sim.apply_action(&sim.initial_state(), Action::Float(0)).is_err());
    }

    #[test]
    fn huge_float_fails_instead_of_overflowing() {
        let sim = reference_sim();
        assert!(sim.apply_action(&sim.initial_state(), Action::Float(u64::MAX)).is_err());
    }

    #[test]
    fn drift_off_the_grid_is_rejected() {
        let sim = super::unbounded_sim(Tick(u64::MAX));
        let mut s = sim.initial_state_with_fuel(1);
        s = sim.apply_action(&s, Action::accelerate(Direction::Right, 8)).unwrap();
        let before = s.clone();

        let err = sim.apply_action_in_place(&mut s, Action::Float(1 << 62)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::Overflow("position")));
        assert_eq!(s, before);

        // A long float at rest stays on the grid.
        let rest = sim.apply_action(&sim.initial_state(), Action::Float(u64::MAX)).unwrap();
        assert_eq!(rest.position, Coordinate::ORIGIN);
        assert_eq!(rest.current_time, Tick(u64::MAX));
    }
}

// ── Loading and delivery ──────────────────────────────────────────────────────

#[cfg(test)]
mod cargo {
    use sleigh_core::Coordinate;

    use super::{apply_all, reference_sim, single_gift_sim};
    use crate::{Action, Direction, Rejection};

    #[test]
    fn load_gift_moves_name_and_adds_weight() {
        let sim = reference_sim();
        let s = sim.apply_action(&sim.initial_state(), Action::LoadGift(1)).unwrap();
        assert_eq!(s.available_gifts, vec!["Kacper", "John", "Bob"]);
        assert_eq!(s.loaded_gifts, vec!["Alek"]);
        assert_eq!(s.sleigh_weight, 10);
    }

    #[test]
    fn load_gift_bad_index_fails() {
        let sim = reference_sim();
        let err = sim.apply_action(&sim.initial_state(), Action::LoadGift(4)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::IndexOutOfRange { index: 4, len: 4 }));
    }

    #[test]
    fn load_carrots_adds_fuel_and_weight() {
        let sim = reference_sim();
        let s = sim.apply_action(&sim.initial_state(), Action::LoadCarrots(7)).unwrap();
        assert_eq!(s.carrot_count, 7);
        assert_eq!(s.sleigh_weight, 7);
        assert!(sim.apply_action(&s, Action::LoadCarrots(0)).is_err());
    }

    #[test]
    fn carrot_overflow_is_rejected() {
        let sim = reference_sim();
        let mut s = sim.initial_state_with_fuel(1);
        let before = s.clone();
        let err = sim.apply_action_in_place(&mut s, Action::LoadCarrots(u64::MAX)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::Overflow("carrot count")));
        assert_eq!(s, before);
        assert_eq!(s.carrot_count, 1);
    }

    #[test]
    fn gift_weight_overflow_is_rejected() {
        let sim = reference_sim();
        let s = sim.initial_state_with_fuel(u64::MAX - 5);
        let err = sim.apply_action(&s, Action::LoadGift(0)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::Overflow("sleigh weight")));
    }

    #[test]
    fn loading_away_from_base_fails() {
        let sim = reference_sim();
        // Drift to (4, 0): outside range 3 of the base.
        let s = apply_all(&sim, sim.initial_state_with_fuel(1), &[
            Action::accelerate(Direction::Right, 4),
            Action::Float(1),
        ]);
        assert_eq!(s.position, Coordinate::new(4, 0));
        assert!(!sim.in_base_range(&s));
        for action in [Action::LoadGift(0), Action::LoadCarrots(1)] {
            let err = sim.apply_action(&s, action).unwrap_err();
            assert!(matches!(err.rejection(), Some(Rejection::OutOfRange { .. })));
        }
    }

    #[test]
    fn loading_keeps_acceleration_flag() {
        let sim = reference_sim();
        let s = apply_all(&sim, sim.initial_state_with_fuel(2), &[
            Action::accelerate(Direction::Up, 1),
            Action::LoadCarrots(1),
        ]);
        assert!(s.must_float());
        assert!(sim.apply_action(&s, Action::accelerate(Direction::Up, 1)).is_err());
    }

    #[test]
    fn delivery_out_of_range_fails() {
        let sim = reference_sim();
        // Bob lives at (0, -100).
        let s = sim.apply_action(&sim.initial_state(), Action::LoadGift(3)).unwrap();
        assert!(!sim.can_deliver(&s, 0));
        let err = sim.apply_action(&s, Action::DeliverGift(0)).unwrap_err();
        assert!(matches!(err.rejection(), Some(Rejection::OutOfRange { .. })));
    }

    #[test]
    fn worked_delivery_scenario() {
        let sim = single_gift_sim();
        let s = apply_all(&sim, sim.initial_state(), &[
            Action::LoadCarrots(1),
            Action::LoadGift(0),
            Action::accelerate(Direction::Right, 8),
            Action::Float(1),
        ]);
        assert_eq!(s.position, Coordinate::new(8, 0));
        assert_eq!(s.velocity.vc, 8);
        assert_eq!(s.sleigh_weight, 5);
        assert!(sim.can_deliver(&s, 0));

        let done = sim.apply_action(&s, Action::DeliverGift(0)).unwrap();
        assert_eq!(done.delivered_gifts, vec!["Tom"]);
        assert_eq!(done.sleigh_weight, 0);
        assert_eq!(sim.score(&done), 7);
        assert!(done.all_delivered());
    }
}

// ── Purity and invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod purity {
    use super::reference_sim;
    use crate::{Action, Direction};

    #[test]
    fn apply_does_not_touch_input() {
        let sim = reference_sim();
        let s0 = sim.initial_state_with_fuel(3);
        let snapshot = s0.clone();
        let _ = sim.apply_action(&s0, Action::accelerate(Direction::Up, 2)).unwrap();
        let _ = sim.apply_action(&s0, Action::LoadGift(9));
        assert_eq!(s0, snapshot);
    }

    #[test]
    fn clones_evolve_identically() {
        let sim = reference_sim();
        let a = sim.initial_state_with_fuel(3);
        let b = a.clone();
        let action = Action::accelerate(Direction::Down, 3);
        assert_eq!(sim.apply_action(&a, action).unwrap(), sim.apply_action(&b, action).unwrap());
    }

    #[test]
    fn failed_in_place_apply_leaves_state_unchanged() {
        let sim = reference_sim();
        let mut s = sim.initial_state_with_fuel(1);
        sim.apply_action_in_place(&mut s, Action::accelerate(Direction::Up, 1)).unwrap();
        let snapshot = s.clone();
        assert!(sim.apply_action_in_place(&mut s, Action::accelerate(Direction::Up, 1)).is_err());
        assert_eq!(s, snapshot);
    }

    #[test]
    fn initial_state_satisfies_invariants() {
        let sim = reference_sim();
        assert!(sim.check_invariants(&sim.initial_state()).is_ok());
        assert!(sim.check_invariants(&sim.initial_state_with_fuel(10)).is_ok());
    }

    #[test]
    fn invariant_check_catches_duplicate_gift() {
        let sim = reference_sim();
        let mut s = sim.initial_state();
        s.loaded_gifts.push("Kacper".into());
        assert!(sim.check_invariants(&s).is_err());
    }

    #[test]
    fn invariant_check_catches_weight_drift() {
        let sim = reference_sim();
        let mut s = sim.initial_state();
        s.sleigh_weight += 1;
        assert!(sim.check_invariants(&s).is_err());
    }
}

// ── Command resolution ────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve {
    use super::reference_sim;
    use crate::{Action, Command, Direction, Rejection, SimError};

    #[test]
    fn names_resolve_to_current_indices() {
        let sim = reference_sim();
        let s = sim.initial_state();
        assert_eq!(sim.resolve(&s, &Command::LoadGift("John".into())).unwrap(), Action::LoadGift(2));

        let s = sim.apply_action(&s, Action::LoadGift(0)).unwrap();
        assert_eq!(sim.resolve(&s, &Command::LoadGift("John".into())).unwrap(), Action::LoadGift(1));
        assert_eq!(
            sim.resolve(&s, &Command::DeliverGift("Kacper".into())).unwrap(),
            Action::DeliverGift(0)
        );
    }

    #[test]
    fn unknown_and_misplaced_gifts_are_distinguished() {
        let sim = reference_sim();
        let s = sim.initial_state();
        let err = sim.resolve(&s, &Command::LoadGift("Zed".into())).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::UnknownGift("Zed".into())));
        let err = sim.resolve(&s, &Command::DeliverGift("Alek".into())).unwrap_err();
        assert!(matches!(err, SimError::InvalidCommand { reason: Rejection::NotLoaded(_), .. }));
    }

    #[test]
    fn to_command_names_the_gift() {
        let sim = reference_sim();
        let s = sim.initial_state();
        assert_eq!(sim.to_command(&s, Action::LoadGift(3)).unwrap(), Command::LoadGift("Bob".into()));
        assert_eq!(
            sim.to_command(&s, Action::accelerate(Direction::Up, 2)).unwrap(),
            Command::Accelerate { direction: Direction::Up, magnitude: 2 }
        );
        assert!(sim.to_command(&s, Action::DeliverGift(0)).is_err());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::reference_sim;
    use crate::{Action, Direction};

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0usize..4, 0u64..10).prop_map(|(d, m)| Action::accelerate(Direction::ALL[d], m)),
            (0u64..6).prop_map(Action::Float),
            (0usize..5).prop_map(Action::LoadGift),
            (0usize..5).prop_map(Action::DeliverGift),
            (0u64..6).prop_map(Action::LoadCarrots),
        ]
    }

    proptest! {
        #[test]
        fn invariants_survive_any_action_sequence(
            actions in proptest::collection::vec(any_action(), 0..60)
        ) {
            let sim = reference_sim();
            let mut state = sim.initial_state();
            for action in actions {
                let before = state.clone();
                match sim.apply_action_in_place(&mut state, action) {
                    Ok(()) => {
                        prop_assert!(state.current_time >= before.current_time);
                        if action.is_acceleration() {
                            prop_assert!(!before.last_action_was_acceleration);
                        }
                    }
                    Err(_) => prop_assert_eq!(&state, &before),
                }
                prop_assert_eq!(sim.check_invariants(&state), Ok(()));
                prop_assert_eq!(state.gift_count(), sim.catalog().len());
            }
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[test]
fn builder_applies_base_and_hull() {
    let catalog = GiftCatalog::new(Vec::new()).unwrap();
    let sim = SimulatorBuilder::new(Tick(10), 2, ranges_from_limits(&[(20, 4)]), catalog)
        .base(Coordinate::new(3, 3))
        .hull_weight(10)
        .build()
        .unwrap();
    let s = sim.initial_state_with_fuel(2);
    assert_eq!(s.position, Coordinate::new(3, 3));
    assert_eq!(s.sleigh_weight, 12);
    assert!(sim.in_base_range(&s));
    assert!(sim.check_invariants(&s).is_ok());
    assert!(s.all_delivered());
}

#[test]
fn builder_rejects_bad_bands() {
    let catalog = GiftCatalog::new(Vec::new()).unwrap();
    assert!(SimulatorBuilder::new(Tick(10), 2, Vec::new(), catalog).build().is_err());
}
