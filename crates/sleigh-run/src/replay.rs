//! Validating a command log from scratch.

use log::debug;
use sleigh_physics::{Command, Simulator, SleighState};

use crate::{RunError, RunResult};

/// Final state of a fully valid command log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub state:   SleighState,
    pub score:   u64,
    pub applied: usize,
}

/// Apply `commands` to the simulator's initial (fuel-less) state.
///
/// Fails on the first command that does not resolve or is rejected, with
/// [`RunError::Replay`] naming its zero-based index.  No fallback is applied:
/// a log either replays exactly or not at all.
pub fn replay<'a, I>(simulator: &Simulator, commands: I) -> RunResult<ReplayOutcome>
where
    I: IntoIterator<Item = &'a Command>,
{
    replay_from(simulator, simulator.initial_state(), commands)
}

/// Like [`replay`] but starting from an arbitrary `state`.
pub fn replay_from<'a, I>(simulator: &Simulator, mut state: SleighState, commands: I) -> RunResult<ReplayOutcome>
where
    I: IntoIterator<Item = &'a Command>,
{
    let mut applied = 0;
    for (index, command) in commands.into_iter().enumerate() {
        let fail = |source| RunError::Replay { index, command: command.clone(), source };

        let action = simulator.resolve(&state, command).map_err(fail)?;
        simulator.apply_action_in_place(&mut state, action).map_err(fail)?;
        applied += 1;
    }

    simulator.check_invariants(&state).map_err(RunError::Invariant)?;
    let score = simulator.score(&state);
    debug!("replayed {applied} commands to {}, score {score}", state.current_time);
    Ok(ReplayOutcome { state, score, applied })
}
