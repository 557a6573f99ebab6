//! Running many independent episodes against one simulator.

use sleigh_physics::Simulator;
use sleigh_policy::Policy;

use crate::{EpisodeBuilder, EpisodeSummary, NoopObserver, RunResult};

/// Run one episode per policy and return their summaries in input order.
///
/// Every episode shares `simulator` read-only and owns its state and policy,
/// so episodes never observe each other.  With the `parallel` Cargo feature
/// the episodes run on Rayon's thread pool; results are identical either way.
pub fn evaluate_batch<P: Policy>(simulator: &Simulator, policies: Vec<P>) -> Vec<RunResult<EpisodeSummary>> {
    let run_one = |policy: P| EpisodeBuilder::new(simulator, policy).build()?.run(&mut NoopObserver);

    #[cfg(not(feature = "parallel"))]
    {
        policies.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        policies.into_par_iter().map(run_one).collect()
    }
}
