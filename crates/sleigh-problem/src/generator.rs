//! Random problem generator.
//!
//! Produces clustered instances: gifts are scattered around a handful of
//! "cities" so a sleigh has to commute between distant groups rather than
//! sweep a uniform cloud.

use sleigh_core::{Coordinate, SimRng, Tick};

use crate::band::{ranges_from_limits, validate_ranges};
use crate::{Gift, GiftCatalog, Problem, ProblemError, ProblemResult};

/// Parameters for [`generate_problem`].
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub time_limit:     u64,
    pub range:          u64,
    pub gift_count:     usize,
    /// Cluster centres; each gift picks one uniformly.
    pub clusters:       Vec<Coordinate>,
    /// Maximum per-axis offset of a gift from its cluster centre.
    pub jitter:         i64,
    /// Candidate gift weights, chosen uniformly.
    pub weights:        Vec<u64>,
    /// `(max_weight, max_accel)` pairs, cumulative from weight 0.
    pub band_limits:    Vec<(u64, u64)>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            time_limit:  2_000,
            range:       10,
            gift_count:  100,
            clusters:    vec![
                Coordinate::new(50, 50),
                Coordinate::new(-50, 50),
                Coordinate::new(50, -50),
                Coordinate::new(-50, -50),
            ],
            jitter:      30,
            weights:     vec![5, 10, 15, 20, 50],
            band_limits: vec![(20, 10), (50, 8), (100, 6), (200, 4), (500, 2)],
        }
    }
}

/// Generate a random [`Problem`] from `config`.
///
/// Gift `i` (1-based) is named `Gift_i` and scores `i` points.  The same seed
/// always yields the same problem.
pub fn generate_problem(config: &GeneratorConfig, rng: &mut SimRng) -> ProblemResult<Problem> {
    if config.jitter < 0 {
        return Err(ProblemError::Config(format!("jitter must be >= 0, got {}", config.jitter)));
    }

    let ranges = ranges_from_limits(&config.band_limits);
    validate_ranges(&ranges).map_err(ProblemError::Bands)?;

    let mut gifts = Vec::with_capacity(config.gift_count);
    for i in 1..=config.gift_count {
        let centre = *rng
            .pick(&config.clusters)
            .ok_or_else(|| ProblemError::Config("at least one cluster is required".into()))?;
        let weight = *rng
            .pick(&config.weights)
            .ok_or_else(|| ProblemError::Config("at least one gift weight is required".into()))?;
        let destination = rng.scatter(centre, config.jitter);
        gifts.push(Gift::new(format!("Gift_{i}"), i as u64, weight, destination));
    }

    Ok(Problem {
        time_limit: Tick(config.time_limit),
        range:      config.range,
        ranges,
        catalog:    GiftCatalog::new(gifts)?,
    })
}
