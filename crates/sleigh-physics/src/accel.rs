//! Weight → maximum acceleration lookup.

use sleigh_problem::{AccelerationRange, validate_ranges};

use crate::{SimError, SimResult};

/// Sorted, contiguous acceleration bands.
///
/// The table is the sole authority on whether the sleigh can move at a given
/// weight.  A weight above the last band yields 0: the sleigh is grounded,
/// which is a normal answer rather than an error.
///
/// Band lower bounds are exclusive, except that weight 0 belongs to the first
/// band so the bands partition `[0, ∞)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccelerationTable {
    ranges: Vec<AccelerationRange>,
}

impl AccelerationTable {
    /// Build a table, rejecting empty, gapped, or unsorted band lists.
    pub fn from_ranges(ranges: Vec<AccelerationRange>) -> SimResult<Self> {
        validate_ranges(&ranges).map_err(SimError::Config)?;
        Ok(Self { ranges })
    }

    /// Maximum acceleration magnitude allowed at `weight`.
    ///
    /// O(log n): binary search over the ascending upper bounds.
    pub fn max_acceleration_for_weight(&self, weight: u64) -> u64 {
        let i = self.ranges.partition_point(|band| band.max_weight_inclusive < weight);
        self.ranges.get(i).map_or(0, |band| band.max_accel)
    }

    /// Heaviest weight at which the sleigh can still accelerate; 0 if no band
    /// allows acceleration at all.
    pub fn max_payload(&self) -> u64 {
        self.ranges
            .iter()
            .rev()
            .find(|band| band.max_accel > 0)
            .map_or(0, |band| band.max_weight_inclusive)
    }

    pub fn ranges(&self) -> &[AccelerationRange] {
        &self.ranges
    }
}
