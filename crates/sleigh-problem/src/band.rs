//! Weight bands mapping sleigh weight to the maximum allowed acceleration.
//!
//! # Band model
//!
//! A band is the half-open interval `(min_weight_exclusive,
//! max_weight_inclusive]`.  A valid band list starts at weight 0, is sorted by
//! ascending weight, and each band begins exactly where the previous one
//! ended:
//!
//! ```text
//! (0, 15] → 8   (15, 30] → 6   (30, 45] → 4   (45, 60] → 2   (60, ∞) → 0
//! ```
//!
//! Weights beyond the last band are "grounded": maximum acceleration 0.

/// One weight band.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelerationRange {
    pub min_weight_exclusive: u64,
    pub max_weight_inclusive: u64,
    pub max_accel:            u64,
}

impl AccelerationRange {
    #[inline]
    pub fn new(min_weight_exclusive: u64, max_weight_inclusive: u64, max_accel: u64) -> Self {
        Self { min_weight_exclusive, max_weight_inclusive, max_accel }
    }

    /// `true` if `weight` falls inside `(min, max]`.
    #[inline]
    pub fn contains(&self, weight: u64) -> bool {
        self.min_weight_exclusive < weight && weight <= self.max_weight_inclusive
    }
}

/// Build contiguous bands from `(max_weight, max_accel)` pairs as they appear
/// in a problem file.  The first band starts at weight 0.
///
/// No validation happens here; pass the result through [`validate_ranges`].
pub fn ranges_from_limits(limits: &[(u64, u64)]) -> Vec<AccelerationRange> {
    let mut last_max = 0;
    limits
        .iter()
        .map(|&(max_weight, max_accel)| {
            let range = AccelerationRange::new(last_max, max_weight, max_accel);
            last_max = max_weight;
            range
        })
        .collect()
}

/// Check that `ranges` is non-empty, starts at 0, is contiguous, and that
/// every band is non-degenerate.
///
/// Returns a human-readable description of the first violation.
pub fn validate_ranges(ranges: &[AccelerationRange]) -> Result<(), String> {
    let Some(first) = ranges.first() else {
        return Err("at least one band is required".into());
    };
    if first.min_weight_exclusive != 0 {
        return Err(format!(
            "first band must start at weight 0, starts at {}",
            first.min_weight_exclusive
        ));
    }
    for (i, band) in ranges.iter().enumerate() {
        if band.max_weight_inclusive <= band.min_weight_exclusive {
            return Err(format!(
                "band {i} is empty: ({}, {}]",
                band.min_weight_exclusive, band.max_weight_inclusive
            ));
        }
        if let Some(next) = ranges.get(i + 1) {
            if next.min_weight_exclusive != band.max_weight_inclusive {
                return Err(format!(
                    "band {} starts at {} but band {i} ends at {}",
                    i + 1,
                    next.min_weight_exclusive,
                    band.max_weight_inclusive
                ));
            }
        }
    }
    Ok(())
}
