//! Plain data row types written by output backends.

/// The sleigh after one applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryRow {
    /// Position of the command in the episode's command log.
    pub step:      u64,
    /// Clock after the command.
    pub time:      u64,
    /// The command as it appears in the log, e.g. `AccUp 2`.
    pub command:   String,
    pub c:         i64,
    pub r:         i64,
    pub vc:        i64,
    pub vr:        i64,
    pub weight:    u64,
    pub carrots:   u64,
    /// Gifts currently on board.
    pub loaded:    u64,
    /// Gifts delivered so far.
    pub delivered: u64,
    /// Σ score of delivered gifts.
    pub score:     u64,
}

/// End-of-episode totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub policy:       String,
    pub termination:  String,
    pub steps:        u64,
    pub applied:      u64,
    pub rejected:     u64,
    pub final_time:   u64,
    pub score:        u64,
    pub delivered:    u64,
    pub total_gifts:  u64,
    pub carrots_left: u64,
}
