//! Structured profiling for refinement rounds
//!
//! Every round counts what happened to its candidates in a [`RoundStats`].
//! A multi-round search can additionally aggregate them into a
//! [`RefinementProfile`] when `RefinementConfig::enable_profiling` is set.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::ops::AddAssign;
use std::time::Duration;

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

/// Candidate accounting for one refinement round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundStats {
    /// Pool entries visited (from `start_at` to the end)
    pub candidates_examined: usize,
    pub negated_skipped: usize,
    /// Candidates rejected for an arity mismatch
    pub malformed: usize,
    pub groundings: usize,
    /// Groundings rejected by the admission filter
    pub filtered: usize,
    pub already_in_body: usize,
    /// Successors created
    pub emitted: usize,
    /// Groundings folded into an existing successor as an extra map
    pub merged: usize,
    /// Equivalent groundings whose correspondence could not be solved
    pub merges_dropped: usize,
}

impl AddAssign for RoundStats {
    fn add_assign(&mut self, other: RoundStats) {
        self.candidates_examined += other.candidates_examined;
        self.negated_skipped += other.negated_skipped;
        self.malformed += other.malformed;
        self.groundings += other.groundings;
        self.filtered += other.filtered;
        self.already_in_body += other.already_in_body;
        self.emitted += other.emitted;
        self.merged += other.merged;
        self.merges_dropped += other.merges_dropped;
    }
}

/// Profiling data collected during a refinement search.
///
/// All `Duration` fields are serialized as `f64` seconds.
#[derive(Debug, Clone, Default)]
pub struct RefinementProfile {
    pub total_time: Duration,
    pub round_time: Duration,

    /// Expanded states, one round each
    pub rounds: usize,
    pub max_frontier_size: usize,
    pub stopped_by_state_limit: bool,

    pub totals: RoundStats,
}

impl RefinementProfile {
    /// Record one finished round.
    pub fn record_round(&mut self, stats: &RoundStats, time: Duration) {
        self.rounds += 1;
        self.round_time += time;
        self.totals += *stats;
    }

    pub fn observe_frontier(&mut self, size: usize) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }
}

impl Serialize for RefinementProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RefinementProfile", 6)?;
        s.serialize_field("total_time", &secs(&self.total_time))?;
        s.serialize_field("round_time", &secs(&self.round_time))?;
        s.serialize_field("rounds", &self.rounds)?;
        s.serialize_field("max_frontier_size", &self.max_frontier_size)?;
        s.serialize_field("stopped_by_state_limit", &self.stopped_by_state_limit)?;
        s.serialize_field("totals", &self.totals)?;
        s.end()
    }
}
