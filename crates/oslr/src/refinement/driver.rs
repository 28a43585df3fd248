//! Refinement rounds and the breadth-first refinement search
//!
//! A round extends one clause by one literal drawn from a candidate pool.
//! For each candidate, starting at `start_at`:
//!
//! 1. Candidates whose argument count disagrees with their predicate are
//!    skipped and reported as errors. In [`RoundMode::Generate`] negated
//!    candidates are skipped too.
//! 2. The candidate is grounded. If it already shares a term with the fixed
//!    terms, the first substitution map grounds it. Otherwise each map with a
//!    binding from a variable the candidate mentions to a fixed term yields
//!    one grounding.
//! 3. Groundings rejected by the admission filter, or already in the body,
//!    are dropped.
//! 4. The equivalence key of the extended body decides: an unseen key opens
//!    a new successor, a seen key adds a substitution map to the successor
//!    that owns it.
//!
//! Successors resume after the pool entry that produced them, except in
//! [`RoundMode::Append`], where they resume at the start of the pool.
//!
//! Successors are accumulated in a round-local [`RoundBuilder`] and frozen
//! into immutable states once the whole pool has been visited.

use super::filter::AdmissionFilter;
use super::fixed_terms::FixedTerms;
use super::key::{correspondence, EquivalenceKey};
use super::profile::{RefinementProfile, RoundStats};
use super::state::ClauseRefinementState;
use crate::config::RefinementConfig;
use crate::error::{MalformedLiteralError, Result};
use crate::logic::{Literal, SubstitutionMap, Term};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// The outcome of one refinement round
#[derive(Debug, Clone, Default)]
pub struct RefinementRound {
    /// New states in emission order: ascending pool index, then grounding
    /// order
    pub successors: Vec<ClauseRefinementState>,
    /// Malformed candidates met during the round
    pub errors: Vec<MalformedLiteralError>,
    pub stats: RoundStats,
}

impl RefinementRound {
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.successors.len()
    }
}

/// How a round treats the candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundMode {
    /// Grow a clause under construction. Negated candidates are skipped.
    #[default]
    Generate,
    /// Extend an existing rule. Negated candidates are left to the filter
    /// and successors may draw from the whole pool again.
    Append,
}

/// A successor that may still receive substitution maps
struct PendingSuccessor {
    grounded: Literal,
    fixed_terms: FixedTerms,
    maps: Vec<SubstitutionMap>,
    resume_index: usize,
    key: EquivalenceKey,
}

/// Round-local registry of equivalence keys and the successors they own
struct RoundBuilder<'a> {
    parent: &'a ClauseRefinementState,
    mode: RoundMode,
    registry: HashMap<EquivalenceKey, usize>,
    pending: Vec<PendingSuccessor>,
    errors: Vec<MalformedLiteralError>,
    stats: RoundStats,
}

impl<'a> RoundBuilder<'a> {
    fn new(parent: &'a ClauseRefinementState, mode: RoundMode) -> Self {
        RoundBuilder {
            parent,
            mode,
            registry: HashMap::new(),
            pending: Vec::new(),
            errors: Vec::new(),
            stats: RoundStats::default(),
        }
    }

    fn reject_malformed(&mut self, err: MalformedLiteralError) {
        warn!(error = %err, "skipping malformed candidate");
        self.stats.malformed += 1;
        self.errors.push(err);
    }

    /// Register `grounded`, reached from pool entry `index` through `map`.
    fn offer(&mut self, index: usize, grounded: Literal, map: &SubstitutionMap) {
        let parent = self.parent;
        let key = EquivalenceKey::build(&parent.body, &grounded, &parent.fixed_terms);

        match self.registry.get(&key).copied() {
            Some(slot) => {
                let survivor = &mut self.pending[slot];
                match correspondence(&grounded, &survivor.grounded, &parent.fixed_terms) {
                    Some(alignment) => {
                        trace!(
                            literal = %grounded,
                            survivor = %survivor.grounded,
                            "merged equivalent candidate"
                        );
                        survivor.maps.push(map.compose(&alignment));
                        self.stats.merged += 1;
                    }
                    None => {
                        debug!(
                            literal = %grounded,
                            survivor = %survivor.grounded,
                            "no correspondence, dropping candidate"
                        );
                        self.stats.merges_dropped += 1;
                    }
                }
            }
            None => {
                trace!(index, literal = %grounded, "new successor");
                let mut fixed_terms = parent.fixed_terms.with_literal(&grounded);
                fixed_terms.extend_with(&parent.head);

                let resume_index = match self.mode {
                    RoundMode::Generate => index + 1,
                    RoundMode::Append => 0,
                };

                self.registry.insert(key.clone(), self.pending.len());
                self.pending.push(PendingSuccessor {
                    grounded,
                    fixed_terms,
                    maps: vec![map.clone()],
                    resume_index,
                    key,
                });
                self.stats.emitted += 1;
            }
        }
    }

    fn freeze(self) -> RefinementRound {
        let parent = self.parent;
        let successors = self
            .pending
            .into_iter()
            .map(|pending| {
                let mut body = parent.body.clone();
                body.insert(pending.grounded.clone());
                ClauseRefinementState {
                    head: parent.head.clone(),
                    body,
                    fixed_terms: pending.fixed_terms,
                    substitution_maps: pending.maps,
                    last_literal: Some(pending.grounded),
                    resume_index: pending.resume_index,
                    key: Some(pending.key),
                }
            })
            .collect();

        RefinementRound {
            successors,
            errors: self.errors,
            stats: self.stats,
        }
    }
}

/// The groundings of `candidate` under the maps of `state`, each paired
/// with the map that produced it.
fn groundings<'s>(
    state: &'s ClauseRefinementState,
    candidate: &Literal,
) -> Vec<(Literal, &'s SubstitutionMap)> {
    let maps = &state.substitution_maps;
    if state.fixed_terms.intersects(candidate) {
        return maps.first().map(|map| (map.apply(candidate), map)).into_iter().collect();
    }

    maps.iter()
        .filter(|map| {
            map.iter().any(|(var, image)| {
                candidate.mentions(&Term::Variable(var)) && state.fixed_terms.contains(&image)
            })
        })
        .map(|map| (map.apply(candidate), map))
        .collect()
}

/// Run one generation round over `pool[start_at..]`.
pub fn refine<F>(
    state: &ClauseRefinementState,
    pool: &[Literal],
    filter: &F,
    start_at: usize,
) -> RefinementRound
where
    F: AdmissionFilter + ?Sized,
{
    refine_with_mode(state, pool, filter, start_at, RoundMode::Generate)
}

/// Run one refinement round over `pool[start_at..]` in the given mode.
pub fn refine_with_mode<F>(
    state: &ClauseRefinementState,
    pool: &[Literal],
    filter: &F,
    start_at: usize,
    mode: RoundMode,
) -> RefinementRound
where
    F: AdmissionFilter + ?Sized,
{
    let mut builder = RoundBuilder::new(state, mode);

    for (index, candidate) in pool.iter().enumerate().skip(start_at) {
        builder.stats.candidates_examined += 1;

        if mode == RoundMode::Generate && candidate.is_negated() {
            builder.stats.negated_skipped += 1;
            continue;
        }
        if let Err(err) = candidate.check_arity(index) {
            builder.reject_malformed(err);
            continue;
        }

        for (grounded, map) in groundings(state, candidate) {
            builder.stats.groundings += 1;

            if !filter.admit(&state.head, &state.body, &grounded) {
                trace!(index, literal = %grounded, "rejected by filter");
                builder.stats.filtered += 1;
                continue;
            }
            if state.body.contains(&grounded) {
                builder.stats.already_in_body += 1;
                continue;
            }
            builder.offer(index, grounded, map);
        }
    }

    let round = builder.freeze();
    debug!(
        ?mode,
        start_at,
        body_len = state.body.len(),
        examined = round.stats.candidates_examined,
        emitted = round.stats.emitted,
        merged = round.stats.merged,
        "refinement round finished"
    );
    round
}

/// Every state produced by a [`RefinementDriver::search`]
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Generated states in generation order (the root is not included)
    pub states: Vec<ClauseRefinementState>,
    /// Malformed candidates, each reported once
    pub errors: Vec<MalformedLiteralError>,
    /// Present when profiling is enabled
    pub profile: Option<RefinementProfile>,
}

/// Breadth-first refinement from a single head
#[derive(Debug, Clone)]
pub struct RefinementDriver {
    config: RefinementConfig,
}

impl RefinementDriver {
    pub fn new(config: RefinementConfig) -> Result<Self> {
        config.validate()?;
        Ok(RefinementDriver { config })
    }

    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Expand `head` breadth first until no state can grow further, every
    /// body has `max_body_length` literals, or `max_states` states exist.
    pub fn search<F>(&self, head: Literal, pool: &[Literal], filter: &F) -> SearchResult
    where
        F: AdmissionFilter + ?Sized,
    {
        let start = Instant::now();
        let mut profile = self.config.enable_profiling.then(RefinementProfile::default);
        let mut result = SearchResult::default();

        let root = ClauseRefinementState::new(head);
        let mut round = self.expand(&root, pool, filter, profile.as_mut());
        let mut cursor = 0;

        loop {
            for err in round.errors {
                if !result.errors.iter().any(|seen| seen.index == err.index) {
                    result.errors.push(err);
                }
            }
            for successor in round.successors {
                result.states.push(successor);
                if self.config.state_limit_reached(result.states.len()) {
                    debug!(states = result.states.len(), "state limit reached");
                    if let Some(p) = profile.as_mut() {
                        p.stopped_by_state_limit = true;
                    }
                    return self.finish(result, profile, start);
                }
            }
            if let Some(p) = profile.as_mut() {
                p.observe_frontier(result.states.len() - cursor);
            }

            let next = result.states[cursor..]
                .iter()
                .position(|state| state.body.len() < self.config.max_body_length);
            let Some(offset) = next else { break };
            cursor += offset;

            round = self.expand(&result.states[cursor], pool, filter, profile.as_mut());
            cursor += 1;
        }

        self.finish(result, profile, start)
    }

    fn expand<F>(
        &self,
        state: &ClauseRefinementState,
        pool: &[Literal],
        filter: &F,
        profile: Option<&mut RefinementProfile>,
    ) -> RefinementRound
    where
        F: AdmissionFilter + ?Sized,
    {
        let round_start = Instant::now();
        let round = state.successors(pool, filter);
        if let Some(p) = profile {
            p.record_round(&round.stats, round_start.elapsed());
        }
        round
    }

    fn finish(
        &self,
        mut result: SearchResult,
        mut profile: Option<RefinementProfile>,
        start: Instant,
    ) -> SearchResult {
        if let Some(p) = profile.as_mut() {
            p.total_time = start.elapsed();
        }
        result.profile = profile;
        result
    }
}
