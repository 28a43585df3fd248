//! Clause refinement states
//!
//! A [`ClauseRefinementState`] is one node of the refinement search: a
//! clause head, the body accepted so far, the terms that body anchors and
//! every substitution map through which the body was reached. States are
//! immutable once a round has returned them; successors are new values.

use super::driver::{self, RefinementRound, RoundMode};
use super::filter::{AdmissionFilter, SafeRule};
use super::fixed_terms::FixedTerms;
use super::key::EquivalenceKey;
use crate::logic::{HornClause, Literal, SubstitutionMap};
use indexmap::IndexSet;

#[derive(Debug, Clone)]
pub struct ClauseRefinementState {
    pub(super) head: Literal,
    pub(super) body: IndexSet<Literal>,
    pub(super) fixed_terms: FixedTerms,
    pub(super) substitution_maps: Vec<SubstitutionMap>,
    pub(super) last_literal: Option<Literal>,
    pub(super) resume_index: usize,
    pub(super) key: Option<EquivalenceKey>,
}

impl ClauseRefinementState {
    /// A root state: empty body, one identity map, resume at index 0.
    pub fn new(head: Literal) -> Self {
        ClauseRefinementState {
            fixed_terms: FixedTerms::from_head(&head),
            head,
            body: IndexSet::new(),
            substitution_maps: vec![SubstitutionMap::identity()],
            last_literal: None,
            resume_index: 0,
            key: None,
        }
    }

    /// Seed a state from an existing rule so that it can be extended in
    /// place.
    ///
    /// Every head and body term is fixed. Body literals are taken as given,
    /// negated ones included; duplicates collapse.
    pub fn from_horn_clause(clause: &HornClause) -> Self {
        let mut fixed_terms = FixedTerms::from_head(&clause.head);
        for lit in &clause.body {
            fixed_terms.extend_with(lit);
        }
        ClauseRefinementState {
            head: clause.head.clone(),
            body: clause.body.iter().cloned().collect(),
            fixed_terms,
            substitution_maps: vec![SubstitutionMap::identity()],
            last_literal: clause.body.last().cloned(),
            resume_index: 0,
            key: None,
        }
    }

    pub fn head(&self) -> &Literal {
        &self.head
    }

    /// Body literals in the order they were added
    pub fn body(&self) -> &IndexSet<Literal> {
        &self.body
    }

    pub fn fixed_terms(&self) -> &FixedTerms {
        &self.fixed_terms
    }

    /// Every substitution map that leads to this body; never empty
    pub fn substitution_maps(&self) -> &[SubstitutionMap] {
        &self.substitution_maps
    }

    /// The literal added by the round that created this state
    pub fn last_literal(&self) -> Option<&Literal> {
        self.last_literal.as_ref()
    }

    /// Pool index at which the next round starts
    pub fn resume_index(&self) -> usize {
        self.resume_index
    }

    /// The key this state was registered under, `None` for seeded states
    pub fn equivalence_key(&self) -> Option<&EquivalenceKey> {
        self.key.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.last_literal.is_none()
    }

    /// Extend the body by one literal from `pool[start_at..]`.
    pub fn generate_successors<F>(
        &self,
        pool: &[Literal],
        filter: &F,
        start_at: usize,
    ) -> RefinementRound
    where
        F: AdmissionFilter + ?Sized,
    {
        driver::refine(self, pool, filter, start_at)
    }

    /// Continue from where the round that created this state stopped.
    pub fn successors<F>(&self, pool: &[Literal], filter: &F) -> RefinementRound
    where
        F: AdmissionFilter + ?Sized,
    {
        self.generate_successors(pool, filter, self.resume_index)
    }

    /// Append one literal from the whole pool, keeping the rule safe.
    ///
    /// Negated candidates are admitted when a positive body literal binds
    /// their variables. Successors resume at the start of the pool.
    pub fn append_successors(&self, pool: &[Literal]) -> RefinementRound {
        driver::refine_with_mode(self, pool, &SafeRule, 0, RoundMode::Append)
    }

    /// Materialize the clause `head :- body`.
    pub fn to_horn_clause(&self) -> HornClause {
        HornClause::new(self.head.clone(), self.body.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{parse_horn_clause, parse_literal, parse_literals, Interner, Term};

    #[test]
    fn test_root_state() {
        let mut interner = Interner::new();
        let head = parse_literal("p(X, a)", &mut interner).unwrap();
        let state = ClauseRefinementState::new(head.clone());

        assert!(state.is_root());
        assert!(state.body().is_empty());
        assert_eq!(state.resume_index(), 0);
        assert_eq!(state.substitution_maps(), &[SubstitutionMap::identity()]);
        assert!(state.equivalence_key().is_none());
        for term in head.terms() {
            assert!(state.fixed_terms().contains(term));
        }
        assert_eq!(state.to_horn_clause().display(&interner).to_string(), "p(X,a).");
    }

    #[test]
    fn test_from_horn_clause_fixes_body_terms() {
        let mut interner = Interner::new();
        let clause = parse_horn_clause("p(X) :- q(X, Y), r(Y, Z).", &mut interner).unwrap();
        let state = ClauseRefinementState::from_horn_clause(&clause);

        let z = Term::variable(&mut interner, "Z");
        assert!(state.fixed_terms().contains(&z));
        assert_eq!(state.fixed_terms().len(), 3);
        assert_eq!(state.body().len(), 2);
        assert_eq!(state.last_literal(), clause.body.last());
        assert_eq!(state.to_horn_clause(), clause);
    }

    #[test]
    fn test_append_admits_supported_negations() {
        let mut interner = Interner::new();
        let clause = parse_horn_clause("p(X) :- q(X, Y).", &mut interner).unwrap();
        let pool = parse_literals("~r(Y). ~t(X, W). s(Y).", &mut interner).unwrap();

        let state = ClauseRefinementState::from_horn_clause(&clause);
        let round = state.append_successors(&pool);

        let appended: Vec<String> = round
            .successors
            .iter()
            .map(|s| s.to_horn_clause().display(&interner).to_string())
            .collect();
        assert_eq!(appended, vec!["p(X) :- q(X,Y), ~r(Y).", "p(X) :- q(X,Y), s(Y)."]);
        assert_eq!(round.stats.negated_skipped, 0);
        assert_eq!(round.stats.filtered, 1);
    }

    #[test]
    fn test_appended_states_resume_at_pool_start() {
        let mut interner = Interner::new();
        let clause = parse_horn_clause("p(X) :- q(X, Y).", &mut interner).unwrap();
        let pool = parse_literals("r(Y). s(X).", &mut interner).unwrap();

        let state = ClauseRefinementState::from_horn_clause(&clause);
        let round = state.append_successors(&pool);
        assert_eq!(round.len(), 2);
        assert!(round.successors.iter().all(|s| s.resume_index() == 0));

        // The later entry can still draw the earlier one
        let last = &round.successors[1];
        let again = last.append_successors(&pool);
        assert_eq!(
            again.successors[0].to_horn_clause().display(&interner).to_string(),
            "p(X) :- q(X,Y), s(X), r(Y)."
        );
    }
}
