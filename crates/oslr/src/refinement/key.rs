//! Equivalence keys for refinement candidates
//!
//! Extending a clause body with `q(X,Y)` or with `q(X,Z)` produces the same
//! clause when neither `Y` nor `Z` is anchored yet. The refinement search
//! must treat both extensions as one node, or the number of states grows
//! with the number of fresh variable names available.
//!
//! An [`EquivalenceKey`] is the structural signature of a `(body, candidate)`
//! pair in which every free variable has been replaced by a placeholder
//! numbered in order of first occurrence. Anchored terms (the fixed terms of
//! the clause and all constants) keep their identity. Two pairs share a key
//! exactly when a bijective renaming of free variables maps one onto the
//! other.
//!
//! When two candidates collapse onto one key, [`correspondence`] recovers
//! the renaming that maps the discarded candidate onto the survivor.

use super::fixed_terms::FixedTerms;
use crate::logic::{Literal, PredicateSymbol, SubstitutionMap, Term, Variable};
use std::collections::HashMap;

/// A term inside a key: either itself or a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TermKey {
    Anchored(Term),
    Free(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LiteralKey {
    polarity: bool,
    predicate: PredicateSymbol,
    args: Vec<TermKey>,
}

/// Canonical signature of a clause body extended by one candidate literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquivalenceKey {
    body: Vec<LiteralKey>,
    candidate: LiteralKey,
}

/// Assigns placeholders to free variables in first-occurrence order
struct Canonicalizer<'a> {
    fixed: &'a FixedTerms,
    placeholders: HashMap<Variable, u32>,
}

impl<'a> Canonicalizer<'a> {
    fn new(fixed: &'a FixedTerms) -> Self {
        Canonicalizer {
            fixed,
            placeholders: HashMap::new(),
        }
    }

    fn term(&mut self, term: &Term) -> TermKey {
        match term {
            Term::Variable(v) if !self.fixed.contains(term) => {
                let next = self.placeholders.len() as u32;
                TermKey::Free(*self.placeholders.entry(*v).or_insert(next))
            }
            _ => TermKey::Anchored(*term),
        }
    }

    fn literal(&mut self, literal: &Literal) -> LiteralKey {
        LiteralKey {
            polarity: literal.polarity,
            predicate: literal.predicate,
            args: literal.args.iter().map(|t| self.term(t)).collect(),
        }
    }
}

impl EquivalenceKey {
    /// Build the key of `body` (in its stored order) extended by `candidate`.
    pub fn build<'b>(
        body: impl IntoIterator<Item = &'b Literal>,
        candidate: &Literal,
        fixed: &FixedTerms,
    ) -> Self {
        let mut canon = Canonicalizer::new(fixed);
        let body = body.into_iter().map(|lit| canon.literal(lit)).collect();
        let candidate = canon.literal(candidate);
        EquivalenceKey { body, candidate }
    }

    /// Number of distinct free variables the key abstracts over
    pub fn free_variable_count(&self) -> usize {
        let mut highest = None;
        for arg in self.body.iter().chain(std::iter::once(&self.candidate)).flat_map(|l| &l.args) {
            if let TermKey::Free(n) = arg {
                highest = highest.max(Some(*n));
            }
        }
        highest.map_or(0, |n| n as usize + 1)
    }
}

/// Solve the renaming that maps `discarded` onto `survivor`.
///
/// Both literals are extensions of the same body under the same fixed
/// terms. Anchored terms must coincide position by position; free variables
/// of `discarded` must map bijectively onto free variables of `survivor`.
/// Identity bindings are left out of the result.
///
/// Returns `None` when no such renaming exists.
pub fn correspondence(
    discarded: &Literal,
    survivor: &Literal,
    fixed: &FixedTerms,
) -> Option<SubstitutionMap> {
    if discarded.predicate != survivor.predicate
        || discarded.polarity != survivor.polarity
        || discarded.args.len() != survivor.args.len()
    {
        return None;
    }

    let mut forward: Vec<(Variable, Term)> = Vec::new();
    let mut backward: HashMap<Term, Variable> = HashMap::new();

    for (d, s) in discarded.args.iter().zip(&survivor.args) {
        let d_free = !fixed.is_anchored(d);
        let s_free = !fixed.is_anchored(s);

        match (d.as_variable(), d_free, s_free) {
            (Some(dv), true, true) => {
                if let Some((_, image)) = forward.iter().find(|(v, _)| *v == dv) {
                    if image != s {
                        return None;
                    }
                    continue;
                }
                if backward.get(s).is_some_and(|&pre| pre != dv) {
                    return None;
                }
                forward.push((dv, *s));
                backward.insert(*s, dv);
            }
            (_, false, false) if d == s => {}
            _ => return None,
        }
    }

    Some(
        forward
            .into_iter()
            .filter(|(v, t)| Term::Variable(*v) != *t)
            .collect(),
    )
}
