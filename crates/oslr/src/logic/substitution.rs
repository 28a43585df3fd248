//! Variable substitutions over function-free terms
//!
//! A [`SubstitutionMap`] records one way of aligning the variables of a
//! candidate literal with terms already anchored in a clause. Bindings keep
//! their insertion order so that every traversal of a map, and therefore
//! every refinement round that consults it, is deterministic.

use crate::logic::core::clause::HornClause;
use crate::logic::core::literal::Literal;
use crate::logic::core::term::{Term, Variable};
use crate::logic::interner::Interner;
use indexmap::IndexMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Variables outside the domain are left unchanged, so the empty map is
/// the identity substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    bindings: IndexMap<Variable, Term>,
}

impl SubstitutionMap {
    /// The identity substitution
    pub fn identity() -> Self {
        SubstitutionMap::default()
    }

    /// Bind `var` to `term`, returning the previous image if any
    pub fn insert(&mut self, var: Variable, term: Term) -> Option<Term> {
        self.bindings.insert(var, term)
    }

    /// Get the image of a variable, if bound
    pub fn get(&self, var: Variable) -> Option<Term> {
        self.bindings.get(&var).copied()
    }

    pub fn contains(&self, var: Variable) -> bool {
        self.bindings.contains_key(&var)
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Term)> + '_ {
        self.bindings.iter().map(|(v, t)| (*v, *t))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply this substitution to a single term
    pub fn apply_to_term(&self, term: Term) -> Term {
        match term {
            Term::Variable(v) => self.bindings.get(&v).copied().unwrap_or(term),
            Term::Constant(_) => term,
        }
    }

    /// Apply this substitution to every argument of `literal`
    pub fn apply(&self, literal: &Literal) -> Literal {
        Literal {
            predicate: literal.predicate,
            args: literal.args.iter().map(|t| self.apply_to_term(*t)).collect(),
            polarity: literal.polarity,
        }
    }

    /// Right-biased merge: bindings of `delta` override those of `self`.
    ///
    /// Bindings only present in `self` keep their position; new bindings
    /// from `delta` are appended in `delta`'s order.
    pub fn compose(&self, delta: &SubstitutionMap) -> SubstitutionMap {
        let mut result = self.clone();
        result.merge(delta);
        result
    }

    /// In-place form of [`compose`](Self::compose)
    pub fn merge(&mut self, delta: &SubstitutionMap) {
        for (var, term) in delta.iter() {
            self.bindings.insert(var, term);
        }
    }

    /// Format this substitution with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> SubstitutionDisplay<'a> {
        SubstitutionDisplay {
            substitution: self,
            interner,
        }
    }
}

impl FromIterator<(Variable, Term)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        SubstitutionMap {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &SubstitutionMap) -> Literal {
        subst.apply(self)
    }
}

impl HornClause {
    /// Apply a substitution to the head and every body literal
    pub fn apply_substitution(&self, subst: &SubstitutionMap) -> HornClause {
        HornClause {
            head: subst.apply(&self.head),
            body: self.body.iter().map(|lit| subst.apply(lit)).collect(),
        }
    }
}

/// Display wrapper for SubstitutionMap that includes an interner for name resolution
pub struct SubstitutionDisplay<'a> {
    substitution: &'a SubstitutionMap,
    interner: &'a Interner,
}

impl<'a> fmt::Display for SubstitutionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.substitution.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{} -> {}",
                var.name(self.interner),
                term.display(self.interner)
            )?;
        }
        write!(f, "}}")
    }
}
