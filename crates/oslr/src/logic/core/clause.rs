//! Horn clauses handed to evaluation and inference

use super::literal::Literal;
use super::term::Term;
use crate::logic::interner::Interner;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Horn clause `head :- b1, ..., bn`.
///
/// An empty body denotes a fact-like rule (`head.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HornClause {
    pub head: Literal,
    pub body: Vec<Literal>,
}

impl HornClause {
    pub fn new(head: Literal, body: Vec<Literal>) -> Self {
        HornClause { head, body }
    }

    /// Distinct terms of the clause in first-occurrence order (head first)
    pub fn terms(&self) -> IndexSet<Term> {
        std::iter::once(&self.head)
            .chain(&self.body)
            .flat_map(|lit| lit.args.iter().copied())
            .collect()
    }

    /// Format this clause with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> HornClauseDisplay<'a> {
        HornClauseDisplay {
            clause: self,
            interner,
        }
    }
}

/// Display wrapper for HornClause that includes an interner for name resolution
pub struct HornClauseDisplay<'a> {
    clause: &'a HornClause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for HornClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clause.head.display(self.interner))?;
        if !self.clause.body.is_empty() {
            write!(f, " :- ")?;
            for (i, lit) in self.clause.body.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", lit.display(self.interner))?;
            }
        }
        write!(f, ".")
    }
}

impl fmt::Display for HornClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.body.is_empty() {
            write!(f, " :- ")?;
            for (i, lit) in self.body.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", lit)?;
            }
        }
        write!(f, ".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::PredicateSymbol;

    #[test]
    fn test_display_rule_and_fact() {
        let mut interner = Interner::new();
        let p = PredicateSymbol::new(interner.intern_predicate("p"), 1);
        let q = PredicateSymbol::new(interner.intern_predicate("q"), 2);
        let x = Term::variable(&mut interner, "X");
        let y = Term::variable(&mut interner, "Y");

        let fact = HornClause::new(Literal::positive(p, vec![x]), vec![]);
        assert_eq!(fact.display(&interner).to_string(), "p(X).");

        let rule = HornClause::new(
            Literal::positive(p, vec![x]),
            vec![Literal::positive(q, vec![x, y]), Literal::positive(p, vec![y])],
        );
        assert_eq!(rule.display(&interner).to_string(), "p(X) :- q(X,Y), p(Y).");
    }

    #[test]
    fn test_terms_in_first_occurrence_order() {
        let mut interner = Interner::new();
        let q = PredicateSymbol::new(interner.intern_predicate("q"), 2);
        let x = Term::variable(&mut interner, "X");
        let y = Term::variable(&mut interner, "Y");
        let a = Term::constant(&mut interner, "a");

        let rule = HornClause::new(
            Literal::positive(q, vec![x, a]),
            vec![Literal::positive(q, vec![y, x])],
        );
        let terms: Vec<_> = rule.terms().into_iter().collect();
        assert_eq!(terms, vec![x, a, y]);
    }
}
