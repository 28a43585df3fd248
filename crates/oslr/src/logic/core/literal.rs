//! Literals: predicates applied to terms

use super::term::{Term, Variable};
use crate::error::MalformedLiteralError;
use crate::logic::interner::{Interner, PredicateId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: u8,
}

impl PredicateSymbol {
    /// Create a new predicate symbol from an ID and arity
    pub fn new(id: PredicateId, arity: u8) -> Self {
        PredicateSymbol { id, arity }
    }

    /// Get the name of this predicate symbol from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_predicate(self.id)
    }
}

/// A literal (positive or negated atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negated
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: true,
        }
    }

    /// Create a new negated literal
    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: false,
        }
    }

    pub fn is_negated(&self) -> bool {
        !self.polarity
    }

    /// The argument terms, in order and with repetitions
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.args.iter()
    }

    /// Variables among the arguments, in order and with repetitions
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.args.iter().filter_map(Term::as_variable)
    }

    /// Check whether `term` occurs as an argument
    pub fn mentions(&self, term: &Term) -> bool {
        self.args.contains(term)
    }

    /// Check that the number of arguments agrees with the predicate arity.
    ///
    /// `index` is the position of the literal in the candidate pool and is
    /// only used to label the error.
    pub fn check_arity(&self, index: usize) -> Result<(), MalformedLiteralError> {
        if self.args.len() == self.predicate.arity as usize {
            Ok(())
        } else {
            Err(MalformedLiteralError {
                index,
                predicate: self.predicate.id,
                expected: self.predicate.arity,
                found: self.args.len(),
            })
        }
    }

    /// Format this literal with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

/// Display wrapper for Literal that includes an interner for name resolution
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.is_negated() {
            write!(f, "~")?;
        }
        write!(f, "{}", self.interner.resolve_predicate(self.literal.predicate.id))?;
        if self.literal.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.literal.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg.display(self.interner))?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "~")?;
        }
        write!(f, "{}(", self.predicate.id)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Interner, PredicateSymbol, Term, Term) {
        let mut interner = Interner::new();
        let edge = PredicateSymbol::new(interner.intern_predicate("edge"), 2);
        let x = Term::variable(&mut interner, "X");
        let a = Term::constant(&mut interner, "a");
        (interner, edge, x, a)
    }

    #[test]
    fn test_polarity() {
        let (_, edge, x, a) = setup();
        let pos = Literal::positive(edge, vec![x, a]);
        let neg = Literal::negative(edge, vec![x, a]);

        assert!(!pos.is_negated());
        assert!(neg.is_negated());
        assert_ne!(pos, neg);
    }

    #[test]
    fn test_variables_skip_constants() {
        let (_, edge, x, a) = setup();
        let lit = Literal::positive(edge, vec![x, a]);

        let vars: Vec<_> = lit.variables().collect();
        assert_eq!(vars.len(), 1);
        assert_eq!(Term::Variable(vars[0]), x);
        assert!(lit.mentions(&a));
    }

    #[test]
    fn test_check_arity() {
        let (_, edge, x, _) = setup();
        let ok = Literal::positive(edge, vec![x, x]);
        let bad = Literal::positive(edge, vec![x]);

        assert!(ok.check_arity(0).is_ok());
        let err = bad.check_arity(7).unwrap_err();
        assert_eq!(err.index, 7);
        assert_eq!(err.expected, 2);
        assert_eq!(err.found, 1);
    }

    #[test]
    fn test_display() {
        let (mut interner, edge, x, a) = setup();
        let flag = PredicateSymbol::new(interner.intern_predicate("flag"), 0);

        assert_eq!(
            Literal::negative(edge, vec![x, a]).display(&interner).to_string(),
            "~edge(X,a)"
        );
        assert_eq!(Literal::positive(flag, vec![]).display(&interner).to_string(), "flag");
    }
}
