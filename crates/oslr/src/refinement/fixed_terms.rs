//! The set of terms anchored by a clause head and body

use crate::logic::{Literal, Term};
use indexmap::IndexSet;

/// Terms anchored by the head and the accepted body of a clause.
///
/// Only grows: every refinement step adds the terms of the new literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTerms {
    terms: IndexSet<Term>,
}

impl FixedTerms {
    /// The terms of a clause head
    pub fn from_head(head: &Literal) -> Self {
        head.terms().copied().collect()
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.terms.contains(term)
    }

    /// Whether `term` keeps its identity under renaming: fixed terms do,
    /// and so does every constant.
    pub fn is_anchored(&self, term: &Term) -> bool {
        !term.is_variable() || self.terms.contains(term)
    }

    /// Whether `literal` shares at least one term with this set
    pub fn intersects(&self, literal: &Literal) -> bool {
        literal.terms().any(|t| self.terms.contains(t))
    }

    pub fn extend_with(&mut self, literal: &Literal) {
        self.terms.extend(literal.terms().copied());
    }

    /// A copy of this set extended with the terms of `literal`
    pub fn with_literal(&self, literal: &Literal) -> Self {
        let mut extended = self.clone();
        extended.extend_with(literal);
        extended
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> + '_ {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<Term> for FixedTerms {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        FixedTerms {
            terms: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{parse_literal, Interner};

    #[test]
    fn test_anchoring() {
        let mut interner = Interner::new();
        let head = parse_literal("p(X, a)", &mut interner).unwrap();
        let fixed = FixedTerms::from_head(&head);

        let x = Term::variable(&mut interner, "X");
        let y = Term::variable(&mut interner, "Y");
        let b = Term::constant(&mut interner, "b");

        assert_eq!(fixed.len(), 2);
        assert!(fixed.is_anchored(&x));
        assert!(!fixed.is_anchored(&y));
        // Constants are anchored without being members
        assert!(fixed.is_anchored(&b));
        assert!(!fixed.contains(&b));
    }

    #[test]
    fn test_intersects_and_extend() {
        let mut interner = Interner::new();
        let head = parse_literal("p(X)", &mut interner).unwrap();
        let linked = parse_literal("q(X, Y)", &mut interner).unwrap();
        let unlinked = parse_literal("r(Y)", &mut interner).unwrap();

        let fixed = FixedTerms::from_head(&head);
        assert!(fixed.intersects(&linked));
        assert!(!fixed.intersects(&unlinked));

        let grown = fixed.with_literal(&linked);
        assert!(grown.intersects(&unlinked));
        assert_eq!(fixed.len(), 1);
        assert_eq!(grown.len(), 2);
    }
}
