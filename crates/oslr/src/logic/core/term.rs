//! Terms of function-free first-order logic

use crate::logic::interner::{ConstantId, Interner, VariableId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable in a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
}

impl Variable {
    /// Create a new variable from an ID
    pub fn new(id: VariableId) -> Self {
        Variable { id }
    }

    /// Get the name of this variable from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_variable(self.id)
    }
}

/// A constant symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstantId,
}

impl Constant {
    /// Create a new constant from an ID
    pub fn new(id: ConstantId) -> Self {
        Constant { id }
    }

    /// Get the name of this constant from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_constant(self.id)
    }
}

/// A term: either a variable or a constant.
///
/// Learned theories are function-free, so terms are always leaves and
/// can be copied freely between clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
}

impl Term {
    /// Intern `name` as a variable and wrap it in a term
    pub fn variable(interner: &mut Interner, name: &str) -> Self {
        Term::Variable(Variable::new(interner.intern_variable(name)))
    }

    /// Intern `name` as a constant and wrap it in a term
    pub fn constant(interner: &mut Interner, name: &str) -> Self {
        Term::Constant(Constant::new(interner.intern_constant(name)))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<Variable> {
        match self {
            Term::Variable(v) => Some(*v),
            Term::Constant(_) => None,
        }
    }

    /// Format this term with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

/// Display wrapper for Term that includes an interner for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => write!(f, "{}", self.interner.resolve_variable(v.id)),
            Term::Constant(c) => write!(f, "{}", self.interner.resolve_constant(c.id)),
        }
    }
}

// Display implementations that show IDs (for debugging without interner)

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
        }
    }
}
