//! First-order logic representation for learned theories
//!
//! This module provides the value types the refinement engine works on:
//! interned terms, literals, Horn clauses and substitution maps, plus a
//! small text syntax for writing them down.

pub mod core;
pub mod interner;
pub mod parser;
pub mod substitution;

// Re-export commonly used types
pub use self::core::clause::{HornClause, HornClauseDisplay};
pub use self::core::literal::{Literal, LiteralDisplay, PredicateSymbol};
pub use self::core::term::{Constant, Term, TermDisplay, Variable};
pub use interner::{ConstantId, Interner, PredicateId, VariableId};
pub use parser::{parse_horn_clause, parse_literal, parse_literals};
pub use substitution::{SubstitutionDisplay, SubstitutionMap};
