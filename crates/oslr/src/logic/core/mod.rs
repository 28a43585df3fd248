//! Core syntax: terms, literals and Horn clauses

pub mod clause;
pub mod literal;
pub mod term;
