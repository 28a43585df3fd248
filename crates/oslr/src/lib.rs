//! OSLR: clause refinement for online structure learning
//!
//! This library provides the search engine at the core of theory revision:
//! given a clause head and a pool of candidate literals, it enumerates the
//! ways to extend the clause body by one literal, binding free variables to
//! terms the clause already anchors and collapsing extensions that are equal
//! up to renaming.

pub mod config;
pub mod error;
pub mod logic;
pub mod refinement;
pub mod revision;

pub use config::RefinementConfig;
pub use error::{MalformedLiteralError, OslrError, Result};

// Re-export commonly used types from logic
pub use logic::{
    parse_horn_clause, parse_literal, parse_literals, Constant, HornClause, Interner, Literal,
    PredicateSymbol, SubstitutionMap, Term, Variable,
};

// Re-export refinement types
pub use refinement::{
    refine, refine_with_mode, AdmissionFilter, AdmitAll, AnchoredVariables, ClauseRefinementState,
    EquivalenceKey, FixedTerms, RefinementDriver, RefinementProfile, RefinementRound, RoundMode,
    RoundStats, SafeRule, SearchResult,
};

pub use revision::{
    BestRevisionOperatorSelector, MetricDirection, OperatorEvaluation, OperatorEvaluator,
    RevisionOperatorSelector,
};
