//! Clause refinement: growing a Horn clause body one literal at a time
//!
//! The search starts from a clause head and a pool of candidate literals.
//! Every round extends a body by one grounded candidate while collapsing
//! candidates that differ only by a renaming of free variables.

pub mod driver;
pub mod filter;
pub mod fixed_terms;
pub mod key;
pub mod profile;
pub mod state;

#[cfg(test)]
mod proptest_tests;

pub use driver::{
    refine, refine_with_mode, RefinementDriver, RefinementRound, RoundMode, SearchResult,
};
pub use filter::{AdmissionFilter, AdmitAll, AnchoredVariables, SafeRule};
pub use fixed_terms::FixedTerms;
pub use key::{correspondence, EquivalenceKey};
pub use profile::{RefinementProfile, RoundStats};
pub use state::ClauseRefinementState;
