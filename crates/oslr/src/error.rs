//! Error types for the refinement engine

use crate::logic::interner::PredicateId;
use thiserror::Error;

/// A candidate literal whose argument count disagrees with its predicate.
///
/// Raised when the candidate is examined, not when the pool is built, and it
/// only aborts that candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed candidate #{index}: predicate {predicate} expects {expected} arguments, found {found}")]
pub struct MalformedLiteralError {
    /// Position of the literal in the candidate pool
    pub index: usize,
    pub predicate: PredicateId,
    pub expected: u8,
    pub found: usize,
}

#[derive(Error, Debug)]
pub enum OslrError {
    #[error(transparent)]
    MalformedLiteral(#[from] MalformedLiteralError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OslrError>;
