//! Choosing which revision operator to apply to a theory
//!
//! The revision layer owns a set of operators (add a rule, extend a rule,
//! and so on). Each comes with an evaluator that scores the revision it
//! would make against a batch of target examples; a selector picks one.

pub mod selector;

pub use selector::{
    BestRevisionOperatorSelector, MetricDirection, OperatorEvaluation, OperatorEvaluator,
    RevisionOperatorSelector,
};
