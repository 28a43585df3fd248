//! Admission filters for grounded candidate literals

use crate::logic::{Literal, Variable};
use indexmap::IndexSet;
use std::collections::HashSet;

/// Decides whether a grounded candidate may extend a clause body
pub trait AdmissionFilter {
    fn admit(&self, head: &Literal, body: &IndexSet<Literal>, candidate: &Literal) -> bool;
}

/// Plain predicates over the candidate alone
impl<F> AdmissionFilter for F
where
    F: Fn(&Literal) -> bool,
{
    fn admit(&self, _head: &Literal, _body: &IndexSet<Literal>, candidate: &Literal) -> bool {
        self(candidate)
    }
}

/// Admits every candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmitAll;

impl AdmissionFilter for AdmitAll {
    fn admit(&self, _head: &Literal, _body: &IndexSet<Literal>, _candidate: &Literal) -> bool {
        true
    }
}

/// Admits a candidate only if the extended rule is safe: every variable of
/// the head and of every negated body literal occurs in a positive body
/// literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeRule;

impl SafeRule {
    pub fn is_safe(head: &Literal, body: &IndexSet<Literal>) -> bool {
        Self::check(head, body.iter())
    }

    /// Whether `head :- body, candidate` would be safe
    pub fn will_rule_be_safe(
        head: &Literal,
        body: &IndexSet<Literal>,
        candidate: &Literal,
    ) -> bool {
        Self::check(head, body.iter().chain(std::iter::once(candidate)))
    }

    fn check<'a>(head: &Literal, body: impl Iterator<Item = &'a Literal> + Clone) -> bool {
        let bound: HashSet<Variable> = body
            .clone()
            .filter(|lit| !lit.is_negated())
            .flat_map(Literal::variables)
            .collect();

        let mut required = head
            .variables()
            .chain(body.filter(|lit| lit.is_negated()).flat_map(Literal::variables));
        required.all(|v| bound.contains(&v))
    }
}

impl AdmissionFilter for SafeRule {
    fn admit(&self, head: &Literal, body: &IndexSet<Literal>, candidate: &Literal) -> bool {
        Self::will_rule_be_safe(head, body, candidate)
    }
}

/// Admits a candidate only if each of its variables already occurs in the
/// head or the body
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchoredVariables;

impl AdmissionFilter for AnchoredVariables {
    fn admit(&self, head: &Literal, body: &IndexSet<Literal>, candidate: &Literal) -> bool {
        let known: HashSet<Variable> = head
            .variables()
            .chain(body.iter().flat_map(Literal::variables))
            .collect();
        candidate.variables().all(|v| known.contains(&v))
    }
}
