//! Property-based tests for refinement rounds using proptest.

use super::driver::{refine, RefinementDriver};
use super::filter::{AdmitAll, AnchoredVariables};
use super::state::ClauseRefinementState;
use crate::config::RefinementConfig;
use crate::logic::{Constant, Interner, Literal, PredicateSymbol, Term, Variable};
use proptest::prelude::*;
use std::collections::HashSet;

/// Argument description (before interning)
#[derive(Debug, Clone)]
enum ArgDesc {
    Var(u8),   // X0-X4, X0 and X1 are head variables
    Const(u8), // c0-c1
}

#[derive(Debug, Clone)]
struct LiteralDesc {
    predicate: u8, // q0 is unary, q1 and q2 are binary
    args: Vec<ArgDesc>,
    negated: bool,
}

fn arity(predicate: u8) -> usize {
    if predicate == 0 {
        1
    } else {
        2
    }
}

fn arb_arg() -> impl Strategy<Value = ArgDesc> {
    prop_oneof![
        4 => (0..5u8).prop_map(ArgDesc::Var),
        1 => (0..2u8).prop_map(ArgDesc::Const),
    ]
}

fn arb_literal() -> impl Strategy<Value = LiteralDesc> {
    (0..3u8, proptest::bool::weighted(0.15)).prop_flat_map(|(predicate, negated)| {
        proptest::collection::vec(arb_arg(), arity(predicate)).prop_map(move |args| LiteralDesc {
            predicate,
            args,
            negated,
        })
    })
}

fn arb_pool() -> impl Strategy<Value = Vec<LiteralDesc>> {
    proptest::collection::vec(arb_literal(), 0..7)
}

fn build_term(desc: &ArgDesc, interner: &mut Interner) -> Term {
    match desc {
        ArgDesc::Var(i) => {
            let id = interner.intern_variable(&format!("X{}", i));
            Term::Variable(Variable::new(id))
        }
        ArgDesc::Const(i) => {
            let id = interner.intern_constant(&format!("c{}", i));
            Term::Constant(Constant::new(id))
        }
    }
}

fn build_literal(desc: &LiteralDesc, interner: &mut Interner) -> Literal {
    let id = interner.intern_predicate(&format!("q{}", desc.predicate));
    let predicate = PredicateSymbol::new(id, arity(desc.predicate) as u8);
    let args = desc.args.iter().map(|a| build_term(a, interner)).collect();
    if desc.negated {
        Literal::negative(predicate, args)
    } else {
        Literal::positive(predicate, args)
    }
}

/// The head `h(X0, X1)` plus the pool, sharing one interner
fn build(pool: &[LiteralDesc]) -> (Interner, Literal, Vec<Literal>) {
    let mut interner = Interner::new();
    let h = PredicateSymbol::new(interner.intern_predicate("h"), 2);
    let head = Literal::positive(
        h,
        vec![
            build_term(&ArgDesc::Var(0), &mut interner),
            build_term(&ArgDesc::Var(1), &mut interner),
        ],
    );
    let pool = pool.iter().map(|d| build_literal(d, &mut interner)).collect();
    (interner, head, pool)
}

/// Rename every variable outside the head to a fresh `Y` variable
fn rename_free(literal: &Literal, head: &Literal, interner: &mut Interner) -> Literal {
    let args = literal
        .args
        .iter()
        .map(|t| match t {
            Term::Variable(v) if !head.mentions(t) => {
                let name = format!("Y{}", v.name(interner));
                Term::variable(interner, &name)
            }
            _ => *t,
        })
        .collect();
    Literal {
        predicate: literal.predicate,
        args,
        polarity: literal.polarity,
    }
}

fn search_config() -> RefinementConfig {
    RefinementConfig {
        max_body_length: 3,
        max_states: 200,
        enable_profiling: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn round_is_deterministic(descs in arb_pool(), start_at in 0..4usize) {
        let (_interner, head, pool) = build(&descs);
        let root = ClauseRefinementState::new(head);

        let first = refine(&root, &pool, &AdmitAll, start_at);
        let second = refine(&root, &pool, &AdmitAll, start_at);

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.successors.iter().zip(&second.successors) {
            prop_assert_eq!(a.to_horn_clause(), b.to_horn_clause());
            prop_assert_eq!(a.substitution_maps(), b.substitution_maps());
            prop_assert_eq!(a.resume_index(), b.resume_index());
        }
        prop_assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn successor_keys_are_distinct(descs in arb_pool()) {
        let (_interner, head, pool) = build(&descs);
        let round = refine(&ClauseRefinementState::new(head), &pool, &AdmitAll, 0);

        let mut seen = HashSet::new();
        for successor in &round.successors {
            let key = successor.equivalence_key().cloned();
            prop_assert!(key.is_some());
            prop_assert!(seen.insert(key), "duplicate key emitted");
        }
    }

    #[test]
    fn successors_hold_at_least_one_map(descs in arb_pool()) {
        let (_interner, head, pool) = build(&descs);
        let round = refine(&ClauseRefinementState::new(head), &pool, &AdmitAll, 0);

        for successor in &round.successors {
            prop_assert!(!successor.substitution_maps().is_empty());
            prop_assert!(successor.body().iter().all(|l| !l.is_negated()));
        }
        prop_assert_eq!(
            round.stats.emitted + round.stats.merged + round.stats.merges_dropped,
            round.stats.groundings - round.stats.filtered - round.stats.already_in_body
        );
    }

    #[test]
    fn resume_index_moves_forward(descs in arb_pool(), start_at in 0..4usize) {
        let (_interner, head, pool) = build(&descs);
        let round = refine(&ClauseRefinementState::new(head.clone()), &pool, &AdmitAll, start_at);
        for successor in &round.successors {
            prop_assert!(successor.resume_index() > start_at);
            prop_assert!(successor.resume_index() <= pool.len());
        }

        let driver = RefinementDriver::new(search_config()).unwrap();
        for state in driver.search(head, &pool, &AdmitAll).states {
            prop_assert!(state.body().len() <= state.resume_index());
            prop_assert!(state.resume_index() <= pool.len());
        }
    }

    #[test]
    fn renamed_candidates_collapse(desc in arb_literal()) {
        let (mut interner, head, pool) = build(std::slice::from_ref(&desc));
        let original = pool[0].clone();
        let renamed = rename_free(&original, &head, &mut interner);
        let root = ClauseRefinementState::new(head);

        let alone = refine(&root, &[original.clone()], &AdmitAll, 0);
        let doubled = refine(&root, &[original.clone(), renamed.clone()], &AdmitAll, 0);

        prop_assert_eq!(alone.len(), doubled.len());
        if let Some(successor) = doubled.successors.first() {
            let maps = successor.substitution_maps();
            prop_assert_eq!(maps.len(), 2);
            prop_assert_eq!(maps[1].apply(&renamed), original);
        }
    }

    #[test]
    fn anchored_filter_keeps_body_variables_bound(descs in arb_pool()) {
        let (_interner, head, pool) = build(&descs);
        let driver = RefinementDriver::new(search_config()).unwrap();

        for state in driver.search(head.clone(), &pool, &AnchoredVariables).states {
            let mut known: HashSet<Variable> = head.variables().collect();
            for literal in state.body() {
                for var in literal.variables() {
                    prop_assert!(
                        known.contains(&var),
                        "body variable not bound by head or earlier body"
                    );
                }
                known.extend(literal.variables());
            }
        }
    }
}
