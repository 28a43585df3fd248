//! Revision operator selection

use crate::error::{OslrError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Scores the revision an operator would make on a batch of examples
pub trait OperatorEvaluator<E> {
    fn name(&self) -> &str;

    /// Score the revision, or `None` when the operator does not apply.
    fn evaluate(&mut self, examples: &[E]) -> Option<f64>;
}

/// Picks the operator best suited to revise the theory for `examples`
pub trait RevisionOperatorSelector<E> {
    fn select_operator(&mut self, examples: &[E]) -> Option<OperatorEvaluation>;
}

/// Which way a score improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricDirection {
    /// Whether `candidate` strictly improves on `incumbent`
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            MetricDirection::HigherIsBetter => candidate > incumbent,
            MetricDirection::LowerIsBetter => candidate < incumbent,
        }
    }
}

/// The evaluator chosen by a selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorEvaluation {
    /// Position of the evaluator in declaration order
    pub index: usize,
    pub name: String,
    /// `None` when the choice was made without evaluating
    pub score: Option<f64>,
}

/// Evaluates every operator and keeps the best score.
///
/// Ties go to the evaluator declared first. A lone evaluator is returned
/// without being evaluated.
pub struct BestRevisionOperatorSelector<E> {
    evaluators: Vec<Box<dyn OperatorEvaluator<E>>>,
    direction: MetricDirection,
}

impl<E> BestRevisionOperatorSelector<E> {
    pub fn new(
        evaluators: Vec<Box<dyn OperatorEvaluator<E>>>,
        direction: MetricDirection,
    ) -> Result<Self> {
        if evaluators.is_empty() {
            return Err(OslrError::InvalidConfig(
                "revision operator selector needs at least one evaluator".to_string(),
            ));
        }
        Ok(BestRevisionOperatorSelector {
            evaluators,
            direction,
        })
    }

    pub fn direction(&self) -> MetricDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    pub fn evaluator(&self, index: usize) -> Option<&dyn OperatorEvaluator<E>> {
        self.evaluators.get(index).map(|e| e.as_ref())
    }
}

impl<E> RevisionOperatorSelector<E> for BestRevisionOperatorSelector<E> {
    fn select_operator(&mut self, examples: &[E]) -> Option<OperatorEvaluation> {
        if let [only] = self.evaluators.as_slice() {
            return Some(OperatorEvaluation {
                index: 0,
                name: only.name().to_string(),
                score: None,
            });
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, evaluator) in self.evaluators.iter_mut().enumerate() {
            let Some(score) = evaluator.evaluate(examples).filter(|s| !s.is_nan()) else {
                trace!(operator = evaluator.name(), "operator not applicable");
                continue;
            };
            trace!(operator = evaluator.name(), score, "operator evaluated");
            if best.map_or(true, |(_, incumbent)| self.direction.improves(score, incumbent)) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        let name = self.evaluators[index].name().to_string();
        debug!(operator = %name, score, "selected revision operator");
        Some(OperatorEvaluation {
            index,
            name,
            score: Some(score),
        })
    }
}
