use serde::Serialize;
use std::fmt;

use super::config::{EvaluationConfig, ParameterConfig, ScoringConfig};
use super::factors::{Evaluation, EvaluationFunction, LinearEvaluation};
use crate::catalog::CatalogRecord;

/// A named, weighted evaluation function.
pub struct EvaluationParameter {
    pub name: String,
    pub weight: f64,
    evaluation: Box<dyn EvaluationFunction>,
}

impl EvaluationParameter {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        evaluation: impl EvaluationFunction + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            evaluation: Box::new(evaluation),
        }
    }

    /// Unweighted sub-score for `catalog`.
    pub fn evaluate(&self, catalog: &CatalogRecord) -> f64 {
        self.evaluation.evaluate(catalog)
    }
}

impl fmt::Debug for EvaluationParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationParameter")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl From<&ParameterConfig> for EvaluationParameter {
    fn from(config: &ParameterConfig) -> Self {
        let evaluation = match &config.evaluation {
            EvaluationConfig::Compliance => Evaluation::Compliance,
            EvaluationConfig::Correctness => Evaluation::Correctness,
            EvaluationConfig::Completeness => Evaluation::Completeness,
            EvaluationConfig::Linear(terms) => Evaluation::Linear(LinearEvaluation::new(
                terms.iter().map(|(k, w)| (k.clone(), *w)),
            )),
        };
        EvaluationParameter::new(config.name.clone(), config.weight, evaluation)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterContribution {
    pub name: String,
    pub weight: f64,
    pub raw: f64,      // Evaluation output before weighting
    pub weighted: f64, // weight * raw, the term added to the total
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: Vec<ParameterContribution>,
}

/// Weighted-sum scorer over an ordered parameter list.
///
/// Holds no mutable state, so one instance can be shared across threads and
/// scoring the same record always yields a bit-identical result.
#[derive(Debug)]
pub struct Scorer {
    parameters: Vec<EvaluationParameter>,
}

impl Scorer {
    pub fn new(parameters: Vec<EvaluationParameter>) -> Self {
        Self { parameters }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let parameters = config
            .effective_parameters()
            .iter()
            .map(EvaluationParameter::from)
            .collect();
        Self::new(parameters)
    }

    /// Compliance 0.4, Correctness 0.4, Completeness 0.2.
    pub fn reference() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn parameters(&self) -> &[EvaluationParameter] {
        &self.parameters
    }

    /// Sum of `weight * evaluate(catalog)` over all parameters, in order.
    pub fn score(&self, catalog: &CatalogRecord) -> f64 {
        self.parameters
            .iter()
            .map(|param| param.weight * param.evaluate(catalog))
            .sum()
    }

    /// Same total as [`Scorer::score`], plus each parameter's contribution.
    pub fn score_with_breakdown(&self, catalog: &CatalogRecord) -> ScoreResult {
        let breakdown: Vec<ParameterContribution> = self
            .parameters
            .iter()
            .map(|param| {
                let raw = param.evaluate(catalog);
                ParameterContribution {
                    name: param.name.clone(),
                    weight: param.weight,
                    raw,
                    weighted: param.weight * raw,
                }
            })
            .collect();

        ScoreResult {
            score: breakdown.iter().map(|c| c.weighted).sum(),
            breakdown,
        }
    }
}
