use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main scoring configuration.
///
/// Lists the weighted evaluation parameters combined into a catalog score.
/// When `parameters` is omitted the reference set is used.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   parameters:
///     - { name: Compliance, weight: 0.4, evaluation: compliance }
///     - { name: Correctness, weight: 0.4, evaluation: correctness }
///     - name: Presentation
///       weight: 0.2
///       evaluation:
///         linear: { image_present: 0.5, product_details: 0.5 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weighted parameters, summed in order. Weights are not normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterConfig>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            parameters: Some(default_parameters()),
        }
    }
}

impl ScoringConfig {
    /// Parameters to score with: the configured list, or the reference set.
    pub fn effective_parameters(&self) -> Vec<ParameterConfig> {
        self.parameters.clone().unwrap_or_else(default_parameters)
    }
}

/// Reference parameters: Compliance 0.4, Correctness 0.4, Completeness 0.2.
pub fn default_parameters() -> Vec<ParameterConfig> {
    vec![
        ParameterConfig {
            name: "Compliance".to_string(),
            weight: 0.4,
            evaluation: EvaluationConfig::Compliance,
        },
        ParameterConfig {
            name: "Correctness".to_string(),
            weight: 0.4,
            evaluation: EvaluationConfig::Correctness,
        },
        ParameterConfig {
            name: "Completeness".to_string(),
            weight: 0.2,
            evaluation: EvaluationConfig::Completeness,
        },
    ]
}

/// A single named, weighted evaluation parameter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterConfig {
    pub name: String,

    /// Multiplier applied to the evaluation's sub-score
    pub weight: f64,

    pub evaluation: EvaluationConfig,
}

/// Which evaluation function a parameter uses.
///
/// Built-ins are written as a bare name (`compliance`); a linear evaluation
/// maps attribute names to sub-weights (`linear: { price_present: 0.5 }`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationConfig {
    Compliance,
    Correctness,
    Completeness,
    Linear(BTreeMap<String, f64>),
}
