use std::collections::HashSet;

use super::config::{EvaluationConfig, ScoringConfig};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Weights may be any finite number; they are not required to sum to 1.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let Some(ref parameters) = config.parameters else {
        return Ok(());
    };

    if parameters.is_empty() {
        errors.push("scoring.parameters: must define at least one parameter".to_string());
    }

    let mut seen_names = HashSet::new();
    for (i, param) in parameters.iter().enumerate() {
        let name = param.name.trim();
        if name.is_empty() {
            errors.push(format!("scoring.parameters[{}].name: must not be empty", i));
        } else if !seen_names.insert(name.to_lowercase()) {
            errors.push(format!(
                "scoring.parameters[{}].name: duplicate parameter '{}'",
                i, name
            ));
        }

        if !param.weight.is_finite() {
            errors.push(format!(
                "scoring.parameters[{}].weight: must be a finite number, got {}",
                i, param.weight
            ));
        }

        if let EvaluationConfig::Linear(ref terms) = param.evaluation {
            if terms.is_empty() {
                errors.push(format!(
                    "scoring.parameters[{}].evaluation.linear: must list at least one attribute",
                    i
                ));
            }
            for (attribute, weight) in terms {
                if !weight.is_finite() || *weight < 0.0 {
                    errors.push(format!(
                        "scoring.parameters[{}].evaluation.linear.{}: must be non-negative, got {}",
                        i, attribute, weight
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
